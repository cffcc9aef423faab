use chrono::{Duration, Utc};

use advising_domain::advising::{AdvisingStatus, CourseEntry};
use advising_portal::error::PortalError;
use advising_portal::usecase::advising::{
    AdvisingForm, GetAdvisingRecordUseCase, ListAdvisingHistoryUseCase, SubmitAdvisingUseCase,
    TakenCoursesUseCase, UpdateAdvisingUseCase,
};

use crate::helpers::{MockAdvisingRepo, entry, test_record};

const STUDENT: &str = "ada@gmail.com";

fn form(plan: Vec<CourseEntry>) -> AdvisingForm {
    AdvisingForm {
        last_term: "Spring 2025".to_owned(),
        last_gpa: Some(3.7),
        prerequisites: vec![entry(300, "CS 350")],
        course_plan: plan,
    }
}

// ── SubmitAdvisingUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_new_sheet_as_pending() {
    let uc = SubmitAdvisingUseCase {
        advising: MockAdvisingRepo::empty(),
    };
    let records = uc.advising.handle();

    let id = uc
        .execute(STUDENT, " Fall 2025 ", form(vec![entry(500, "CS 550")]))
        .await
        .unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].term, "Fall 2025");
    assert_eq!(records[0].status, AdvisingStatus::Pending);
    assert_eq!(records[0].last_gpa, 3.7);
    assert_eq!(records[0].course_plan, vec![entry(500, "CS 550")]);
}

#[tokio::test]
async fn should_reject_second_sheet_for_same_term() {
    let existing = test_record(1, STUDENT, "Fall 2025", AdvisingStatus::Pending, vec![], Utc::now());
    let uc = SubmitAdvisingUseCase {
        advising: MockAdvisingRepo::new(vec![existing]),
    };

    let result = uc.execute(STUDENT, "Fall 2025", form(vec![])).await;
    assert!(
        matches!(&result, Err(PortalError::DuplicateTerm(term)) if term == "Fall 2025"),
        "expected DuplicateTerm, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_courses_planned_in_other_terms() {
    let earlier = test_record(
        1,
        STUDENT,
        "Spring 2025",
        AdvisingStatus::Approved,
        vec![entry(500, "CS 550")],
        Utc::now() - Duration::days(120),
    );
    let uc = SubmitAdvisingUseCase {
        advising: MockAdvisingRepo::new(vec![earlier]),
    };
    let records = uc.advising.handle();

    let result = uc
        .execute(
            STUDENT,
            "Fall 2025",
            form(vec![entry(500, "cs 550"), entry(600, "CS 620")]),
        )
        .await;

    assert!(
        matches!(&result, Err(PortalError::CoursesAlreadyTaken(names)) if names == &vec!["cs 550".to_owned()]),
        "expected CoursesAlreadyTaken, got {result:?}"
    );
    assert_eq!(records.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_ignore_other_students_history() {
    let other = test_record(
        1,
        "bob@gmail.com",
        "Spring 2025",
        AdvisingStatus::Approved,
        vec![entry(500, "CS 550")],
        Utc::now(),
    );
    let uc = SubmitAdvisingUseCase {
        advising: MockAdvisingRepo::new(vec![other]),
    };

    assert!(
        uc.execute(STUDENT, "Fall 2025", form(vec![entry(500, "CS 550")]))
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn should_reject_incomplete_form() {
    let uc = SubmitAdvisingUseCase {
        advising: MockAdvisingRepo::empty(),
    };

    let mut no_gpa = form(vec![]);
    no_gpa.last_gpa = None;
    let mut no_term = form(vec![]);
    no_term.last_term = " ".to_owned();

    for (term, form) in [("Fall 2025", no_gpa), ("Fall 2025", no_term), ("", form(vec![]))] {
        let result = uc.execute(STUDENT, term, form).await;
        assert!(
            matches!(result, Err(PortalError::MissingFields)),
            "expected MissingFields, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_reject_malformed_course_entry() {
    let uc = SubmitAdvisingUseCase {
        advising: MockAdvisingRepo::empty(),
    };

    let result = uc
        .execute(STUDENT, "Fall 2025", form(vec![entry(500, "  ")]))
        .await;
    assert!(
        matches!(result, Err(PortalError::InvalidCourseEntry)),
        "expected InvalidCourseEntry, got {result:?}"
    );
}

// ── UpdateAdvisingUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_replace_course_lists_while_pending() {
    let submitted = Utc::now() - Duration::days(1);
    let existing = test_record(
        7,
        STUDENT,
        "Fall 2025",
        AdvisingStatus::Pending,
        vec![entry(500, "CS 550")],
        submitted,
    );
    let uc = UpdateAdvisingUseCase {
        advising: MockAdvisingRepo::new(vec![existing]),
    };
    let records = uc.advising.handle();

    // The sheet's own plan must not count as already taken.
    uc.execute(
        STUDENT,
        "Fall 2025",
        form(vec![entry(500, "CS 550"), entry(600, "CS 620")]),
    )
    .await
    .unwrap();

    let records = records.lock().unwrap();
    assert_eq!(
        records[0].course_plan,
        vec![entry(500, "CS 550"), entry(600, "CS 620")]
    );
    assert_eq!(records[0].last_gpa, 3.7);
    assert!(records[0].date_submitted > submitted);
    assert_eq!(records[0].status, AdvisingStatus::Pending);
}

#[tokio::test]
async fn should_lock_decided_sheets() {
    for status in [AdvisingStatus::Approved, AdvisingStatus::Rejected] {
        let existing = test_record(1, STUDENT, "Fall 2025", status, vec![], Utc::now());
        let uc = UpdateAdvisingUseCase {
            advising: MockAdvisingRepo::new(vec![existing]),
        };

        let result = uc.execute(STUDENT, "Fall 2025", form(vec![])).await;
        assert!(
            matches!(result, Err(PortalError::AdvisingLocked)),
            "expected AdvisingLocked for {status}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_fail_update_without_sheet() {
    let uc = UpdateAdvisingUseCase {
        advising: MockAdvisingRepo::empty(),
    };

    let result = uc.execute(STUDENT, "Fall 2025", form(vec![])).await;
    assert!(
        matches!(result, Err(PortalError::AdvisingRecordNotFound)),
        "expected AdvisingRecordNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_update_adding_course_from_other_term() {
    let records = vec![
        test_record(
            1,
            STUDENT,
            "Spring 2025",
            AdvisingStatus::Approved,
            vec![entry(400, "CS 450")],
            Utc::now() - Duration::days(120),
        ),
        test_record(2, STUDENT, "Fall 2025", AdvisingStatus::Pending, vec![], Utc::now()),
    ];
    let uc = UpdateAdvisingUseCase {
        advising: MockAdvisingRepo::new(records),
    };

    let result = uc
        .execute(STUDENT, "Fall 2025", form(vec![entry(400, "CS 450")]))
        .await;
    assert!(
        matches!(result, Err(PortalError::CoursesAlreadyTaken(_))),
        "expected CoursesAlreadyTaken, got {result:?}"
    );
}

// ── Reads ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_fetch_own_sheet_by_term() {
    let existing = test_record(3, STUDENT, "Fall 2025", AdvisingStatus::Pending, vec![], Utc::now());
    let uc = GetAdvisingRecordUseCase {
        advising: MockAdvisingRepo::new(vec![existing.clone()]),
    };

    assert_eq!(uc.execute(STUDENT, "Fall 2025").await.unwrap(), existing);

    let result = uc.execute("bob@gmail.com", "Fall 2025").await;
    assert!(
        matches!(result, Err(PortalError::AdvisingRecordNotFound)),
        "expected AdvisingRecordNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_list_history_newest_first() {
    let now = Utc::now();
    let uc = ListAdvisingHistoryUseCase {
        advising: MockAdvisingRepo::new(vec![
            test_record(1, STUDENT, "Spring 2025", AdvisingStatus::Approved, vec![], now - Duration::days(200)),
            test_record(2, STUDENT, "Fall 2025", AdvisingStatus::Pending, vec![], now),
            test_record(3, "bob@gmail.com", "Fall 2025", AdvisingStatus::Pending, vec![], now),
        ]),
    };

    let history = uc.execute(STUDENT).await.unwrap();

    let terms: Vec<&str> = history.iter().map(|h| h.term.as_str()).collect();
    assert_eq!(terms, vec!["Fall 2025", "Spring 2025"]);
    assert_eq!(history[1].status, AdvisingStatus::Approved);
}

#[tokio::test]
async fn should_list_taken_courses_lowercase_and_deduplicated() {
    let now = Utc::now();
    let uc = TakenCoursesUseCase {
        advising: MockAdvisingRepo::new(vec![
            test_record(1, STUDENT, "Spring 2024", AdvisingStatus::Approved, vec![entry(400, "CS 450")], now),
            test_record(2, STUDENT, "Spring 2025", AdvisingStatus::Rejected, vec![entry(400, "cs 450 "), entry(500, "CS 550")], now),
            test_record(3, STUDENT, "Fall 2025", AdvisingStatus::Pending, vec![entry(600, "CS 620")], now),
        ]),
    };

    assert_eq!(
        uc.execute(STUDENT, Some("fall 2025"), None).await.unwrap(),
        vec!["cs 450", "cs 550"]
    );
    assert_eq!(
        uc.execute(STUDENT, None, Some(2)).await.unwrap(),
        vec!["cs 450", "cs 620"]
    );
    assert_eq!(
        uc.execute(STUDENT, Some("  "), None).await.unwrap(),
        vec!["cs 450", "cs 550", "cs 620"]
    );
}
