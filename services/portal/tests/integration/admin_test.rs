use chrono::{Duration, Utc};

use advising_domain::advising::AdvisingStatus;
use advising_domain::course::CatalogKind;
use advising_portal::error::PortalError;
use advising_portal::usecase::admin::{
    DecideAdvisingSheetInput, DecideAdvisingSheetUseCase, GetAdvisingSheetUseCase,
    ListAdvisingSheetsUseCase,
};
use advising_portal::usecase::course::{
    ListCoursesUseCase, ListEnabledCoursesUseCase, ToggleCourseUseCase,
};

use crate::helpers::{
    MockAdvisingRepo, MockCourseRepo, MockMailer, entry, test_course, test_record, test_student,
};

const STUDENT: &str = "ada@gmail.com";

fn decision(status: &str, message: &str) -> DecideAdvisingSheetInput {
    DecideAdvisingSheetInput {
        status: Some(status.to_owned()),
        message: Some(message.to_owned()),
    }
}

fn pending_sheet_repo() -> MockAdvisingRepo {
    MockAdvisingRepo::new(vec![test_record(
        4,
        STUDENT,
        "Fall 2025",
        AdvisingStatus::Pending,
        vec![entry(500, "CS 550")],
        Utc::now(),
    )])
    .with_students(vec![test_student(STUDENT)])
}

// ── Sheets ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_sheets_with_student_names() {
    let now = Utc::now();
    let uc = ListAdvisingSheetsUseCase {
        advising: MockAdvisingRepo::new(vec![
            test_record(1, STUDENT, "Spring 2025", AdvisingStatus::Approved, vec![], now - Duration::days(90)),
            test_record(2, STUDENT, "Fall 2025", AdvisingStatus::Pending, vec![], now),
        ])
        .with_students(vec![test_student(STUDENT)]),
    };

    let sheets = uc.execute().await.unwrap();

    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].id, 2);
    assert_eq!(sheets[0].first_name, "Ada");
    assert_eq!(sheets[0].last_name, "Lovelace");
    assert_eq!(sheets[0].uin, "012345678");
}

#[tokio::test]
async fn should_fetch_full_sheet() {
    let uc = GetAdvisingSheetUseCase {
        advising: pending_sheet_repo(),
    };

    let sheet = uc.execute(4).await.unwrap();
    assert_eq!(sheet.record.course_plan, vec![entry(500, "CS 550")]);
    assert_eq!(sheet.first_name, "Ada");

    let result = uc.execute(99).await;
    assert!(
        matches!(result, Err(PortalError::AdvisingSheetNotFound)),
        "expected AdvisingSheetNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_record_decision_and_notify_student() {
    let uc = DecideAdvisingSheetUseCase {
        advising: pending_sheet_repo(),
        mailer: MockMailer::new(),
    };
    let records = uc.advising.handle();
    let sent = uc.mailer.handle();

    uc.execute(4, decision("Approved", " Looks good. "))
        .await
        .unwrap();

    let records = records.lock().unwrap();
    assert_eq!(records[0].status, AdvisingStatus::Approved);
    assert_eq!(records[0].admin_message.as_deref(), Some("Looks good."));

    let mails = sent.lock().unwrap();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].to, STUDENT);
    assert_eq!(mails[0].subject, "Advising sheet Approved: Fall 2025");
    assert!(mails[0].body.contains("Looks good."));
}

#[tokio::test]
async fn should_require_status_and_message() {
    let uc = DecideAdvisingSheetUseCase {
        advising: pending_sheet_repo(),
        mailer: MockMailer::new(),
    };

    for input in [
        DecideAdvisingSheetInput {
            status: None,
            message: Some("ok".to_owned()),
        },
        decision("Approved", "   "),
    ] {
        let result = uc.execute(4, input).await;
        assert!(
            matches!(result, Err(PortalError::MissingDecision)),
            "expected MissingDecision, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_reject_unknown_status() {
    let uc = DecideAdvisingSheetUseCase {
        advising: pending_sheet_repo(),
        mailer: MockMailer::new(),
    };
    let records = uc.advising.handle();

    let result = uc.execute(4, decision("approved", "ok")).await;
    assert!(
        matches!(result, Err(PortalError::InvalidStatus)),
        "expected InvalidStatus, got {result:?}"
    );
    assert_eq!(records.lock().unwrap()[0].status, AdvisingStatus::Pending);
}

#[tokio::test]
async fn should_fail_decision_for_missing_sheet() {
    let uc = DecideAdvisingSheetUseCase {
        advising: MockAdvisingRepo::empty(),
        mailer: MockMailer::new(),
    };
    let sent = uc.mailer.handle();

    let result = uc.execute(4, decision("Rejected", "Missing prerequisites")).await;
    assert!(
        matches!(result, Err(PortalError::AdvisingSheetNotFound)),
        "expected AdvisingSheetNotFound, got {result:?}"
    );
    assert!(sent.lock().unwrap().is_empty());
}

// ── Catalogs ─────────────────────────────────────────────────────────────────

fn catalog() -> MockCourseRepo {
    MockCourseRepo::new(vec![
        (CatalogKind::Prerequisite, test_course(1, 300, "CS 350", true)),
        (CatalogKind::Prerequisite, test_course(2, 500, "CS 550", true)),
        (CatalogKind::Prerequisite, test_course(3, 100, "CS 150", false)),
        (CatalogKind::Plan, test_course(1, 600, "CS 620", true)),
        (CatalogKind::Plan, test_course(2, 500, "CS 560", false)),
    ])
}

#[tokio::test]
async fn should_restrict_prerequisites_to_undergraduate_levels() {
    let uc = ListCoursesUseCase { courses: catalog() };

    let names: Vec<String> = uc
        .prerequisites()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.course_name)
        .collect();
    assert_eq!(names, vec!["CS 150", "CS 350"]);

    assert_eq!(uc.execute(CatalogKind::Plan).await.unwrap().len(), 2);
}

#[tokio::test]
async fn should_offer_only_enabled_courses_to_students() {
    let uc = ListEnabledCoursesUseCase { courses: catalog() };

    let plan = uc.execute(CatalogKind::Plan).await.unwrap();
    assert_eq!(plan, vec![test_course(1, 600, "CS 620", true)]);
}

#[tokio::test]
async fn should_toggle_course_in_its_catalog_only() {
    let uc = ToggleCourseUseCase { courses: catalog() };
    let courses = uc.courses.handle();

    uc.execute(CatalogKind::Plan, Some(2), Some(true))
        .await
        .unwrap();

    let courses = courses.lock().unwrap();
    let enabled = |kind: CatalogKind, id: i32| {
        courses
            .iter()
            .find(|(k, c)| *k == kind && c.id == id)
            .map(|(_, c)| c.enabled)
    };
    assert_eq!(enabled(CatalogKind::Plan, 2), Some(true));
    assert_eq!(enabled(CatalogKind::Prerequisite, 2), Some(true));
    assert_eq!(enabled(CatalogKind::Prerequisite, 3), Some(false));
}

#[tokio::test]
async fn should_reject_incomplete_toggle() {
    let uc = ToggleCourseUseCase { courses: catalog() };

    let result = uc.execute(CatalogKind::Plan, Some(1), None).await;
    assert!(
        matches!(result, Err(PortalError::MissingCourseToggle)),
        "expected MissingCourseToggle, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_toggle_of_unknown_course() {
    let uc = ToggleCourseUseCase { courses: catalog() };

    let result = uc.execute(CatalogKind::Plan, Some(42), Some(false)).await;
    assert!(
        matches!(result, Err(PortalError::CourseNotFound)),
        "expected CourseNotFound, got {result:?}"
    );
}
