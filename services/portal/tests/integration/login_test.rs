use advising_portal::error::PortalError;
use advising_portal::usecase::login::{LoginInput, LoginUseCase};

use crate::helpers::{
    MockMailer, MockSessionRepo, MockUserRepo, TEST_PASSWORD, test_admin, test_session,
    test_student, ticket,
};

fn usecase(users: MockUserRepo) -> LoginUseCase<MockUserRepo, MockSessionRepo, MockMailer> {
    LoginUseCase {
        users,
        sessions: MockSessionRepo::empty(),
        mailer: MockMailer::new(),
    }
}

fn input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.to_owned(),
        password: password.to_owned(),
    }
}

#[tokio::test]
async fn should_mint_code_and_open_unverified_session() {
    let uc = usecase(MockUserRepo::new(vec![test_student("ada@gmail.com")]));
    let users = uc.users.handle();
    let sessions = uc.sessions.handle();
    let sent = uc.mailer.handle();

    let out = uc
        .execute(input("Ada@Gmail.com", TEST_PASSWORD), None)
        .await
        .unwrap();

    assert_eq!(out.email, "ada@gmail.com");
    assert!(!out.is_admin);
    assert!(!out.resent);
    assert!(!out.session.otp_verified);

    let stored = users.lock().unwrap()[0].login_otp.clone().unwrap();
    let mails = sent.lock().unwrap();
    assert_eq!(mails[0].subject, "Your OTP for login");
    assert!(mails[0].body.contains(&stored.code));
    assert_eq!(sessions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_resend_same_code_while_live() {
    let mut user = test_student("ada@gmail.com");
    let live = ticket("424242", 120);
    user.login_otp = Some(live.clone());
    let uc = usecase(MockUserRepo::new(vec![user]));
    let users = uc.users.handle();
    let sent = uc.mailer.handle();

    let out = uc
        .execute(input("ada@gmail.com", TEST_PASSWORD), None)
        .await
        .unwrap();

    assert!(out.resent);
    assert_eq!(users.lock().unwrap()[0].login_otp, Some(live));
    assert!(sent.lock().unwrap()[0].body.contains("424242"));
}

#[tokio::test]
async fn should_mint_new_code_once_previous_expired() {
    let mut user = test_student("ada@gmail.com");
    user.login_otp = Some(ticket("000000", -1));
    let uc = usecase(MockUserRepo::new(vec![user]));
    let users = uc.users.handle();

    let out = uc
        .execute(input("ada@gmail.com", TEST_PASSWORD), None)
        .await
        .unwrap();

    assert!(!out.resent);
    let stored = users.lock().unwrap()[0].login_otp.clone().unwrap();
    assert_ne!(stored.code, "000000");
    assert!(stored.expires_at > chrono::Utc::now());
}

#[tokio::test]
async fn should_report_admin_flag() {
    let uc = usecase(MockUserRepo::new(vec![test_admin("admin@gmail.com")]));

    let out = uc
        .execute(input("admin@gmail.com", TEST_PASSWORD), None)
        .await
        .unwrap();

    assert!(out.is_admin);
    assert!(out.session.is_admin);
}

#[tokio::test]
async fn should_replace_previous_session() {
    let mut uc = usecase(MockUserRepo::new(vec![test_student("ada@gmail.com")]));
    uc.sessions = MockSessionRepo::new(vec![test_session("old-sid", "ada@gmail.com", false, true)]);
    let sessions = uc.sessions.handle();

    let out = uc
        .execute(input("ada@gmail.com", TEST_PASSWORD), Some("old-sid"))
        .await
        .unwrap();

    let sessions = sessions.lock().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, out.session.id);
}

#[tokio::test]
async fn should_reject_unknown_email() {
    let uc = usecase(MockUserRepo::empty());

    let result = uc.execute(input("ghost@gmail.com", TEST_PASSWORD), None).await;
    assert!(
        matches!(result, Err(PortalError::UnknownEmail)),
        "expected UnknownEmail, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let uc = usecase(MockUserRepo::new(vec![test_student("ada@gmail.com")]));
    let sessions = uc.sessions.handle();

    let result = uc.execute(input("ada@gmail.com", "Wr0ng!pass"), None).await;
    assert!(
        matches!(result, Err(PortalError::InvalidPassword)),
        "expected InvalidPassword, got {result:?}"
    );
    assert!(sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_missing_credentials() {
    let uc = usecase(MockUserRepo::empty());

    let result = uc.execute(input("ada@gmail.com", ""), None).await;
    assert!(
        matches!(result, Err(PortalError::MissingCredentials)),
        "expected MissingCredentials, got {result:?}"
    );
}
