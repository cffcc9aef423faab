use advising_domain::otp::OtpAction;
use advising_portal::domain::repository::SignupTicketStore;
use advising_portal::domain::types::PendingSignup;
use advising_portal::error::PortalError;
use advising_portal::infra::tickets::InMemorySignupTickets;
use advising_portal::usecase::otp::{
    ResendOtpInput, ResendOtpUseCase, VerifyOtpInput, VerifyOtpOutcome, VerifyOtpUseCase,
};

use crate::helpers::{
    MockMailer, MockPendingRepo, MockSessionRepo, MockUserRepo, test_admin, test_pending,
    test_session, test_student, ticket,
};

type Verify =
    VerifyOtpUseCase<MockUserRepo, MockPendingRepo, InMemorySignupTickets, MockSessionRepo>;

fn verify_usecase(users: MockUserRepo, pending: Vec<PendingSignup>) -> Verify {
    let pending = MockPendingRepo::new(pending, users.handle());
    VerifyOtpUseCase {
        users,
        pending,
        tickets: InMemorySignupTickets::new(),
        sessions: MockSessionRepo::empty(),
    }
}

fn verify_input(email: &str, otp: &str, action: &str) -> VerifyOtpInput {
    VerifyOtpInput {
        email: email.to_owned(),
        otp: otp.to_owned(),
        action: action.to_owned(),
    }
}

// ── VerifyOtpUseCase: signup ─────────────────────────────────────────────────

#[tokio::test]
async fn should_promote_pending_signup_on_correct_code() {
    let uc = verify_usecase(MockUserRepo::empty(), vec![test_pending("ada@gmail.com")]);
    let users = uc.users.handle();
    let pending = uc.pending.handle();
    uc.tickets.put("ada@gmail.com", ticket("123456", 300)).await.unwrap();

    let outcome = uc
        .execute(verify_input("ada@gmail.com", "123456", "signup"), None)
        .await
        .unwrap();

    assert!(matches!(outcome, VerifyOtpOutcome::SignedUp));
    let users = users.lock().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].is_verified);
    assert!(!users[0].is_admin);
    assert!(pending.lock().unwrap().is_empty());
    assert!(uc.tickets.get("ada@gmail.com").await.unwrap().is_none());
}

#[tokio::test]
async fn should_reject_expired_signup_code_even_if_correct() {
    let uc = verify_usecase(MockUserRepo::empty(), vec![test_pending("ada@gmail.com")]);
    let users = uc.users.handle();
    uc.tickets.put("ada@gmail.com", ticket("123456", -1)).await.unwrap();

    let result = uc
        .execute(verify_input("ada@gmail.com", "123456", "signup"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::OtpExpired)),
        "expected OtpExpired, got {result:?}"
    );
    assert!(users.lock().unwrap().is_empty());
    assert!(uc.tickets.get("ada@gmail.com").await.unwrap().is_none());
}

#[tokio::test]
async fn should_report_missing_signup_ticket_as_expired() {
    let uc = verify_usecase(MockUserRepo::empty(), vec![test_pending("ada@gmail.com")]);

    let result = uc
        .execute(verify_input("ada@gmail.com", "123456", "signup"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::OtpExpired)),
        "expected OtpExpired, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_signup_code_and_keep_ticket() {
    let uc = verify_usecase(MockUserRepo::empty(), vec![test_pending("ada@gmail.com")]);
    uc.tickets.put("ada@gmail.com", ticket("123456", 300)).await.unwrap();

    let result = uc
        .execute(verify_input("ada@gmail.com", "654321", "signup"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
    assert!(uc.tickets.get("ada@gmail.com").await.unwrap().is_some());
}

#[tokio::test]
async fn should_fail_signup_verify_without_pending_row() {
    let uc = verify_usecase(MockUserRepo::empty(), vec![]);
    uc.tickets.put("ada@gmail.com", ticket("123456", 300)).await.unwrap();

    let result = uc
        .execute(verify_input("ada@gmail.com", "123456", "signup"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

// ── VerifyOtpUseCase: login ──────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_verified_session_and_drop_previous_on_login_verify() {
    let mut user = test_student("ada@gmail.com");
    user.login_otp = Some(ticket("123456", 300));
    let mut uc = verify_usecase(MockUserRepo::new(vec![user]), vec![]);
    uc.sessions = MockSessionRepo::new(vec![test_session("old-sid", "ada@gmail.com", false, false)]);
    let users = uc.users.handle();
    let sessions = uc.sessions.handle();

    let outcome = uc
        .execute(verify_input("ada@gmail.com", "123456", "login"), Some("old-sid"))
        .await
        .unwrap();

    let VerifyOtpOutcome::LoggedIn { session } = outcome else {
        panic!("expected LoggedIn");
    };
    assert!(session.otp_verified);
    assert_ne!(session.id, "old-sid");
    assert_eq!(session.email, "ada@gmail.com");

    let sessions = sessions.lock().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, session.id);
    assert!(users.lock().unwrap()[0].login_otp.is_none());
}

#[tokio::test]
async fn should_reject_expired_login_code() {
    let mut user = test_student("ada@gmail.com");
    user.login_otp = Some(ticket("123456", -1));
    let uc = verify_usecase(MockUserRepo::new(vec![user]), vec![]);
    let sessions = uc.sessions.handle();

    let result = uc
        .execute(verify_input("ada@gmail.com", "123456", "login"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::OtpExpired)),
        "expected OtpExpired, got {result:?}"
    );
    assert!(sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_login_verify_when_no_code_was_issued() {
    let uc = verify_usecase(MockUserRepo::new(vec![test_student("ada@gmail.com")]), vec![]);
    let sessions = uc.sessions.handle();

    let result = uc
        .execute(verify_input("ada@gmail.com", "123456", "login"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
    assert!(sessions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_login_verify_for_unknown_user() {
    let uc = verify_usecase(MockUserRepo::empty(), vec![]);

    let result = uc
        .execute(verify_input("ghost@gmail.com", "123456", "login"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

// ── VerifyOtpUseCase: forgot-password ────────────────────────────────────────

#[tokio::test]
async fn should_allow_password_reset_and_clear_code() {
    let mut user = test_student("ada@gmail.com");
    user.login_otp = Some(ticket("123456", 300));
    let uc = verify_usecase(MockUserRepo::new(vec![user]), vec![]);
    let users = uc.users.handle();

    let outcome = uc
        .execute(verify_input("ada@gmail.com", "123456", "forgot-password"), None)
        .await
        .unwrap();

    assert!(matches!(outcome, VerifyOtpOutcome::PasswordResetAllowed));
    assert!(users.lock().unwrap()[0].login_otp.is_none());
}

#[tokio::test]
async fn should_reject_password_reset_when_no_code_was_issued() {
    let uc = verify_usecase(MockUserRepo::new(vec![test_student("ada@gmail.com")]), vec![]);

    let result = uc
        .execute(verify_input("ada@gmail.com", "123456", "forgot-password"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::InvalidOtp)),
        "expected InvalidOtp, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_admin_on_forgot_password_verify() {
    let mut admin = test_admin("admin@gmail.com");
    admin.login_otp = Some(ticket("123456", 300));
    let uc = verify_usecase(MockUserRepo::new(vec![admin]), vec![]);

    let result = uc
        .execute(verify_input("admin@gmail.com", "123456", "forgot-password"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::AdminPasswordReset)),
        "expected AdminPasswordReset, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_unknown_action() {
    let uc = verify_usecase(MockUserRepo::empty(), vec![]);

    let result = uc
        .execute(verify_input("ada@gmail.com", "123456", "reset"), None)
        .await;

    assert!(
        matches!(result, Err(PortalError::InvalidAction)),
        "expected InvalidAction, got {result:?}"
    );
}

// ── ResendOtpUseCase ─────────────────────────────────────────────────────────

type Resend = ResendOtpUseCase<MockUserRepo, MockPendingRepo, InMemorySignupTickets, MockMailer>;

fn resend_usecase(users: MockUserRepo, pending: Vec<PendingSignup>) -> Resend {
    let pending = MockPendingRepo::new(pending, users.handle());
    ResendOtpUseCase {
        users,
        pending,
        tickets: InMemorySignupTickets::new(),
        mailer: MockMailer::new(),
    }
}

fn resend_input(email: &str, action: &str) -> ResendOtpInput {
    ResendOtpInput {
        email: email.to_owned(),
        action: action.to_owned(),
    }
}

#[tokio::test]
async fn should_issue_new_signup_ticket_for_pending_row() {
    let uc = resend_usecase(MockUserRepo::empty(), vec![test_pending("ada@gmail.com")]);
    let sent = uc.mailer.handle();

    let action = uc
        .execute(resend_input("ada@gmail.com", "signup"))
        .await
        .unwrap();

    assert_eq!(action, OtpAction::Signup);
    let ticket = uc.tickets.get("ada@gmail.com").await.unwrap().unwrap();
    let mails = sent.lock().unwrap();
    assert_eq!(mails[0].subject, "Your new OTP for signup");
    assert!(mails[0].body.contains(&ticket.code));
}

#[tokio::test]
async fn should_reject_signup_resend_without_pending_row() {
    let uc = resend_usecase(MockUserRepo::empty(), vec![]);

    let result = uc.execute(resend_input("ada@gmail.com", "signup")).await;

    assert!(
        matches!(result, Err(PortalError::PendingSignupNotFound)),
        "expected PendingSignupNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_always_mint_fresh_login_code_on_resend() {
    let mut user = test_student("ada@gmail.com");
    // Outside the issued range, so a fresh code can never equal it.
    user.login_otp = Some(ticket("000000", 60));
    let uc = resend_usecase(MockUserRepo::new(vec![user]), vec![]);
    let users = uc.users.handle();
    let sent = uc.mailer.handle();

    uc.execute(resend_input("ada@gmail.com", "login")).await.unwrap();

    let stored = users.lock().unwrap()[0].login_otp.clone().unwrap();
    assert_ne!(stored.code, "000000");
    assert_eq!(sent.lock().unwrap()[0].subject, "Your new OTP for login");
}

#[tokio::test]
async fn should_send_forgot_password_code_to_student() {
    let uc = resend_usecase(MockUserRepo::new(vec![test_student("ada@gmail.com")]), vec![]);
    let users = uc.users.handle();
    let sent = uc.mailer.handle();

    let action = uc
        .execute(resend_input("ada@gmail.com", "forgot-password"))
        .await
        .unwrap();

    assert_eq!(action, OtpAction::ForgotPassword);
    assert!(users.lock().unwrap()[0].login_otp.is_some());
    assert_eq!(
        sent.lock().unwrap()[0].subject,
        "Your new OTP for forgot-password"
    );
}

#[tokio::test]
async fn should_reject_admin_on_forgot_password_resend() {
    let uc = resend_usecase(MockUserRepo::new(vec![test_admin("admin@gmail.com")]), vec![]);
    let sent = uc.mailer.handle();

    let result = uc
        .execute(resend_input("admin@gmail.com", "forgot-password"))
        .await;

    assert!(
        matches!(result, Err(PortalError::AdminPasswordReset)),
        "expected AdminPasswordReset, got {result:?}"
    );
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_login_resend_for_unknown_user() {
    let uc = resend_usecase(MockUserRepo::empty(), vec![]);

    let result = uc.execute(resend_input("ghost@gmail.com", "login")).await;

    assert!(
        matches!(result, Err(PortalError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
