use std::time::Duration;

use axum_extra::extract::cookie::Key;
use sea_orm::Database;
use tracing::{error, info};

use advising_core::tracing::init_tracing;
use advising_portal::config::PortalConfig;
use advising_portal::infra::dns::{AcceptAllDomains, DomainCheck, MxDomainVerifier};
use advising_portal::infra::mail::{LogMailer, Mailer, SmtpMailer};
use advising_portal::infra::tickets::InMemorySignupTickets;
use advising_portal::router::build_router;
use advising_portal::state::AppState;
use advising_portal::usecase::bootstrap::BootstrapAdminUseCase;
use advising_portal::usecase::session::PurgeExpiredSessionsUseCase;

const SESSION_PURGE_PERIOD: Duration = Duration::from_secs(60 * 60);
const TICKET_SWEEP_PERIOD: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let config = PortalConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = match &config.smtp {
        Some(smtp) => Mailer::Smtp(
            SmtpMailer::new(&smtp.host, &smtp.user, &smtp.password)
                .expect("failed to build SMTP transport"),
        ),
        None => {
            info!("EMAIL_USER not set, outgoing mail will only be logged");
            Mailer::Log(LogMailer)
        }
    };

    let domains = if config.mx_check {
        DomainCheck::Mx(MxDomainVerifier::from_system_conf().expect("failed to build DNS resolver"))
    } else {
        DomainCheck::Disabled(AcceptAllDomains)
    };

    let tickets = InMemorySignupTickets::new();
    tickets.spawn_sweeper(TICKET_SWEEP_PERIOD);

    let state = AppState {
        db,
        session_key: Key::derive_from(config.session_secret.as_bytes()),
        cookie: config.cookie.clone(),
        tickets,
        mailer,
        domains,
    };

    if let Some(seed) = config.admin.clone() {
        let usecase = BootstrapAdminUseCase {
            users: state.user_repo(),
        };
        if let Err(e) = usecase.execute(seed).await {
            error!(error = ?e, "admin bootstrap failed");
        }
    }

    let purge = PurgeExpiredSessionsUseCase {
        sessions: state.session_repo(),
    };
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_PERIOD);
        loop {
            interval.tick().await;
            if let Err(e) = purge.execute().await {
                error!(error = ?e, "session purge failed");
            }
        }
    });

    let router = build_router(state, &config.cors_origins);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("portal listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
