use advising_domain::advising::AdvisingStatus;

use crate::domain::repository::{AdvisingRepository, EmailSender};
use crate::domain::types::{AdvisingSheet, AdvisingSheetSummary, OutgoingEmail};
use crate::error::PortalError;

// ── ListAdvisingSheets ───────────────────────────────────────────────────────

pub struct ListAdvisingSheetsUseCase<A: AdvisingRepository> {
    pub advising: A,
}

impl<A: AdvisingRepository> ListAdvisingSheetsUseCase<A> {
    pub async fn execute(&self) -> Result<Vec<AdvisingSheetSummary>, PortalError> {
        self.advising.list_sheets().await
    }
}

// ── GetAdvisingSheet ─────────────────────────────────────────────────────────

pub struct GetAdvisingSheetUseCase<A: AdvisingRepository> {
    pub advising: A,
}

impl<A: AdvisingRepository> GetAdvisingSheetUseCase<A> {
    pub async fn execute(&self, id: i32) -> Result<AdvisingSheet, PortalError> {
        self.advising
            .find_sheet(id)
            .await?
            .ok_or(PortalError::AdvisingSheetNotFound)
    }
}

// ── DecideAdvisingSheet ──────────────────────────────────────────────────────

pub struct DecideAdvisingSheetInput {
    pub status: Option<String>,
    pub message: Option<String>,
}

pub struct DecideAdvisingSheetUseCase<A, M>
where
    A: AdvisingRepository,
    M: EmailSender,
{
    pub advising: A,
    pub mailer: M,
}

impl<A, M> DecideAdvisingSheetUseCase<A, M>
where
    A: AdvisingRepository,
    M: EmailSender,
{
    /// Record the review outcome, then notify the student.
    pub async fn execute(
        &self,
        id: i32,
        input: DecideAdvisingSheetInput,
    ) -> Result<(), PortalError> {
        let status = input.status.as_deref().map(str::trim).unwrap_or_default();
        let message = input.message.as_deref().map(str::trim).unwrap_or_default();
        if status.is_empty() || message.is_empty() {
            return Err(PortalError::MissingDecision);
        }
        let status: AdvisingStatus = status.parse().map_err(|_| PortalError::InvalidStatus)?;

        let sheet = self
            .advising
            .find_sheet(id)
            .await?
            .ok_or(PortalError::AdvisingSheetNotFound)?;
        if !self.advising.decide(id, status, message).await? {
            return Err(PortalError::AdvisingSheetNotFound);
        }
        tracing::info!(id, status = %status, "advising sheet decided");

        self.mailer
            .send(&decision_email(&sheet, status, message))
            .await
    }
}

fn decision_email(sheet: &AdvisingSheet, status: AdvisingStatus, message: &str) -> OutgoingEmail {
    let term = &sheet.record.term;
    OutgoingEmail {
        to: sheet.record.student_email.clone(),
        subject: format!("Advising sheet {status}: {term}"),
        body: format!(
            "Hello {first},\n\nYour advising sheet for {term} is now {status}.\n\nMessage from your advisor:\n{message}\n",
            first = sheet.first_name,
        ),
    }
}
