use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;

use crate::domain::repository::SignupTicketStore;
use crate::domain::types::OtpTicket;
use crate::error::PortalError;

/// Signup codes keyed by normalized email. Tickets live only in this process.
#[derive(Clone, Default)]
pub struct InMemorySignupTickets {
    tickets: Arc<DashMap<String, OtpTicket>>,
}

impl InMemorySignupTickets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every ticket whose expiry has passed. Returns the number removed.
    pub fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.tickets.len();
        self.tickets.retain(|_, ticket| ticket.is_live_at(now));
        before.saturating_sub(self.tickets.len())
    }

    /// Sweep expired tickets every `period` until the runtime shuts down.
    pub fn spawn_sweeper(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let removed = store.sweep_expired();
                if removed > 0 {
                    tracing::debug!(removed, "expired signup tickets swept");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

impl SignupTicketStore for InMemorySignupTickets {
    async fn put(&self, email: &str, ticket: OtpTicket) -> Result<(), PortalError> {
        self.tickets.insert(email.to_owned(), ticket);
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpTicket>, PortalError> {
        Ok(self.tickets.get(email).map(|t| t.value().clone()))
    }

    async fn remove(&self, email: &str) -> Result<(), PortalError> {
        self.tickets.remove(email);
        Ok(())
    }
}
