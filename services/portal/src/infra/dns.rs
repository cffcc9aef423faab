use anyhow::Context as _;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::error::ResolveErrorKind;

use crate::domain::repository::DomainVerifier;
use crate::error::PortalError;

// ── MX lookup ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MxDomainVerifier {
    resolver: TokioAsyncResolver,
}

impl MxDomainVerifier {
    /// Resolver built from the host's `/etc/resolv.conf`.
    pub fn from_system_conf() -> anyhow::Result<Self> {
        let resolver =
            TokioAsyncResolver::tokio_from_system_conf().context("load system DNS config")?;
        Ok(Self { resolver })
    }
}

impl DomainVerifier for MxDomainVerifier {
    async fn accepts_mail(&self, domain: &str) -> Result<bool, PortalError> {
        match self.resolver.mx_lookup(domain).await {
            Ok(records) => Ok(records.iter().next().is_some()),
            // Resolver failures count as undeliverable.
            Err(e) => {
                if !matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                    tracing::warn!(domain, error = %e, "MX lookup failed");
                }
                Ok(false)
            }
        }
    }
}

// ── Disabled ─────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct AcceptAllDomains;

impl DomainVerifier for AcceptAllDomains {
    async fn accepts_mail(&self, _domain: &str) -> Result<bool, PortalError> {
        Ok(true)
    }
}

// ── DomainCheck ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub enum DomainCheck {
    Mx(MxDomainVerifier),
    Disabled(AcceptAllDomains),
}

impl DomainVerifier for DomainCheck {
    async fn accepts_mail(&self, domain: &str) -> Result<bool, PortalError> {
        match self {
            Self::Mx(v) => v.accepts_mail(domain).await,
            Self::Disabled(v) => v.accepts_mail(domain).await,
        }
    }
}
