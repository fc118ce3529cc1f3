//! HTTP `HEAD` existence checks against the XRPL documentation site.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::discovery::ReferenceConfig;
use crate::error::{Result, XlsError};

use super::{EntityKind, EntityLookup, Existence};

/// Placeholder replaced by the lowercased entity name in URL templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Checks entity pages with a blocking client and a short timeout.
///
/// Answers are not cached; every call issues a request.
#[derive(Debug, Clone)]
pub struct HttpLookup {
    client: Client,
    ledger_entry_url: String,
    transaction_url: String,
}

impl HttpLookup {
    pub fn new(config: &ReferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("xls-tools/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| XlsError::Config {
                message: format!("Failed to build HTTP client: {}", e),
                help: None,
            })?;

        Ok(Self {
            client,
            ledger_entry_url: config.ledger_entry_url.clone(),
            transaction_url: config.transaction_url.clone(),
        })
    }

    /// URL checked for an entity.
    pub fn url_for(&self, kind: EntityKind, name: &str) -> String {
        let template = match kind {
            EntityKind::LedgerEntry => &self.ledger_entry_url,
            EntityKind::Transaction => &self.transaction_url,
        };
        template.replace(NAME_PLACEHOLDER, &name.to_lowercase())
    }
}

impl EntityLookup for HttpLookup {
    fn exists(&self, kind: EntityKind, name: &str) -> Existence {
        let url = self.url_for(kind, name);

        let existence = match self.client.head(&url).send() {
            Ok(response) => match response.status() {
                StatusCode::OK => Existence::Present,
                StatusCode::NOT_FOUND => Existence::Absent,
                status => {
                    warn!(%url, %status, "unexpected status from reference lookup");
                    Existence::Unknown
                }
            },
            Err(e) => {
                warn!(%url, error = %e, "reference lookup failed");
                Existence::Unknown
            }
        };

        debug!(%kind, name, ?existence, "reference lookup");
        existence
    }
}
