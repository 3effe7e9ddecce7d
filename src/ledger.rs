use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ledger-side knowledge about one publisher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublisherInfo {
    /// Set for publishers on the ledger exclusion list; excluded publishers
    /// are never eligible for payments.
    #[serde(default)]
    pub exclude: bool,
    /// Set once the publisher completed the external verification process.
    #[serde(default)]
    pub verified: bool,
}

/// Map from publisher identifier to ledger info. Absent entries read as the
/// all-false default rather than erroring.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocationInfo(HashMap<String, PublisherInfo>);

impl LocationInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, publisher_id: &str) -> Option<&PublisherInfo> {
        self.0.get(publisher_id)
    }

    pub fn insert(&mut self, publisher_id: impl Into<String>, info: PublisherInfo) {
        self.0.insert(publisher_id.into(), info);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One entry of the ledger synopsis. Only `site` feeds the eligibility
/// derivation; visit counters are carried so real synopsis data parses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SynopsisEntry {
    pub site: String,
    #[serde(default)]
    pub visits: u32,
    #[serde(default)]
    pub duration_ms: u64,
}

/// Ordered list of publishers the payment ledger already knows about.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Synopsis(Vec<SynopsisEntry>);

impl Synopsis {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff any entry's `site` equals the publisher identifier.
    pub fn contains_site(&self, publisher_id: &str) -> bool {
        self.0.iter().any(|entry| entry.site == publisher_id)
    }

    pub fn push(&mut self, entry: SynopsisEntry) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The ledger-owned inputs the toggle reads: per-publisher info and the
/// synopsis fallback.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Ledger {
    #[serde(default)]
    pub location_info: LocationInfo,
    #[serde(default)]
    pub synopsis: Synopsis,
}

pub fn load_ledger(yaml: &str) -> Result<Ledger> {
    let ledger: Ledger = serde_yaml::from_str(yaml)?;
    tracing::info!(
        "Loaded ledger: {} publisher(s), {} synopsis entries",
        ledger.location_info.len(),
        ledger.synopsis.len()
    );
    Ok(ledger)
}
