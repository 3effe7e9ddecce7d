use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Per-site override flags. `None` means the user never set the flag, which
/// is distinct from an explicit `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteOverrides {
    #[serde(default)]
    pub ledger_payments: Option<bool>,
    #[serde(default)]
    pub ledger_payments_shown: Option<bool>,
}

/// Global boolean settings read by the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalSetting {
    AutoSuggestSites,
    PaymentsEnabled,
}

/// Keys addressable through `change_site_setting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteSettingKey {
    LedgerPayments,
    LedgerPaymentsShown,
}

impl SiteSettingKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SiteSettingKey::LedgerPayments => "ledgerPayments",
            SiteSettingKey::LedgerPaymentsShown => "ledgerPaymentsShown",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct GlobalSettings {
    #[serde(default)]
    auto_suggest_sites: bool,
    #[serde(default)]
    payments_enabled: bool,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct SettingsData {
    #[serde(default)]
    globals: GlobalSettings,
    #[serde(default)]
    sites: HashMap<String, SiteOverrides>,
}

/// Read capability over the settings store. The derivation takes this trait
/// rather than reaching into a global accessor, so it stays pure and
/// testable against fixed inputs.
pub trait SettingsReader {
    fn global_setting(&self, setting: GlobalSetting) -> bool;
    fn site_overrides(&self, host_pattern: &str) -> Option<SiteOverrides>;
}

/// Shared settings store keyed by host pattern. `Clone` shares the
/// underlying state.
#[derive(Debug, Default)]
pub struct SettingsStore {
    data: Arc<RwLock<SettingsData>>,
}

impl Clone for SettingsStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_global(&self, setting: GlobalSetting, value: bool) {
        match self.data.write() {
            Ok(mut data) => {
                match setting {
                    GlobalSetting::AutoSuggestSites => data.globals.auto_suggest_sites = value,
                    GlobalSetting::PaymentsEnabled => data.globals.payments_enabled = value,
                }
                debug!("Set global setting {:?} = {}", setting, value);
            }
            Err(e) => {
                warn!("Failed to write global setting {:?}: {}", setting, e);
            }
        }
    }

    /// Applies a per-site override. This is the only mutation the toggle ever
    /// requests.
    pub fn change_site_setting(&self, host_pattern: &str, key: SiteSettingKey, value: bool) {
        match self.data.write() {
            Ok(mut data) => {
                let overrides = data.sites.entry(host_pattern.to_string()).or_default();
                let slot = match key {
                    SiteSettingKey::LedgerPayments => &mut overrides.ledger_payments,
                    SiteSettingKey::LedgerPaymentsShown => &mut overrides.ledger_payments_shown,
                };
                let previous = slot.replace(value);
                debug!(
                    "Changed site setting '{}' {} : {:?} -> {}",
                    host_pattern,
                    key.as_str(),
                    previous,
                    value
                );
            }
            Err(e) => {
                warn!(
                    "Failed to change site setting '{}' {}: {}",
                    host_pattern,
                    key.as_str(),
                    e
                );
            }
        }
    }

    /// Number of host patterns with overrides (for monitoring/tests).
    pub fn site_count(&self) -> usize {
        match self.data.read() {
            Ok(data) => data.sites.len(),
            Err(_) => 0,
        }
    }
}

impl SettingsReader for SettingsStore {
    fn global_setting(&self, setting: GlobalSetting) -> bool {
        match self.data.read() {
            Ok(data) => match setting {
                GlobalSetting::AutoSuggestSites => data.globals.auto_suggest_sites,
                GlobalSetting::PaymentsEnabled => data.globals.payments_enabled,
            },
            Err(e) => {
                warn!("Failed to read global setting {:?}: {}", setting, e);
                false
            }
        }
    }

    fn site_overrides(&self, host_pattern: &str) -> Option<SiteOverrides> {
        match self.data.read() {
            Ok(data) => data.sites.get(host_pattern).cloned(),
            Err(e) => {
                warn!("Failed to read site overrides for '{}': {}", host_pattern, e);
                None
            }
        }
    }
}

pub fn load_settings(yaml: &str) -> Result<SettingsStore> {
    let data: SettingsData = serde_yaml::from_str(yaml)?;
    tracing::info!(
        "Loaded settings: {} site override(s), auto_suggest_sites={}, payments_enabled={}",
        data.sites.len(),
        data.globals.auto_suggest_sites,
        data.globals.payments_enabled
    );
    Ok(SettingsStore {
        data: Arc::new(RwLock::new(data)),
    })
}
