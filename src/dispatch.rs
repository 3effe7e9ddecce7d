use crate::settings::{SettingsStore, SiteSettingKey};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A mutation request against the settings store. The toggle only ever emits
/// `ChangeSiteSetting`, but the command form keeps the component decoupled
/// from whatever applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCommand {
    ChangeSiteSetting {
        host_pattern: String,
        key: SiteSettingKey,
        value: bool,
    },
}

/// Fire-and-forget mutation seam between the toggle and the settings store.
#[async_trait]
pub trait SettingsDispatcher: Send + Sync {
    async fn change_site_setting(&self, host_pattern: &str, key: SiteSettingKey, value: bool);
}

/// Channel-backed dispatcher. Commands are queued for the settings loop;
/// a closed or full channel drops the command with a warning, consistency is
/// the store's concern.
#[derive(Debug, Clone)]
pub struct SettingsSink {
    tx: mpsc::Sender<SettingsCommand>,
}

impl SettingsSink {
    pub fn new(tx: mpsc::Sender<SettingsCommand>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving end for `run_settings_loop`.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<SettingsCommand>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl SettingsDispatcher for SettingsSink {
    async fn change_site_setting(&self, host_pattern: &str, key: SiteSettingKey, value: bool) {
        let command = SettingsCommand::ChangeSiteSetting {
            host_pattern: host_pattern.to_string(),
            key,
            value,
        };
        if let Err(e) = self.tx.send(command).await {
            warn!("Dropped settings command, channel closed: {}", e);
        }
    }
}

/// Direct dispatcher for in-process use: applies the change synchronously.
#[async_trait]
impl SettingsDispatcher for SettingsStore {
    async fn change_site_setting(&self, host_pattern: &str, key: SiteSettingKey, value: bool) {
        SettingsStore::change_site_setting(self, host_pattern, key, value);
    }
}

/// Applies queued settings commands to the store until all senders are gone.
pub async fn run_settings_loop(store: SettingsStore, mut rx: mpsc::Receiver<SettingsCommand>) {
    info!("Settings loop started");
    while let Some(command) = rx.recv().await {
        debug!("Applying settings command: {:?}", command);
        match command {
            SettingsCommand::ChangeSiteSetting {
                host_pattern,
                key,
                value,
            } => {
                store.change_site_setting(&host_pattern, key, value);
            }
        }
    }
    info!("Settings loop finished, channel closed");
}
