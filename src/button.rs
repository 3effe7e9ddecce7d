use crate::dispatch::SettingsDispatcher;
use crate::eligibility::PublisherStatus;
use crate::ledger::Ledger;
use crate::settings::{SettingsReader, SiteSettingKey};
use crate::variant::ToggleVariant;
use tracing::{debug, info};

/// Marker carried by the rendered element so UI tests can find it.
pub const PUBLISHER_BUTTON_TEST_ID: &str = "publisherButton";

/// The address-bar publisher toggle. Holds only borrowed render-time inputs;
/// every render and click re-derives from the current external state.
pub struct PublisherToggle<'a> {
    location: &'a str,
    settings: &'a dyn SettingsReader,
    ledger: &'a Ledger,
}

/// What the host view renders: the fixed test-identification attributes, the
/// selected icon variant, and the host pattern a click will target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub test_id: &'static str,
    pub authorized: bool,
    pub verified: bool,
    pub variant: ToggleVariant,
    pub icon: &'static str,
    pub l10n_id: &'static str,
    pub host_pattern: String,
}

/// Record of a dispatched toggle, for logging and tests. The dispatch itself
/// is fire-and-forget; this only says what was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub host_pattern: String,
    pub previous_authorized: bool,
    pub requested_value: bool,
}

impl<'a> PublisherToggle<'a> {
    pub fn new(location: &'a str, settings: &'a dyn SettingsReader, ledger: &'a Ledger) -> Self {
        Self {
            location,
            settings,
            ledger,
        }
    }

    /// Derives the full publisher status for the current location.
    pub fn status(&self) -> PublisherStatus {
        PublisherStatus::derive(self.location, self.settings, self.ledger)
    }

    /// Returns the renderable button, or `None` when the toggle should not
    /// appear at all (non-http(s) location, hidden host, payments off).
    pub fn render(&self) -> Option<ButtonView> {
        let status = self.status();
        if !status.visible {
            debug!("Publisher button not shown for '{}'", self.location);
            return None;
        }
        Some(ButtonView {
            test_id: PUBLISHER_BUTTON_TEST_ID,
            authorized: status.authorized,
            verified: status.verified,
            variant: status.variant,
            icon: status.variant.asset(),
            l10n_id: status.variant.l10n_id(),
            host_pattern: status.host_pattern,
        })
    }

    /// The one interactive affordance: flips `ledgerPayments` for the current
    /// host pattern to the negation of the current authorized state.
    pub async fn authorize(&self, dispatcher: &dyn SettingsDispatcher) -> ToggleOutcome {
        let status = self.status();
        let requested = !status.authorized;
        info!(
            "Toggling publisher '{}': ledgerPayments -> {}",
            status.host_pattern, requested
        );
        dispatcher
            .change_site_setting(
                &status.host_pattern,
                SiteSettingKey::LedgerPayments,
                requested,
            )
            .await;
        ToggleOutcome {
            host_pattern: status.host_pattern,
            previous_authorized: status.authorized,
            requested_value: requested,
        }
    }
}
