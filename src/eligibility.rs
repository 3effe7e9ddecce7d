use crate::ledger::{Ledger, PublisherInfo, Synopsis};
use crate::settings::{GlobalSetting, SettingsReader, SiteOverrides};
use crate::url_util::{host_pattern, is_http_or_https, publisher_id};
use crate::variant::ToggleVariant;
use tracing::debug;

/// True iff the synopsis already knows this publisher. Even with no site
/// overrides on record (a cleared session), a publisher the ledger has seen
/// counts as eligible.
pub fn known_by_synopsis(synopsis: &Synopsis, publisher_id: &str) -> bool {
    synopsis.contains_site(publisher_id)
}

/// Whether payments are currently authorized for the publisher.
///
/// Exclusion wins over everything. When an overrides record exists, its
/// `ledger_payments` flag is authoritative: an explicit `false` cannot be
/// rescued by synopsis membership, anything else means enabled. Only when no
/// record exists does the global auto-suggest default apply, and there
/// synopsis membership can override a default of off.
pub fn enabled_for_payments(
    overrides: Option<&SiteOverrides>,
    info: Option<&PublisherInfo>,
    auto_suggest_sites: bool,
    known_by_synopsis: bool,
) -> bool {
    let excluded = info.map(|i| i.exclude).unwrap_or(false);
    if excluded {
        return false;
    }
    match overrides {
        Some(o) => o.ledger_payments != Some(false),
        None => auto_suggest_sites || known_by_synopsis,
    }
}

/// Reads the ledger's verified flag, defaulting to false.
pub fn verified_publisher(info: Option<&PublisherInfo>) -> bool {
    info.map(|i| i.verified).unwrap_or(false)
}

/// Whether the toggle should be rendered at all. Non-http(s) locations and
/// permanently hidden hosts (`ledger_payments_shown` explicitly false) never
/// show it; otherwise visibility follows the global payments setting.
pub fn toggle_visible(
    location: &str,
    overrides: Option<&SiteOverrides>,
    payments_enabled: bool,
) -> bool {
    if !is_http_or_https(location) {
        return false;
    }
    let shown = overrides.and_then(|o| o.ledger_payments_shown);
    if shown == Some(false) {
        return false;
    }
    payments_enabled
}

/// The full derived state of the publisher button for one location. Always
/// recomputed from the current external inputs; nothing here survives a
/// navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublisherStatus {
    pub publisher_id: String,
    pub host_pattern: String,
    pub visible: bool,
    pub authorized: bool,
    pub verified: bool,
    pub variant: ToggleVariant,
}

impl PublisherStatus {
    pub fn derive(location: &str, settings: &dyn SettingsReader, ledger: &Ledger) -> Self {
        let publisher_id = publisher_id(location);
        let host_pattern = host_pattern(&publisher_id);
        let overrides = settings.site_overrides(&host_pattern);
        let info = ledger.location_info.get(&publisher_id);

        let known = known_by_synopsis(&ledger.synopsis, &publisher_id);
        let authorized = enabled_for_payments(
            overrides.as_ref(),
            info,
            settings.global_setting(GlobalSetting::AutoSuggestSites),
            known,
        );
        let verified = verified_publisher(info);
        let visible = toggle_visible(
            location,
            overrides.as_ref(),
            settings.global_setting(GlobalSetting::PaymentsEnabled),
        );
        let variant = ToggleVariant::select(authorized, verified);

        debug!(
            "Derived publisher status for '{}': id='{}' visible={} authorized={} verified={}",
            location, publisher_id, visible, authorized, verified
        );

        PublisherStatus {
            publisher_id,
            host_pattern,
            visible,
            authorized,
            verified,
            variant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SynopsisEntry;
    use crate::settings::{SettingsStore, SiteSettingKey};

    fn overrides(payments: Option<bool>, shown: Option<bool>) -> SiteOverrides {
        SiteOverrides {
            ledger_payments: payments,
            ledger_payments_shown: shown,
        }
    }

    #[test]
    fn test_known_by_synopsis() {
        let mut synopsis = Synopsis::new();
        synopsis.push(SynopsisEntry {
            site: "example.com/page".to_string(),
            visits: 3,
            duration_ms: 90_000,
        });

        assert!(known_by_synopsis(&synopsis, "example.com/page"));
        assert!(!known_by_synopsis(&synopsis, "example.com"));
        assert!(!known_by_synopsis(&Synopsis::new(), "example.com/page"));
    }

    #[test]
    fn test_enabled_without_record_follows_auto_suggest() {
        assert!(enabled_for_payments(None, None, true, false));
        assert!(!enabled_for_payments(None, None, false, false));
    }

    #[test]
    fn test_enabled_without_record_synopsis_overrides_default_off() {
        assert!(enabled_for_payments(None, None, false, true));
    }

    #[test]
    fn test_enabled_record_explicit_false_is_final() {
        let o = overrides(Some(false), None);
        // Synopsis membership cannot rescue an explicit opt-out.
        assert!(!enabled_for_payments(Some(&o), None, true, true));
    }

    #[test]
    fn test_enabled_record_without_explicit_false() {
        let unset = overrides(None, None);
        assert!(enabled_for_payments(Some(&unset), None, false, false));

        let explicit_true = overrides(Some(true), None);
        assert!(enabled_for_payments(Some(&explicit_true), None, false, false));
    }

    #[test]
    fn test_excluded_wins_over_everything() {
        let info = PublisherInfo {
            exclude: true,
            verified: true,
        };
        let o = overrides(Some(true), None);
        assert!(!enabled_for_payments(Some(&o), Some(&info), true, true));
    }

    #[test]
    fn test_verified_publisher_defaults_false() {
        assert!(!verified_publisher(None));
        assert!(!verified_publisher(Some(&PublisherInfo::default())));
        assert!(verified_publisher(Some(&PublisherInfo {
            exclude: false,
            verified: true,
        })));
    }

    #[test]
    fn test_visibility_requires_http_scheme() {
        assert!(!toggle_visible("ftp://example.com", None, true));
        assert!(!toggle_visible("about:blank", None, true));
        assert!(!toggle_visible("", None, true));
        assert!(toggle_visible("https://example.com", None, true));
    }

    #[test]
    fn test_visibility_hidden_host_stays_hidden() {
        let o = overrides(None, Some(false));
        assert!(!toggle_visible("https://example.com", Some(&o), true));

        // Anything but explicit false keeps the toggle visible.
        let unset = overrides(None, None);
        assert!(toggle_visible("https://example.com", Some(&unset), true));
        let shown = overrides(None, Some(true));
        assert!(toggle_visible("https://example.com", Some(&shown), true));
    }

    #[test]
    fn test_visibility_follows_global_payments_setting() {
        assert!(!toggle_visible("https://example.com", None, false));
        assert!(toggle_visible("https://example.com", None, true));
    }

    #[test]
    fn test_derive_auto_suggested_publisher() {
        let settings = SettingsStore::new();
        settings.set_global(GlobalSetting::AutoSuggestSites, true);
        settings.set_global(GlobalSetting::PaymentsEnabled, true);
        let ledger = Ledger::default();

        let status = PublisherStatus::derive("https://example.com/page", &settings, &ledger);
        assert_eq!(status.publisher_id, "example.com/page");
        assert_eq!(status.host_pattern, "example.com");
        assert!(status.visible);
        assert!(status.authorized);
        assert!(!status.verified);
        assert_eq!(status.variant, ToggleVariant::FundUnverified);
    }

    #[test]
    fn test_derive_verified_flag_selects_variant() {
        let settings = SettingsStore::new();
        settings.set_global(GlobalSetting::AutoSuggestSites, true);
        settings.set_global(GlobalSetting::PaymentsEnabled, true);

        let mut ledger = Ledger::default();
        ledger.location_info.insert(
            "example.com/page",
            PublisherInfo {
                exclude: false,
                verified: true,
            },
        );

        let status = PublisherStatus::derive("https://example.com/page", &settings, &ledger);
        assert!(status.verified);
        assert_eq!(status.variant, ToggleVariant::FundVerified);
    }

    #[test]
    fn test_derive_opted_out_host() {
        let settings = SettingsStore::new();
        settings.set_global(GlobalSetting::AutoSuggestSites, true);
        settings.set_global(GlobalSetting::PaymentsEnabled, true);
        settings.change_site_setting("example.com", SiteSettingKey::LedgerPayments, false);
        let ledger = Ledger::default();

        let status = PublisherStatus::derive("https://example.com/page", &settings, &ledger);
        assert!(status.visible);
        assert!(!status.authorized);
        assert_eq!(status.variant, ToggleVariant::NoFundUnverified);
    }

    #[test]
    fn test_derive_recomputes_after_navigation() {
        let settings = SettingsStore::new();
        settings.set_global(GlobalSetting::PaymentsEnabled, true);
        settings.change_site_setting("blocked.example", SiteSettingKey::LedgerPayments, false);

        let mut ledger = Ledger::default();
        ledger.synopsis.push(SynopsisEntry {
            site: "known.example".to_string(),
            visits: 1,
            duration_ms: 1000,
        });

        let blocked = PublisherStatus::derive("https://blocked.example", &settings, &ledger);
        assert!(!blocked.authorized);

        let known = PublisherStatus::derive("https://known.example", &settings, &ledger);
        assert!(known.authorized);
    }
}
