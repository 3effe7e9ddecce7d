pub mod button;
pub mod dispatch;
pub mod eligibility;
pub mod ledger;
pub mod settings;
pub mod url_util;
pub mod variant;


pub use button::{ButtonView, PublisherToggle, ToggleOutcome, PUBLISHER_BUTTON_TEST_ID};
pub use dispatch::{run_settings_loop, SettingsCommand, SettingsDispatcher, SettingsSink};
pub use eligibility::{
    enabled_for_payments, known_by_synopsis, toggle_visible, verified_publisher, PublisherStatus,
};
pub use ledger::{load_ledger, Ledger, LocationInfo, PublisherInfo, Synopsis, SynopsisEntry};
pub use settings::{
    load_settings, GlobalSetting, SettingsReader, SettingsStore, SiteOverrides, SiteSettingKey,
};
pub use url_util::{host_pattern, is_http_or_https, publisher_id};
pub use variant::ToggleVariant;
