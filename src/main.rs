use anyhow::Result;
use tracing::info;

mod button;
mod dispatch;
mod eligibility;
mod ledger;
mod settings;
mod url_util;
mod variant;

use crate::button::PublisherToggle;
use crate::dispatch::{run_settings_loop, SettingsSink};
use crate::ledger::load_ledger;
use crate::settings::load_settings;

const SETTINGS_FIXTURE: &str = include_str!("../settings.yaml");
const LEDGER_FIXTURE: &str = include_str!("../ledger.yaml");

const LOCATIONS: &[&str] = &[
    "https://news.example/world",
    "https://blog.example/posts",
    "https://paywall.example",
    "https://spam.example",
    "https://tracker.example",
    "ftp://mirror.example",
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting publisher toggle demo");

    let store = load_settings(SETTINGS_FIXTURE)?;
    let ledger = load_ledger(LEDGER_FIXTURE)?;

    let (sink, rx) = SettingsSink::channel(16);
    let settings_loop = tokio::spawn(run_settings_loop(store.clone(), rx));

    for location in LOCATIONS {
        let toggle = PublisherToggle::new(location, &store, &ledger);
        match toggle.render() {
            Some(view) => info!(
                "{location}: shown icon={} l10n={} authorized={} verified={}",
                view.icon, view.l10n_id, view.authorized, view.verified
            ),
            None => info!("{location}: toggle not shown"),
        }
    }

    // Simulate the user clicking the button on the news site, then opting
    // back in after a second click.
    let location = "https://news.example/world";
    let toggle = PublisherToggle::new(location, &store, &ledger);
    let outcome = toggle.authorize(&sink).await;
    info!(
        "Clicked '{}': requested ledgerPayments={}",
        outcome.host_pattern, outcome.requested_value
    );

    // Close the sink so the settings loop drains and exits.
    drop(sink);
    settings_loop
        .await
        .map_err(|e| anyhow::anyhow!("Settings loop panicked: {e}"))?;

    let toggle = PublisherToggle::new(location, &store, &ledger);
    match toggle.render() {
        Some(view) => info!(
            "{location} after click: icon={} authorized={}",
            view.icon, view.authorized
        ),
        None => info!("{location} after click: toggle not shown"),
    }

    Ok(())
}
