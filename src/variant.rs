/// The four presentation variants of the publisher button, one per
/// combination of funded (payments authorized) and verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleVariant {
    NoFundVerified,
    FundVerified,
    NoFundUnverified,
    FundUnverified,
}

impl ToggleVariant {
    /// Total 2x2 mapping from (authorized, verified) to a variant.
    pub fn select(authorized: bool, verified: bool) -> ToggleVariant {
        match (authorized, verified) {
            (false, true) => ToggleVariant::NoFundVerified,
            (true, true) => ToggleVariant::FundVerified,
            (false, false) => ToggleVariant::NoFundUnverified,
            (true, false) => ToggleVariant::FundUnverified,
        }
    }

    /// Urlbar icon asset shown for this variant.
    pub fn asset(self) -> &'static str {
        match self {
            ToggleVariant::NoFundVerified => "browser_URL_fund_no_verified.svg",
            ToggleVariant::FundVerified => "browser_URL_fund_yes_verified.svg",
            ToggleVariant::NoFundUnverified => "browser_URL_fund_no.svg",
            ToggleVariant::FundUnverified => "browser_URL_fund_yes.svg",
        }
    }

    /// Localization key for the button tooltip. Verified-but-not-funded
    /// publishers get their own string; otherwise the string only depends on
    /// whether payments are authorized.
    pub fn l10n_id(self) -> &'static str {
        match self {
            ToggleVariant::NoFundVerified => "verifiedPublisher",
            ToggleVariant::FundVerified | ToggleVariant::FundUnverified => "enabledPublisher",
            ToggleVariant::NoFundUnverified => "disabledPublisher",
        }
    }
}
