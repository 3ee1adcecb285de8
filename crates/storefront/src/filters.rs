//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use kinnk_core::Price;
use rust_decimal::Decimal;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a decimal amount as US dollars, e.g. `$53.19`.
///
/// Usage in templates: `{{ cart.total|money }}`
#[askama::filter_fn]
pub fn money(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let text = amount.to_string();
    Ok(text
        .parse::<Decimal>()
        .map_or_else(|_| format!("${text}"), |amount| Price::usd(amount).display()))
}

#[cfg(test)]
mod tests {
    use kinnk_core::round_cents;

    use super::*;

    #[test]
    fn test_money_display_matches_price() {
        let amount = round_cents(Decimal::new(53_185, 3));
        assert_eq!(Price::usd(amount).display(), "$53.19");
    }
}
