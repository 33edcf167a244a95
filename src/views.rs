//! Server-rendered HTML pages.
//!
//! Both pages are compiled into the binary with `include_str!` and filled in
//! with plain `{{MARKER}}` substitution. Every injected value is escaped
//! before it reaches the page.

use crate::models::wallet::WalletSummary;

pub const LANDING_PAGE: &str = include_str!("../assets/index.html");
const WALLET_PAGE: &str = include_str!("../assets/wallet.html");

/// Renders the wallet page with its balances filled in.
pub fn wallet_page(address: &str, summary: &WalletSummary) -> String {
    WALLET_PAGE
        .replace("{{WALLET_ADDRESS}}", &escape_html(address))
        .replace("{{SOL_BALANCE}}", &format!("{:.4}", summary.balance_in_sol))
        .replace("{{PYUSD_BALANCE}}", &format!("{:.2}", summary.pyusd_balance))
        .replace("{{CREDITS}}", &summary.credits.to_string())
}

/// Escapes text for safe embedding in HTML bodies and attribute values.
///
/// The wallet address comes straight from the query string and must never
/// reach the page unescaped.
fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
