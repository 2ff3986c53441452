use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Centralized registry for redaction regex patterns.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Wallet address: `0x` followed by a long hex run
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn wallet_address() -> &'static Regex {
        static WALLET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b0x([A-Fa-f0-9]{4})[A-Fa-f0-9]{8,}([A-Fa-f0-9]{4})\b").unwrap()
        });
        &WALLET_REGEX
    }

    /// Bare hex token (≥16 chars), e.g. conversation topics or signatures
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn hex_token() -> &'static Regex {
        static HEX_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Fa-f0-9]{16,}\b").unwrap()
        });
        &HEX_TOKEN_REGEX
    }
}

/// Redacts identifying information from a string.
///
/// - Wallet addresses keep their first and last four hex digits: `0xabcd…ef01`
/// - Other long hex runs become `[REDACTED_TOKEN]`
///
/// Order: wallets first, so their shortened form is not caught by the token rule.
pub fn redact(input: &str) -> String {
    let wallets = PiiRegexRegistry::wallet_address().replace_all(input, "0x$1…$2");
    PiiRegexRegistry::hex_token()
        .replace_all(&wallets, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that redacts when displayed, for ergonomic logging of player addresses.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
