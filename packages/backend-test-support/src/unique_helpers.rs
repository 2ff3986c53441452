//! ULID-based identifiers so tests sharing a store never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("conv");
/// assert!(a.starts_with("conv-"));
/// assert_ne!(a, unique_str("conv"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// Wallet-shaped address (`0x` plus 40 lowercase hex digits).
///
/// ```
/// use backend_test_support::unique_helpers::unique_wallet;
///
/// let w = unique_wallet();
/// assert_eq!(w.len(), 42);
/// assert!(w.starts_with("0x"));
/// ```
pub fn unique_wallet() -> String {
    format!("0x{:040x}", Ulid::new().0)
}
