//! Env-gated diagnostics
//!
//! Setting `CSSMQ_DEBUG_MEDIA` to a truthy value prints one `[media]` line
//! per evaluated clause and expression to stderr. The variable is read once
//! per process.

use std::sync::OnceLock;

/// Environment variable enabling media evaluation traces
pub const DEBUG_MEDIA_ENV: &str = "CSSMQ_DEBUG_MEDIA";

/// Returns true when the toggle value is set and not one of `0`, `false`, `off`.
pub fn truthy(value: &str) -> bool {
  let value = value.trim();
  !value.is_empty()
    && !["0", "false", "off"]
      .iter()
      .any(|falsy| value.eq_ignore_ascii_case(falsy))
}

/// Returns true when media evaluation traces are enabled.
pub fn media_debug_enabled() -> bool {
  static ENABLED: OnceLock<bool> = OnceLock::new();
  *ENABLED.get_or_init(|| {
    std::env::var(DEBUG_MEDIA_ENV)
      .map(|v| truthy(&v))
      .unwrap_or(false)
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truthy_values() {
    assert!(truthy("1"));
    assert!(truthy("yes"));
    assert!(truthy(" on "));
    assert!(!truthy(""));
    assert!(!truthy("0"));
    assert!(!truthy("FALSE"));
    assert!(!truthy("off"));
    assert!(truthy("no"));
  }
}
