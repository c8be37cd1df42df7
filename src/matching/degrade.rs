//! Fault containment for scoring
//!
//! A panic inside a scoring body must never abort a search: the fault is
//! logged and the computation yields its fallback instead.

use std::panic::{self, AssertUnwindSafe};
use tracing::warn;

/// Run `compute`, returning `fallback` if it panics
pub fn degrade<T>(what: &str, fallback: T, compute: impl FnOnce() -> T) -> T {
    match panic::catch_unwind(AssertUnwindSafe(compute)) {
        Ok(value) => value,
        Err(cause) => {
            let reason = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown fault".to_string());
            warn!(what, %reason, "Computation degraded");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_passes_through() {
        assert_eq!(degrade("score", 0.0, || 0.75), 0.75);
        assert!(degrade("phonetic", false, || true));
    }

    #[test]
    fn test_panic_yields_fallback() {
        let score: f64 = degrade("score", 0.0, || panic!("bad bigram table"));
        assert_eq!(score, 0.0);

        let matched: bool = degrade("phonetic", false, || {
            let key: Option<&str> = None;
            key.map(|k| !k.is_empty()).expect("key computed")
        });
        assert!(!matched);
    }

    #[test]
    fn test_panic_with_formatted_message() {
        let name = "Suresh";
        let score = degrade("score", -1.0, || -> f64 { panic!("cannot score {}", name) });
        assert_eq!(score, -1.0);
    }
}
