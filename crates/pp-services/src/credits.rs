//! Credit balance gate consulted before every generation.

use serde::Deserialize;

/// Credits one generation costs.
pub const GENERATION_COST: u32 = 4;

/// At or below this balance the UI warns that credits are running out.
pub const LOW_CREDIT_THRESHOLD: u32 = 3;

/// Decides whether a generation may start right now.
pub trait CreditGate {
    fn can_generate(&self) -> bool;
}

/// Balance as reported by `GET /credits`. `credits` is `None` until the
/// first fetch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CreditBalance {
    #[serde(default)]
    pub credits: Option<u32>,
    #[serde(default)]
    pub unlimited: bool,
}

impl CreditBalance {
    pub fn known(credits: u32) -> Self {
        Self {
            credits: Some(credits),
            unlimited: false,
        }
    }

    pub fn unlimited() -> Self {
        Self {
            credits: None,
            unlimited: true,
        }
    }

    pub fn is_low(&self) -> bool {
        !self.unlimited && self.credits.is_some_and(|c| c <= LOW_CREDIT_THRESHOLD)
    }
}

impl CreditGate for CreditBalance {
    fn can_generate(&self) -> bool {
        self.unlimited || self.credits.is_some_and(|c| c >= GENERATION_COST)
    }
}

/// A gate that always allows generation (self-hosted setups without billing).
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmetered;

impl CreditGate for Unmetered {
    fn can_generate(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert!(CreditBalance::known(4).can_generate());
        assert!(!CreditBalance::known(3).can_generate());
        assert!(CreditBalance::known(3).is_low());
        assert!(!CreditBalance::known(4).is_low());
    }

    #[test]
    fn unknown_balance_blocks_but_is_not_low() {
        let b = CreditBalance::default();
        assert!(!b.can_generate());
        assert!(!b.is_low());
    }

    #[test]
    fn unlimited_always_generates() {
        let b = CreditBalance::unlimited();
        assert!(b.can_generate());
        assert!(!b.is_low());
        let parsed: CreditBalance =
            serde_json::from_str(r#"{"credits":999999,"unlimited":true}"#).unwrap();
        assert!(parsed.can_generate());
    }
}
