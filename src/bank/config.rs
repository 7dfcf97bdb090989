use tracing::warn;

use crate::Amount;
use crate::bank::account::{CheckingPolicy, DEFAULT_BRANCH};

pub const BRANCH_VAR: &str = "BANK_BRANCH";
pub const CEILING_VAR: &str = "BANK_WITHDRAWAL_CEILING";
pub const MAX_WITHDRAWALS_VAR: &str = "BANK_MAX_WITHDRAWALS";

/// Settings applied to every account the bank opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankConfig {
    pub branch: String,
    pub policy: CheckingPolicy,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            policy: CheckingPolicy::default(),
        }
    }
}

impl BankConfig {
    /// Defaults, overridden by `BANK_*` environment variables when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(branch) = lookup(BRANCH_VAR) {
            let branch = branch.trim();
            if branch.is_empty() {
                warn!(var = BRANCH_VAR, "empty branch code, keeping default");
            } else {
                config.branch = branch.to_string();
            }
        }

        if let Some(raw) = lookup(CEILING_VAR) {
            match raw.parse::<Amount>() {
                Ok(ceiling) if ceiling.is_positive() => config.policy.ceiling = ceiling,
                Ok(ceiling) => {
                    warn!(var = CEILING_VAR, %ceiling, "ceiling must be positive, keeping default")
                }
                Err(e) => warn!(var = CEILING_VAR, reason = %e, "keeping default"),
            }
        }

        if let Some(raw) = lookup(MAX_WITHDRAWALS_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(max) => config.policy.max_withdrawals = max,
                Err(e) => warn!(var = MAX_WITHDRAWALS_VAR, reason = %e, "keeping default"),
            }
        }

        config
    }
}
