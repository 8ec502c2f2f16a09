//! Policy record type

use serde::{Deserialize, Serialize};
use std::fmt;

/// An insurance product record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier
    pub id: i64,
    /// Display name (e.g., "Health Shield Plan")
    pub name: String,
    /// Category label (e.g., "Term Life", "Health", "Vehicle")
    #[serde(rename = "type")]
    pub policy_type: String,
    /// Cost of the policy
    pub premium: i64,
    /// Payout limit of the policy
    pub coverage: i64,
}

impl Policy {
    /// Create a new policy record
    pub fn new(
        id: i64,
        name: impl Into<String>,
        policy_type: impl Into<String>,
        premium: i64,
        coverage: i64,
    ) -> Self {
        Policy {
            id,
            name: name.into(),
            policy_type: policy_type.into(),
            premium,
            coverage,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} [{}] premium={} coverage={}",
            self.id, self.name, self.policy_type, self.premium, self.coverage
        )
    }
}
