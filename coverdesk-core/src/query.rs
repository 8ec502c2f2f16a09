//! Query model for filtering and sorting policies

use crate::types::Policy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Premium sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Cheapest first
    Asc,
    /// Most expensive first
    Desc,
}

impl SortOrder {
    /// Parse a raw sort value. Anything other than `asc`/`desc` means "no sort".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    /// Wire name of the direction
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A conjunctive set of optional filters plus an optional premium sort.
///
/// Unset filters are no-ops. Empty `name`/`type` strings are treated as unset;
/// numeric bounds are inclusive and always applied when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyQuery {
    /// Case-insensitive substring of the policy name
    pub name: Option<String>,
    /// Exact policy type label
    pub policy_type: Option<String>,
    /// Inclusive lower premium bound
    pub min_premium: Option<i64>,
    /// Inclusive upper premium bound
    pub max_premium: Option<i64>,
    /// Inclusive lower coverage bound
    pub min_coverage: Option<i64>,
    /// Premium sort direction
    pub sort: Option<SortOrder>,
}

impl PolicyQuery {
    /// Create an empty query that matches everything in insertion order
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name substring
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the exact type label
    pub fn policy_type(mut self, policy_type: impl Into<String>) -> Self {
        self.policy_type = Some(policy_type.into());
        self
    }

    /// Set the minimum premium
    pub fn min_premium(mut self, value: i64) -> Self {
        self.min_premium = Some(value);
        self
    }

    /// Set the maximum premium
    pub fn max_premium(mut self, value: i64) -> Self {
        self.max_premium = Some(value);
        self
    }

    /// Set the minimum coverage
    pub fn min_coverage(mut self, value: i64) -> Self {
        self.min_coverage = Some(value);
        self
    }

    /// Set the sort direction
    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }

    /// Set the sort direction from a raw value; unknown values clear it
    pub fn sort_raw(mut self, raw: &str) -> Self {
        self.sort = SortOrder::parse(raw);
        self
    }

    /// True when no filter would remove a record
    pub fn is_unfiltered(&self) -> bool {
        self.name_filter().is_none()
            && self.type_filter().is_none()
            && self.min_premium.is_none()
            && self.max_premium.is_none()
            && self.min_coverage.is_none()
    }

    /// Check the policy against every supplied filter
    pub fn matches(&self, policy: &Policy) -> bool {
        self.matches_name(policy)
            && self.matches_type(policy)
            && self.min_premium.map_or(true, |min| policy.premium >= min)
            && self.max_premium.map_or(true, |max| policy.premium <= max)
            && self.min_coverage.map_or(true, |min| policy.coverage >= min)
    }

    /// Filter `policies` in order, then sort by premium if requested.
    ///
    /// The sort is stable, so records with equal premiums keep their
    /// relative input order.
    pub fn apply<'a, I>(&self, policies: I) -> Vec<Policy>
    where
        I: IntoIterator<Item = &'a Policy>,
    {
        let mut results: Vec<Policy> = policies
            .into_iter()
            .filter(|policy| self.matches(policy))
            .cloned()
            .collect();

        match self.sort {
            Some(SortOrder::Asc) => results.sort_by_key(|policy| policy.premium),
            Some(SortOrder::Desc) => {
                results.sort_by(|a, b| b.premium.cmp(&a.premium));
            }
            None => {}
        }

        results
    }

    fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    fn type_filter(&self) -> Option<&str> {
        self.policy_type.as_deref().filter(|t| !t.is_empty())
    }

    fn matches_name(&self, policy: &Policy) -> bool {
        match self.name_filter() {
            Some(needle) => policy
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }

    fn matches_type(&self, policy: &Policy) -> bool {
        match self.type_filter() {
            Some(t) => policy.policy_type == t,
            None => true,
        }
    }
}
