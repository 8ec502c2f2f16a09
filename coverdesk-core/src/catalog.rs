//! Immutable policy catalog

use crate::error::{CatalogError, Result};
use crate::query::PolicyQuery;
use crate::types::Policy;
use ahash::AHashSet;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;

static BUILTIN: Lazy<Arc<[Policy]>> = Lazy::new(|| {
    Arc::from(vec![
        Policy::new(1, "Secure Future Term Life", "Term Life", 5000, 1_000_000),
        Policy::new(2, "Health Shield Plan", "Health", 3000, 500_000),
        Policy::new(3, "Car Protect Plan", "Vehicle", 2000, 300_000),
        Policy::new(4, "Family Guardian Insurance", "Term Life", 4500, 750_000),
        Policy::new(5, "Wellness Complete Health", "Health", 3500, 600_000),
    ])
});

/// Read-only, ordered snapshot of policy records.
///
/// Cloning is cheap: all clones share the same backing slice.
#[derive(Debug, Clone)]
pub struct PolicyCatalog {
    policies: Arc<[Policy]>,
}

impl PolicyCatalog {
    /// The five built-in policies, in insertion order
    pub fn builtin() -> Self {
        PolicyCatalog {
            policies: Arc::clone(&*BUILTIN),
        }
    }

    /// Build a catalog from arbitrary records.
    ///
    /// Ids must be unique; premium and coverage must be non-negative.
    pub fn from_policies(policies: Vec<Policy>) -> Result<Self> {
        let mut seen = AHashSet::with_capacity(policies.len());
        for policy in &policies {
            if !seen.insert(policy.id) {
                return Err(CatalogError::InvalidCatalog(format!(
                    "duplicate id {}",
                    policy.id
                )));
            }
            if policy.premium < 0 || policy.coverage < 0 {
                return Err(CatalogError::InvalidCatalog(format!(
                    "policy {} has a negative amount",
                    policy.id
                )));
            }
        }

        Ok(PolicyCatalog {
            policies: Arc::from(policies),
        })
    }

    /// Run a query against the catalog
    pub fn search(&self, query: &PolicyQuery) -> Vec<Policy> {
        let results = query.apply(self.policies.iter());
        debug!(
            matched = results.len(),
            total = self.policies.len(),
            unfiltered = query.is_unfiltered(),
            sort = ?query.sort,
            "policy search"
        );
        results
    }

    /// Distinct type labels; order is unspecified
    pub fn policy_types(&self) -> Vec<String> {
        self.policies
            .iter()
            .map(|policy| policy.policy_type.as_str())
            .collect::<AHashSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Look up a single policy by id
    pub fn get(&self, id: i64) -> Result<&Policy> {
        self.policies
            .iter()
            .find(|policy| policy.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Iterate over records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Policy> {
        self.policies.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl Default for PolicyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
