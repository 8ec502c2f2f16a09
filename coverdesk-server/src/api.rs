//! API request and response types

use crate::error::ApiError;
use coverdesk_core::{PolicyQuery, SortOrder};
use serde::{Deserialize, Serialize};

/// Query string accepted by `GET /api/policies`.
///
/// Built from the raw key/value pairs with [`PolicyQueryParams::from_pairs`].
/// A repeated key keeps its last value, and numeric fields are only parsed
/// once that value is chosen. `sort` stays a raw string: values other than
/// `asc`/`desc` are accepted and mean "no sort".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PolicyQueryParams {
    /// Case-insensitive name substring
    pub name: Option<String>,

    /// Exact policy type label
    #[serde(rename = "type")]
    pub policy_type: Option<String>,

    /// Inclusive lower premium bound
    pub min_premium: Option<i64>,

    /// Inclusive upper premium bound
    pub max_premium: Option<i64>,

    /// Inclusive lower coverage bound
    pub min_coverage: Option<i64>,

    /// `asc` or `desc`; anything else leaves insertion order
    pub sort: Option<String>,
}

impl PolicyQueryParams {
    /// Fold decoded query pairs into params, last occurrence wins.
    ///
    /// Unknown keys are ignored. A numeric field whose final value is not an
    /// integer is a [`ApiError::BadRequest`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = PolicyQueryParams::default();
        let mut min_premium = None;
        let mut max_premium = None;
        let mut min_coverage = None;

        for (key, value) in pairs {
            match key.as_str() {
                "name" => params.name = Some(value),
                "type" => params.policy_type = Some(value),
                "min_premium" => min_premium = Some(value),
                "max_premium" => max_premium = Some(value),
                "min_coverage" => min_coverage = Some(value),
                "sort" => params.sort = Some(value),
                _ => {}
            }
        }

        params.min_premium = parse_integer("min_premium", min_premium)?;
        params.max_premium = parse_integer("max_premium", max_premium)?;
        params.min_coverage = parse_integer("min_coverage", min_coverage)?;

        Ok(params)
    }
}

fn parse_integer(field: &str, raw: Option<String>) -> Result<Option<i64>, ApiError> {
    raw.map(|value| {
        value.parse::<i64>().map_err(|err| {
            ApiError::BadRequest(format!(
                "{}: expected an integer, got {:?} ({})",
                field, value, err
            ))
        })
    })
    .transpose()
}

impl From<PolicyQueryParams> for PolicyQuery {
    fn from(params: PolicyQueryParams) -> Self {
        PolicyQuery {
            name: params.name,
            policy_type: params.policy_type,
            min_premium: params.min_premium,
            max_premium: params.max_premium,
            min_coverage: params.min_coverage,
            sort: params.sort.as_deref().and_then(SortOrder::parse),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: HealthStatus,

    /// Service version
    pub version: String,

    /// Uptime in seconds
    pub uptime_seconds: u64,

    /// Number of records in the catalog
    pub policy_count: usize,
}

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Service is healthy
    Healthy,
    /// Service is running but has nothing to serve
    Degraded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_into_query() {
        let params = PolicyQueryParams {
            name: Some("health".to_string()),
            policy_type: Some("Health".to_string()),
            min_premium: Some(3200),
            max_premium: None,
            min_coverage: Some(0),
            sort: Some("desc".to_string()),
        };

        let query: PolicyQuery = params.into();
        assert_eq!(query.name.as_deref(), Some("health"));
        assert_eq!(query.policy_type.as_deref(), Some("Health"));
        assert_eq!(query.min_premium, Some(3200));
        assert_eq!(query.max_premium, None);
        assert_eq!(query.min_coverage, Some(0));
        assert_eq!(query.sort, Some(SortOrder::Desc));
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_pairs_last_value_wins() {
        let params = PolicyQueryParams::from_pairs(pairs(&[
            ("sort", "asc"),
            ("type", "Health"),
            ("sort", "desc"),
            ("type", "Vehicle"),
        ]))
        .unwrap();
        assert_eq!(params.sort.as_deref(), Some("desc"));
        assert_eq!(params.policy_type.as_deref(), Some("Vehicle"));
    }

    #[test]
    fn test_from_pairs_parses_only_final_number() {
        let params =
            PolicyQueryParams::from_pairs(pairs(&[("min_premium", "abc"), ("min_premium", "3000")]))
                .unwrap();
        assert_eq!(params.min_premium, Some(3000));

        let err =
            PolicyQueryParams::from_pairs(pairs(&[("min_premium", "3000"), ("min_premium", "abc")]))
                .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg.starts_with("min_premium")));
    }

    #[test]
    fn test_from_pairs_rejects_empty_number_and_ignores_unknown_keys() {
        let params = PolicyQueryParams::from_pairs(pairs(&[("page", "2"), ("name", "")])).unwrap();
        assert_eq!(params.name.as_deref(), Some(""));
        assert_eq!(params.min_coverage, None);

        let err = PolicyQueryParams::from_pairs(pairs(&[("max_premium", "")])).unwrap_err();
        assert_eq!(err.kind(), "bad_request");
    }

    #[test]
    fn test_unknown_sort_becomes_none() {
        let params = PolicyQueryParams {
            sort: Some("premium".to_string()),
            ..Default::default()
        };
        let query: PolicyQuery = params.into();
        assert_eq!(query.sort, None);
    }

    #[test]
    fn test_health_response_is_camel_case() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0".to_string(),
            uptime_seconds: 12,
            policy_count: 5,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["uptimeSeconds"], 12);
        assert_eq!(json["policyCount"], 5);
    }
}
