//! Operator input validation
//!
//! Every check here gates pod-spec submission. A failure never aborts the
//! hook; the handler reports it as a Blocked status with the reason.

use std::collections::BTreeMap;

use serde_yaml::Value;

use crate::config::CharmConfig;
use crate::error::{CharmError, Result};

pub const MIN_SA_PASSWORD_LENGTH: usize = 8;
pub const MAX_SA_PASSWORD_LENGTH: usize = 20;

/// Symbols the SA password policy accepts
pub const SA_PASSWORD_SYMBOLS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*'];

/// Parse the `ports` option as a YAML list.
///
/// The items are passed through to the pod spec untouched; only the
/// list shape is enforced.
pub fn parse_ports(raw: &str) -> Result<Vec<Value>> {
    let value: Value = serde_yaml::from_str(raw)
        .map_err(|_| CharmError::validation("ports is not a YAML list"))?;

    match value {
        Value::Sequence(ports) => Ok(ports),
        _ => Err(CharmError::validation("ports is not a YAML list")),
    }
}

/// SA password policy: 8-20 characters with at least one uppercase
/// letter, one lowercase letter, one digit, and one accepted symbol.
pub fn validate_sa_password(password: &str) -> Result<()> {
    let length = password.chars().count();

    if length < MIN_SA_PASSWORD_LENGTH {
        return Err(CharmError::Validation(format!(
            "sa_password too short (minimum {} characters)",
            MIN_SA_PASSWORD_LENGTH
        )));
    }

    if length > MAX_SA_PASSWORD_LENGTH {
        return Err(CharmError::Validation(format!(
            "sa_password too long (maximum {} characters)",
            MAX_SA_PASSWORD_LENGTH
        )));
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(CharmError::validation(
            "sa_password must contain an uppercase letter",
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(CharmError::validation(
            "sa_password must contain a lowercase letter",
        ));
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return Err(CharmError::validation("sa_password must contain a digit"));
    }

    if !password.chars().any(|c| SA_PASSWORD_SYMBOLS.contains(&c)) {
        return Err(CharmError::Validation(format!(
            "sa_password must contain one of '{}'",
            SA_PASSWORD_SYMBOLS.iter().collect::<String>()
        )));
    }

    Ok(())
}

/// Parse a YAML mapping option. Empty or whitespace-only input is an
/// empty mapping; anything else must be a mapping with string keys.
pub fn parse_mapping(field: &str, raw: &str) -> Result<BTreeMap<String, Value>> {
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_yaml::from_str(raw)
        .map_err(|_| CharmError::Validation(format!("{} is not a YAML mapping", field)))
}

/// Container config without secrets
pub fn sanitized_container_config(config: &CharmConfig) -> Result<BTreeMap<String, Value>> {
    parse_mapping("container_config", &config.container_config)
}

/// Container config merged with secrets; secrets win on key collision
pub fn full_container_config(config: &CharmConfig) -> Result<BTreeMap<String, Value>> {
    let mut merged = sanitized_container_config(config)?;
    merged.extend(parse_mapping("container_secrets", &config.container_secrets)?);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ports_accepts_lists() {
        let ports = parse_ports("[{name: tds, containerPort: 1433}]").unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0]["containerPort"], Value::from(1433));
    }

    #[test]
    fn test_parse_ports_rejects_mappings_and_scalars() {
        assert!(parse_ports("{name: tds}").is_err());
        assert!(parse_ports("1433").is_err());
        assert!(parse_ports("").is_err());
        assert!(parse_ports("{{not yaml").is_err());
    }

    #[test]
    fn test_password_policy_accepts_valid() {
        assert!(validate_sa_password("Valid123!").is_ok());
        assert!(validate_sa_password("MyC0m9l&xP@ssw0rd").is_ok());
    }

    #[test]
    fn test_password_policy_length() {
        assert!(validate_sa_password("short1!").is_err()); // 7 chars
        assert!(validate_sa_password("Aa1!aaaaaaaaaaaaaaaaa").is_err()); // 21 chars
        assert!(validate_sa_password("Aa1!aaaa").is_ok()); // exactly 8
    }

    #[test]
    fn test_password_policy_character_classes() {
        assert!(validate_sa_password("NOLOWER1!").is_err());
        assert!(validate_sa_password("alllower1!").is_err());
        assert!(validate_sa_password("nodigitABC!").is_err());
        assert!(validate_sa_password("NoSymbol123").is_err());
    }

    #[test]
    fn test_password_error_names_failed_clause() {
        let err = validate_sa_password("short1!").unwrap_err();
        assert!(err.to_string().contains("too short"));

        let err = validate_sa_password("nodigitABC!").unwrap_err();
        assert!(err.to_string().contains("digit"));
    }

    #[test]
    fn test_parse_mapping_empty_is_empty() {
        assert!(parse_mapping("container_config", "").unwrap().is_empty());
        assert!(parse_mapping("container_config", "   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_mapping_rejects_non_mappings() {
        let err = parse_mapping("container_config", "- a\n- b").unwrap_err();
        assert!(err.to_string().contains("container_config"));

        let err = parse_mapping("container_secrets", "just a scalar").unwrap_err();
        assert!(err.to_string().contains("container_secrets"));
    }

    #[test]
    fn test_full_container_config_merges_secrets_over_config() {
        let config = CharmConfig {
            container_config: "{A: from-config, B: kept}".to_string(),
            container_secrets: "{A: from-secrets}".to_string(),
            ..CharmConfig::default()
        };

        let merged = full_container_config(&config).unwrap();
        assert_eq!(merged["A"], Value::from("from-secrets"));
        assert_eq!(merged["B"], Value::from("kept"));
    }
}
