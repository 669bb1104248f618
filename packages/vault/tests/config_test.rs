//! Tests for warehouse settings parsing and validation

use budgetkey_vault::{SecretNames, VaultError, WarehouseSettings};
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let settings = WarehouseSettings::default();

    assert_eq!(settings.warehouse, "COMPUTE_WH");
    assert_eq!(settings.database, "BUDGET");
    assert_eq!(settings.schema, "RAW");
    assert_eq!(settings.role, "PUBLIC");
    assert_eq!(settings.secrets, SecretNames::default());
    assert_eq!(settings.secrets.private_key, "svc-snf-rsa-key");
    assert!(settings.validate().is_ok());
}

#[test]
fn test_empty_json_uses_defaults() {
    let settings = WarehouseSettings::from_json_str("{}").unwrap();
    assert_eq!(settings, WarehouseSettings::default());
}

#[test]
fn test_partial_json_overrides() {
    let json = r#"{ "schema": "MART", "secrets": { "account": "prod-acc" } }"#;
    let settings = WarehouseSettings::from_json_str(json).unwrap();

    assert_eq!(settings.schema, "MART");
    assert_eq!(settings.database, "BUDGET");
    assert_eq!(settings.secrets.account, "prod-acc");
    assert_eq!(settings.secrets.user, "svc-snf-user");
}

#[test]
fn test_malformed_json() {
    let err = WarehouseSettings::from_json_str("{ schema: ").unwrap_err();
    assert!(matches!(err, VaultError::Serialization(_)));
}

#[test]
fn test_blank_field_is_rejected() {
    let err = WarehouseSettings::from_json_str(r#"{ "role": "  " }"#).unwrap_err();
    assert!(matches!(err, VaultError::Configuration(ref msg) if msg.contains("role")));
}

#[test]
fn test_serialize_round_trip() {
    let settings = WarehouseSettings::default().with_role("ANALYST");
    let json = serde_json::to_string(&settings).unwrap();
    assert_eq!(WarehouseSettings::from_json_str(&json).unwrap(), settings);
}

#[tokio::test]
async fn test_from_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("warehouse.json");
    std::fs::write(&path, r#"{ "warehouse": "REPORTING_WH" }"#).unwrap();

    let settings = WarehouseSettings::from_json_file(&path).await.unwrap();
    assert_eq!(settings.warehouse, "REPORTING_WH");
}

#[tokio::test]
async fn test_from_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = WarehouseSettings::from_json_file(temp_dir.path().join("nope.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Io(_)));
}
