use crate::auth::create_calendar_hub;
use washbook_config::GcalConfig;

#[tokio::test]
async fn test_create_calendar_hub_missing_key_path() {
    let config = GcalConfig::default();

    let result = create_calendar_hub(&config).await;
    match result {
        Ok(_) => panic!("Expected an error but got Ok"),
        Err(err) => assert!(
            err.to_string().contains("Missing key_path"),
            "Error message should mention missing key_path, got: {}",
            err
        ),
    }
}

#[tokio::test]
async fn test_create_calendar_hub_invalid_key_path() {
    let config = GcalConfig {
        key_path: Some("/nonexistent/washbook/service-account.json".to_string()),
        ..Default::default()
    };

    let result = create_calendar_hub(&config).await;
    assert!(
        result.is_err(),
        "Should return an error when key_path does not exist"
    );
}
