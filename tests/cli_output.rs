//! CLI output formatting tests.
//!
//! JSON output with `--json`, key-value pretty-print otherwise.

use harvestapi::{Client, Expense, PrettyPrint, Role, Task};

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_preserves_fields() {
    let client = make_test_client();
    let json_output = serde_json::to_string_pretty(&client).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed["name"], "123 Industries");
    assert_eq!(parsed["currency"], "EUR");
    assert_eq!(parsed["created_at"], "2017-06-26T21:02:12Z");
}

#[test]
fn test_json_output_for_list_is_array() {
    let clients = vec![make_test_client(), make_test_client()];
    let json_output = serde_json::to_string_pretty(&clients).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_expense_dates_serialize_as_iso() {
    let expense = make_test_expense();
    let parsed = serde_json::to_value(&expense).unwrap();

    assert_eq!(parsed["spent_date"], "2017-03-03");
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let output = make_test_client().pretty_print();

    let parse_result: Result<serde_json::Value, _> = serde_json::from_str(&output);
    assert!(parse_result.is_err(), "Default output should NOT be valid JSON");
}

#[test]
fn test_role_pretty_print_counts_users() {
    let role: Role = serde_json::from_value(serde_json::json!({
        "id": 617670,
        "name": "Designer",
        "user_ids": [1782959, 1782884]
    }))
    .unwrap();

    let output = role.pretty_print();
    assert!(output.starts_with("Role #617670"));
    assert!(output.contains("Users:          2"));
}

#[test]
fn test_task_pretty_print_shows_rate() {
    let task: Task = serde_json::from_value(serde_json::json!({
        "id": 8083800,
        "name": "Business Development",
        "billable_by_default": false,
        "default_hourly_rate": 120.0,
        "is_default": false,
        "is_active": true
    }))
    .unwrap();

    let output = task.pretty_print();
    assert!(output.contains("Business Development"));
    assert!(output.contains("Hourly Rate:    120.00"));
    assert!(!output.contains("Default:"));
}

#[test]
fn test_expense_pretty_print_shows_lock_reason() {
    let output = make_test_expense().pretty_print();

    assert!(output.contains("Project:        Marketing Website"));
    assert!(output.contains("Billing:        billed"));
    assert!(output.contains("Locked:         Expense is invoiced."));
}

// ============================================================================
// Test Helpers
// ============================================================================

fn make_test_client() -> Client {
    serde_json::from_value(serde_json::json!({
        "id": 5735776,
        "name": "123 Industries",
        "is_active": true,
        "address": "123 Main St.",
        "currency": "EUR",
        "created_at": "2017-06-26T21:02:12Z",
        "updated_at": "2017-06-26T21:34:11Z"
    }))
    .unwrap()
}

fn make_test_expense() -> Expense {
    serde_json::from_value(serde_json::json!({
        "id": 15296442,
        "total_cost": 33.35,
        "spent_date": "2017-03-03",
        "billable": true,
        "is_billed": true,
        "is_locked": true,
        "locked_reason": "Expense is invoiced.",
        "project": {"id": 14307913, "name": "Marketing Website", "code": "MW"}
    }))
    .unwrap()
}
