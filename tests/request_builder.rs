//! Request construction tests.
//!
//! Everything here runs without a network: endpoints are turned into
//! request descriptors and the resulting URL, headers and body are checked.

use chrono::{NaiveDate, TimeZone, Utc};
use harvestapi::{
    ClientParams, ExpenseListQuery, HarvestError, Method, NoFilter, Paged, PathParams,
    RequestOptions, CREATE_CLIENT, DELETE_ROLE, GET_COST_RATE, LIST_CLIENTS, LIST_EXPENSES,
    LIST_ROLES, USER_AGENT,
};

const BASE: &str = "https://api.harvestapp.com/v2";

fn base() -> PathParams {
    PathParams::new().with("baseurl", BASE)
}

#[test]
fn test_roles_page_two() {
    let request = LIST_ROLES
        .request(
            &base(),
            Some(&Paged::new(NoFilter {}, 2, 100)),
            None,
            &RequestOptions::new(),
        )
        .unwrap();

    assert_eq!(request.method(), Method::Get);
    assert_eq!(
        request.url().as_str(),
        "https://api.harvestapp.com/v2/roles?page=2&per_page=100"
    );
    assert_eq!(request.body(), None);
}

#[test]
fn test_expense_filters_follow_template_order() {
    let query = ExpenseListQuery {
        user_id: Some(1234),
        is_billed: Some(false),
        from: NaiveDate::from_ymd_opt(2023, 4, 1),
        to: NaiveDate::from_ymd_opt(2023, 4, 10),
        ..Default::default()
    };

    let request = LIST_EXPENSES
        .request(
            &base(),
            Some(&Paged::new(query, 2, 100)),
            None,
            &RequestOptions::new(),
        )
        .unwrap();

    let url = request.url().as_str();
    assert_eq!(
        url,
        "https://api.harvestapp.com/v2/expenses?user_id=1234&is_billed=false&from=2023-04-01&to=2023-04-10&page=2&per_page=100"
    );
    assert!(!url.contains("client_id"));
    assert!(!url.contains("project_id"));
    assert!(!url.contains("updated_since"));
}

#[test]
fn test_timestamp_filter_is_encoded() {
    let query = harvestapi::ClientListQuery {
        updated_since: Some(Utc.with_ymd_and_hms(2023, 4, 1, 8, 30, 0).unwrap()),
        ..Default::default()
    };

    let request = LIST_CLIENTS
        .request(
            &base(),
            Some(&Paged::new(query, 1, 100)),
            None,
            &RequestOptions::new(),
        )
        .unwrap();

    let pairs: Vec<(String, String)> = request
        .url()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs[0],
        ("updated_since".to_string(), "2023-04-01T08:30:00Z".to_string())
    );
    // ':' is not left raw in the query string.
    assert!(!request.url().query().unwrap_or_default().contains("08:30"));
}

#[test]
fn test_default_headers_for_json_get() {
    let request = LIST_ROLES
        .request(&base(), None, None, &RequestOptions::new())
        .unwrap();

    assert_eq!(request.header("user-agent"), Some(USER_AGENT));
    assert_eq!(request.header("Accept"), Some("application/json"));
    assert_eq!(request.header("Content-Type"), None);
    assert_eq!(request.url().as_str(), "https://api.harvestapp.com/v2/roles");
}

#[test]
fn test_body_sets_content_type() {
    let params = ClientParams {
        name: Some("Acme & Sons".to_string()),
        currency: Some("EUR".to_string()),
        ..Default::default()
    };

    let request = CREATE_CLIENT
        .request(&base(), None, Some(&params), &RequestOptions::new())
        .unwrap();

    assert_eq!(request.method(), Method::Post);
    assert_eq!(request.header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(request.body().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"name": "Acme & Sons", "currency": "EUR"})
    );
}

#[test]
fn test_caller_headers_override_defaults() {
    let options = RequestOptions::new()
        .header("accept", "text/csv")
        .header("X-Request-Id", "abc");

    let request = LIST_ROLES.request(&base(), None, None, &options).unwrap();

    assert_eq!(request.header("Accept"), Some("text/csv"));
    assert_eq!(request.header("x-request-id"), Some("abc"));
    let accepts = request
        .headers()
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("accept"))
        .count();
    assert_eq!(accepts, 1);
}

#[test]
fn test_empty_response_route_has_no_accept() {
    let request = DELETE_ROLE
        .request(
            &base().with("role_id", 617670),
            None,
            None,
            &RequestOptions::new(),
        )
        .unwrap();

    assert_eq!(request.method(), Method::Delete);
    assert_eq!(request.url().path(), "/v2/roles/617670");
    assert_eq!(request.header("Accept"), None);
}

#[test]
fn test_nested_path_parameters() {
    let request = GET_COST_RATE
        .request(
            &base().with("user_id", 3230547).with("cost_rate_id", 125068758),
            None,
            None,
            &RequestOptions::new(),
        )
        .unwrap();

    assert_eq!(
        request.url().as_str(),
        "https://api.harvestapp.com/v2/users/3230547/cost_rates/125068758"
    );
}

#[test]
fn test_missing_path_parameter_is_configuration_error() {
    let err = GET_COST_RATE
        .request(
            &base().with("user_id", 3230547),
            None,
            None,
            &RequestOptions::new(),
        )
        .unwrap_err();

    assert!(err.is_configuration());
    match err {
        HarvestError::MissingPathParameter { name, .. } => assert_eq!(name, "cost_rate_id"),
        other => panic!("Expected MissingPathParameter, got {other:?}"),
    }
}

#[test]
fn test_base_url_case_is_preserved() {
    let request = LIST_ROLES
        .request(
            &PathParams::new().with("baseurl", "https://proxy.example.com/Harvest/V2"),
            None,
            None,
            &RequestOptions::new(),
        )
        .unwrap();

    assert_eq!(request.url().path(), "/Harvest/V2/roles");
}

#[test]
fn test_dot_segment_path_value_is_rejected() {
    for value in [".", ".."] {
        let err = GET_COST_RATE
            .request(
                &base().with("user_id", value).with("cost_rate_id", 1),
                None,
                None,
                &RequestOptions::new(),
            )
            .unwrap_err();

        assert!(err.is_configuration());
        match err {
            HarvestError::InvalidPathParameter { name, .. } => assert_eq!(name, "user_id"),
            other => panic!("Expected InvalidPathParameter, got {other:?}"),
        }
    }
}
