//! Integration tests for query reconciliation and the focus view, using wiremock
//! as the analysis service.

use chain_sentinel::analyzer::AnalyzerClient;
use chain_sentinel::engine::{Monitor, Status};
use core::time::Duration;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn monitor_over(server: &MockServer, names: &[&str]) -> Monitor {
    let client = AnalyzerClient::new(Url::parse(&server.uri()).unwrap(), Duration::from_secs(5)).unwrap();
    let monitor = Monitor::new(client);
    let names: Vec<String> = names.iter().map(ToString::to_string).collect();
    monitor.bootstrap(Some(names.as_slice())).await;
    monitor
}

#[tokio::test]
async fn test_query_replaces_focus_and_raises_matching_region() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_risk"))
        .and(body_partial_json(json!({ "query": "chip shortage" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "risk_score": 25,
            "report": "Chip supply is tightening.",
            "impacted_suppliers": [
                { "name": "Nippon Fab", "country": "Japan", "category": "Semiconductors", "risk_level": "Medium" }
            ]
        })))
        .mount(&server)
        .await;

    let monitor = monitor_over(&server, &["Taiwan", "Japan", "USA"]).await;

    let outcome = monitor.handle_query("chip shortage").await.unwrap().unwrap();
    assert_eq!(outcome.risk_score, 25);

    // Japan was safe and is raised to warning; the others are untouched
    assert_eq!(monitor.registry().region("Japan").unwrap().status(), Status::Warning);
    assert_eq!(monitor.registry().region("Taiwan").unwrap().status(), Status::Safe);
    assert_eq!(monitor.registry().region("USA").unwrap().status(), Status::Safe);

    // The focus result was replaced wholesale
    let focus = monitor.focus().unwrap();
    assert_eq!(focus.risk_score, 25);
    assert_eq!(focus.report, "Chip supply is tightening.");
    assert_eq!(focus.suppliers.len(), 1);
}

#[tokio::test]
async fn test_query_never_downgrades_a_scanned_region() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_risk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "risk_score": 5,
            "impacted_suppliers": [{ "name": "Y", "country": "Taiwan", "risk_level": "Low" }]
        })))
        .mount(&server)
        .await;

    let monitor = monitor_over(&server, &["Taiwan"]).await;
    monitor.registry().apply_scan_result("Taiwan", Status::Critical, 90, Vec::new());

    let _ = monitor.handle_query("calm seas").await.unwrap();

    assert_eq!(monitor.registry().region("Taiwan").unwrap().status(), Status::Critical);
}

#[tokio::test]
async fn test_empty_query_issues_no_request() {
    let server = MockServer::start().await;
    let monitor = monitor_over(&server, &["Taiwan"]).await;

    let outcome = monitor.handle_query("   \t ").await.unwrap();

    assert_eq!(outcome, None);
    assert_eq!(monitor.focus(), None);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_query_leaves_all_state_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze_risk"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let monitor = monitor_over(&server, &["Taiwan", "Japan"]).await;
    monitor.registry().apply_scan_result("Taiwan", Status::Warning, 40, Vec::new());
    assert!(monitor.select_region("Taiwan"));
    let focus_before = monitor.focus().unwrap();

    let result = monitor.handle_query("what changed?").await;
    assert!(result.is_err());

    assert_eq!(monitor.focus().unwrap(), focus_before);
    assert_eq!(monitor.registry().region("Taiwan").unwrap().status(), Status::Warning);
    assert_eq!(monitor.registry().region("Japan").unwrap().status(), Status::Safe);
}

#[tokio::test]
async fn test_selecting_unscanned_region_keeps_focus() {
    let server = MockServer::start().await;
    let monitor = monitor_over(&server, &["Taiwan", "Japan"]).await;

    monitor.registry().apply_scan_result("Taiwan", Status::Warning, 40, Vec::new());
    assert!(monitor.select_region("Taiwan"));
    let focus_before = monitor.focus().unwrap();

    // Japan has never been scanned, so selecting it is a no-op
    assert!(!monitor.select_region("Japan"));
    assert_eq!(monitor.focus().unwrap(), focus_before);
}

#[tokio::test]
async fn test_selecting_scanned_region_surfaces_cached_result() {
    let server = MockServer::start().await;
    let monitor = monitor_over(&server, &["Taiwan"]).await;

    let suppliers = vec![chain_sentinel::analyzer::Supplier {
        name: "X".to_string(),
        country: "Taiwan".to_string(),
        category: "Semiconductors".to_string(),
        risk_level: Some(chain_sentinel::analyzer::RiskLevel::High),
        trend: None,
    }];
    monitor.registry().apply_scan_result("Taiwan", Status::Critical, 80, suppliers);

    assert!(monitor.select_region("Taiwan"));

    let focus = monitor.focus().unwrap();
    assert_eq!(focus.risk_score, 80);
    assert_eq!(focus.suppliers.len(), 1);
}

#[tokio::test]
async fn test_query_during_inflight_cycle_leaves_consistent_state() {
    let server = MockServer::start().await;

    // Slow scan responses keep the cycle in flight while the query completes
    Mock::given(method("POST"))
        .and(path("/analyze_risk"))
        .and(body_partial_json(json!({ "query": "port strike" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "risk_score": 15,
            "impacted_suppliers": [{ "name": "Z", "country": "Japan", "risk_level": "Medium" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/analyze_risk"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "risk_score": 10 }))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let monitor = std::sync::Arc::new(monitor_over(&server, &["Taiwan", "Japan"]).await);

    let scanner = std::sync::Arc::clone(&monitor);
    let cycle = tokio::spawn(async move { scanner.run_cycle().await });
    let query = monitor.handle_query("port strike").await.unwrap();
    cycle.await.unwrap();

    assert!(query.is_some());

    // No torn region: every region finished its scan with a full result, and the
    // display order never changed
    let regions = monitor.regions();
    let names: Vec<&str> = regions.iter().map(|region| region.name()).collect();
    assert_eq!(names, ["Taiwan", "Japan"]);
    for region in &regions {
        assert!(!region.is_scanning());
        assert_eq!(region.risk_score(), Some(10));
    }
}
