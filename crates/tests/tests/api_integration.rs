use std::io::Write;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use wander_api::{build_app, ApiConfig};
use wander_tests::{body_json, body_text, get, post_json, post_raw};

fn app() -> Router {
    build_app(&ApiConfig::default()).expect("app should build")
}

#[tokio::test]
async fn health_reports_catalog_size() {
    let response = app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let parsed = body_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["destinations"], 4);
}

#[tokio::test]
async fn itinerary_endpoint_matches_cost_formula() {
    let request = post_json(
        "/v1/itinerary",
        json!({
            "destination": "JAIPUR",
            "days": 3,
            "preferences": ["heritage", "nightlife"]
        }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["destination"], "Jaipur");
    assert_eq!(parsed["matched_by"], "exact");
    assert_eq!(parsed["cost"]["per_day"], 2800);
    assert_eq!(parsed["cost"]["total"], 8400);
    assert_eq!(parsed["days"][1]["preference"], "nightlife");
    assert_eq!(parsed["days"][1]["activity"], "Evening at Chokhi Dhani");
    assert!(parsed.get("budget").is_none());
}

#[tokio::test]
async fn itinerary_endpoint_defaults_bad_input() {
    let request = post_json(
        "/v1/itinerary",
        json!({
            "destination": "Atlantis",
            "days": "lots",
            "budget": "1000",
            "preferences": []
        }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["destination"], "Delhi");
    assert_eq!(parsed["matched_by"], "fallback");
    assert_eq!(parsed["days"].as_array().map(Vec::len), Some(0));
    assert_eq!(parsed["cost"]["per_day"], 3000);
    assert_eq!(parsed["budget"]["within_budget"], true);
}

#[tokio::test]
async fn itinerary_endpoint_flags_overrun() {
    let request = post_json(
        "/v1/itinerary",
        json!({
            "destination": "go",
            "days": "2",
            "budget": 5000,
            "preferences": ["adventure"]
        }),
    );

    let parsed = body_json(app().oneshot(request).await.unwrap()).await;
    assert_eq!(parsed["destination"], "Goa");
    assert_eq!(parsed["matched_by"], "partial");
    assert_eq!(parsed["cost"]["total"], 8400);
    assert_eq!(parsed["budget"]["within_budget"], false);
    assert_eq!(parsed["budget"]["shortfall"], 3400);
}

#[tokio::test]
async fn form_page_renders_generate_form() {
    let response = app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("content-security-policy"));

    let html = body_text(response).await;
    assert!(html.contains("action=\"/generate\""));
    assert!(html.contains("name=\"pref\" value=\"adventure\""));
}

#[tokio::test]
async fn generate_form_post_renders_itinerary_html() {
    let request = Request::builder()
        .method("POST")
        .uri("/generate")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("dest=jaipur&days=4&budget=&pref=heritage"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<h2>Suggested itinerary for Jaipur</h2>"));
    assert!(html.contains("<h3>Day 4: Heritage</h3><p>Tour the City Palace</p>"));
    assert!(html.contains("₹9,600"));
}

#[tokio::test]
async fn destinations_lists_catalog() {
    let response = app().oneshot(get("/v1/destinations")).await.unwrap();

    let parsed = body_json(response).await;
    let names = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Delhi", "Jaipur", "Goa", "Kerala"]);
}

#[tokio::test]
async fn custom_catalog_file_is_served() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"name": "Quiet Town", "heritage": ["Old library"], "cost_per_day": 1000}}]"#
    )
    .unwrap();

    let config = ApiConfig {
        catalog_path: Some(file.path().to_path_buf()),
        ..ApiConfig::default()
    };
    let app = build_app(&config).expect("custom catalog should load");

    let request = post_json(
        "/v1/itinerary",
        json!({ "destination": "anything", "days": 2, "preferences": ["nightlife"] }),
    );
    let parsed = body_json(app.oneshot(request).await.unwrap()).await;
    assert_eq!(parsed["destination"], "Quiet Town");
    assert_eq!(parsed["days"][0]["activity"], "Free exploration");
    assert_eq!(parsed["days"][1]["activity"], "Free exploration");
}

#[tokio::test]
async fn invalid_catalog_file_fails_app_build() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[]").unwrap();

    let config = ApiConfig {
        catalog_path: Some(file.path().to_path_buf()),
        ..ApiConfig::default()
    };
    assert!(build_app(&config).is_err());
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let response = app().oneshot(get("/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "not_found");
}

#[tokio::test]
async fn itinerary_endpoint_defaults_null_preferences() {
    let request = post_json(
        "/v1/itinerary",
        json!({ "destination": "jaipur", "days": 2, "preferences": null }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["days"][0]["preference"], "heritage");
    assert_eq!(parsed["cost"]["per_day"], 2400);
}

#[tokio::test]
async fn itinerary_endpoint_skips_non_string_tags() {
    let request = post_json(
        "/v1/itinerary",
        json!({ "destination": "jaipur", "days": 2, "preferences": ["heritage", 1] }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["days"][1]["activity"], "Admire Hawa Mahal");
}

#[tokio::test]
async fn itinerary_endpoint_truncates_fractional_days() {
    let request = post_json(
        "/v1/itinerary",
        json!({ "destination": "goa", "days": 2.7, "preferences": ["heritage"] }),
    );

    let parsed = body_json(app().oneshot(request).await.unwrap()).await;
    assert_eq!(parsed["days"].as_array().map(Vec::len), Some(2));
    assert_eq!(parsed["cost"]["total"], 8400);
}

#[tokio::test]
async fn malformed_json_gets_json_error() {
    let response = app()
        .oneshot(post_raw("/v1/itinerary", "application/json", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = body_json(response).await;
    assert_eq!(parsed["error"], "invalid_request");
    assert!(parsed["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn wrong_content_type_gets_json_error() {
    let response = app()
        .oneshot(post_raw("/v1/itinerary", "text/plain", "{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body_json(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn health_reports_fallback_rate_and_days_per_plan() {
    let app = app();
    for destination in ["Atlantis", "goa"] {
        let request = post_json(
            "/v1/itinerary",
            json!({ "destination": destination, "days": 3 }),
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let parsed = body_json(app.oneshot(get("/health")).await.unwrap()).await;
    assert_eq!(parsed["metrics"]["itineraries_total"], 2);
    assert_eq!(parsed["metrics"]["planned_days_total"], 6);
    assert_eq!(parsed["metrics"]["fallback_rate"], 0.5);
    assert_eq!(parsed["metrics"]["avg_days_per_itinerary"], 3.0);
}
