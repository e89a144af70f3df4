use publisher_roi::models::CalculatorInput;
use publisher_roi::routes::{api, routes};
use publisher_roi::services::calculator::{Calculator, CalculatorSettings};
use publisher_roi::services::rate_tables::RateTable;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use warp::http::StatusCode;

fn calculator() -> Arc<Calculator> {
    Arc::new(Calculator::default())
}

fn body_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("response body is JSON")
}

#[tokio::test]
async fn get_projection_matches_worked_examples() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi?targetSubscribers=1000&monthlyPrice=10&estimatedVisitors=50000")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());

    let trailguide = &body["projection"]["trailguide"];
    assert_eq!(trailguide["visitorsNeeded"], 40_000);
    assert_eq!(trailguide["emailListNeeded"], 14_286);
    assert_eq!(trailguide["revenue"], 10_000.0);
    assert_eq!(trailguide["monthlyFees"], 1_000.0);
    assert_eq!(trailguide["netRoi"], 107_000.0);

    assert_eq!(body["projection"]["agency"]["visitorsNeeded"], 100_000);
    assert_eq!(body["projection"]["agency"]["netRoi"], 39_000.0);
    assert_eq!(body["projection"]["diy"]["netRoi"], 115_800.0);

    assert_eq!(body["comparison"]["bestNetRoi"], "diy");
    assert_eq!(body["comparison"]["fewestVisitorsNeeded"], "trailguide");
    assert_eq!(body["comparison"]["achievability"]["trailguide"]["achievable"], true);
    assert_eq!(body["comparison"]["achievability"]["diy"]["visitorGap"], 50_000);
}

#[tokio::test]
async fn get_projection_uses_configured_defaults() {
    let settings = CalculatorSettings {
        default_input: CalculatorInput::new(2000, 10.0, 80_000),
        ..CalculatorSettings::default()
    };
    let calculator = Arc::new(Calculator::new(settings, RateTable::standard()));

    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi?monthlyPrice=20")
        .reply(&routes(calculator))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(
        body["input"],
        json!({"targetSubscribers": 2000, "monthlyPrice": 20.0, "estimatedVisitors": 80_000})
    );
    assert_eq!(body["projection"]["trailguide"]["revenue"], 40_000.0);
}

#[tokio::test]
async fn get_projection_without_query_uses_defaults() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["input"]["targetSubscribers"], 1000);
    assert_eq!(body["projection"]["trailguide"]["netRoi"], 107_000.0);
}

#[tokio::test]
async fn invalid_input_is_a_bad_request() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi?targetSubscribers=0")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res.body());
    assert_eq!(body["error"], "target subscribers must be greater than zero");
}

#[tokio::test]
async fn malformed_query_is_a_bad_request() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi?targetSubscribers=lots")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res.body())["error"], "Invalid query string");
}

#[tokio::test]
async fn clamp_flag_pulls_inputs_into_slider_range() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi?targetSubscribers=50000&monthlyPrice=1&estimatedVisitors=5&clamp=true")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(
        body["input"],
        json!({"targetSubscribers": 10_000, "monthlyPrice": 5.0, "estimatedVisitors": 10_000})
    );
    assert_eq!(body["projection"]["trailguide"]["visitorsNeeded"], 400_000);
}

#[tokio::test]
async fn post_projection_accepts_json_input() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/roi")
        .json(&json!({"targetSubscribers": 1000, "monthlyPrice": 10, "estimatedVisitors": 120000}))
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["projection"]["agency"]["netRoi"], 39_000.0);
    assert_eq!(body["comparison"]["achievability"]["agency"]["achievable"], true);
    assert_eq!(body["comparison"]["achievability"]["agency"]["visitorGap"], 0);
}

#[tokio::test]
async fn post_projection_rejects_bad_body() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/roi")
        .json(&json!({"targetSubscribers": "many"}))
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error = body_json(res.body())["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Invalid request body"), "{}", error);
}

#[tokio::test]
async fn post_projection_validates_price() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/roi")
        .json(&json!({"targetSubscribers": 1000, "monthlyPrice": -4, "estimatedVisitors": 50000}))
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(res.body())["error"],
        "monthly price must be a positive number, got -4"
    );
}

#[tokio::test]
async fn revenue_too_large_to_project_is_a_bad_request() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi?targetSubscribers=1000&monthlyPrice=1e306")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error = body_json(res.body())["error"].as_str().unwrap().to_string();
    assert!(error.contains("too large to project"), "{}", error);
}

#[tokio::test]
async fn post_projection_clamps_when_asked() {
    let res = warp::test::request()
        .method("POST")
        .path("/api/v1/roi?clamp=true")
        .json(&json!({"targetSubscribers": 50000, "monthlyPrice": 500, "estimatedVisitors": 1}))
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(
        body["input"],
        json!({"targetSubscribers": 10_000, "monthlyPrice": 50.0, "estimatedVisitors": 10_000})
    );
    assert_eq!(body["projection"]["diy"]["visitorsNeeded"], 1_000_000);
    assert_eq!(body["projection"]["diy"]["revenue"], 500_000.0);
}

#[tokio::test]
async fn models_lists_the_rate_table() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi/models")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    let models = body.as_array().unwrap();
    assert_eq!(models.len(), 3);
    assert_eq!(models[0]["model"], "trailguide");
    assert_eq!(models[0]["displayName"], "TrailGuide");
    assert_eq!(models[0]["rates"]["siteToSubscriber"], 0.025);
    assert_eq!(models[1]["pricing"]["buildCost"], 75_000.0);
    assert_eq!(models[2]["model"], "diy");
    assert_eq!(models[2]["pricing"]["monthlyBase"], 350.0);
}

#[tokio::test]
async fn settings_expose_copy_defaults_and_bounds() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi/settings")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res.body());
    assert_eq!(body["title"], CalculatorSettings::default().title);
    assert_eq!(body["defaultInput"]["targetSubscribers"], 1000);
    assert_eq!(body["bounds"]["targetSubscribers"], json!({"min": 100, "max": 10_000}));
    assert_eq!(body["bounds"]["monthlyPrice"], json!({"min": 5.0, "max": 50.0}));
    assert_eq!(body["bounds"]["estimatedVisitors"], json!({"min": 10_000, "max": 200_000}));
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/nothing")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res.body())["error"], "Not Found");
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let res = warp::test::request()
        .method("DELETE")
        .path("/api/v1/roi")
        .reply(&routes(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn every_request_reaches_the_observer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let calculator = Arc::new(Calculator::default().with_observer(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    let filter = routes(calculator);

    for path in ["/api/v1/roi", "/api/v1/roi?targetSubscribers=500", "/api/v1/roi?targetSubscribers=0"] {
        warp::test::request().method("GET").path(path).reply(&filter).await;
    }

    // the rejected request never reaches the calculator
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn cors_allows_cross_origin_widget() {
    let res = warp::test::request()
        .method("GET")
        .path("/api/v1/roi")
        .header("origin", "https://publisher.example")
        .reply(&api(calculator()))
        .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("access-control-allow-origin"));
}
