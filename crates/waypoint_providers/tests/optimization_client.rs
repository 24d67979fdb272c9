mod setup;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use waypoint_providers::{
    optimization_client::{
        FailureKind, OptimizationClient, OptimizationClientParams, OptimizationError,
        RouteOptimizer,
    },
    route_option::{OptimizeRequest, TrafficLevel},
};

fn client_for(backend_url: String) -> OptimizationClient {
    OptimizationClient::new(OptimizationClientParams { backend_url })
}

#[tokio::test]
async fn test_sends_location_names_and_parses_route_options() {
    let router = Router::new().route(
        "/optimize_route",
        post(|Json(body): Json<Value>| async move {
            let names = body["locations"].clone();
            Json(json!({
                "routes": [
                    {
                        "start_time": "09:00 AM",
                        "total_duration": "12 minutes",
                        "route": names,
                        "leg_details": [
                            { "from": "A", "to": "B", "details": { "duration": "5 mins", "normal_duration": "3 mins", "traffic": "Heavy" } },
                            { "from": "B", "to": "C", "details": { "duration": "7 mins", "normal_duration": "7 mins", "traffic": "Normal" } }
                        ]
                    },
                    {
                        "start_time": "05:00 PM",
                        "total_duration": "15 minutes",
                        "route": ["A", "C", "B"],
                        "leg_details": []
                    }
                ]
            }))
        }),
    );
    let client = client_for(setup::spawn_backend(router).await);

    let request = OptimizeRequest::new(vec!["A".into(), "B".into(), "C".into()]);
    let routes = client.optimize(&request).await.unwrap();

    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].stops().unwrap(), ["A", "B", "C"]);
    assert_eq!(routes[0].total_duration.as_deref(), Some("12 minutes"));
    assert_eq!(routes[0].leg(0).unwrap().traffic, TrafficLevel::Heavy);
    assert_eq!(routes[0].leg(1).unwrap().slower_than_normal(), None);
    assert_eq!(routes[1].start_time.as_deref(), Some("05:00 PM"));
    assert!(routes[1].leg(0).is_none());
}

#[tokio::test]
async fn test_error_field_is_an_application_failure_even_on_server_error() {
    let router = Router::new().route(
        "/optimize_route",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Directions API quota exceeded" })),
            )
        }),
    );
    let client = client_for(setup::spawn_backend(router).await);

    let request = OptimizeRequest::new(vec!["A".into(), "B".into()]);
    let err = client.optimize(&request).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Application);
    assert_eq!(err.to_string(), "Directions API quota exceeded");
}

#[tokio::test]
async fn test_empty_routes_are_a_data_failure() {
    let router = Router::new().route(
        "/optimize_route",
        post(|| async { Json(json!({ "routes": [] })) }),
    );
    let client = client_for(setup::spawn_backend(router).await);

    let request = OptimizeRequest::new(vec!["A".into(), "B".into()]);
    let err = client.optimize(&request).await.unwrap_err();

    assert!(matches!(err, OptimizationError::NoRoutes));
    assert_eq!(err.kind(), FailureKind::Data);
}

#[tokio::test]
async fn test_fewer_than_two_locations_never_reach_the_backend() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let router = Router::new().route(
        "/optimize_route",
        post(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "routes": [] }))
            }
        }),
    );
    let client = client_for(setup::spawn_backend(router).await);

    let request = OptimizeRequest::new(vec!["A".into()]);
    let err = client.optimize(&request).await.unwrap_err();

    assert!(matches!(
        err,
        OptimizationError::TooFewLocations {
            required: 2,
            actual: 1
        }
    ));
    assert_eq!(err.kind(), FailureKind::Precondition);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_failure() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{}", address));
    let request = OptimizeRequest::new(vec!["A".into(), "B".into()]);
    let err = client.optimize(&request).await.unwrap_err();

    assert!(matches!(err, OptimizationError::Request(_)));
    assert_eq!(err.kind(), FailureKind::Transport);
}
