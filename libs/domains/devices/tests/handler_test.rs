//! Handler tests for the devices domain.
//!
//! These drive the axum router end to end against a containerized MongoDB,
//! checking status codes and wire bodies, including the error envelope
//! produced for each taxonomy kind.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_devices::{handlers, DeviceService, MongoDeviceRepository};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use test_utils::{TestDataBuilder, TestMongo};
use tower::ServiceExt; // For oneshot()

async fn app(mongo: &TestMongo) -> Router {
    let repository = MongoDeviceRepository::new(&mongo.database());
    repository.ensure_indexes().await.unwrap();
    handlers::router(DeviceService::new(repository))
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create_device(app: &Router, name: &str, brand: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "name": name, "brand": brand })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_device_returns_201_with_assigned_id() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;
    let builder = TestDataBuilder::from_test_name("handler_create_201");

    let name = builder.name("device", "main");
    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": name, "brand": "brand3" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], name.as_str());
    assert_eq!(body["id"].as_str().unwrap().len(), 24);
}

#[tokio::test]
async fn create_device_requires_a_brand() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": "earth" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({
            "result": false,
            "code": 1500001,
            "message": "parameter 'brand' in body is required",
        })
    );
}

#[tokio::test]
async fn create_device_rejects_unknown_brands() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let response = app
        .oneshot(json_request("POST", "/", json!({ "name": "earth", "brand": "brandx" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1500002);
    assert_eq!(
        body["message"],
        "parameter 'brand' is invalid 'invalid value [brandx]'"
    );
}

#[tokio::test]
async fn create_device_answers_decode_errors_with_400() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1500008);
    assert!(body["message"].as_str().unwrap().starts_with("decode error:"));
}

#[tokio::test]
async fn get_device_returns_the_wire_representation() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;
    let id = create_device(&app, "earth", "brand3").await;

    let response = app.oneshot(get_request(&format!("/{id}"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "earth");
    assert_eq!(body["brand"], "brand3");
    assert!(body["createdAt"].is_string());
    assert!(body.get("updatedAt").is_none());
}

#[tokio::test]
async fn get_device_rejects_malformed_identifiers() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let response = app.oneshot(get_request("/12345")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1500002);
    assert_eq!(
        body["message"],
        "parameter 'id' is invalid 'invalid object id [12345]'"
    );
}

#[tokio::test]
async fn get_device_maps_unknown_identifiers_to_500() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    let id = ObjectId::new();
    let response = app
        .oneshot(get_request(&format!("/{}", id.to_hex())))
        .await
        .unwrap();

    // The service's historical mapping sends not-found to 500, not 404.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1500005);
    assert_eq!(
        body["message"],
        format!("the device with id {} could not be found", id.to_hex())
    );
}

#[tokio::test]
async fn list_devices_selects_filter_by_brand_parameter() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;

    create_device(&app, "lunar", "brand1").await;
    create_device(&app, "vega", "brand2").await;
    create_device(&app, "sirius", "brand2").await;

    let response = app.clone().oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let all = json_body(response.into_body()).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let response = app
        .clone()
        .oneshot(get_request("/?brand=brand2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let filtered = json_body(response.into_body()).await;
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|d| d["brand"] == "brand2"));

    // An empty brand is "no filter", not an invalid value.
    let response = app.clone().oneshot(get_request("/?brand=")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let unfiltered = json_body(response.into_body()).await;
    assert_eq!(unfiltered.as_array().unwrap().len(), 3);

    let response = app.oneshot(get_request("/?brand=brandx")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1500002);
    assert_eq!(
        body["message"],
        "parameter 'brand' is invalid 'invalid value [brandx]'"
    );
}

#[tokio::test]
async fn update_device_replaces_name_and_brand() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;
    let id = create_device(&app, "vega", "brand2").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{id}"),
            json!({ "name": "altair", "brand": "brand1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get_request(&format!("/{id}"))).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], "altair");
    assert_eq!(body["brand"], "brand1");
}

#[tokio::test]
async fn update_device_name_only_touches_the_name() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;
    let id = create_device(&app, "earth", "brand3").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{id}/name"),
            json!({ "name": "terra" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get_request(&format!("/{id}"))).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], "terra");
    assert_eq!(body["brand"], "brand3");
}

#[tokio::test]
async fn update_device_brand_validates_in_the_repository_path() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;
    let id = create_device(&app, "earth", "brand3").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{id}/brand"),
            json!({ "brand": "brand1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/{id}")))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["brand"], "brand1");
    assert_eq!(body["name"], "earth");

    // Brand validity is enforced by the repository on this route, so the
    // failure surfaces through the service path as a 500.
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{id}/brand"),
            json!({ "brand": "brand two" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1500002);
    assert_eq!(body["message"], "parameter 'brand' is invalid 'invalid value'");
}

#[tokio::test]
async fn delete_device_answers_204_then_lookups_fail() {
    let mongo = TestMongo::new().await;
    let app = app(&mongo).await;
    let id = create_device(&app, "lunar", "brand1").await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get_request(&format!("/{id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1500005);
}
