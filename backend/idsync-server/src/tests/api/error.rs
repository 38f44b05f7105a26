use crate::ApiError;

use idsync_engine::SyncError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_unauthorized_returns_401_with_json_body() {
    let error = ApiError::Unauthorized {
        message: "missing X-Identity-Id or X-Identity-Email header".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("X-Identity-Id")
    );
}

#[tokio::test]
async fn test_batch_in_progress_maps_to_409() {
    let error = ApiError::from(SyncError::batch_in_progress("worker-7"));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "CONFLICT");
    assert!(json["error"]["message"].as_str().unwrap().contains("worker-7"));
}

#[tokio::test]
async fn test_directory_unavailable_maps_to_503() {
    let error = ApiError::from(SyncError::directory_unavailable("connection refused"));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "DIRECTORY_UNAVAILABLE");
}

#[tokio::test]
async fn test_store_error_hides_details() {
    let error = ApiError::from(SyncError::store("database is locked at /var/lib/idsync.db"));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(
        !json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("/var/lib")
    );
}

#[tokio::test]
async fn test_forbidden_returns_403() {
    let error = ApiError::Forbidden {
        message: "ada@example.com is not an admin".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_lease_lost_maps_to_409() {
    let error = ApiError::from(SyncError::lease_lost("directory-batch"));
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("directory-batch")
    );
}
