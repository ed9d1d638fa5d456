use axum::{http::StatusCode, response::IntoResponse};
use marketplace_api::error::{AppError, ErrorBody};

async fn render(err: AppError) -> (StatusCode, ErrorBody) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn client_errors_keep_their_reason() {
    let cases = [
        (AppError::InvalidInput("title is required (string)".into()), StatusCode::BAD_REQUEST),
        (AppError::InvalidReference("Unknown warehouse_id(s): 4, 9".into()), StatusCode::BAD_REQUEST),
        (AppError::Unauthenticated("Missing token".into()), StatusCode::UNAUTHORIZED),
        (AppError::Forbidden("Seller not verified".into()), StatusCode::FORBIDDEN),
        (AppError::NotFound("Product not found".into()), StatusCode::NOT_FOUND),
        (AppError::Conflict("Duplicate SKU 'W-1'".into()), StatusCode::CONFLICT),
        (AppError::PayloadTooLarge("Payload too large".into()), StatusCode::PAYLOAD_TOO_LARGE),
    ];

    for (err, expected) in cases {
        let message = err.to_string();
        let (status, body) = render(err).await;
        assert_eq!(status, expected);
        assert_eq!(body.error, message);
    }
}

#[tokio::test]
async fn server_faults_do_not_leak_details() {
    let (status, body) = render(AppError::Internal(anyhow::anyhow!("pool exhausted at 10.0.0.3"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error, "Server error");

    let (status, body) = render(AppError::OrmError(sea_orm::DbErr::Custom("relation missing".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error, "Server error");
}

#[test]
fn unclassified_write_errors_stay_internal() {
    let err = AppError::from_write(sea_orm::DbErr::Custom("boom".into()), "Duplicate SKU");
    assert!(matches!(err, AppError::OrmError(_)));
}
