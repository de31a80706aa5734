use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(BookingApplicationError);

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 404 Not Found - 参照先が存在しない、または呼び出し側に可視性がない
            // （権限違反もこの種別に写像される）
            BookingApplicationError::NotFound(ref msg) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone())
            }

            // 400 Bad Request - ビジネスルール違反
            BookingApplicationError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }

            // 400 Bad Request - 不正な引数
            BookingApplicationError::InvalidArgument(ref msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg.clone())
            }

            // 400 Bad Request - 未知のstateフィルタトークン
            BookingApplicationError::UnsupportedState(ref state) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_STATE",
                format!("Unknown state: {}", state),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BookingApplicationError::StoreError(ref e) => {
                tracing::error!("Booking store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Failed to access the booking store".to_string(),
                )
            }
            BookingApplicationError::DirectoryError(ref e) => {
                tracing::error!("User directory error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DIRECTORY_ERROR",
                    "User directory error".to_string(),
                )
            }
            BookingApplicationError::CatalogError(ref e) => {
                tracing::error!("Item catalog error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CATALOG_ERROR",
                    "Item catalog error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
