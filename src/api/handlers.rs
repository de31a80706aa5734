use crate::application::booking::{
    BookingApplicationError, ServiceDependencies, create_booking as execute_create_booking,
    decide_booking as execute_decide_booking, delete_booking as execute_delete_booking,
    get_booking as execute_get_booking, list_by_booker, list_by_owner,
};
use crate::domain::commands::DecideBooking;
use crate::domain::value_objects::{BookingId, UserId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        ApprovedQuery, BookingDetailResponse, BookingResponse, CreateBookingRequest,
        ListBookingsQuery,
    },
};

/// 申請者IDを運ぶヘッダー
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// X-Sharer-User-Idヘッダーから申請者IDを取り出す
///
/// ヘッダーが無い、または整数でない場合は400を返す。
fn requester_id(headers: &HeaderMap) -> Result<UserId, ApiError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            ApiError::from(BookingApplicationError::InvalidArgument(format!(
                "the {} header is required",
                USER_ID_HEADER
            )))
        })?;

    raw.parse::<i64>().map(UserId::from_i64).map_err(|_| {
        ApiError::from(BookingApplicationError::InvalidArgument(format!(
            "the {} header must be an integer id",
            USER_ID_HEADER
        )))
    })
}

// ============================================================================
// Command handlers (POST / PATCH / DELETE)
// ============================================================================

/// POST /bookings - 予約を申請
///
/// 申請者がbookerになる。境界ルールとして、開始時刻が過去の申請は
/// ここで弾く（ドメインの前提条件には含めない）。
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let booker_id = requester_id(&headers)?;

    if req.start < state.service_deps.clock.now() {
        return Err(ApiError::from(BookingApplicationError::Validation(
            "a booking cannot start in the past".to_string(),
        )));
    }

    let booking = execute_create_booking(&state.service_deps, req.to_command(booker_id)).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

/// PATCH /bookings/:id?approved= - 予約を承認または却下
///
/// 決定できるのはアイテムの所有者のみ。approvedは文字列のまま
/// アプリケーション層に渡し、そこで厳密にパースされる。
pub async fn decide_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    Query(query): Query<ApprovedQuery>,
    headers: HeaderMap,
) -> Result<Json<BookingResponse>, ApiError> {
    let requester_id = requester_id(&headers)?;

    let cmd = DecideBooking {
        booking_id: BookingId::from_i64(booking_id),
        requester_id,
        approved: query.approved,
    };

    let booking = execute_decide_booking(&state.service_deps, cmd).await?;

    Ok(Json(BookingResponse::from(booking)))
}

/// DELETE /bookings/:id - 予約を削除
///
/// 冪等な無条件削除。対象が無くても204を返す。
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    execute_delete_booking(&state.service_deps, BookingId::from_i64(booking_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /bookings/:id - 予約詳細を取得
///
/// bookerまたはアイテムの所有者のみ参照可能。第三者には404を返す。
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<BookingDetailResponse>, ApiError> {
    let requester_id = requester_id(&headers)?;

    let view = execute_get_booking(
        &state.service_deps,
        BookingId::from_i64(booking_id),
        requester_id,
    )
    .await?;

    Ok(Json(BookingDetailResponse::from(view)))
}

/// GET /bookings - 申請者がbookerである予約の一覧
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let requester_id = requester_id(&headers)?;

    let bookings = list_by_booker(
        &state.service_deps,
        requester_id,
        query.state(),
        query.from(),
        query.size(),
    )
    .await?;

    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

/// GET /bookings/owner - 申請者が所有するアイテムへの予約の一覧
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBookingsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let requester_id = requester_id(&headers)?;

    let bookings = list_by_owner(
        &state.service_deps,
        requester_id,
        query.state(),
        query.from(),
        query.size(),
    )
    .await?;

    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}
