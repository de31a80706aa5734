use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::booking::BookingView;
use crate::domain::booking::Booking;
use crate::domain::commands::CreateBooking;
use crate::domain::value_objects::{ItemId, UserId};

/// 予約申請リクエスト（POST /bookings）
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub item_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CreateBookingRequest {
    pub fn to_command(&self, booker_id: UserId) -> CreateBooking {
        CreateBooking {
            item_id: ItemId::from_i64(self.item_id),
            booker_id,
            start: self.start,
            end: self.end,
        }
    }
}

/// 承認クエリパラメータ（PATCH /bookings/:id?approved=）
#[derive(Debug, Deserialize)]
pub struct ApprovedQuery {
    pub approved: String,
}

/// 予約一覧のクエリパラメータ
///
/// 省略時のデフォルトは state=ALL, from=0, size=10。
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl ListBookingsQuery {
    pub fn state(&self) -> &str {
        self.state.as_deref().unwrap_or("ALL")
    }

    pub fn from(&self) -> i64 {
        self.from.unwrap_or(0)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(10)
    }
}

/// 予約レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: i64,
    pub item_id: i64,
    pub booker_id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.value(),
            item_id: booking.item_id.value(),
            booker_id: booking.booker_id.value(),
            start: booking.start,
            end: booking.end,
            status: booking.status.as_str().to_string(),
        }
    }
}

/// アイテムの要約（詳細ビュー用）
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
}

/// ユーザーの要約（詳細ビュー用）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
}

/// 予約の詳細レスポンス（GET /bookings/:id）
///
/// 参照先のアイテムとbookerを非正規化して返す。
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingDetailResponse {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
    pub item: ItemSummary,
    pub booker: UserSummary,
}

impl From<BookingView> for BookingDetailResponse {
    fn from(view: BookingView) -> Self {
        Self {
            id: view.booking.id.value(),
            start: view.booking.start,
            end: view.booking.end,
            status: view.booking.status.as_str().to_string(),
            item: ItemSummary {
                id: view.item.item_id.value(),
                name: view.item.name,
                owner_id: view.item.owner_id.value(),
            },
            booker: UserSummary {
                id: view.booker.user_id.value(),
                name: view.booker.name,
            },
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
