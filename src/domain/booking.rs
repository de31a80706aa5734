#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, BookingStatus, CreateBookingError, DecideError, Decision, ItemId, UserId};

/// Booking集約 - 1つのアイテムに対する1件の予約申請
///
/// item/bookerはIDのみの参照。id/start/end/item_id/booker_idは
/// 作成後不変で、statusだけがdecide()で遷移する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub id: BookingId,

    // 他のコンテキストへの参照（IDのみ）
    pub item_id: ItemId,
    pub booker_id: UserId,

    // 予約ウィンドウ
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    pub status: BookingStatus,
}

/// 採番前の予約レコード
///
/// ストアがinsert時にIDを割り当ててBookingに昇格させる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

/// 純粋関数：予約申請を組み立てる
///
/// 作成前提条件（この順序で評価し、最初の違反で失敗する）：
/// 1. アイテムが予約可能であること
/// 2. 開始と終了が同時刻でないこと
/// 3. 終了が開始より前でないこと
/// 4. 申請者がアイテムの所有者でないこと
///
/// 副作用なし。成功時はステータスWaitingのNewBookingを返す。
pub fn prepare_booking(
    item_id: ItemId,
    item_owner: UserId,
    item_available: bool,
    booker_id: UserId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<NewBooking, CreateBookingError> {
    if !item_available {
        return Err(CreateBookingError::ItemUnavailable);
    }
    if start == end {
        return Err(CreateBookingError::StartEqualsEnd);
    }
    if end < start {
        return Err(CreateBookingError::EndBeforeStart);
    }
    if item_owner == booker_id {
        return Err(CreateBookingError::OwnItem);
    }

    Ok(NewBooking {
        item_id,
        booker_id,
        start,
        end,
        status: BookingStatus::Waiting,
    })
}

/// 純粋関数：予約ステータスを遷移させる
///
/// 遷移規則：
/// - Approve: Waiting または Rejected からのみ → Approved
/// - Reject:  Waiting または Approved からのみ → Rejected
/// - それ以外（既に保持しているステータスへの変更）は不正
pub fn decide(current: BookingStatus, decision: Decision) -> Result<BookingStatus, DecideError> {
    match (decision, current) {
        (Decision::Approve, BookingStatus::Waiting | BookingStatus::Rejected) => {
            Ok(BookingStatus::Approved)
        }
        (Decision::Reject, BookingStatus::Waiting | BookingStatus::Approved) => {
            Ok(BookingStatus::Rejected)
        }
        _ => Err(DecideError::StatusAlreadyHeld),
    }
}

/// 純粋関数：コメント投稿の前提条件
///
/// コメントサブシステム自体はこのコンテキストの外だが、依存する規則は
/// ここに属する：予約が終了済み（end < now）かつApprovedで、
/// 投稿者がその予約のbookerであること。
pub fn eligible_for_comment(booking: &Booking, author: UserId, now: DateTime<Utc>) -> bool {
    booking.booker_id == author
        && booking.status == BookingStatus::Approved
        && booking.end < now
}
