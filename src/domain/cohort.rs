#![allow(dead_code)]

use chrono::{DateTime, Utc};

use super::booking::Booking;
use super::value_objects::BookingStatus;

/// 予約コホートのフィルタトークン
///
/// ステータス基準（WAITING/REJECTED）と時間基準（PAST/FUTURE/CURRENT）が
/// 混在する。未知のトークンはパース失敗であり、ALLへのフォールバックはしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFilter {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl StateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateFilter::All => "ALL",
            StateFilter::Current => "CURRENT",
            StateFilter::Past => "PAST",
            StateFilter::Future => "FUTURE",
            StateFilter::Waiting => "WAITING",
            StateFilter::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for StateFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(StateFilter::All),
            "CURRENT" => Ok(StateFilter::Current),
            "PAST" => Ok(StateFilter::Past),
            "FUTURE" => Ok(StateFilter::Future),
            "WAITING" => Ok(StateFilter::Waiting),
            "REJECTED" => Ok(StateFilter::Rejected),
            _ => Err(format!("Unknown state: {}", s)),
        }
    }
}

/// コホート評価のスコープ
///
/// booker側とowner側でCURRENTの最終順序だけが異なる（下記参照）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Booker,
    Owner,
}

/// 既定の並び順：開始日時の降順（新しい順）
///
/// 安定ソートのため、同時刻の予約は入力の順序を保つ。
pub fn order_by_start_desc(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.start.cmp(&a.start));
}

/// booker側CURRENTコホートの順序ポリシー
///
/// 開始日時の降順でソートした後、IDの昇順で安定的に再ソートする。
/// 最終的な順序はID昇順が勝つ。2つの経路のソートキーが連続適用される
/// 挙動で、意図的かどうかは未確定のため名前付きポリシーとして隔離する。
/// TODO: ID昇順が最終順序として意図されたものか確認し、不要なら
/// order_by_start_descに統一する。
pub fn current_cohort_order(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.start.cmp(&a.start));
    bookings.sort_by(|a, b| a.id.cmp(&b.id));
}

/// 純粋関数：予約集合をコホートに分類して並べる
///
/// 入力はストア側で既にbooker/ownerスコープに絞られた候補集合。
/// 述語は呼び出し時点のnowに対して評価される：
/// - WAITING / REJECTED: ステータス一致
/// - PAST:    end < now
/// - FUTURE:  start > now
/// - CURRENT: start < now かつ end > now
/// - ALL:     述語なし
///
/// 並び順は開始日時の降順。booker側CURRENTのみcurrent_cohort_orderを適用する。
pub fn classify(
    bookings: Vec<Booking>,
    filter: StateFilter,
    scope: Scope,
    now: DateTime<Utc>,
) -> Vec<Booking> {
    let mut cohort: Vec<Booking> = bookings
        .into_iter()
        .filter(|b| match filter {
            StateFilter::All => true,
            StateFilter::Waiting => b.status == BookingStatus::Waiting,
            StateFilter::Rejected => b.status == BookingStatus::Rejected,
            StateFilter::Past => b.end < now,
            StateFilter::Future => b.start > now,
            StateFilter::Current => b.start < now && b.end > now,
        })
        .collect();

    match (filter, scope) {
        (StateFilter::Current, Scope::Booker) => current_cohort_order(&mut cohort),
        _ => order_by_start_desc(&mut cohort),
    }

    cohort
}
