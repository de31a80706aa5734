use crate::domain::booking::{Booking, NewBooking};
use crate::domain::value_objects::{BookingId, BookingStatus, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ページ指定
///
/// ゼロ始まりのページ番号とページサイズ。size >= 1 と from >= 0 の
/// 検証は呼び出し側（アプリケーション層）の責務。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub size: u32,
}

impl Page {
    pub fn of(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// LIMIT/OFFSET形式でのオフセット
    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// booker側クエリの形
///
/// ストア層で適用されるプリフィルタ。コホート分類の残りの述語と
/// 並べ替えはアプリケーション層のclassifierが行う。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookerQuery {
    /// フィルタなし
    All,
    /// ステータス一致
    WithStatus(BookingStatus),
    /// end < now（PASTコホート用）
    EndBefore(DateTime<Utc>),
    /// start < now（CURRENTコホート用、ID昇順で返す）
    StartBefore(DateTime<Utc>),
    /// start > now（FUTUREコホート用）
    StartAfter(DateTime<Utc>),
}

/// 予約ストアポート
///
/// 予約テーブルに対する永続CRUDと、classifierが必要とするクエリ形を
/// 抽象化する。唯一の共有可変リソースであり、すべての変更は
/// insert/update/deleteを経由する。
#[allow(dead_code)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 予約を永続化してIDを採番する
    async fn insert(&self, new_booking: NewBooking) -> Result<Booking>;

    /// IDで予約を取得する
    async fn get(&self, id: BookingId) -> Result<Option<Booking>>;

    /// 予約が存在するか確認する
    async fn exists(&self, id: BookingId) -> Result<bool>;

    /// 予約をIDで全置換する
    ///
    /// 対象が存在しない場合はエラー。値のその場変更はストアに観測
    /// されないため、変更は必ずこの呼び出しで反映する。
    async fn update(&self, booking: Booking) -> Result<Booking>;

    /// IDで予約を削除する
    ///
    /// 冪等：存在しないIDでもエラーにしない。
    async fn delete(&self, id: BookingId) -> Result<()>;

    /// bookerスコープのページングクエリ
    ///
    /// 開始日時の降順で返す（StartBeforeのみID昇順）。
    async fn find_by_booker(
        &self,
        booker_id: UserId,
        query: BookerQuery,
        page: Page,
    ) -> Result<Vec<Booking>>;

    /// ownerスコープのページングクエリ
    ///
    /// 「owner側」とは予約のアイテムの所有者が一致すること。
    /// 非正規化カラムではなくアイテムへの結合で解決する。
    /// 開始日時の降順で返す。
    async fn find_by_owner(&self, owner_id: UserId, page: Page) -> Result<Vec<Booking>>;
}
