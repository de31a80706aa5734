use crate::domain::booking::{Booking, NewBooking};
use crate::domain::value_objects::{BookingId, UserId};
use crate::ports::booking_store::{
    BookerQuery, BookingStore as BookingStoreTrait, Page, Result,
};
use crate::ports::item_catalog::ItemCatalog;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// BookingStoreのインメモリ実装
///
/// ID昇順のBTreeMapで保持するため、走査順が挿入順と一致する。
/// owner側クエリはカタログポート経由でアイテムの所有者を解決する
/// （非正規化カラムは持たない）。
#[allow(dead_code)]
pub struct InMemoryBookingStore {
    bookings: Mutex<BTreeMap<i64, Booking>>,
    next_id: AtomicI64,
    catalog: Arc<dyn ItemCatalog>,
}

#[allow(dead_code)]
impl InMemoryBookingStore {
    pub fn new(catalog: Arc<dyn ItemCatalog>) -> Self {
        Self {
            bookings: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            catalog,
        }
    }

    /// ID昇順のスナップショットを取る
    ///
    /// ロックをawait越しに保持しないため、クエリは必ずコピーに対して行う。
    fn snapshot(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().values().cloned().collect()
    }
}

/// ページの切り出し（開始位置 = page * size）
fn paginate(bookings: Vec<Booking>, page: Page) -> Vec<Booking> {
    bookings
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect()
}

#[async_trait]
impl BookingStoreTrait for InMemoryBookingStore {
    async fn insert(&self, new_booking: NewBooking) -> Result<Booking> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let booking = Booking {
            id: BookingId::from_i64(id),
            item_id: new_booking.item_id,
            booker_id: new_booking.booker_id,
            start: new_booking.start,
            end: new_booking.end,
            status: new_booking.status,
        };

        self.bookings.lock().unwrap().insert(id, booking.clone());
        Ok(booking)
    }

    async fn get(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.bookings.lock().unwrap().get(&id.value()).cloned())
    }

    async fn exists(&self, id: BookingId) -> Result<bool> {
        Ok(self.bookings.lock().unwrap().contains_key(&id.value()))
    }

    async fn update(&self, booking: Booking) -> Result<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        if !bookings.contains_key(&booking.id.value()) {
            return Err(format!("booking {} does not exist", booking.id.value()).into());
        }
        bookings.insert(booking.id.value(), booking.clone());
        Ok(booking)
    }

    /// 冪等な削除：存在しないIDでも成功する
    async fn delete(&self, id: BookingId) -> Result<()> {
        self.bookings.lock().unwrap().remove(&id.value());
        Ok(())
    }

    async fn find_by_booker(
        &self,
        booker_id: UserId,
        query: BookerQuery,
        page: Page,
    ) -> Result<Vec<Booking>> {
        let mut rows: Vec<Booking> = self
            .snapshot()
            .into_iter()
            .filter(|b| b.booker_id == booker_id)
            .filter(|b| match query {
                BookerQuery::All => true,
                BookerQuery::WithStatus(status) => b.status == status,
                BookerQuery::EndBefore(now) => b.end < now,
                BookerQuery::StartBefore(now) => b.start < now,
                BookerQuery::StartAfter(now) => b.start > now,
            })
            .collect();

        // StartBeforeはID昇順のまま、それ以外は開始日時の降順
        if !matches!(query, BookerQuery::StartBefore(_)) {
            rows.sort_by(|a, b| b.start.cmp(&a.start));
        }

        Ok(paginate(rows, page))
    }

    async fn find_by_owner(&self, owner_id: UserId, page: Page) -> Result<Vec<Booking>> {
        let candidates = self.snapshot();

        // アイテム→所有者の結合をカタログ経由で解決
        let mut rows = Vec::new();
        for booking in candidates {
            let owner = self
                .catalog
                .find(booking.item_id)
                .await?
                .map(|item| item.owner_id);
            if owner == Some(owner_id) {
                rows.push(booking);
            }
        }

        rows.sort_by(|a, b| b.start.cmp(&a.start));
        Ok(paginate(rows, page))
    }
}
