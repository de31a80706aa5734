use crate::domain::booking::{Booking, NewBooking};
use crate::domain::value_objects::{BookingId, BookingStatus, ItemId, UserId};
use crate::ports::booking_store::{
    BookerQuery, BookingStore as BookingStoreTrait, Page, Result,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// PostgreSQLの行データをBookingに変換する
///
/// statusの文字列からの変換でエラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Booking {
        id: BookingId::from_i64(row.get("booking_id")),
        item_id: ItemId::from_i64(row.get("item_id")),
        booker_id: UserId::from_i64(row.get("booker_id")),
        start: row.get("start_of_booking"),
        end: row.get("end_of_booking"),
        status,
    })
}

/// BookingStoreのPostgreSQL実装
///
/// bookingsテーブルをサロゲートキー（bigserial）で保持し、owner側の
/// クエリはitemsテーブルへの結合で解決する。ページングはLIMIT/OFFSET。
#[allow(dead_code)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

#[allow(dead_code)]
impl PostgresBookingStore {
    /// PostgreSQLコネクションプールから新しいストアを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for PostgresBookingStore {
    /// 予約を挿入し、採番されたIDつきの行を返す
    async fn insert(&self, new_booking: NewBooking) -> Result<Booking> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (
                item_id,
                booker_id,
                start_of_booking,
                end_of_booking,
                status
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING booking_id, item_id, booker_id, start_of_booking, end_of_booking, status
            "#,
        )
        .bind(new_booking.item_id.value())
        .bind(new_booking.booker_id.value())
        .bind(new_booking.start)
        .bind(new_booking.end)
        .bind(new_booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_booking(&row)
    }

    async fn get(&self, id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(
            r#"
            SELECT booking_id, item_id, booker_id, start_of_booking, end_of_booking, status
            FROM bookings
            WHERE booking_id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    async fn exists(&self, id: BookingId) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (SELECT 1 FROM bookings WHERE booking_id = $1) AS present
            "#,
        )
        .bind(id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("present"))
    }

    /// IDによる全置換。対象が存在しない場合はエラー
    async fn update(&self, booking: Booking) -> Result<Booking> {
        let row = sqlx::query(
            r#"
            UPDATE bookings
            SET item_id = $2,
                booker_id = $3,
                start_of_booking = $4,
                end_of_booking = $5,
                status = $6
            WHERE booking_id = $1
            RETURNING booking_id, item_id, booker_id, start_of_booking, end_of_booking, status
            "#,
        )
        .bind(booking.id.value())
        .bind(booking.item_id.value())
        .bind(booking.booker_id.value())
        .bind(booking.start)
        .bind(booking.end)
        .bind(booking.status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => map_row_to_booking(&row),
            None => Err(format!("booking {} does not exist", booking.id.value()).into()),
        }
    }

    /// 冪等な削除：対象が無くても成功する
    async fn delete(&self, id: BookingId) -> Result<()> {
        sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// bookerスコープのクエリ
    ///
    /// (booker_id, start_of_booking)のインデックスを使用する。
    /// StartBeforeのみID昇順、それ以外は開始日時の降順で返す。
    async fn find_by_booker(
        &self,
        booker_id: UserId,
        query: BookerQuery,
        page: Page,
    ) -> Result<Vec<Booking>> {
        let rows = match query {
            BookerQuery::All => {
                sqlx::query(
                    r#"
                    SELECT booking_id, item_id, booker_id, start_of_booking, end_of_booking, status
                    FROM bookings
                    WHERE booker_id = $1
                    ORDER BY start_of_booking DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(booker_id.value())
                .bind(page.size as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await?
            }
            BookerQuery::WithStatus(status) => {
                sqlx::query(
                    r#"
                    SELECT booking_id, item_id, booker_id, start_of_booking, end_of_booking, status
                    FROM bookings
                    WHERE booker_id = $1 AND status = $2
                    ORDER BY start_of_booking DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id.value())
                .bind(status.as_str())
                .bind(page.size as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await?
            }
            BookerQuery::EndBefore(now) => {
                sqlx::query(
                    r#"
                    SELECT booking_id, item_id, booker_id, start_of_booking, end_of_booking, status
                    FROM bookings
                    WHERE booker_id = $1 AND end_of_booking < $2
                    ORDER BY start_of_booking DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id.value())
                .bind(now)
                .bind(page.size as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await?
            }
            BookerQuery::StartBefore(now) => {
                sqlx::query(
                    r#"
                    SELECT booking_id, item_id, booker_id, start_of_booking, end_of_booking, status
                    FROM bookings
                    WHERE booker_id = $1 AND start_of_booking < $2
                    ORDER BY booking_id ASC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id.value())
                .bind(now)
                .bind(page.size as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await?
            }
            BookerQuery::StartAfter(now) => {
                sqlx::query(
                    r#"
                    SELECT booking_id, item_id, booker_id, start_of_booking, end_of_booking, status
                    FROM bookings
                    WHERE booker_id = $1 AND start_of_booking > $2
                    ORDER BY start_of_booking DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(booker_id.value())
                .bind(now)
                .bind(page.size as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(map_row_to_booking).collect()
    }

    /// ownerスコープのクエリ（itemsへの結合で所有者を解決）
    async fn find_by_owner(&self, owner_id: UserId, page: Page) -> Result<Vec<Booking>> {
        let rows = sqlx::query(
            r#"
            SELECT b.booking_id, b.item_id, b.booker_id, b.start_of_booking, b.end_of_booking, b.status
            FROM bookings AS b
            JOIN items AS i ON i.item_id = b.item_id
            WHERE i.owner_id = $1
            ORDER BY b.start_of_booking DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id.value())
        .bind(page.size as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }
}
