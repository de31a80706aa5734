use crate::domain::{
    self,
    booking::Booking,
    cohort::{Scope, StateFilter},
    commands::*,
    value_objects::*,
};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
/// 時計もポートとして注入するので、テストは固定のnowを供給できる。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub item_catalog: Arc<dyn ItemCatalog>,
    pub clock: Arc<dyn Clock>,
}

/// 予約の詳細ビュー
///
/// 単一取得用に、予約とその参照先（アイテム・booker）を非正規化して返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingView {
    pub booking: Booking,
    pub item: ItemRecord,
    pub booker: UserRecord,
}

/// ストアから予約を取得するヘルパー関数
///
/// decide_booking / get_booking で共通利用される。
///
/// # エラー
/// - StoreError: ストア読み込み失敗
/// - NotFound: 予約が存在しない
async fn load_booking(store: &Arc<dyn BookingStore>, booking_id: BookingId) -> Result<Booking> {
    store
        .get(booking_id)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or_else(|| {
            BookingApplicationError::NotFound(format!(
                "booking {} does not exist",
                booking_id.value()
            ))
        })
}

/// アイテムカタログからアイテムを解決するヘルパー関数
async fn load_item(catalog: &Arc<dyn ItemCatalog>, item_id: ItemId) -> Result<ItemRecord> {
    catalog
        .find(item_id)
        .await
        .map_err(BookingApplicationError::CatalogError)?
        .ok_or_else(|| {
            BookingApplicationError::NotFound(format!("item {} does not exist", item_id.value()))
        })
}

/// 申請者の存在を確認するヘルパー関数
async fn ensure_user_exists(directory: &Arc<dyn UserDirectory>, user_id: UserId) -> Result<()> {
    let exists = directory
        .exists(user_id)
        .await
        .map_err(BookingApplicationError::DirectoryError)?;

    if !exists {
        return Err(BookingApplicationError::NotFound(format!(
            "user {} does not exist",
            user_id.value()
        )));
    }
    Ok(())
}

/// ドメイン層の作成前提条件エラーをアプリケーション層の種別に写像する
///
/// 所有者の自己予約は権限違反に見えるが、互換性のためnot-foundとして
/// 報告する（意図された設計上の癖。修正しない）。
fn map_create_error(err: domain::CreateBookingError) -> BookingApplicationError {
    match err {
        domain::CreateBookingError::ItemUnavailable => BookingApplicationError::Validation(
            "an unavailable item cannot be booked".to_string(),
        ),
        domain::CreateBookingError::StartEqualsEnd => BookingApplicationError::Validation(
            "booking start and end must not coincide".to_string(),
        ),
        domain::CreateBookingError::EndBeforeStart => BookingApplicationError::Validation(
            "booking end must not precede its start".to_string(),
        ),
        domain::CreateBookingError::OwnItem => BookingApplicationError::NotFound(
            "an owner cannot book their own item".to_string(),
        ),
    }
}

/// 予約を申請する
///
/// ビジネスルール（この順序で検査、最初の違反で失敗）：
/// - bookerが存在すること
/// - アイテムが存在すること
/// - アイテムが予約可能であること
/// - 開始と終了が同時刻でないこと
/// - 終了が開始より前でないこと
/// - 申請者がアイテムの所有者でないこと
///
/// 成功時はステータスWaitingの予約が永続化されて返る。
pub async fn create_booking(deps: &ServiceDependencies, cmd: CreateBooking) -> Result<Booking> {
    // 1. bookerの存在確認
    ensure_user_exists(&deps.user_directory, cmd.booker_id).await?;

    // 2. アイテムの参照解決
    let item = load_item(&deps.item_catalog, cmd.item_id).await?;

    // 3. ドメイン層の前提条件チェック
    let new_booking = domain::booking::prepare_booking(
        item.item_id,
        item.owner_id,
        item.available,
        cmd.booker_id,
        cmd.start,
        cmd.end,
    )
    .map_err(map_create_error)?;

    // 4. ストアに永続化（ID採番）
    let booking = deps
        .booking_store
        .insert(new_booking)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::info!(
        booking_id = booking.id.value(),
        item_id = booking.item_id.value(),
        "booking request created"
    );

    Ok(booking)
}

/// 予約を承認または却下する
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 決定できるのはアイテムの所有者のみ（違反はnot-foundとして報告）
/// - approvedはリテラルの"true"/"false"のみ
/// - 既に保持しているステータスへの変更は不可
///   （Approve: Waiting/Rejectedから、Reject: Waiting/Approvedから）
///
/// 同一予約への並行呼び出しは全置換updateのlast-write-winsになる。
/// 楽観ロックは意図的に持たない。
pub async fn decide_booking(deps: &ServiceDependencies, cmd: DecideBooking) -> Result<Booking> {
    // 1. 予約の取得
    let booking = load_booking(&deps.booking_store, cmd.booking_id).await?;

    // 2. 所有者チェック（トークンのパースより先）
    let item = load_item(&deps.item_catalog, booking.item_id).await?;
    if item.owner_id != cmd.requester_id {
        return Err(BookingApplicationError::NotFound(
            "only the item's owner may decide on a booking request".to_string(),
        ));
    }

    // 3. 承認トークンの厳密なパース
    let decision: Decision = cmd.approved.parse().map_err(|_| {
        BookingApplicationError::InvalidArgument(
            "the approved parameter accepts only true or false".to_string(),
        )
    })?;

    // 4. ドメイン層の状態遷移
    let new_status = domain::booking::decide(booking.status, decision).map_err(|_| {
        BookingApplicationError::Validation(
            "cannot change the booking status to one it already holds".to_string(),
        )
    })?;

    // 5. 全置換でストアに反映
    let updated = deps
        .booking_store
        .update(Booking {
            status: new_status,
            ..booking
        })
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::info!(
        booking_id = updated.id.value(),
        status = updated.status.as_str(),
        "booking request decided"
    );

    Ok(updated)
}

/// 予約の詳細を取得する
///
/// 可視性：bookerまたはアイテムの所有者のみ。第三者にはnot-foundを返す
/// （存在の有無を漏らさない写像と同じ種別）。対象ユーザーと対象予約の
/// 存在は所有チェックより先に、まとめて確認される。
pub async fn get_booking(
    deps: &ServiceDependencies,
    booking_id: BookingId,
    requester_id: UserId,
) -> Result<BookingView> {
    // 1. ユーザーと予約の存在をまとめて確認
    let user_exists = deps
        .user_directory
        .exists(requester_id)
        .await
        .map_err(BookingApplicationError::DirectoryError)?;
    let booking_exists = deps
        .booking_store
        .exists(booking_id)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    if !user_exists || !booking_exists {
        return Err(BookingApplicationError::NotFound(
            "no user or booking request with the given ids exists".to_string(),
        ));
    }

    // 2. 予約と参照先の解決
    let booking = load_booking(&deps.booking_store, booking_id).await?;
    let item = load_item(&deps.item_catalog, booking.item_id).await?;

    // 3. 可視性チェック
    if booking.booker_id != requester_id && item.owner_id != requester_id {
        return Err(BookingApplicationError::NotFound(
            "booking details are visible only to the booker or the item's owner".to_string(),
        ));
    }

    let booker = deps
        .user_directory
        .find(booking.booker_id)
        .await
        .map_err(BookingApplicationError::DirectoryError)?
        .ok_or_else(|| {
            BookingApplicationError::NotFound(format!(
                "user {} does not exist",
                booking.booker_id.value()
            ))
        })?;

    Ok(BookingView {
        booking,
        item,
        booker,
    })
}

/// ページングパラメータを検証し、ページ番号に正規化する
///
/// 契約は page index = from / size の一本のみ。fromをそのままページ番号と
/// して扱う経路は持たない。
fn normalize_page(from: i64, size: i64) -> Result<Page> {
    if from < 0 {
        return Err(BookingApplicationError::InvalidArgument(
            "the from parameter must not be negative".to_string(),
        ));
    }
    if size < 1 {
        return Err(BookingApplicationError::InvalidArgument(
            "the size parameter must be at least one".to_string(),
        ));
    }
    Ok(Page::of((from / size) as u32, size as u32))
}

/// booker側の予約一覧を取得する
///
/// 申請者の存在だけを要求する（一覧は常に自分のIDにスコープされる）。
/// stateトークンは厳密にパースし、未知の値はUnsupportedStateで失敗する。
/// コホートごとにストアのプリフィルタを選び、classifierが残りの述語と
/// 並べ替え（CURRENTの二重ソート含む）を適用する。
pub async fn list_by_booker(
    deps: &ServiceDependencies,
    requester_id: UserId,
    state: &str,
    from: i64,
    size: i64,
) -> Result<Vec<Booking>> {
    ensure_user_exists(&deps.user_directory, requester_id).await?;
    let page = normalize_page(from, size)?;

    let filter: StateFilter = state
        .parse()
        .map_err(|_| BookingApplicationError::UnsupportedState(state.to_string()))?;

    let now = deps.clock.now();
    let query = match filter {
        StateFilter::All => BookerQuery::All,
        StateFilter::Waiting => BookerQuery::WithStatus(BookingStatus::Waiting),
        StateFilter::Rejected => BookerQuery::WithStatus(BookingStatus::Rejected),
        StateFilter::Past => BookerQuery::EndBefore(now),
        StateFilter::Current => BookerQuery::StartBefore(now),
        StateFilter::Future => BookerQuery::StartAfter(now),
    };

    let candidates = deps
        .booking_store
        .find_by_booker(requester_id, query, page)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    Ok(domain::cohort::classify(
        candidates,
        filter,
        Scope::Booker,
        now,
    ))
}

/// owner側の予約一覧を取得する
///
/// 候補集合はアイテム所有者への結合で取得し、コホートの述語と並べ替えは
/// すべてclassifierが適用する。
pub async fn list_by_owner(
    deps: &ServiceDependencies,
    requester_id: UserId,
    state: &str,
    from: i64,
    size: i64,
) -> Result<Vec<Booking>> {
    ensure_user_exists(&deps.user_directory, requester_id).await?;
    let page = normalize_page(from, size)?;

    let filter: StateFilter = state
        .parse()
        .map_err(|_| BookingApplicationError::UnsupportedState(state.to_string()))?;

    let now = deps.clock.now();
    let candidates = deps
        .booking_store
        .find_by_owner(requester_id, page)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    Ok(domain::cohort::classify(
        candidates,
        filter,
        Scope::Owner,
        now,
    ))
}

/// 予約を削除する
///
/// 冪等な無条件削除。所有チェックを持たない点は意図的に保存している
/// 挙動で、本番投入前に要再検討（DESIGN.md参照）。
pub async fn delete_booking(deps: &ServiceDependencies, booking_id: BookingId) -> Result<()> {
    deps.booking_store
        .delete(booking_id)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::info!(booking_id = booking_id.value(), "booking request deleted");
    Ok(())
}
