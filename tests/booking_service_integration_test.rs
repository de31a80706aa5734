use chrono::Duration;
use rusty_shareit_booking::application::booking::{
    BookingApplicationError, create_booking, decide_booking, delete_booking, get_booking,
    list_by_booker, list_by_owner,
};
use rusty_shareit_booking::domain::booking::Booking;
use rusty_shareit_booking::domain::commands::{CreateBooking, DecideBooking};
use rusty_shareit_booking::domain::value_objects::{BookingId, BookingStatus, ItemId, UserId};

mod common;
use common::{TestApp, register_item, register_user, setup};

// ============================================================================
// ヘルパー関数
// ============================================================================

/// 固定nowからの相対時刻で予約を申請する
async fn create(
    app: &TestApp,
    item_id: ItemId,
    booker_id: UserId,
    start_hours: i64,
    end_hours: i64,
) -> Booking {
    create_booking(
        &app.deps,
        CreateBooking {
            item_id,
            booker_id,
            start: app.now + Duration::hours(start_hours),
            end: app.now + Duration::hours(end_hours),
        },
    )
    .await
    .expect("booking creation should succeed")
}

fn decide_cmd(booking_id: BookingId, requester: UserId, approved: &str) -> DecideBooking {
    DecideBooking {
        booking_id,
        requester_id: requester,
        approved: approved.to_string(),
    }
}

fn ids(bookings: &[Booking]) -> Vec<i64> {
    bookings.iter().map(|b| b.id.value()).collect()
}

// ============================================================================
// 予約申請
// ============================================================================

#[tokio::test]
async fn test_create_booking_persists_waiting_record() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);

    let booking = create(&app, item, booker, 1, 2).await;

    assert_eq!(booking.status, BookingStatus::Waiting);
    assert_eq!(booking.booker_id, booker);
    assert_eq!(booking.item_id, item);
    assert!(booking.start < booking.end);
}

#[tokio::test]
async fn test_create_booking_fails_for_unknown_user() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let item = register_item(&app, 10, owner, true);

    let result = create_booking(
        &app.deps,
        CreateBooking {
            item_id: item,
            booker_id: UserId::from_i64(99),
            start: app.now + Duration::hours(1),
            end: app.now + Duration::hours(2),
        },
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_create_booking_fails_for_unknown_item() {
    let app = setup();
    let booker = register_user(&app, 2, "booker");

    let result = create_booking(
        &app.deps,
        CreateBooking {
            item_id: ItemId::from_i64(404),
            booker_id: booker,
            start: app.now + Duration::hours(1),
            end: app.now + Duration::hours(2),
        },
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_create_booking_fails_for_unavailable_item() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, false);

    let result = create_booking(
        &app.deps,
        CreateBooking {
            item_id: item,
            booker_id: booker,
            start: app.now + Duration::hours(1),
            end: app.now + Duration::hours(2),
        },
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::Validation(_)
    ));
}

#[tokio::test]
async fn test_create_booking_fails_for_degenerate_windows() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);

    // start == end
    let result = create_booking(
        &app.deps,
        CreateBooking {
            item_id: item,
            booker_id: booker,
            start: app.now + Duration::hours(1),
            end: app.now + Duration::hours(1),
        },
    )
    .await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::Validation(_)
    ));

    // end < start
    let result = create_booking(
        &app.deps,
        CreateBooking {
            item_id: item,
            booker_id: booker,
            start: app.now + Duration::hours(2),
            end: app.now + Duration::hours(1),
        },
    )
    .await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::Validation(_)
    ));
}

// 所有者の自己予約はforbiddenではなくnot-foundとして報告される
// （互換性のため保存している設計上の癖）
#[tokio::test]
async fn test_create_booking_fails_for_own_item_as_not_found() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let item = register_item(&app, 10, owner, true);

    let result = create_booking(
        &app.deps,
        CreateBooking {
            item_id: item,
            booker_id: owner,
            start: app.now + Duration::hours(1),
            end: app.now + Duration::hours(2),
        },
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));
}

// ============================================================================
// 承認・却下（状態遷移）
// ============================================================================

#[tokio::test]
async fn test_owner_approves_waiting_booking() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    let updated = decide_booking(&app.deps, decide_cmd(booking.id, owner, "true"))
        .await
        .unwrap();

    assert_eq!(updated.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_approving_twice_fails_with_validation_error() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    decide_booking(&app.deps, decide_cmd(booking.id, owner, "true"))
        .await
        .unwrap();
    let result = decide_booking(&app.deps, decide_cmd(booking.id, owner, "true")).await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::Validation(_)
    ));
}

// Approved⇄Rejectedは相互に再遷移できる
#[tokio::test]
async fn test_approved_and_rejected_are_mutually_reenterable() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    let approved = decide_booking(&app.deps, decide_cmd(booking.id, owner, "true"))
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let rejected = decide_booking(&app.deps, decide_cmd(booking.id, owner, "false"))
        .await
        .unwrap();
    assert_eq!(rejected.status, BookingStatus::Rejected);

    let reapproved = decide_booking(&app.deps, decide_cmd(booking.id, owner, "true"))
        .await
        .unwrap();
    assert_eq!(reapproved.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_rejecting_twice_fails_with_validation_error() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    decide_booking(&app.deps, decide_cmd(booking.id, owner, "false"))
        .await
        .unwrap();
    let result = decide_booking(&app.deps, decide_cmd(booking.id, owner, "false")).await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::Validation(_)
    ));
}

#[tokio::test]
async fn test_only_owner_may_decide() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let third = register_user(&app, 3, "third");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    for requester in [booker, third] {
        let result = decide_booking(&app.deps, decide_cmd(booking.id, requester, "true")).await;
        assert!(matches!(
            result.unwrap_err(),
            BookingApplicationError::NotFound(_)
        ));
    }
}

#[tokio::test]
async fn test_non_boolean_approval_token_is_invalid_argument() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    for token in ["yes", "TRUE", "1", ""] {
        let result = decide_booking(&app.deps, decide_cmd(booking.id, owner, token)).await;
        assert!(matches!(
            result.unwrap_err(),
            BookingApplicationError::InvalidArgument(_)
        ));
    }
}

// 所有者チェックはトークンのパースより先に行われる
#[tokio::test]
async fn test_owner_check_precedes_token_parsing() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    let result = decide_booking(&app.deps, decide_cmd(booking.id, booker, "garbage")).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_decide_fails_for_unknown_booking() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");

    let result = decide_booking(
        &app.deps,
        decide_cmd(BookingId::from_i64(404), owner, "true"),
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));
}

// ============================================================================
// 単一取得（可視性）
// ============================================================================

#[tokio::test]
async fn test_get_booking_visible_to_booker_and_owner() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    for requester in [booker, owner] {
        let view = get_booking(&app.deps, booking.id, requester).await.unwrap();
        assert_eq!(view.booking.id, booking.id);
        assert_eq!(view.item.owner_id, owner);
        assert_eq!(view.booker.user_id, booker);
    }
}

#[tokio::test]
async fn test_get_booking_hidden_from_third_user() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let third = register_user(&app, 3, "third");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    let result = get_booking(&app.deps, booking.id, third).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));
}

// 対象ユーザー・対象予約の存在は可視性チェックより先にまとめて確認される
#[tokio::test]
async fn test_get_booking_checks_existence_of_user_and_booking() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    // 存在しないユーザー
    let result = get_booking(&app.deps, booking.id, UserId::from_i64(99)).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));

    // 存在しない予約
    let result = get_booking(&app.deps, BookingId::from_i64(404), booker).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));
}

// ============================================================================
// 一覧（コホート分類）
// ============================================================================

/// 固定nowに対する予約セットを登録する
///
/// 1: 過去（Approved）  2: 進行中（Approved、start=now-2h）  3: 未来（Waiting）
/// 4: 未来（Rejected）  5: 進行中（Waiting、start=now-1h）
///
/// 進行中の2件はIDの昇順とstartの降順が逆になるよう配置してある。
async fn seed_cohorts(app: &TestApp, item: ItemId, booker: UserId, owner: UserId) {
    let b1 = create(app, item, booker, -4, -2).await;
    let b2 = create(app, item, booker, -2, 1).await;
    let _b3 = create(app, item, booker, 1, 2).await;
    let b4 = create(app, item, booker, 3, 4).await;
    let _b5 = create(app, item, booker, -1, 2).await;

    decide_booking(&app.deps, decide_cmd(b1.id, owner, "true"))
        .await
        .unwrap();
    decide_booking(&app.deps, decide_cmd(b2.id, owner, "true"))
        .await
        .unwrap();
    decide_booking(&app.deps, decide_cmd(b4.id, owner, "false"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_by_booker_cohorts() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    seed_cohorts(&app, item, booker, owner).await;

    let all = list_by_booker(&app.deps, booker, "ALL", 0, 10).await.unwrap();
    assert_eq!(ids(&all), vec![4, 3, 5, 2, 1]);

    let past = list_by_booker(&app.deps, booker, "PAST", 0, 10).await.unwrap();
    assert_eq!(ids(&past), vec![1]);

    let future = list_by_booker(&app.deps, booker, "FUTURE", 0, 10)
        .await
        .unwrap();
    assert_eq!(ids(&future), vec![4, 3]);

    let waiting = list_by_booker(&app.deps, booker, "WAITING", 0, 10)
        .await
        .unwrap();
    assert_eq!(ids(&waiting), vec![3, 5]);

    let rejected = list_by_booker(&app.deps, booker, "REJECTED", 0, 10)
        .await
        .unwrap();
    assert_eq!(ids(&rejected), vec![4]);
}

// booker側CURRENTの最終順序はID昇順（start降順なら[5, 2]になる）
#[tokio::test]
async fn test_list_by_booker_current_orders_by_id_ascending() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    seed_cohorts(&app, item, booker, owner).await;

    let current = list_by_booker(&app.deps, booker, "CURRENT", 0, 10)
        .await
        .unwrap();
    assert_eq!(ids(&current), vec![2, 5]);
}

// owner側CURRENTは開始日時の降順のまま
#[tokio::test]
async fn test_list_by_owner_current_keeps_start_descending() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    seed_cohorts(&app, item, booker, owner).await;

    let current = list_by_owner(&app.deps, owner, "CURRENT", 0, 10)
        .await
        .unwrap();
    assert_eq!(ids(&current), vec![5, 2]);

    let all = list_by_owner(&app.deps, owner, "ALL", 0, 10).await.unwrap();
    assert_eq!(ids(&all), vec![4, 3, 5, 2, 1]);
}

#[tokio::test]
async fn test_list_with_unknown_state_fails_for_both_scopes() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    create(&app, item, booker, 1, 2).await;

    let result = list_by_booker(&app.deps, booker, "UNKNOWN", 0, 10).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::UnsupportedState(_)
    ));

    let result = list_by_owner(&app.deps, owner, "UNKNOWN", 0, 10).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::UnsupportedState(_)
    ));
}

#[tokio::test]
async fn test_list_fails_for_unknown_user() {
    let app = setup();

    let result = list_by_booker(&app.deps, UserId::from_i64(99), "ALL", 0, 10).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));

    let result = list_by_owner(&app.deps, UserId::from_i64(99), "ALL", 0, 10).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_list_rejects_bad_pagination_arguments() {
    let app = setup();
    let booker = register_user(&app, 2, "booker");

    let result = list_by_booker(&app.deps, booker, "ALL", -1, 10).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::InvalidArgument(_)
    ));

    let result = list_by_booker(&app.deps, booker, "ALL", 0, 0).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::InvalidArgument(_)
    ));
}

// ページ番号の契約は from / size の一本のみ（両スコープで同じ）
#[tokio::test]
async fn test_pagination_page_index_is_from_divided_by_size() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    seed_cohorts(&app, item, booker, owner).await;

    // ALLはstart降順で[4, 3, 5, 2, 1]。from=2, size=2 → 2ページ目 = [5, 2]
    let page = list_by_booker(&app.deps, booker, "ALL", 2, 2).await.unwrap();
    assert_eq!(ids(&page), vec![5, 2]);

    let page = list_by_owner(&app.deps, owner, "ALL", 2, 2).await.unwrap();
    assert_eq!(ids(&page), vec![5, 2]);
}

// ============================================================================
// 削除
// ============================================================================

// 無条件削除（所有チェックなしは意図的に保存している挙動）
#[tokio::test]
async fn test_delete_booking_is_unconditional_and_idempotent() {
    let app = setup();
    let owner = register_user(&app, 1, "owner");
    let booker = register_user(&app, 2, "booker");
    let item = register_item(&app, 10, owner, true);
    let booking = create(&app, item, booker, 1, 2).await;

    delete_booking(&app.deps, booking.id).await.unwrap();

    let result = get_booking(&app.deps, booking.id, booker).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::NotFound(_)
    ));

    // 既に消えていても成功する
    delete_booking(&app.deps, booking.id).await.unwrap();
}
