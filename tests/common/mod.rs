#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rusty_shareit_booking::adapters::mock::{
    FixedClock, InMemoryBookingStore, ItemCatalog as MockItemCatalog,
    UserDirectory as MockUserDirectory,
};
use rusty_shareit_booking::application::booking::ServiceDependencies;
use rusty_shareit_booking::domain::value_objects::{ItemId, UserId};
use rusty_shareit_booking::ports::item_catalog::ItemRecord;
use rusty_shareit_booking::ports::user_directory::UserRecord;
use std::sync::Arc;

/// テスト用に組み立てた依存関係一式
///
/// すべてインメモリのモックアダプターで構成し、時計は固定する。
/// データベースは不要。
pub struct TestApp {
    pub deps: ServiceDependencies,
    pub directory: Arc<MockUserDirectory>,
    pub catalog: Arc<MockItemCatalog>,
    pub store: Arc<InMemoryBookingStore>,
    pub clock: Arc<FixedClock>,
    pub now: DateTime<Utc>,
}

/// モックアダプターでServiceDependenciesを組み立てる
pub fn setup() -> TestApp {
    let now = Utc::now();
    let directory = Arc::new(MockUserDirectory::new());
    let catalog = Arc::new(MockItemCatalog::new());
    let store = Arc::new(InMemoryBookingStore::new(catalog.clone()));
    let clock = Arc::new(FixedClock::new(now));

    let deps = ServiceDependencies {
        booking_store: store.clone(),
        user_directory: directory.clone(),
        item_catalog: catalog.clone(),
        clock: clock.clone(),
    };

    TestApp {
        deps,
        directory,
        catalog,
        store,
        clock,
        now,
    }
}

/// テスト用のユーザーを登録して返す
pub fn register_user(app: &TestApp, id: i64, name: &str) -> UserId {
    let user_id = UserId::from_i64(id);
    app.directory.add_user(UserRecord {
        user_id,
        name: name.to_string(),
        email: format!("{}@example.com", name),
    });
    user_id
}

/// テスト用のアイテムを登録して返す
pub fn register_item(app: &TestApp, id: i64, owner: UserId, available: bool) -> ItemId {
    let item_id = ItemId::from_i64(id);
    app.catalog.add_item(ItemRecord {
        item_id,
        owner_id: owner,
        name: format!("item-{}", id),
        available,
    });
    item_id
}
