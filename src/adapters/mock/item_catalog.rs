use crate::domain::value_objects::ItemId;
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, ItemRecord, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// ItemCatalogのモック実装
///
/// アイテムレコードを保存することで状態を持ったテストをサポート。
/// 所有者と予約可否フラグを含むアイテムを登録可能。
#[allow(dead_code)]
pub struct ItemCatalog {
    items: Mutex<HashMap<ItemId, ItemRecord>>,
}

#[allow(dead_code)]
impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用にアイテムを登録
    pub fn add_item(&self, item: ItemRecord) {
        self.items.lock().unwrap().insert(item.item_id, item);
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    /// 登録されたアイテムを取得
    async fn find(&self, item_id: ItemId) -> Result<Option<ItemRecord>> {
        Ok(self.items.lock().unwrap().get(&item_id).cloned())
    }

    /// 登録されたアイテムの予約可否フラグを返す
    async fn is_available(&self, item_id: ItemId) -> Result<bool> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(&item_id)
            .map(|item| item.available)
            .unwrap_or(false))
    }
}
