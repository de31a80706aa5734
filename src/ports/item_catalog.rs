use crate::domain::value_objects::{ItemId, UserId};
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムレコード（外部コンテキストからの読み取りビュー）
///
/// availableはカレンダーではなく静的なフラグ。予約数による減算は
/// モデル化しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub item_id: ItemId,
    pub owner_id: UserId,
    pub name: String,
    pub available: bool,
}

/// アイテムカタログポート
///
/// 予約コンテキストとカタログコンテキストの境界を維持する。
/// 予約コンテキストはItemIDと読み取りビューのみを知る。
#[allow(dead_code)]
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// IDでアイテムを取得する
    ///
    /// 予約作成時の参照解決と所有者チェックに使用される。
    async fn find(&self, item_id: ItemId) -> Result<Option<ItemRecord>>;

    /// アイテムが予約可能か確認する
    ///
    /// ビジネスルール: 予約不可のアイテムは予約できない。
    async fn is_available(&self, item_id: ItemId) -> Result<bool>;
}
