use crate::domain::value_objects::UserId;
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザーレコード（外部コンテキストからの読み取りビュー）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
}

/// ユーザーディレクトリポート
///
/// 予約コンテキストとユーザー管理コンテキストの境界を維持する。
/// 予約コンテキストはUserIDと読み取りビューのみを知り、
/// ユーザーのライフサイクルには関与しない。
#[allow(dead_code)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// ユーザーが存在するか確認する
    ///
    /// 一覧取得前の申請者バリデーションに使用される。
    async fn exists(&self, user_id: UserId) -> Result<bool>;

    /// IDでユーザーを取得する
    ///
    /// 予約作成時のbooker解決と詳細ビューの組み立てに使用される。
    async fn find(&self, user_id: UserId) -> Result<Option<UserRecord>>;
}
