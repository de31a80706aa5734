use thiserror::Error;

/// 予約管理アプリケーション層のエラー
///
/// 4種類の決定的な違反と、ポート層のI/O障害をラップした変種を持つ。
/// いずれもコアではリトライせず、そのまま境界まで伝播する。
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 参照先が存在しない、または呼び出し側に可視性がない
    ///
    /// 権限違反（所有者でない、bookerでない等）も互換性のため意図的に
    /// この種別に写像する。内部理由はメッセージが保持するので、将来
    /// PermissionDenied種別へ分割しても挙動を変えずに済む。
    #[error("{0}")]
    NotFound(String),

    /// 構造的には正しいリクエストに対するビジネスルール違反
    #[error("{0}")]
    Validation(String),

    /// パース可能だが不正な入力（非boolean承認トークン、負のオフセット）
    #[error("{0}")]
    InvalidArgument(String),

    /// 未知のstateフィルタトークン
    #[error("Unknown state: {0}")]
    UnsupportedState(String),

    /// BookingStoreのエラー
    #[error("Booking store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserDirectoryのエラー
    #[error("User directory error")]
    DirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemCatalogのエラー
    #[error("Item catalog error")]
    CatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
