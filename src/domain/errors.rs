#![allow(dead_code)]

/// 予約作成のエラー
///
/// validateの順序どおりに最初の違反のみが報告される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateBookingError {
    /// アイテムが予約不可
    ItemUnavailable,
    /// 開始と終了が同時刻
    StartEqualsEnd,
    /// 終了が開始より前
    EndBeforeStart,
    /// 所有者自身による予約
    OwnItem,
}

/// ステータス遷移のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecideError {
    /// 既に保持しているステータスへの変更
    StatusAlreadyHeld,
}
