use chrono::{DateTime, Utc};

/// 時計ポート
///
/// 「now」の読み取りを注入可能にする。コホート述語と境界の日付検証は
/// 必ずこのポート経由で現在時刻を得る。テストでは固定時刻を供給できる。
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時計（本番用）
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
