use crate::ports::clock::Clock;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// 固定時計（テスト用）
///
/// コホート述語を決定的にするため、テストはnowを固定して供給する。
#[allow(dead_code)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

#[allow(dead_code)]
impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// テスト中に時刻を進める
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
