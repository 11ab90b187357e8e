//! # Clock（時刻プロバイダ）
//!
//! 来院日のデフォルト値や誕生日の未来日チェックで使う「今日」を
//! テストで固定できるようにするための抽象化。

use chrono::{DateTime, NaiveDate, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;

   /// 現在日付（UTC）
   fn today(&self) -> NaiveDate {
      self.now().date_naive()
   }
}

/// システム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }

   /// 指定日の 00:00 UTC に固定する
   pub fn on(date: NaiveDate) -> Self {
      Self::new(date.and_time(chrono::NaiveTime::MIN).and_utc())
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}
