//! 时间类型模块
//!
//! `Timestamp` 是可序列化的毫秒时间戳。后端返回的时间字段格式并不统一
//! （RFC 3339 字符串、`YYYY-MM-DD HH:MM:SS` 字符串或纪元毫秒数），
//! 反序列化时统一归一化为毫秒。

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::ops::Sub;
use std::time::Duration;

/// 无时区的字符串格式，按 UTC 解释
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(dt.timestamp_millis())
    }

    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// 该时间点在指定时区中的日历日期
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.to_utc().map(|dt| dt.with_timezone(tz).date_naive())
    }

    /// 解析后端返回的时间字符串
    ///
    /// 依次尝试 RFC 3339、无时区格式（按 UTC）和纯数字毫秒。
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::from_datetime(&dt));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(Self::from_datetime(&naive.and_utc()));
            }
        }
        s.parse::<i64>().ok().map(Self)
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    /// 两个时间戳之间的差值，负数截断为零
    fn sub(self, rhs: Timestamp) -> Self::Output {
        let diff_ms = self.0.saturating_sub(rhs.0).max(0);
        Duration::from_millis(diff_ms as u64)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Millis(i64),
            Float(f64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Millis(ms) => Ok(Self(ms)),
            Wire::Float(ms) => Ok(Self(ms as i64)),
            Wire::Text(s) => Self::parse(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}"))),
        }
    }
}
