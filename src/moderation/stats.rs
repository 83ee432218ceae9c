//! 审核统计
//!
//! 纯函数：输入贡献列表、历史记录与当前时间，输出面板上的三组数字。
//! “今天/昨天”按 `now` 所在时区的日历日计算。

use chicham_shared::{Contribution, ContributionStatus, Timestamp};
use chrono::{DateTime, TimeZone};
use std::time::Duration;

/// 视为“新提交”的时间窗口
pub const NEW_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingStats {
    pub count: usize,
    /// 最近 24 小时内创建的待审数量
    pub new: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrendStats {
    pub count: usize,
    /// 与昨天相比的变化百分比
    pub percentage: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountStats {
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModerationStats {
    pub pending: PendingStats,
    pub approved_today: TrendStats,
    pub rejected: CountStats,
}

/// 日环比
///
/// 昨天为 0 时：今天也为 0 则 0%，否则 100%。
pub fn trend_percentage(today: usize, yesterday: usize) -> i64 {
    if yesterday == 0 {
        return if today > 0 { 100 } else { 0 };
    }
    let delta = today as f64 - yesterday as f64;
    // 半数向正无穷取整：-87.5 → -87
    (delta / yesterday as f64 * 100.0 + 0.5).floor() as i64
}

pub fn compute_stats<Tz: TimeZone>(
    contributions: &[Contribution],
    history: &[Contribution],
    now: &DateTime<Tz>,
) -> ModerationStats {
    let now_ts = Timestamp::from_datetime(now);
    let tz = now.timezone();
    let today = now.date_naive();
    let yesterday = today.pred_opt();

    let pending: Vec<&Contribution> = contributions.iter().filter(|c| c.is_pending()).collect();
    let new = pending
        .iter()
        .filter(|c| now_ts - c.created_at < NEW_WINDOW)
        .count();

    let approved_on = |day| {
        history
            .iter()
            .filter(|c| c.status == ContributionStatus::Approved)
            .filter(|c| c.resolved_at.and_then(|at| at.date_in(&tz)) == Some(day))
            .count()
    };
    let approved_today = approved_on(today);
    let approved_yesterday = yesterday.map_or(0, approved_on);

    let rejected = history
        .iter()
        .filter(|c| c.status == ContributionStatus::Rejected)
        .count();

    ModerationStats {
        pending: PendingStats {
            count: pending.len(),
            new,
        },
        approved_today: TrendStats {
            count: approved_today,
            percentage: trend_percentage(approved_today, approved_yesterday),
        },
        rejected: CountStats { count: rejected },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn item(id: &str, status: &str, created: i64, resolved: Option<i64>) -> Contribution {
        serde_json::from_value(json!({
            "id": id,
            "type": "dictionary",
            "status": status,
            "data": {"wordShuar": id},
            "createdAt": created,
            "resolvedAt": resolved,
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        // 2023-11-14T22:13:20Z
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_trend_percentage_boundaries() {
        assert_eq!(trend_percentage(0, 0), 0);
        assert_eq!(trend_percentage(3, 0), 100);
        assert_eq!(trend_percentage(6, 5), 20);
        assert_eq!(trend_percentage(2, 4), -50);
        assert_eq!(trend_percentage(0, 4), -100);
        assert_eq!(trend_percentage(4, 3), 33);
    }

    #[test]
    fn test_trend_halves_round_toward_positive() {
        // 1 对 8：-87.5%
        assert_eq!(trend_percentage(1, 8), -87);
        // 3 对 8：-62.5%
        assert_eq!(trend_percentage(3, 8), -62);
        // 9 对 8：12.5%
        assert_eq!(trend_percentage(9, 8), 13);
    }

    #[test]
    fn test_pending_and_new_counts() {
        let t = now().timestamp_millis();
        let contributions = vec![
            item("a", "pending", t - HOUR_MS, None),
            item("b", "pending", t - 30 * HOUR_MS, None),
            item("c", "approved", t - HOUR_MS, None),
        ];

        let stats = compute_stats(&contributions, &[], &now());
        assert_eq!(stats.pending, PendingStats { count: 2, new: 1 });
    }

    #[test]
    fn test_approved_today_against_yesterday() {
        let t = now().timestamp_millis();
        let mut history: Vec<Contribution> = (0..6)
            .map(|i| item(&format!("t{i}"), "approved", 0, Some(t - HOUR_MS)))
            .collect();
        history.extend((0..5).map(|i| item(&format!("y{i}"), "approved", 0, Some(t - 24 * HOUR_MS))));
        history.push(item("r1", "rejected", 0, Some(t - 100 * HOUR_MS)));
        history.push(item("r2", "rejected", 0, Some(t - HOUR_MS)));

        let stats = compute_stats(&[], &history, &now());
        assert_eq!(stats.approved_today, TrendStats { count: 6, percentage: 20 });
        assert_eq!(stats.rejected.count, 2);
    }

    #[test]
    fn test_calendar_day_follows_timezone() {
        // 20:13 UTC 在 UTC+3 仍是 14 日，而此刻在 UTC+3 已是 15 日
        let t = now().timestamp_millis();
        let history = vec![item("a", "approved", 0, Some(t - 2 * HOUR_MS))];
        let plus3 = now().with_timezone(&FixedOffset::east_opt(3 * 3600).unwrap());

        let utc = compute_stats(&[], &history, &now());
        let shifted = compute_stats(&[], &history, &plus3);

        assert_eq!(utc.approved_today, TrendStats { count: 1, percentage: 100 });
        assert_eq!(shifted.approved_today, TrendStats { count: 0, percentage: -100 });
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(compute_stats(&[], &[], &now()), ModerationStats::default());
    }
}
