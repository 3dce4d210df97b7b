// ==========================================
// 个人排班日历 - 统计聚合引擎
// ==========================================
// 职责: 在整年 (或整月) 上反复调用解析器并做归约
// 红线: 只读, 不修改覆写表与配置; 归约与遍历顺序无关
// 口径: early/mid/late 计为工作日, off 计为休息日
// ==========================================

use crate::config::shift_config::weekday_label;
use crate::domain::date_key::{days_in_month, format_date_key};
use crate::domain::schedule::DaySchedule;
use crate::domain::types::ShiftType;
use crate::engine::resolver::ScheduleResolver;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// 月度 工作/休息 天数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyWorkRestStat {
    pub month: u32,
    pub work_days: u32,
    pub rest_days: u32,
}

/// 月度 班次分布
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyShiftDistributionStat {
    pub month: u32,
    pub early: u32,
    pub mid: u32,
    pub late: u32,
}

/// 周内工作分布
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyWorkPatternStat {
    /// 原生星期编号 (周日=0 … 周六=6)
    pub weekday: u32,
    pub label: String,
    pub work_days: u32,
}

/// 单月计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MonthCount {
    work_days: u32,
    rest_days: u32,
    early: u32,
    mid: u32,
    late: u32,
}

impl MonthCount {
    fn record(&mut self, schedule: &DaySchedule) {
        match schedule.shift {
            ShiftType::Early => self.early += 1,
            ShiftType::Mid => self.mid += 1,
            ShiftType::Late => self.late += 1,
            ShiftType::Off => {
                self.rest_days += 1;
                return;
            }
        }
        self.work_days += 1;
    }
}

/// 周一开始的星期顺序
const MONDAY_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ==========================================
// 月内遍历
// ==========================================

/// 遍历某月每一天 (1..=月天数, 不补齐网格)
fn month_days(year: i32, month: u32) -> impl Iterator<Item = NaiveDate> {
    (1..=days_in_month(year, month)).filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
}

fn count_month<R: ScheduleResolver + ?Sized>(year: i32, month: u32, resolver: &R) -> MonthCount {
    let mut counts = MonthCount::default();
    for date in month_days(year, month) {
        let schedule = resolver.schedule_for_date(&format_date_key(date), date);
        counts.record(&schedule);
    }
    counts
}

// ==========================================
// 聚合入口
// ==========================================

/// 全年 12 个月的工作/休息天数
///
/// 每个月 work_days + rest_days == 当月天数
#[instrument(skip(resolver))]
pub fn monthly_work_rest<R: ScheduleResolver + ?Sized>(
    year: i32,
    resolver: &R,
) -> Vec<MonthlyWorkRestStat> {
    (1..=12)
        .map(|month| {
            let counts = count_month(year, month, resolver);
            MonthlyWorkRestStat {
                month,
                work_days: counts.work_days,
                rest_days: counts.rest_days,
            }
        })
        .collect()
}

/// 全年 12 个月的班次分布
///
/// 每个月 early + mid + late == 同月 work_days
#[instrument(skip(resolver))]
pub fn monthly_shift_distribution<R: ScheduleResolver + ?Sized>(
    year: i32,
    resolver: &R,
) -> Vec<MonthlyShiftDistributionStat> {
    (1..=12)
        .map(|month| {
            let counts = count_month(year, month, resolver);
            MonthlyShiftDistributionStat {
                month,
                early: counts.early,
                mid: counts.mid,
                late: counts.late,
            }
        })
        .collect()
}

/// 某月按星期统计工作日 (周一开始, 7 项)
///
/// month 不在 1..=12 时没有任何日期, 返回 7 个 0
#[instrument(skip(resolver))]
pub fn weekly_work_pattern<R: ScheduleResolver + ?Sized>(
    year: i32,
    month: u32,
    resolver: &R,
) -> Vec<WeeklyWorkPatternStat> {
    let mut counts = [0u32; 7];
    if (1..=12).contains(&month) {
        for date in month_days(year, month) {
            let schedule = resolver.schedule_for_date(&format_date_key(date), date);
            if schedule.is_work_day() {
                counts[date.weekday().num_days_from_sunday() as usize] += 1;
            }
        }
    }

    MONDAY_FIRST
        .iter()
        .map(|weekday| {
            let native = weekday.num_days_from_sunday();
            WeeklyWorkPatternStat {
                weekday: native,
                label: weekday_label(*weekday).to_string(),
                work_days: counts[native as usize],
            }
        })
        .collect()
}

/// 统计页可选年份
///
/// 当前年 + 上一年 + 种子年份 + 覆写键出现过的年份, 升序去重
pub fn available_years<I, J>(current_year: i32, seed_years: I, override_years: J) -> Vec<i32>
where
    I: IntoIterator<Item = i32>,
    J: IntoIterator<Item = i32>,
{
    let mut years: BTreeSet<i32> = BTreeSet::new();
    years.insert(current_year);
    years.insert(current_year - 1);
    years.extend(seed_years);
    years.extend(override_years);
    years.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 每月 1..=10 日早班, 11..=20 日中班, 奇数日晚班 (21 日起), 其余休息
    fn fixture(key: &str, date: NaiveDate) -> DaySchedule {
        let day = date.day();
        let shift = match day {
            1..=10 => ShiftType::Early,
            11..=20 => ShiftType::Mid,
            d if d % 2 == 1 => ShiftType::Late,
            _ => ShiftType::Off,
        };
        DaySchedule {
            key: key.to_string(),
            date,
            shift,
            shift_time: None,
            colleagues: Vec::new(),
            tasks: Vec::new(),
            notes: None,
        }
    }

    #[test]
    fn test_work_rest_conserves_days() {
        let stats = monthly_work_rest(2024, &fixture);
        assert_eq!(stats.len(), 12);
        for stat in &stats {
            assert_eq!(stat.work_days + stat.rest_days, days_in_month(2024, stat.month));
        }
        // 2024-02: 20 天 + 21,23,25,27,29 → 25 个工作日
        assert_eq!(stats[1].work_days, 25);
        assert_eq!(stats[1].rest_days, 4);
    }

    #[test]
    fn test_distribution_matches_work_days() {
        let work_rest = monthly_work_rest(2025, &fixture);
        let distribution = monthly_shift_distribution(2025, &fixture);
        for (wr, dist) in work_rest.iter().zip(&distribution) {
            assert_eq!(wr.month, dist.month);
            assert_eq!(dist.early + dist.mid + dist.late, wr.work_days);
            assert_eq!(dist.early, 10);
            assert_eq!(dist.mid, 10);
        }
    }

    #[test]
    fn test_weekly_pattern_order_and_labels() {
        let pattern = weekly_work_pattern(2025, 9, &fixture);
        let weekdays: Vec<u32> = pattern.iter().map(|p| p.weekday).collect();
        assert_eq!(weekdays, vec![1, 2, 3, 4, 5, 6, 0]);
        assert_eq!(pattern[0].label, "周一");
        assert_eq!(pattern[6].label, "周日");

        let total: u32 = pattern.iter().map(|p| p.work_days).sum();
        let month_total = monthly_work_rest(2025, &fixture)[8].work_days;
        assert_eq!(total, month_total);
    }

    #[test]
    fn test_weekly_pattern_invalid_month() {
        let pattern = weekly_work_pattern(2025, 13, &fixture);
        assert_eq!(pattern.len(), 7);
        assert!(pattern.iter().all(|p| p.work_days == 0));
    }

    #[test]
    fn test_available_years() {
        let years = available_years(2026, vec![2025, 2025], vec![2030, 2019]);
        assert_eq!(years, vec![2019, 2025, 2026, 2030]);
    }
}
