// ==========================================
// 统计聚合集成测试
// ==========================================
// 测试目标: 守恒关系、星期分布、与覆写的联动
// ==========================================

mod test_helpers;

use chrono::{Datelike, NaiveDate};
use shift_calendar::domain::{days_in_month, format_date_key, ScheduleOverride, ShiftType};
use shift_calendar::engine::{monthly_shift_distribution, monthly_work_rest, weekly_work_pattern};
use shift_calendar::DaySchedule;
use test_helpers::{create_demo_state, create_small_state};

#[test]
fn test_work_rest_conservation() {
    let state = create_demo_state();
    for year in [2024, 2025] {
        let work_rest = state.monthly_work_rest(year);
        let distribution = state.monthly_shift_distribution(year);
        assert_eq!(work_rest.len(), 12);
        assert_eq!(distribution.len(), 12);

        for (wr, dist) in work_rest.iter().zip(&distribution) {
            assert_eq!(wr.month, dist.month);
            assert_eq!(wr.work_days + wr.rest_days, days_in_month(year, wr.month));
            assert_eq!(dist.early + dist.mid + dist.late, wr.work_days);
        }
    }
}

#[test]
fn test_demo_year_counts_seeded_late_shift() {
    let state = create_demo_state();
    let september = state.monthly_shift_distribution(2025)[8];
    assert_eq!(september.month, 9);
    assert_eq!(september.late, 1);
    assert_eq!(september.early + september.mid, 0);
}

#[test]
fn test_overrides_move_counts() {
    let state = create_small_state();
    let before = state.monthly_work_rest(2025)[2];
    assert_eq!(before.work_days, 0);
    assert_eq!(before.rest_days, 31);

    for (key, shift) in [
        ("2025-03-03", ShiftType::Early),
        ("2025-03-04", ShiftType::Mid),
        ("2025-03-10", ShiftType::Early),
    ] {
        state.update_override(key, |_| Some(ScheduleOverride::new().with_shift(shift)));
    }

    let after = state.monthly_work_rest(2025)[2];
    assert_eq!(after.work_days, 3);
    assert_eq!(after.rest_days, 28);

    let distribution = state.monthly_shift_distribution(2025)[2];
    assert_eq!((distribution.early, distribution.mid, distribution.late), (2, 1, 0));

    // 2025-03-03 / 03-10 是周一, 03-04 是周二
    let weekly = state.weekly_work_pattern(2025, 3);
    assert_eq!(weekly.len(), 7);
    assert_eq!(weekly[0].label, "周一");
    assert_eq!(weekly[0].weekday, 1);
    assert_eq!(weekly[0].work_days, 2);
    assert_eq!(weekly[1].work_days, 1);
    assert_eq!(weekly[6].weekday, 0);
    assert_eq!(weekly.iter().map(|w| w.work_days).sum::<u32>(), after.work_days);
}

#[test]
fn test_weekly_pattern_invalid_month_is_all_zero() {
    let state = create_demo_state();
    for month in [0, 13] {
        let weekly = state.weekly_work_pattern(2025, month);
        assert_eq!(weekly.len(), 7);
        assert!(weekly.iter().all(|w| w.work_days == 0));
    }
}

#[test]
fn test_statistics_do_not_mutate_state() {
    let state = create_demo_state();
    let before = state.export_snapshot().unwrap();
    state.monthly_work_rest(2025);
    state.weekly_work_pattern(2025, 9);
    assert_eq!(state.export_snapshot().unwrap(), before);
    assert_eq!(state.override_count(), 0);
}

/// 按日期散列出班次的解析器, 与调用顺序无关
fn hashed_schedule(key: &str, date: NaiveDate) -> DaySchedule {
    let shift = match (date.ordinal() * 7 + date.day()) % 5 {
        0 => ShiftType::Early,
        1 => ShiftType::Mid,
        2 => ShiftType::Late,
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
fn test_aggregation_matches_reverse_order_reduction() {
    let year = 2024;
    let work_rest = monthly_work_rest(year, &hashed_schedule);
    let distribution = monthly_shift_distribution(year, &hashed_schedule);

    for month in 1..=12u32 {
        // 从月末倒序逐日累加
        let (mut rest, mut early, mut mid, mut late) = (0u32, 0u32, 0u32, 0u32);
        for day in (1..=days_in_month(year, month)).rev() {
            let date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            match hashed_schedule(&format_date_key(date), date).shift {
                ShiftType::Early => early += 1,
                ShiftType::Mid => mid += 1,
                ShiftType::Late => late += 1,
                ShiftType::Off => rest += 1,
            }
        }
        let work = early + mid + late;

        let wr = work_rest[month as usize - 1];
        let dist = distribution[month as usize - 1];
        assert_eq!((wr.work_days, wr.rest_days), (work, rest), "{} 月工作/休息", month);
        assert_eq!((dist.early, dist.mid, dist.late), (early, mid, late), "{} 月班次分布", month);

        let weekly: u32 = weekly_work_pattern(year, month, &hashed_schedule)
            .iter()
            .map(|w| w.work_days)
            .sum();
        assert_eq!(weekly, work);
    }
}
