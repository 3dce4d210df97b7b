// ==========================================
// 个人排班日历 - 月历网格构建
// ==========================================
// 职责: 月份 → 完整周网格 (周一开始)
// 红线: 单元数恒为 7 的倍数, 首格周一, 末格周日
// 纯函数, 与排班内容无关
// ==========================================

use crate::domain::date_key::{days_in_month, format_date_key};
use crate::domain::schedule::CalendarDay;
use chrono::{Datelike, Duration, NaiveDate};

/// 构建月历网格
///
/// # 参数
/// - month_anchor: 目标月份内的任意一天
///
/// # 返回
/// 从 1 号所在周的周一开始, 到月末所在周的周日结束;
/// 相邻月份的补位单元 is_current_month = false.
/// chrono 可表示范围之外的补位单元直接省略 (只发生在 NaiveDate::MIN/MAX 所在月)
pub fn build_calendar_days(month_anchor: NaiveDate) -> Vec<CalendarDay> {
    let first = month_start(month_anchor);
    let month = first.month();

    // 原生星期 (周日=0) 经 (weekday + 6) % 7 映射为 周一=0 … 周日=6
    let offset_from_monday = first.weekday().num_days_from_monday() as i64;
    let day_count = days_in_month(first.year(), month) as i64;
    let total_cells = ((offset_from_monday + day_count + 6) / 7) * 7;

    (0..total_cells)
        .filter_map(|index| first.checked_add_signed(Duration::days(index - offset_from_monday)))
        .map(|date| CalendarDay {
            key: format_date_key(date),
            date,
            is_current_month: date.month() == month && date.year() == first.year(),
        })
        .collect()
}

/// 所在月的 1 号
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 月份翻页: 返回偏移 delta 个月后的 1 号; 超出可表示范围时停在原月
pub fn shift_month(month_anchor: NaiveDate, delta: i32) -> NaiveDate {
    let first = month_start(month_anchor);
    let total = first
        .year()
        .checked_mul(12)
        .and_then(|months| months.checked_add(first.month0() as i32))
        .and_then(|months| months.checked_add(delta));
    let Some(total) = total else {
        return first;
    };
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first)
}
