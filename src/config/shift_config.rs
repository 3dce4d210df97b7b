// ==========================================
// 个人排班日历 - 班次配置表
// ==========================================
// 静态只读: ShiftType -> 显示标签/配色/内置默认时间
// 红线: 对 4 个班次类型是全函数, 不允许缺项
// ==========================================

use crate::domain::types::{ShiftTimeMap, ShiftTimeRange, ShiftType, WorkShift};
use chrono::{Datelike, NaiveDate, Weekday};

/// 班次显示配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftVisualConfig {
    pub label: &'static str,
    pub short_label: &'static str,
    pub accent_color: &'static str,
    pub text_color: &'static str,
    pub soft_background_color: &'static str,
    /// 内置默认时间 (start, end); off 为 None
    default_time: Option<(&'static str, &'static str)>,
}

impl ShiftVisualConfig {
    /// 内置默认时间段
    pub fn default_time(&self) -> Option<ShiftTimeRange> {
        self.default_time
            .map(|(start, end)| ShiftTimeRange::new(start, end))
    }

    /// 内置默认时间文本 "HH:MM - HH:MM"
    pub fn default_time_label(&self) -> Option<String> {
        self.default_time
            .map(|(start, end)| format!("{} - {}", start, end))
    }
}

const EARLY: ShiftVisualConfig = ShiftVisualConfig {
    label: "早班",
    short_label: "早班",
    accent_color: "#FFAE58",
    text_color: "#FF8A00",
    soft_background_color: "rgba(255, 174, 88, 0.18)",
    default_time: Some(("07:30", "14:30")),
};

const MID: ShiftVisualConfig = ShiftVisualConfig {
    label: "中班",
    short_label: "中班",
    accent_color: "#735BF2",
    text_color: "#5236EB",
    soft_background_color: "rgba(115, 91, 242, 0.18)",
    default_time: Some(("16:00", "22:30")),
};

const LATE: ShiftVisualConfig = ShiftVisualConfig {
    label: "晚班",
    short_label: "晚班",
    accent_color: "#146BC2",
    text_color: "#0E56A0",
    soft_background_color: "rgba(20, 107, 194, 0.18)",
    default_time: Some(("22:30", "08:30")),
};

const OFF: ShiftVisualConfig = ShiftVisualConfig {
    label: "休息日",
    short_label: "休",
    accent_color: "#2EBD59",
    text_color: "#228B43",
    soft_background_color: "rgba(46, 189, 89, 0.16)",
    default_time: None,
};

/// 查询班次配置
pub fn shift_config(shift: ShiftType) -> &'static ShiftVisualConfig {
    match shift {
        ShiftType::Early => &EARLY,
        ShiftType::Mid => &MID,
        ShiftType::Late => &LATE,
        ShiftType::Off => &OFF,
    }
}

/// 出厂班次时间表
pub fn factory_shift_times() -> ShiftTimeMap {
    let mut map = ShiftTimeMap::default();
    for work in WorkShift::ALL {
        map.set(work, shift_config(work.into()).default_time());
    }
    map
}

// ==========================================
// 显示文本
// ==========================================

/// 周一开始的星期标签
pub const WEEKDAY_LABELS: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];

pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAY_LABELS[weekday.num_days_from_monday() as usize]
}

/// 班次摘要, 例如 "早班 07:30 - 14:30"; off 或无时间时只有标签
pub fn summary_label(shift: ShiftType, shift_time: Option<&str>) -> String {
    let label = shift_config(shift).label;
    match shift_time {
        Some(time) if shift.is_work() && !time.trim().is_empty() => format!("{} {}", label, time),
        _ => label.to_string(),
    }
}

/// 完整日期, 例如 "2025年09月08日 · 周一"
pub fn format_full_date(date: NaiveDate) -> String {
    format!(
        "{:04}年{:02}月{:02}日 · {}",
        date.year(),
        date.month(),
        date.day(),
        weekday_label(date.weekday())
    )
}
