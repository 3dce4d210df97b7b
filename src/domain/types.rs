// ==========================================
// 个人排班日历 - 领域类型定义
// ==========================================
// 班次类型 + 班次时间段 + 班次时间表
// 红线: off 没有时间段, 三个工作班次互斥
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班次类型 (Shift Type)
// ==========================================
// 封闭枚举: early/mid/late 为工作班次, off 为休息
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Early, // 早班
    Mid,   // 中班
    Late,  // 晚班
    Off,   // 休息日
}

/// 界面选择顺序: 休息日在前
pub const SHIFT_OPTIONS: [ShiftType; 4] = [
    ShiftType::Off,
    ShiftType::Early,
    ShiftType::Mid,
    ShiftType::Late,
];

/// 工作班次 (统计口径)
pub const WORK_SHIFTS: [ShiftType; 3] = [ShiftType::Early, ShiftType::Mid, ShiftType::Late];

impl ShiftType {
    pub const ALL: [ShiftType; 4] = [
        ShiftType::Early,
        ShiftType::Mid,
        ShiftType::Late,
        ShiftType::Off,
    ];

    /// 是否为工作班次
    pub fn is_work(self) -> bool {
        !matches!(self, ShiftType::Off)
    }

    /// 转换为工作班次 (off 返回 None)
    pub fn as_work(self) -> Option<WorkShift> {
        match self {
            ShiftType::Early => Some(WorkShift::Early),
            ShiftType::Mid => Some(WorkShift::Mid),
            ShiftType::Late => Some(WorkShift::Late),
            ShiftType::Off => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftType::Early => "early",
            ShiftType::Mid => "mid",
            ShiftType::Late => "late",
            ShiftType::Off => "off",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 工作班次 (Work Shift)
// ==========================================
// 只有工作班次可以配置时间段, 类型层面排除 off
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkShift {
    Early,
    Mid,
    Late,
}

impl WorkShift {
    pub const ALL: [WorkShift; 3] = [WorkShift::Early, WorkShift::Mid, WorkShift::Late];
}

impl From<WorkShift> for ShiftType {
    fn from(shift: WorkShift) -> Self {
        match shift {
            WorkShift::Early => ShiftType::Early,
            WorkShift::Mid => ShiftType::Mid,
            WorkShift::Late => ShiftType::Late,
        }
    }
}

impl fmt::Display for WorkShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ShiftType::from(*self).fmt(f)
    }
}

// ==========================================
// 班次时间段 (Shift Time Range)
// ==========================================
// HH:MM 文本对, 不做时间运算; 跨夜 (end < start) 合法
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftTimeRange {
    pub start: String,
    pub end: String,
}

impl ShiftTimeRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// 格式化为 "{start} - {end}"
    ///
    /// start/end 任一为空时返回 None (交由上层回退到内置默认值)
    pub fn format(&self) -> Option<String> {
        let start = self.start.trim();
        let end = self.end.trim();
        if start.is_empty() || end.is_empty() {
            return None;
        }
        Some(format!("{} - {}", start, end))
    }

    /// 解析 "HH:MM - HH:MM"
    pub fn parse(text: &str) -> Option<Self> {
        let (start, end) = text.split_once('-')?;
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return None;
        }
        Some(Self::new(start, end))
    }
}

// ==========================================
// 班次时间表 (Shift Time Map)
// ==========================================
// 每个工作班次恰好一项; None 表示使用内置默认值
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftTimeMap {
    #[serde(default)]
    pub early: Option<ShiftTimeRange>,
    #[serde(default)]
    pub mid: Option<ShiftTimeRange>,
    #[serde(default)]
    pub late: Option<ShiftTimeRange>,
}

impl ShiftTimeMap {
    pub fn get(&self, shift: WorkShift) -> Option<&ShiftTimeRange> {
        match shift {
            WorkShift::Early => self.early.as_ref(),
            WorkShift::Mid => self.mid.as_ref(),
            WorkShift::Late => self.late.as_ref(),
        }
    }

    /// 按班次类型读取; off 恒为 None
    pub fn get_for(&self, shift: ShiftType) -> Option<&ShiftTimeRange> {
        shift.as_work().and_then(|work| self.get(work))
    }

    pub fn set(&mut self, shift: WorkShift, range: Option<ShiftTimeRange>) {
        match shift {
            WorkShift::Early => self.early = range,
            WorkShift::Mid => self.mid = range,
            WorkShift::Late => self.late = range,
        }
    }
}
