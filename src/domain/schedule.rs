// ==========================================
// 个人排班日历 - 排班实体
// ==========================================
// DaySchedule: 某天解析后的权威排班视图
// ScheduleOverride: 用户编辑产生的部分排班 (稀疏)
// CalendarDay: 月历网格单元 (纯布局产物, 不持久化)
// ==========================================

use crate::domain::types::ShiftType;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ==========================================
// 任务 (Task)
// ==========================================
// id 只要求在同一天内唯一; 标题为空的任务在保存边界被过滤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            time_range: None,
            description: None,
        }
    }

    pub fn with_time_range(mut self, time_range: impl Into<String>) -> Self {
        self.time_range = Some(time_range.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 标题是否有效 (非空白)
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

// ==========================================
// 日排班 (Day Schedule)
// ==========================================
// 红线: shift == off ⇒ colleagues 为空 且 shift_time 为 None
// 该不变量由解析器保证, 不交给调用方
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// 日期键 (YYYY-MM-DD)
    pub key: String,
    pub date: NaiveDate,
    pub shift: ShiftType,
    pub shift_time: Option<String>,
    /// 同班同事 (去重)
    pub colleagues: Vec<String>,
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DaySchedule {
    pub fn is_work_day(&self) -> bool {
        self.shift.is_work()
    }

    pub fn has_colleague(&self, name: &str) -> bool {
        self.colleagues.iter().any(|c| c == name)
    }
}

// ==========================================
// 排班覆写 (Schedule Override)
// ==========================================
// 部分 DaySchedule: None = 未覆写该字段
// shift_time / notes 为三态: None 未覆写, Some(None) 显式清空, Some(Some(v)) 显式值
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftType>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub shift_time: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colleagues: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
}

/// 字段出现即为 Some, 包括显式 null
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ScheduleOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shift(mut self, shift: ShiftType) -> Self {
        self.shift = Some(shift);
        self
    }

    pub fn with_shift_time(mut self, shift_time: Option<&str>) -> Self {
        self.shift_time = Some(shift_time.map(str::to_string));
        self
    }

    pub fn with_colleagues<I, S>(mut self, colleagues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colleagues = Some(colleagues.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    pub fn with_notes(mut self, notes: Option<&str>) -> Self {
        self.notes = Some(notes.map(str::to_string));
        self
    }

    /// 已覆写字段数
    pub fn field_count(&self) -> usize {
        [
            self.shift.is_some(),
            self.shift_time.is_some(),
            self.colleagues.is_some(),
            self.tasks.is_some(),
            self.notes.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// 没有任何覆写字段 (存储层不保存空覆写)
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// 将 other 中出现的字段叠加到 self 上
    pub fn merge(mut self, other: ScheduleOverride) -> Self {
        if other.shift.is_some() {
            self.shift = other.shift;
        }
        if other.shift_time.is_some() {
            self.shift_time = other.shift_time;
        }
        if other.colleagues.is_some() {
            self.colleagues = other.colleagues;
        }
        if other.tasks.is_some() {
            self.tasks = other.tasks;
        }
        if other.notes.is_some() {
            self.notes = other.notes;
        }
        self
    }
}

// ==========================================
// 月历单元 (Calendar Day)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub key: String,
    pub date: NaiveDate,
    pub is_current_month: bool,
}
