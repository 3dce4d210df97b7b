// ==========================================
// 个人排班日历 - 单日编辑 API
// ==========================================
// 职责: 编辑表单草稿 → 覆写的保存协议
// 规则:
//   - off: 同事清空, 时间置空
//   - 同事去重 (保留首次出现)
//   - 任务: 标题去空白, 空标题丢弃, 缺失/重复 id 重新生成
//   - 任务标题与快照一致时不写入任务字段 (避免把派生任务固化成覆写)
//   - 覆写中已有的其他字段 (备注) 保留
// ==========================================

use crate::api::error::ApiResult;
use crate::app::state::ScheduleState;
use crate::domain::schedule::{DaySchedule, ScheduleOverride, Task};
use crate::domain::types::{ShiftTimeMap, ShiftType};
use crate::engine::derivation::default_shift_time;
use crate::repository::OverrideChange;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// 编辑草稿
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEditDraft {
    pub shift: ShiftType,
    pub shift_time: Option<String>,
    pub colleagues: Vec<String>,
    pub tasks: Vec<Task>,
}

impl DayEditDraft {
    /// 以解析后的排班初始化草稿
    pub fn from_schedule(schedule: &DaySchedule) -> Self {
        Self {
            shift: schedule.shift,
            shift_time: schedule.shift_time.clone(),
            colleagues: schedule.colleagues.clone(),
            tasks: schedule
                .tasks
                .iter()
                .enumerate()
                .map(|(index, task)| {
                    let mut task = task.clone();
                    if task.id.trim().is_empty() {
                        task.id = new_task_id(&schedule.key, Some(index));
                    }
                    task
                })
                .collect(),
        }
    }

    /// 切换班次
    ///
    /// - 切到 off: 清空时间和同事
    /// - 切回快照原班次: 恢复快照时间
    /// - 其他: 使用该班次当前配置的默认时间
    pub fn select_shift(
        &mut self,
        next: ShiftType,
        snapshot: &DaySchedule,
        shift_times: &ShiftTimeMap,
    ) {
        if next == self.shift {
            return;
        }
        self.shift = next;

        if !next.is_work() {
            self.shift_time = None;
            self.colleagues.clear();
            return;
        }

        self.shift_time = match &snapshot.shift_time {
            Some(time) if snapshot.shift == next => Some(time.clone()),
            _ => default_shift_time(next, shift_times),
        };
    }

    /// 勾选/取消同事; off 日不接受同事
    pub fn toggle_colleague(&mut self, name: &str) {
        if let Some(index) = self.colleagues.iter().position(|c| c == name) {
            self.colleagues.remove(index);
        } else if self.shift.is_work() {
            self.colleagues.push(name.to_string());
        }
    }

    /// 新增空白任务, 返回其 id
    pub fn add_task(&mut self, key: &str) -> String {
        let id = new_task_id(key, None);
        self.tasks.push(Task::new(id.clone(), ""));
        id
    }

    pub fn rename_task(&mut self, task_id: &str, title: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            task.title = title.to_string();
        }
    }

    pub fn remove_task(&mut self, task_id: &str) {
        self.tasks.retain(|t| t.id != task_id);
    }

    /// 相对快照是否有改动
    pub fn is_dirty(&self, snapshot: &DaySchedule) -> bool {
        self.shift != snapshot.shift
            || self.shift_time != snapshot.shift_time
            || self.colleagues != snapshot.colleagues
            || tasks_dirty(&self.tasks, &snapshot.tasks)
    }
}

/// 生成任务 id: task-{日期键}-{序号?}-{uuid}
pub fn new_task_id(key: &str, seed: Option<usize>) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    match seed {
        Some(seed) => format!("task-{}-{}-{}", key, seed, &uuid[..12]),
        None => format!("task-{}-{}", key, &uuid[..12]),
    }
}

/// 保存前整理任务
pub fn sanitize_tasks(tasks: &[Task], key: &str) -> Vec<Task> {
    let mut result: Vec<Task> = Vec::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        let title = task.title.trim();
        if title.is_empty() {
            continue;
        }

        let id = task.id.trim();
        let id = if id.is_empty() || result.iter().any(|t| t.id == id) {
            new_task_id(key, Some(index))
        } else {
            id.to_string()
        };

        result.push(Task {
            id,
            title: title.to_string(),
            time_range: task.time_range.clone(),
            description: task.description.clone(),
        });
    }
    result
}

/// 标题签名: 去空白后非空标题按顺序拼接
fn task_signature(tasks: &[Task]) -> Vec<&str> {
    tasks
        .iter()
        .map(|task| task.title.trim())
        .filter(|title| !title.is_empty())
        .collect()
}

fn tasks_dirty(current: &[Task], snapshot: &[Task]) -> bool {
    task_signature(current) != task_signature(snapshot)
}

/// 保存编辑草稿为覆写
pub fn save_day_edit(
    state: &ScheduleState,
    key: &str,
    draft: &DayEditDraft,
) -> ApiResult<OverrideChange> {
    let snapshot = state.get_schedule_for_date(key, None)?;

    let is_work = draft.shift.is_work();
    let colleagues = if is_work {
        let mut unique: Vec<String> = Vec::with_capacity(draft.colleagues.len());
        for name in &draft.colleagues {
            if !unique.contains(name) {
                unique.push(name.clone());
            }
        }
        unique
    } else {
        Vec::new()
    };
    let shift_time = if is_work { draft.shift_time.clone() } else { None };
    let tasks = tasks_dirty(&draft.tasks, &snapshot.tasks).then(|| sanitize_tasks(&draft.tasks, key));

    debug!(key, shift = %draft.shift, tasks_dirty = tasks.is_some(), "保存单日编辑");

    let change = state.update_override(key, |prev| {
        let mut next = prev.cloned().unwrap_or_default();
        next.shift = Some(draft.shift);
        next.shift_time = Some(shift_time);
        next.colleagues = Some(colleagues);
        if let Some(tasks) = tasks {
            next.tasks = Some(tasks);
        }
        Some(next)
    });
    Ok(change)
}

/// 撤销该日全部定制
pub fn clear_day_edit(state: &ScheduleState, key: &str) -> OverrideChange {
    state.update_override(key, |_| None::<ScheduleOverride>)
}
