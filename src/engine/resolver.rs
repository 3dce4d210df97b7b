// ==========================================
// 个人排班日历 - 排班解析器
// ==========================================
// 职责: 覆写 (用户编辑) 逐字段叠加到派生默认值上, 得到权威排班
// 红线: 覆写中显式出现的字段 (包括 null / 空数组) 严格优先
// 红线: 叠加后强制 off ⇒ 无同事、无时间, 不报错, 静默归一
// ==========================================

use crate::domain::date_key::{parse_date_key, DateKeyError};
use crate::domain::schedule::{DaySchedule, ScheduleOverride};
use crate::domain::types::ShiftTimeMap;
use crate::engine::derivation::DefaultScheduleDeriver;
use chrono::NaiveDate;
use tracing::trace;

// ==========================================
// ScheduleResolver - 解析入口抽象
// ==========================================
// 统计聚合只依赖这个 trait, 不关心状态如何存放
pub trait ScheduleResolver {
    /// 解析某一天 (日期已知)
    fn schedule_for_date(&self, key: &str, date: NaiveDate) -> DaySchedule;

    /// 解析某一天 (只给日期键, 按 YYYY-MM-DD 解析日期)
    fn schedule_for_key(&self, key: &str) -> Result<DaySchedule, DateKeyError> {
        let date = parse_date_key(key)?;
        Ok(self.schedule_for_date(key, date))
    }
}

impl<F> ScheduleResolver for F
where
    F: Fn(&str, NaiveDate) -> DaySchedule,
{
    fn schedule_for_date(&self, key: &str, date: NaiveDate) -> DaySchedule {
        self(key, date)
    }
}

/// 解析单日排班
///
/// 步骤:
/// 1. 以覆写班次 (如有) 派生默认值
/// 2. 覆写中出现的字段逐一替换默认值
/// 3. 同事去重
/// 4. 强制 off 不变量
pub fn resolve_day_schedule(
    key: &str,
    date: NaiveDate,
    override_entry: Option<&ScheduleOverride>,
    deriver: &DefaultScheduleDeriver,
    shift_times: &ShiftTimeMap,
    colleague_pool: &[String],
) -> DaySchedule {
    let override_shift = override_entry.and_then(|o| o.shift);
    let mut schedule =
        deriver.derive_for_shift(key, date, override_shift, shift_times, colleague_pool);

    if let Some(entry) = override_entry {
        apply_override(&mut schedule, entry);
    }

    dedup_colleagues(&mut schedule.colleagues);
    enforce_off_invariant(&mut schedule);
    schedule
}

/// 覆写字段替换 (shift 已在派生阶段生效)
fn apply_override(schedule: &mut DaySchedule, entry: &ScheduleOverride) {
    if let Some(shift) = entry.shift {
        schedule.shift = shift;
    }
    if let Some(shift_time) = &entry.shift_time {
        schedule.shift_time = shift_time.clone();
    }
    if let Some(colleagues) = &entry.colleagues {
        schedule.colleagues = colleagues.clone();
    }
    if let Some(tasks) = &entry.tasks {
        schedule.tasks = tasks.clone();
    }
    if let Some(notes) = &entry.notes {
        schedule.notes = notes.clone();
    }
}

/// 保留首次出现的顺序去重
fn dedup_colleagues(colleagues: &mut Vec<String>) {
    let mut seen: Vec<String> = Vec::with_capacity(colleagues.len());
    colleagues.retain(|name| {
        if seen.contains(name) {
            false
        } else {
            seen.push(name.clone());
            true
        }
    });
}

/// off ⇒ colleagues 为空 且 shift_time 为 None
pub fn enforce_off_invariant(schedule: &mut DaySchedule) {
    if schedule.shift.is_work() {
        return;
    }
    if !schedule.colleagues.is_empty() || schedule.shift_time.is_some() {
        trace!(key = %schedule.key, "休息日携带同事或时间, 已归一");
    }
    schedule.colleagues.clear();
    schedule.shift_time = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::shift_config::factory_shift_times;
    use crate::domain::schedule::Task;
    use crate::domain::types::ShiftType;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn abcd() -> Vec<String> {
        ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect()
    }

    fn resolve(key: &str, entry: Option<&ScheduleOverride>) -> DaySchedule {
        let date = parse_date_key(key).unwrap();
        resolve_day_schedule(
            key,
            date,
            entry,
            &DefaultScheduleDeriver::default(),
            &factory_shift_times(),
            &abcd(),
        )
    }

    #[test]
    fn test_no_override_returns_default() {
        let schedule = resolve("2025-09-10", None);
        assert_eq!(schedule.shift, ShiftType::Off);
        assert_eq!(schedule.date, ymd(2025, 9, 10));
    }

    #[test]
    fn test_override_shift_recomputes_defaults() {
        let entry = ScheduleOverride::new().with_shift(ShiftType::Mid);
        let schedule = resolve("2025-09-10", Some(&entry));
        assert_eq!(schedule.shift, ShiftType::Mid);
        assert_eq!(schedule.shift_time.as_deref(), Some("16:00 - 22:30"));
        assert_eq!(schedule.colleagues.len(), 3);
    }

    #[test]
    fn test_explicit_empty_values_win() {
        let entry = ScheduleOverride::new()
            .with_shift(ShiftType::Early)
            .with_shift_time(None)
            .with_colleagues(Vec::<String>::new())
            .with_tasks(Vec::new());
        let schedule = resolve("2025-09-12", Some(&entry));
        assert_eq!(schedule.shift, ShiftType::Early);
        assert_eq!(schedule.shift_time, None);
        assert!(schedule.colleagues.is_empty());
        assert!(schedule.tasks.is_empty(), "显式空任务应覆盖周期任务");
    }

    #[test]
    fn test_contradictory_override_is_normalized() {
        let entry = ScheduleOverride::new()
            .with_shift(ShiftType::Off)
            .with_shift_time(Some("08:00 - 15:00"))
            .with_colleagues(["A", "B"]);
        let schedule = resolve("2025-09-10", Some(&entry));
        assert_eq!(schedule.shift, ShiftType::Off);
        assert!(schedule.colleagues.is_empty());
        assert_eq!(schedule.shift_time, None);
    }

    #[test]
    fn test_colleagues_deduplicated() {
        let entry = ScheduleOverride::new()
            .with_shift(ShiftType::Late)
            .with_colleagues(["B", "A", "B"]);
        let schedule = resolve("2025-09-10", Some(&entry));
        assert_eq!(schedule.colleagues, vec!["B".to_string(), "A".to_string()]);
    }

    #[test]
    fn test_unknown_colleague_tolerated() {
        let entry = ScheduleOverride::new()
            .with_shift(ShiftType::Late)
            .with_colleagues(["不在名册"]);
        let schedule = resolve("2025-09-10", Some(&entry));
        assert!(schedule.has_colleague("不在名册"));
    }

    #[test]
    fn test_tasks_override_is_independent_of_shift() {
        let entry = ScheduleOverride::new().with_tasks(vec![Task::new("t", "值班")]);
        let schedule = resolve("2025-09-10", Some(&entry));
        assert_eq!(schedule.shift, ShiftType::Off);
        assert_eq!(schedule.tasks.len(), 1);
    }

    #[test]
    fn test_closure_resolver_and_malformed_key() {
        let resolver = |key: &str, date: NaiveDate| resolve_day_schedule(
            key,
            date,
            None,
            &DefaultScheduleDeriver::default(),
            &factory_shift_times(),
            &[],
        );
        assert!(resolver.schedule_for_key("2025-09-10").is_ok());
        assert!(matches!(
            resolver.schedule_for_key("2025-9-10"),
            Err(DateKeyError::Malformed(_))
        ));
    }
}
