// ==========================================
// 个人排班日历 - 默认排班派生引擎
// ==========================================
// 职责: 无覆写时, 由 日期 + 配置 确定性地计算基线排班
// 红线: 同一输入必得同一输出; off 日无同事、无时间
// ==========================================
// 输入: 日期键/日期 + 班次时间表 + 同事名册 (+ 种子排班)
// 输出: DaySchedule 形状的基线 (尚未叠加用户覆写)
// ==========================================

use crate::config::shift_config::shift_config;
use crate::domain::date_key::format_date_key;
use crate::domain::schedule::{DaySchedule, ScheduleOverride, Task};
use crate::domain::types::{ShiftTimeMap, ShiftType};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ==========================================
// 演示数据生成器
// ==========================================
// 同事轮换与周期任务只是演示默认值, 没有业务含义, 因此做成可注入
pub trait DemoDataGenerator: Send + Sync {
    /// 工作日的默认同事 (off 日不会调用)
    fn colleagues(&self, date: NaiveDate, pool: &[String]) -> Vec<String>;

    /// 默认任务
    fn tasks(&self, key: &str, date: NaiveDate) -> Vec<Task>;
}

/// 轮换生成器
///
/// - 同事: 人数 = (日 % 4 == 0 ? 2 : 3), 起点 = (日 * 2) % 名册长度, 循环取
/// - 任务: 日 % 6 == 0 时生成一条 "更新交接日志"
#[derive(Debug, Clone, Copy, Default)]
pub struct RotatingDemoGenerator;

impl DemoDataGenerator for RotatingDemoGenerator {
    fn colleagues(&self, date: NaiveDate, pool: &[String]) -> Vec<String> {
        if pool.is_empty() {
            return Vec::new();
        }

        let day = date.day() as usize;
        let count = if day % 4 == 0 { 2 } else { 3 };
        let start = (day * 2) % pool.len();

        let mut picked: Vec<String> = Vec::with_capacity(count);
        for offset in 0..count {
            let name = &pool[(start + offset) % pool.len()];
            // 名册不足 count 人时循环会回到同一人
            if !picked.contains(name) {
                picked.push(name.clone());
            }
        }
        picked
    }

    fn tasks(&self, key: &str, date: NaiveDate) -> Vec<Task> {
        if date.day() % 6 != 0 {
            return Vec::new();
        }
        vec![Task::new(format!("{}-task", key), "更新交接日志")
            .with_time_range("18:30")
            .with_description("确保上一班遗留问题有处理反馈。")]
    }
}

/// 空生成器: 不产生任何演示数据
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDemoData;

impl DemoDataGenerator for NoDemoData {
    fn colleagues(&self, _date: NaiveDate, _pool: &[String]) -> Vec<String> {
        Vec::new()
    }

    fn tasks(&self, _key: &str, _date: NaiveDate) -> Vec<Task> {
        Vec::new()
    }
}

// ==========================================
// DefaultScheduleDeriver
// ==========================================
#[derive(Clone)]
pub struct DefaultScheduleDeriver {
    seeds: Arc<BTreeMap<String, ScheduleOverride>>,
    generator: Arc<dyn DemoDataGenerator>,
}

impl fmt::Debug for DefaultScheduleDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultScheduleDeriver")
            .field("seeds", &self.seeds.len())
            .finish_non_exhaustive()
    }
}

impl Default for DefaultScheduleDeriver {
    fn default() -> Self {
        Self::new(BTreeMap::new(), Arc::new(RotatingDemoGenerator))
    }
}

impl DefaultScheduleDeriver {
    /// 创建派生引擎
    ///
    /// # 参数
    /// - seeds: 种子排班 (可以为空: 此时所有日期默认休息)
    /// - generator: 演示数据生成器
    pub fn new(
        seeds: BTreeMap<String, ScheduleOverride>,
        generator: Arc<dyn DemoDataGenerator>,
    ) -> Self {
        Self {
            seeds: Arc::new(seeds),
            generator,
        }
    }

    pub fn seeds(&self) -> &BTreeMap<String, ScheduleOverride> {
        &self.seeds
    }

    /// 派生基线排班
    pub fn derive(
        &self,
        key: &str,
        date: NaiveDate,
        shift_times: &ShiftTimeMap,
        colleague_pool: &[String],
    ) -> DaySchedule {
        self.derive_for_shift(key, date, None, shift_times, colleague_pool)
    }

    /// 派生基线排班, 可指定班次
    ///
    /// 用户覆写了班次时, 默认时间与默认同事要按覆写后的班次计算,
    /// 因此解析器会把覆写班次传进来
    ///
    /// 种子里显式写的 shift_time 只属于种子自己的班次: 覆写成别的班次后,
    /// 时间取该班次的配置时间 (或内置默认值), 不沿用种子时间
    pub fn derive_for_shift(
        &self,
        key: &str,
        date: NaiveDate,
        shift: Option<ShiftType>,
        shift_times: &ShiftTimeMap,
        colleague_pool: &[String],
    ) -> DaySchedule {
        let seed = self.seeds.get(key);
        let seed_shift = seed.and_then(|s| s.shift).unwrap_or(ShiftType::Off);
        let shift = shift.unwrap_or(seed_shift);

        // === 班次时间 ===
        // 优先级: 种子显式值 (仅当种子班次即当前班次) > 配置时间表 > 内置默认值
        let shift_time = if !shift.is_work() {
            None
        } else {
            match seed.and_then(|s| s.shift_time.clone()) {
                Some(explicit) if seed_shift == shift => explicit,
                _ => default_shift_time(shift, shift_times),
            }
        };

        // === 同事 ===
        let colleagues = if !shift.is_work() {
            Vec::new()
        } else {
            match seed.and_then(|s| s.colleagues.clone()) {
                Some(explicit) => explicit,
                None => self.generator.colleagues(date, colleague_pool),
            }
        };

        // === 任务 ===
        let tasks = match seed.and_then(|s| s.tasks.clone()) {
            Some(explicit) => explicit,
            None => self.generator.tasks(key, date),
        };

        let notes = seed.and_then(|s| s.notes.clone()).flatten();

        DaySchedule {
            key: key.to_string(),
            date,
            shift,
            shift_time,
            colleagues,
            tasks,
            notes,
        }
    }

    /// 按日期派生 (日期键由日期生成)
    pub fn derive_date(
        &self,
        date: NaiveDate,
        shift_times: &ShiftTimeMap,
        colleague_pool: &[String],
    ) -> DaySchedule {
        self.derive(&format_date_key(date), date, shift_times, colleague_pool)
    }
}

/// 班次默认时间: 配置时间表 (start/end 均非空) > 内置默认值; off 为 None
pub fn default_shift_time(shift: ShiftType, shift_times: &ShiftTimeMap) -> Option<String> {
    if !shift.is_work() {
        return None;
    }
    shift_times
        .get_for(shift)
        .and_then(|range| range.format())
        .or_else(|| shift_config(shift).default_time_label())
}
