// ==========================================
// 个人排班日历 - 应用状态
// ==========================================
// 职责: 会话级共享状态 (覆写表 + 班次时间 + 同事名册),
//       对界面层暴露全部入口
// 并发: 单写者; 状态整体放在 Arc 快照里, 写入走写时复制,
//       读者拿到的快照在其生命周期内不会被修改
// ==========================================

use crate::api::error::ApiResult;
use crate::app::events::{
    NoOpEventPublisher, ScheduleEvent, ScheduleEventPublisher, ScheduleEventType,
};
use crate::config::{ColleaguePool, ScheduleConfig, ShiftTimeSettings};
use crate::domain::date_key::parse_date_key;
use crate::domain::schedule::{CalendarDay, DaySchedule, ScheduleOverride};
use crate::domain::types::{ShiftTimeMap, ShiftTimeRange, WorkShift};
use crate::engine::derivation::{
    DefaultScheduleDeriver, DemoDataGenerator, NoDemoData, RotatingDemoGenerator,
};
use crate::engine::resolver::{resolve_day_schedule, ScheduleResolver};
use crate::engine::{calendar_grid, statistics};
use crate::engine::{MonthlyShiftDistributionStat, MonthlyWorkRestStat, WeeklyWorkPatternStat};
use crate::repository::{OverrideChange, OverrideRepository};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

// ==========================================
// ScheduleSnapshot - 不可变状态快照
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleSnapshot {
    overrides: OverrideRepository,
    shift_times: ShiftTimeSettings,
    colleagues: ColleaguePool,
    deriver: DefaultScheduleDeriver,
}

impl ScheduleSnapshot {
    pub fn overrides(&self) -> &OverrideRepository {
        &self.overrides
    }

    pub fn shift_times(&self) -> &ShiftTimeMap {
        self.shift_times.current()
    }

    pub fn colleagues(&self) -> &[String] {
        self.colleagues.names()
    }

    pub fn deriver(&self) -> &DefaultScheduleDeriver {
        &self.deriver
    }
}

impl ScheduleResolver for ScheduleSnapshot {
    fn schedule_for_date(&self, key: &str, date: NaiveDate) -> DaySchedule {
        resolve_day_schedule(
            key,
            date,
            self.overrides.get(key),
            &self.deriver,
            self.shift_times.current(),
            self.colleagues.names(),
        )
    }
}

/// 会话快照的序列化形态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub overrides: OverrideRepository,
    pub shift_times: ShiftTimeMap,
    #[serde(default)]
    pub colleagues: Vec<String>,
}

// ==========================================
// ScheduleState - 会话状态
// ==========================================
pub struct ScheduleState {
    snapshot: RwLock<Arc<ScheduleSnapshot>>,
    publisher: Arc<dyn ScheduleEventPublisher>,
}

impl ScheduleState {
    /// 以出厂配置创建会话状态
    pub fn new(config: ScheduleConfig) -> Self {
        Self::with_publisher(config, Arc::new(NoOpEventPublisher))
    }

    /// 以出厂配置 + 事件发布者创建
    pub fn with_publisher(
        config: ScheduleConfig,
        publisher: Arc<dyn ScheduleEventPublisher>,
    ) -> Self {
        let generator: Arc<dyn DemoDataGenerator> = if config.demo_defaults {
            Arc::new(RotatingDemoGenerator)
        } else {
            Arc::new(NoDemoData)
        };
        Self::with_parts(config, generator, publisher)
    }

    /// 完整构造: 可替换演示数据生成器
    pub fn with_parts(
        config: ScheduleConfig,
        generator: Arc<dyn DemoDataGenerator>,
        publisher: Arc<dyn ScheduleEventPublisher>,
    ) -> Self {
        info!(
            colleagues = config.colleagues.len(),
            seeds = config.seed_schedule.len(),
            demo_defaults = config.demo_defaults,
            "初始化排班会话状态"
        );

        let snapshot = ScheduleSnapshot {
            overrides: OverrideRepository::new(),
            shift_times: ShiftTimeSettings::new(config.shift_times),
            colleagues: ColleaguePool::new(&config.colleagues),
            deriver: DefaultScheduleDeriver::new(config.seed_schedule, generator),
        };

        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            publisher,
        }
    }

    /// 当前快照 (只读, 与后续写入隔离)
    pub fn snapshot(&self) -> Arc<ScheduleSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 写时复制: 有读者持有旧快照时克隆一份再改
    fn mutate<T>(&self, f: impl FnOnce(&mut ScheduleSnapshot) -> T) -> T {
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(Arc::make_mut(&mut guard))
    }

    fn emit(&self, event: ScheduleEvent) {
        if let Err(e) = self.publisher.publish(event) {
            warn!("事件发布失败(状态已生效): {}", e);
        }
    }

    // ==========================================
    // 月历 / 解析
    // ==========================================

    /// 月历网格
    pub fn build_calendar_days(&self, month_anchor: NaiveDate) -> Vec<CalendarDay> {
        calendar_grid::build_calendar_days(month_anchor)
    }

    /// 解析某天的权威排班
    ///
    /// 未给日期时按 YYYY-MM-DD 解析日期键, 格式错误返回 MalformedDateKey
    pub fn get_schedule_for_date(
        &self,
        key: &str,
        date: Option<NaiveDate>,
    ) -> ApiResult<DaySchedule> {
        let date = match date {
            Some(date) => date,
            None => parse_date_key(key)?,
        };
        Ok(self.snapshot().schedule_for_date(key, date))
    }

    // ==========================================
    // 覆写
    // ==========================================

    pub fn get_override(&self, key: &str) -> Option<ScheduleOverride> {
        self.snapshot().overrides.get(key).cloned()
    }

    pub fn has_override(&self, key: &str) -> bool {
        self.snapshot().overrides.contains(key)
    }

    pub fn override_count(&self) -> usize {
        self.snapshot().overrides.len()
    }

    /// 以变换函数更新覆写; 结果为空时删除
    ///
    /// 日期键必须是合法的 YYYY-MM-DD, 否则记 warn 并返回 Unchanged.
    /// 变换函数在锁外执行, 可以读取本会话状态; 写锁只用于落盘单个键
    pub fn update_override<F>(&self, key: &str, updater: F) -> OverrideChange
    where
        F: FnOnce(Option<&ScheduleOverride>) -> Option<ScheduleOverride>,
    {
        if let Err(e) = parse_date_key(key) {
            warn!(key, error = %e, "覆写日期键无效, 忽略更新");
            return OverrideChange::Unchanged;
        }

        let next = {
            let snapshot = self.snapshot();
            updater(snapshot.overrides.get(key))
        };
        let change = self.mutate(|s| s.overrides.update(key, move |_| next));
        match change {
            OverrideChange::Updated => {
                self.emit(ScheduleEvent::for_key(ScheduleEventType::OverrideUpdated, key))
            }
            OverrideChange::Removed => {
                self.emit(ScheduleEvent::for_key(ScheduleEventType::OverrideRemoved, key))
            }
            OverrideChange::Unchanged => {}
        }
        change
    }

    // ==========================================
    // 班次时间
    // ==========================================

    pub fn shift_times(&self) -> ShiftTimeMap {
        self.snapshot().shift_times().clone()
    }

    /// 设置某工作班次的时间段; 与当前值相同时不变
    pub fn set_shift_time(&self, shift: WorkShift, range: Option<ShiftTimeRange>) -> bool {
        // 先在只读快照上比较, 相同时不触发写时复制
        if self.snapshot().shift_times().get(shift) == range.as_ref() {
            return false;
        }
        let changed = self.mutate(|s| s.shift_times.set(shift, range));
        if changed {
            self.emit(ScheduleEvent::global(ScheduleEventType::ShiftTimesChanged));
        }
        changed
    }

    pub fn reset_shift_times(&self) -> bool {
        let changed = self.mutate(|s| s.shift_times.reset());
        if changed {
            self.emit(ScheduleEvent::global(ScheduleEventType::ShiftTimesChanged));
        }
        changed
    }

    // ==========================================
    // 同事名册
    // ==========================================

    pub fn colleagues(&self) -> Vec<String> {
        self.snapshot().colleagues().to_vec()
    }

    pub fn add_colleague(&self, name: &str) -> bool {
        self.mutate_pool(|pool| pool.add(name))
    }

    pub fn update_colleague(&self, index: usize, name: &str) -> bool {
        self.mutate_pool(|pool| pool.update_at(index, name))
    }

    pub fn remove_colleague(&self, index: usize) -> bool {
        self.mutate_pool(|pool| pool.remove_at(index))
    }

    pub fn reset_colleagues(&self) -> bool {
        self.mutate_pool(ColleaguePool::reset)
    }

    fn mutate_pool(&self, f: impl FnOnce(&mut ColleaguePool) -> bool) -> bool {
        let changed = self.mutate(|s| f(&mut s.colleagues));
        if changed {
            self.emit(ScheduleEvent::global(ScheduleEventType::ColleaguePoolChanged));
        }
        changed
    }

    // ==========================================
    // 统计 (在同一快照上完成, 不持锁)
    // ==========================================

    pub fn monthly_work_rest(&self, year: i32) -> Vec<MonthlyWorkRestStat> {
        statistics::monthly_work_rest(year, self.snapshot().as_ref())
    }

    pub fn monthly_shift_distribution(&self, year: i32) -> Vec<MonthlyShiftDistributionStat> {
        statistics::monthly_shift_distribution(year, self.snapshot().as_ref())
    }

    pub fn weekly_work_pattern(&self, year: i32, month: u32) -> Vec<WeeklyWorkPatternStat> {
        statistics::weekly_work_pattern(year, month, self.snapshot().as_ref())
    }

    /// 统计页可选年份
    pub fn available_years(&self, current_year: i32) -> Vec<i32> {
        let snapshot = self.snapshot();
        let seed_years = snapshot
            .deriver
            .seeds()
            .keys()
            .filter_map(|key| crate::domain::date_key::year_of_key(key))
            .collect::<Vec<_>>();
        statistics::available_years(current_year, seed_years, snapshot.overrides.years())
    }

    // ==========================================
    // 会话快照导出/导入 (仅内存序列化)
    // ==========================================

    pub fn export_snapshot(&self) -> ApiResult<String> {
        let snapshot = self.snapshot();
        let session = SessionSnapshot {
            overrides: snapshot.overrides.clone(),
            shift_times: snapshot.shift_times().clone(),
            colleagues: snapshot.colleagues().to_vec(),
        };
        Ok(serde_json::to_string(&session)?)
    }

    /// 导入会话快照, 整体替换覆写/班次时间/同事名册
    ///
    /// 覆写键必须是合法日期键; 空覆写丢弃; 名册去重
    pub fn import_snapshot(&self, json: &str) -> ApiResult<()> {
        let mut session: SessionSnapshot = serde_json::from_str(json)?;
        for key in session.overrides.keys() {
            parse_date_key(key)?;
        }
        let pruned = session.overrides.prune_empty();
        if pruned > 0 {
            debug!(pruned, "导入时丢弃空覆写");
        }

        self.mutate(|s| {
            s.overrides = session.overrides;
            s.shift_times.replace(session.shift_times);
            s.colleagues.replace(&session.colleagues);
        });
        info!("会话快照已导入");
        self.emit(ScheduleEvent::global(ScheduleEventType::SnapshotImported));
        Ok(())
    }
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}
