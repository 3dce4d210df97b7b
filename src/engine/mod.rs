// ==========================================
// 个人排班日历 - 引擎层
// ==========================================
// 职责: 月历网格、默认排班派生、覆写解析、统计聚合
// 红线: 引擎全部为纯函数, 不持有会话状态
// ==========================================

pub mod calendar_grid;
pub mod derivation;
pub mod resolver;
pub mod statistics;

// 重导出核心引擎
pub use calendar_grid::{build_calendar_days, month_start, shift_month};
pub use derivation::{
    default_shift_time, DefaultScheduleDeriver, DemoDataGenerator, NoDemoData,
    RotatingDemoGenerator,
};
pub use resolver::{enforce_off_invariant, resolve_day_schedule, ScheduleResolver};
pub use statistics::{
    available_years, monthly_shift_distribution, monthly_work_rest, weekly_work_pattern,
    MonthlyShiftDistributionStat, MonthlyWorkRestStat, WeeklyWorkPatternStat,
};
