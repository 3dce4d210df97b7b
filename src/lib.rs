// ==========================================
// 个人排班日历 - 核心库
// ==========================================
// 职责: 月历网格、班次配置、默认排班派生、
//       用户覆写合并、会话配置、统计聚合
// 系统定位: 纯内存会话核心, 界面层通过 app / api 调用
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 班次配置表与会话配置
pub mod config;

// 引擎层 - 派生/解析/统计
pub mod engine;

// 仓储层 - 覆写存储
pub mod repository;

// 应用层 - 会话状态与事件
pub mod app;

// API 层 - 编辑入口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    format_date_key, parse_date_key, CalendarDay, DateKeyError, DaySchedule, ScheduleOverride,
    ShiftTimeMap, ShiftTimeRange, ShiftType, Task, WorkShift,
};

// 配置
pub use config::{shift_config, ConfigError, ConfigManager, ScheduleConfig, ShiftVisualConfig};

// 引擎
pub use engine::{
    build_calendar_days, DefaultScheduleDeriver, MonthlyShiftDistributionStat,
    MonthlyWorkRestStat, ScheduleResolver, WeeklyWorkPatternStat,
};

// 仓储
pub use repository::{OverrideChange, OverrideRepository};

// 应用
pub use app::{ScheduleEvent, ScheduleEventPublisher, ScheduleState};

// API
pub use api::{ApiError, ApiResult, DayEditDraft};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "个人排班日历";
