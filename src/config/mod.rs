// ==========================================
// 个人排班日历 - 配置层
// ==========================================
// 职责: 静态班次配置表 + 会话内可变配置 (班次时间/同事名册)
//       + 出厂默认值加载
// ==========================================

pub mod colleague_pool;
pub mod config_manager;
pub mod shift_config;
pub mod shift_times;

// 重导出核心配置类型
pub use colleague_pool::ColleaguePool;
pub use config_manager::{ConfigError, ConfigManager, ScheduleConfig};
pub use shift_config::{
    factory_shift_times, format_full_date, shift_config, summary_label, weekday_label,
    ShiftVisualConfig, WEEKDAY_LABELS,
};
pub use shift_times::ShiftTimeSettings;
