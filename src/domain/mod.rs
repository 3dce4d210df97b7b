// ==========================================
// 个人排班日历 - 领域模型层
// ==========================================
// 职责: 定义排班实体、类型、日期键规则
// 红线: 不含状态管理逻辑, 不含引擎逻辑
// ==========================================

pub mod date_key;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use date_key::{days_in_month, format_date_key, parse_date_key, DateKeyError};
pub use schedule::{CalendarDay, DaySchedule, ScheduleOverride, Task};
pub use types::{ShiftTimeMap, ShiftTimeRange, ShiftType, WorkShift, SHIFT_OPTIONS, WORK_SHIFTS};
