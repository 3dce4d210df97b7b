// ==========================================
// 个人排班日历 - 应用层
// ==========================================
// 职责: 会话状态与变更通知, 连接界面层与核心
// ==========================================

pub mod events;
pub mod state;

// 重导出
pub use events::{
    NoOpEventPublisher, RecordingEventPublisher, ScheduleEvent, ScheduleEventPublisher,
    ScheduleEventType,
};
pub use state::{ScheduleSnapshot, ScheduleState, SessionSnapshot};
