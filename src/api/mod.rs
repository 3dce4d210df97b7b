// ==========================================
// 个人排班日历 - API 层
// ==========================================
// 职责: 对界面层暴露的编辑入口与统一错误
// ==========================================

pub mod edit_api;
pub mod error;

// 重导出核心类型
pub use edit_api::{
    clear_day_edit, new_task_id, sanitize_tasks, save_day_edit, DayEditDraft,
};
pub use error::{ApiError, ApiResult};
