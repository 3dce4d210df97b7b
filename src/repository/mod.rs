// ==========================================
// 个人排班日历 - 仓储层
// ==========================================
// 职责: 用户覆写的会话内存储
// 说明: 不含持久化, 会话结束即销毁
// ==========================================

pub mod override_repo;

pub use override_repo::{OverrideChange, OverrideRepository};
