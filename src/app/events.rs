// ==========================================
// 个人排班日历 - 状态变更事件
// ==========================================
// 职责: 定义变更事件发布 trait, 供响应式界面层订阅
// 红线: 只有真实发生的状态变化才发布; no-op 变更不发布
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Mutex;

// ==========================================
// 事件类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleEventType {
    /// 覆写新增或修改
    OverrideUpdated,
    /// 覆写整条删除
    OverrideRemoved,
    /// 班次时间变更
    ShiftTimesChanged,
    /// 同事名册变更
    ColleaguePoolChanged,
    /// 导入会话快照
    SnapshotImported,
}

impl ScheduleEventType {
    pub fn as_str(&self) -> &str {
        match self {
            ScheduleEventType::OverrideUpdated => "OverrideUpdated",
            ScheduleEventType::OverrideRemoved => "OverrideRemoved",
            ScheduleEventType::ShiftTimesChanged => "ShiftTimesChanged",
            ScheduleEventType::ColleaguePoolChanged => "ColleaguePoolChanged",
            ScheduleEventType::SnapshotImported => "SnapshotImported",
        }
    }
}

/// 状态变更事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub event_type: ScheduleEventType,
    /// 受影响的日期键 (仅覆写事件)
    pub key: Option<String>,
}

impl ScheduleEvent {
    /// 单日事件
    pub fn for_key(event_type: ScheduleEventType, key: &str) -> Self {
        Self {
            event_type,
            key: Some(key.to_string()),
        }
    }

    /// 全局事件
    pub fn global(event_type: ScheduleEventType) -> Self {
        Self {
            event_type,
            key: None,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================
pub trait ScheduleEventPublisher: Send + Sync {
    /// 发布事件; 失败只记日志, 不回滚状态
    fn publish(&self, event: ScheduleEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl ScheduleEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: ScheduleEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::trace!(
            "NoOpEventPublisher: 跳过事件发布 - event_type={}, key={:?}",
            event.event_type.as_str(),
            event.key
        );
        Ok(())
    }
}

/// 记录型发布者: 事件按顺序缓存, 由界面层轮询取走
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<ScheduleEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取走全部已记录事件
    pub fn drain(&self) -> Vec<ScheduleEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl ScheduleEventPublisher for RecordingEventPublisher {
    fn publish(&self, event: ScheduleEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut events = self
            .events
            .lock()
            .map_err(|e| format!("事件缓存锁获取失败: {}", e))?;
        events.push(event);
        Ok(())
    }
}
