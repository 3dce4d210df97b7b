// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的会话状态构造、日期构造等功能
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use shift_calendar::app::RecordingEventPublisher;
use shift_calendar::config::ScheduleConfig;
use shift_calendar::{logging, ScheduleState};
use std::sync::Arc;

/// 测试用小名册
pub const TEST_POOL: [&str; 4] = ["A", "B", "C", "D"];

/// 构造日期
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("测试日期必须合法")
}

/// 默认配置 + 四人名册
pub fn small_pool_config() -> ScheduleConfig {
    ScheduleConfig {
        colleagues: TEST_POOL.iter().map(|s| s.to_string()).collect(),
        ..ScheduleConfig::default()
    }
}

/// 四人名册的会话状态
pub fn create_small_state() -> ScheduleState {
    logging::init_test();
    ScheduleState::new(small_pool_config())
}

/// 演示配置的会话状态
pub fn create_demo_state() -> ScheduleState {
    logging::init_test();
    ScheduleState::new(ScheduleConfig::demo())
}

/// 带记录型事件发布者的会话状态
pub fn create_recorded_state() -> (ScheduleState, Arc<RecordingEventPublisher>) {
    logging::init_test();
    let publisher = Arc::new(RecordingEventPublisher::new());
    let state = ScheduleState::with_publisher(small_pool_config(), publisher.clone());
    (state, publisher)
}
