// ==========================================
// 个人排班日历 - 班次时间设置
// ==========================================
// 全局可变配置: 每个工作班次的时间段
// 写入前做字段级比较, 相同值不产生状态变化
// ==========================================

use crate::domain::types::{ShiftTimeMap, ShiftTimeRange, WorkShift};
use tracing::{debug, trace};

/// 班次时间设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftTimeSettings {
    current: ShiftTimeMap,
    /// 出厂值 (reset 恢复的目标)
    factory: ShiftTimeMap,
}

impl ShiftTimeSettings {
    pub fn new(factory: ShiftTimeMap) -> Self {
        Self {
            current: factory.clone(),
            factory,
        }
    }

    pub fn current(&self) -> &ShiftTimeMap {
        &self.current
    }

    pub fn factory(&self) -> &ShiftTimeMap {
        &self.factory
    }

    /// 替换某个工作班次的时间段
    ///
    /// # 返回
    /// - true: 状态已变化
    /// - false: 新值与旧值逐字段相同, 未做任何修改
    pub fn set(&mut self, shift: WorkShift, range: Option<ShiftTimeRange>) -> bool {
        if self.current.get(shift) == range.as_ref() {
            trace!(%shift, "班次时间未变化, 跳过");
            return false;
        }

        debug!(%shift, ?range, "更新班次时间");
        self.current.set(shift, range);
        true
    }

    /// 恢复出厂时间
    pub fn reset(&mut self) -> bool {
        if self.current == self.factory {
            return false;
        }
        debug!("班次时间恢复出厂值");
        self.current = self.factory.clone();
        true
    }

    /// 整体替换 (快照导入)
    pub(crate) fn replace(&mut self, map: ShiftTimeMap) {
        self.current = map;
    }
}
