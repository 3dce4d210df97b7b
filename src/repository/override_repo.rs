// ==========================================
// 个人排班日历 - 覆写仓储
// ==========================================
// 存储: 内存稀疏表 日期键 → 部分排班
// 红线: 不保存空覆写; 更新结果为空时整条删除
// 说明: 键存在 ⇔ 该日被用户定制过
// ==========================================

use crate::domain::date_key::year_of_key;
use crate::domain::schedule::ScheduleOverride;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// 一次更新的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideChange {
    /// 内容未变化
    Unchanged,
    /// 新增或修改
    Updated,
    /// 整条删除
    Removed,
}

impl OverrideChange {
    pub fn is_changed(self) -> bool {
        !matches!(self, OverrideChange::Unchanged)
    }
}

// ==========================================
// OverrideRepository
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideRepository {
    entries: BTreeMap<String, ScheduleOverride>,
}

impl OverrideRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取覆写
    pub fn get(&self, key: &str) -> Option<&ScheduleOverride> {
        self.entries.get(key)
    }

    /// 该日是否被定制过
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ScheduleOverride)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// 覆写键涉及的年份
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.keys().filter_map(|key| year_of_key(key))
    }

    /// 以变换函数更新覆写
    ///
    /// # 参数
    /// - key: 日期键
    /// - updater: 当前覆写 (可能不存在) → 新覆写 (None 表示删除)
    ///
    /// # 规则
    /// - 结果为 None 或没有任何字段 → 删除该键
    /// - 结果与当前值相同 → 不变
    pub fn update<F>(&mut self, key: &str, updater: F) -> OverrideChange
    where
        F: FnOnce(Option<&ScheduleOverride>) -> Option<ScheduleOverride>,
    {
        let current = self.entries.get(key);
        let next = updater(current).filter(|entry| !entry.is_empty());

        match next {
            None => {
                if self.entries.remove(key).is_some() {
                    debug!(key, "覆写已清空, 删除");
                    OverrideChange::Removed
                } else {
                    trace!(key, "无覆写且结果为空, 跳过");
                    OverrideChange::Unchanged
                }
            }
            Some(entry) => {
                if current == Some(&entry) {
                    trace!(key, "覆写未变化, 跳过");
                    return OverrideChange::Unchanged;
                }
                debug!(key, fields = entry.field_count(), "写入覆写");
                self.entries.insert(key.to_string(), entry);
                OverrideChange::Updated
            }
        }
    }

    /// 纯状态转换版本: 旧表 → 新表, 原表不变
    pub fn updated<F>(&self, key: &str, updater: F) -> (Self, OverrideChange)
    where
        F: FnOnce(Option<&ScheduleOverride>) -> Option<ScheduleOverride>,
    {
        let mut next = self.clone();
        let change = next.update(key, updater);
        (next, change)
    }

    /// 删除覆写
    pub fn remove(&mut self, key: &str) -> OverrideChange {
        self.update(key, |_| None)
    }

    /// 清除空覆写 (用于导入外部快照)
    pub fn prune_empty(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_empty());
        before - self.entries.len()
    }
}
