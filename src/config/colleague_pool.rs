// ==========================================
// 个人排班日历 - 同事名册
// ==========================================
// 全局可变配置: 有序同事名单
// 红线: 任何变更后名单内不允许重复姓名 (大小写敏感精确匹配)
// ==========================================

use tracing::{debug, trace};

/// 同事名册
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColleaguePool {
    names: Vec<String>,
    factory: Vec<String>,
}

impl ColleaguePool {
    /// 以出厂名单创建 (出厂名单先做去空白/去重)
    pub fn new<I, S>(factory: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let factory = normalize_names(factory);
        Self {
            names: factory.clone(),
            factory,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn factory(&self) -> &[String] {
        &self.factory
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    /// 追加同事; 空白或已存在时不变
    pub fn add(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            trace!(name = trimmed, "同事已存在或为空, 跳过");
            return false;
        }

        debug!(name = trimmed, "添加同事");
        self.names.push(trimmed.to_string());
        true
    }

    /// 修改第 index 位同事
    ///
    /// 规则:
    /// - index 越界 → 不变
    /// - 去空白后为空 → 删除该位
    /// - 与其他位重名 → 删除该位 (不制造重复)
    /// - 其他 → 写入去空白后的姓名
    pub fn update_at(&mut self, index: usize, name: &str) -> bool {
        let Some(current) = self.names.get(index) else {
            trace!(index, "同事序号越界, 跳过");
            return false;
        };

        let trimmed = name.trim();
        if trimmed.is_empty() {
            debug!(index, "姓名为空, 删除同事");
            self.names.remove(index);
            return true;
        }

        if current == trimmed {
            return false;
        }

        let duplicate = self
            .names
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && existing == trimmed);
        if duplicate {
            debug!(index, name = trimmed, "与已有同事重名, 删除该位");
            self.names.remove(index);
            return true;
        }

        debug!(index, name = trimmed, "修改同事");
        self.names[index] = trimmed.to_string();
        true
    }

    /// 删除第 index 位同事; 越界时不变
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.names.len() {
            return false;
        }
        let removed = self.names.remove(index);
        debug!(index, name = %removed, "删除同事");
        true
    }

    /// 恢复出厂名单
    pub fn reset(&mut self) -> bool {
        if self.names == self.factory {
            return false;
        }
        debug!(count = self.factory.len(), "同事名册恢复出厂值");
        self.names = self.factory.clone();
        true
    }

    /// 整体替换 (快照导入), 同样做去重
    pub(crate) fn replace<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names = normalize_names(names);
    }
}

/// 去空白、丢弃空名、保留首次出现
pub(crate) fn normalize_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for name in names {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() || result.iter().any(|existing| existing == trimmed) {
            continue;
        }
        result.push(trimmed.to_string());
    }
    result
}
