// ==========================================
// 个人排班日历 - 配置管理器
// ==========================================
// 职责: 出厂默认值 (班次时间/同事名册/种子排班) 的加载与校验
// 存储: JSON 文件 (可选), 缺省时使用内置默认值
// 说明: 只负责出厂默认值, 会话内状态不回写文件
// ==========================================

use crate::config::colleague_pool::normalize_names;
use crate::config::shift_config::factory_shift_times;
use crate::domain::date_key::{parse_date_key, DateKeyError};
use crate::domain::schedule::{ScheduleOverride, Task};
use crate::domain::types::{ShiftTimeMap, ShiftType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 配置目录名
pub const CONFIG_DIR_NAME: &str = "shift-calendar";

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("种子排班日期键无效: {0}")]
    InvalidSeedKey(#[from] DateKeyError),
}

// ==========================================
// ScheduleConfig - 出厂默认值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// 出厂班次时间
    #[serde(default = "factory_shift_times")]
    pub shift_times: ShiftTimeMap,

    /// 出厂同事名册
    #[serde(default)]
    pub colleagues: Vec<String>,

    /// 种子排班 (日期键 → 部分排班), 作为派生默认值的一部分
    #[serde(default)]
    pub seed_schedule: BTreeMap<String, ScheduleOverride>,

    /// 是否启用演示数据生成 (同事轮换/周期任务)
    #[serde(default = "default_true")]
    pub demo_defaults: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            shift_times: factory_shift_times(),
            colleagues: Vec::new(),
            seed_schedule: BTreeMap::new(),
            demo_defaults: true,
        }
    }
}

impl ScheduleConfig {
    /// 演示配置: 十人名册 + 2025 年 9 月的种子排班
    pub fn demo() -> Self {
        Self {
            colleagues: DEMO_COLLEAGUES.iter().map(|s| s.to_string()).collect(),
            seed_schedule: demo_seed_schedule(),
            ..Self::default()
        }
    }

    /// 从 JSON 文本解析并校验
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: ScheduleConfig = serde_json::from_str(text)?;
        config.validated()
    }

    /// 从 JSON 文件加载并校验
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!(
            path = %path.display(),
            colleagues = config.colleagues.len(),
            seeds = config.seed_schedule.len(),
            "配置已加载"
        );
        Ok(config)
    }

    /// 校验:
    /// - 种子排班的日期键必须合法
    /// - 同事名册去空白、去重 (丢弃项记 warn)
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        for key in self.seed_schedule.keys() {
            parse_date_key(key)?;
        }

        let normalized = normalize_names(&self.colleagues);
        if normalized.len() != self.colleagues.len() {
            warn!(
                dropped = self.colleagues.len() - normalized.len(),
                "同事名册存在空名或重名, 已丢弃"
            );
        }
        self.colleagues = normalized;

        // 空种子没有意义
        self.seed_schedule.retain(|_, seed| !seed.is_empty());

        Ok(self)
    }

    /// 种子排班涉及的年份
    pub fn seed_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.seed_schedule
            .keys()
            .filter_map(|key| crate::domain::date_key::year_of_key(key))
    }
}

// ==========================================
// ConfigManager - 配置定位与加载
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 默认配置文件路径: {config_dir}/shift-calendar/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 加载配置
    ///
    /// - 显式路径: 文件必须存在且合法
    /// - 未指定: 默认路径存在则加载, 否则使用内置默认值
    pub fn load(explicit: Option<&Path>) -> Result<ScheduleConfig, ConfigError> {
        if let Some(path) = explicit {
            return ScheduleConfig::load_from_file(path);
        }

        match Self::default_config_path() {
            Some(path) if path.is_file() => ScheduleConfig::load_from_file(&path),
            _ => {
                info!("未找到配置文件, 使用内置默认值");
                Ok(ScheduleConfig::default())
            }
        }
    }
}

// ==========================================
// 演示数据
// ==========================================

pub const DEMO_COLLEAGUES: [&str; 10] = [
    "李晓", "张明华", "王思雅", "蔡敏", "骆晓丹", "吴大雨", "诸葛靓", "庞觉", "陈意航", "周启航",
];

fn demo_seed_schedule() -> BTreeMap<String, ScheduleOverride> {
    let mut seeds = BTreeMap::new();

    seeds.insert(
        "2025-09-02".to_string(),
        ScheduleOverride::new().with_tasks(vec![Task::new("task-2025-09-02-1", "复盘晨会纪要")
            .with_time_range("09:00")
            .with_description("整理班前会重点提醒内容。")]),
    );

    // 显式休息日 + 名单: 解析后名单必须被清空
    seeds.insert(
        "2025-09-08".to_string(),
        ScheduleOverride::new()
            .with_shift(ShiftType::Off)
            .with_colleagues(["李晓", "张明华", "王思雅", "蔡敏"])
            .with_notes(Some("今天整体排班较轻松，记得巡场时顺手检查物资。")),
    );

    seeds.insert(
        "2025-09-09".to_string(),
        ScheduleOverride::new()
            .with_shift(ShiftType::Late)
            .with_colleagues(["骆晓丹", "吴大雨", "诸葛靓", "庞觉"])
            .with_tasks(vec![
                Task::new("task-1", "校对字幕单")
                    .with_time_range("10:00 - 13:00")
                    .with_description("确保活动厅字幕模板全部更新，交接给下个班次。"),
                Task::new("task-2", "小睡后继续值守")
                    .with_time_range("14:00 - 15:00")
                    .with_description("补充精力后梳理夜班值守 FAQ。"),
                Task::new("task-3", "喝水并远眺")
                    .with_time_range("19:00 - 20:00")
                    .with_description("伸展肩颈，缓解久坐疲劳。"),
            ]),
    );

    seeds.insert(
        "2025-09-15".to_string(),
        ScheduleOverride::new().with_notes(Some("轮休日，去做一直想预约的体检。")),
    );

    seeds.insert(
        "2025-09-22".to_string(),
        ScheduleOverride::new().with_tasks(vec![Task::new("task-2025-09-22-1", "月末库存盘点")
            .with_time_range("17:00")
            .with_description("与仓储组核对耗材数量。")]),
    );

    seeds
}
