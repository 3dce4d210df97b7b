// ==========================================
// 个人排班日历 - 日期键
// ==========================================
// 格式固定: YYYY-MM-DD (补零, 本地日历日期)
// 日期键同时是覆写表的 key 和统计的查找 key
// ==========================================

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// 日期键格式
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// 日期键错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    #[error("日期键格式错误 (期望 YYYY-MM-DD): {0:?}")]
    Malformed(String),

    #[error("日期不存在: {0}")]
    NonexistentDate(String),
}

/// 格式化日期为日期键
pub fn format_date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// 严格解析日期键
///
/// 只接受补零的 YYYY-MM-DD; "2025-9-8" 之类的宽松写法视为格式错误
pub fn parse_date_key(key: &str) -> Result<NaiveDate, DateKeyError> {
    let bytes = key.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(DateKeyError::Malformed(key.to_string()));
    }

    // 已校验为 ASCII 数字, 解析不会失败
    let year: i32 = key[0..4]
        .parse()
        .map_err(|_| DateKeyError::Malformed(key.to_string()))?;
    let month: u32 = key[5..7]
        .parse()
        .map_err(|_| DateKeyError::Malformed(key.to_string()))?;
    let day: u32 = key[8..10]
        .parse()
        .map_err(|_| DateKeyError::Malformed(key.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateKeyError::NonexistentDate(key.to_string()))
}

/// 从日期键中取年份 (不校验整个键)
pub fn year_of_key(key: &str) -> Option<i32> {
    key.get(0..4)?.parse().ok()
}

/// 某月天数
///
/// 月份非法时返回 0; 不依赖下个月 1 号, chrono 可表示的最后一个月也能算
pub fn days_in_month(year: i32, month: u32) -> u32 {
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
        .unwrap_or(0)
}
