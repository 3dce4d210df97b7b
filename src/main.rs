// ==========================================
// 个人排班日历 - 命令行入口
// ==========================================
// 子命令:
//   grid  --month YYYY-MM           月历网格 (含解析后排班)
//   day   --date YYYY-MM-DD         单日排班
//   stats --year YYYY [--month M]   年度统计 (+ 指定月星期分布)
// 输出: JSON 到 stdout, 日志到 stderr
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shift_calendar::config::{summary_label, ConfigManager, ScheduleConfig};
use shift_calendar::domain::parse_date_key;
use shift_calendar::engine::{
    MonthlyShiftDistributionStat, MonthlyWorkRestStat, WeeklyWorkPatternStat,
};
use shift_calendar::{logging, DaySchedule, ScheduleState};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shift-calendar", version, about = "个人排班日历")]
struct Cli {
    /// 配置文件路径 (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 使用内置演示配置 (忽略 --config)
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 月历网格
    Grid {
        /// 月份 YYYY-MM, 默认本月
        #[arg(long)]
        month: Option<String>,
    },
    /// 单日排班
    Day {
        #[arg(long)]
        date: String,
    },
    /// 年度统计
    Stats {
        #[arg(long)]
        year: i32,
        /// 星期分布的月份 (1-12)
        #[arg(long)]
        month: Option<u32>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GridCell {
    key: String,
    is_current_month: bool,
    summary: String,
    schedule: DaySchedule,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    year: i32,
    work_rest: Vec<MonthlyWorkRestStat>,
    shift_distribution: Vec<MonthlyShiftDistributionStat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weekly_pattern: Option<Vec<WeeklyWorkPatternStat>>,
}

fn parse_month(text: &str) -> Result<NaiveDate> {
    parse_date_key(&format!("{}-01", text))
        .with_context(|| format!("月份格式应为 YYYY-MM: {}", text))
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let config = if cli.demo {
        ScheduleConfig::demo()
    } else {
        ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?
    };
    let state = ScheduleState::new(config);
    tracing::debug!(version = shift_calendar::VERSION, "{} 启动", shift_calendar::APP_NAME);

    let output = match cli.command {
        Command::Grid { month } => {
            let anchor = match month {
                Some(text) => parse_month(&text)?,
                None => Local::now().date_naive(),
            };
            let cells = state
                .build_calendar_days(anchor)
                .into_iter()
                .map(|day| -> Result<GridCell> {
                    let schedule = state.get_schedule_for_date(&day.key, Some(day.date))?;
                    Ok(GridCell {
                        summary: summary_label(schedule.shift, schedule.shift_time.as_deref()),
                        key: day.key,
                        is_current_month: day.is_current_month,
                        schedule,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            serde_json::to_string_pretty(&cells)?
        }
        Command::Day { date } => {
            let schedule = state.get_schedule_for_date(&date, None)?;
            serde_json::to_string_pretty(&schedule)?
        }
        Command::Stats { year, month } => {
            if let Some(month) = month {
                if !(1..=12).contains(&month) {
                    bail!("月份必须在 1-12 之间: {}", month);
                }
            }
            let report = StatsReport {
                year,
                work_rest: state.monthly_work_rest(year),
                shift_distribution: state.monthly_shift_distribution(year),
                weekly_pattern: month.map(|m| state.weekly_work_pattern(year, m)),
            };
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{}", output);
    Ok(())
}
