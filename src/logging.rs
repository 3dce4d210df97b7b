// ==========================================
// 个人排班日历 - 日志
// ==========================================
// 命令行: stderr, 文本或 JSON
// 测试: 交给测试框架捕获
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 命令行日志
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=shift_calendar=trace
/// - SHIFT_CALENDAR_LOG_JSON: 设为 1 时输出 JSON 格式日志
///
/// 日志写到 stderr, stdout 留给命令输出
///
/// # 示例
/// ```no_run
/// use shift_calendar::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("SHIFT_CALENDAR_LOG_JSON")
        .map(|v| v == "1")
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("日志系统已初始化, 跳过: {}", e);
    }
}

/// 测试用日志: 输出交给测试框架捕获
///
/// 默认打开本 crate 的 trace 级别 (覆写写入/跳过都会留痕), RUST_LOG 可覆盖;
/// 多个测试重复调用时只有第一次生效
pub fn init_test() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shift_calendar=trace"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(false)
        .try_init();
}
