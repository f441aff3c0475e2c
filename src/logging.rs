// ==========================================
// 多菜式餐单聚合系统 - 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// RUST_LOG 优先,未设置时使用调用方给出的默认级别
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认日志级别
pub const DEFAULT_LOG_LEVEL: &str = "info";

fn env_filter_or(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// 初始化日志系统（文本格式）
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=meal_plan_aggregator=trace
///
/// # 示例
/// ```no_run
/// use meal_plan_aggregator::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with_level(DEFAULT_LOG_LEVEL);
}

/// 按指定默认级别初始化（CLI --verbose 使用 debug）
pub fn init_with_level(default_level: &str) {
    let _ = fmt()
        .with_env_filter(env_filter_or(default_level))
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 初始化 JSON 格式日志（便于日志采集）
pub fn init_json() {
    let _ = fmt()
        .json()
        .with_env_filter(env_filter_or(DEFAULT_LOG_LEVEL))
        .with_current_span(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 初始化测试环境的日志系统
///
/// 使用 debug 级别,重复调用无副作用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
