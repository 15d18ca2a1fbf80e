/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::orchestrator::DeliveryStats;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`；未设置时默认 info，详细模式下为 debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 测验推送 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("💬 目标会话: {}", config.chat_id);
    info!("⏱️ 发送间隔: {} 秒", config.send_interval_secs);
    if let Some(seed) = config.rng_seed {
        info!("🎲 随机种子: {}", seed);
    }
    info!("{}", "=".repeat(60));
}

/// 记录表格加载信息
///
/// # 参数
/// - `total`: 工作表总数
/// - `recognized`: 能识别的表数量
pub fn log_tables_loaded(total: usize, recognized: usize) {
    info!("✓ 读取到 {} 个工作表，其中 {} 个可以出题", total, recognized);
}

/// 打印最终统计信息
pub fn print_final_stats(stats: &DeliveryStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部发送完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📚 题集: {}", stats.sets);
    info!("✅ 投票: {}", stats.polls);
    info!("⏳ 限流重试: {}", stats.throttled);
    info!("{}", "=".repeat(60));
}
