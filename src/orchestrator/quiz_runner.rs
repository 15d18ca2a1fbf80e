//! 一次完整运行 - 编排层
//!
//! ## 核心功能
//!
//! 1. **读取数据**：从数据源读取全部工作表（每次运行读一次，不缓存）
//! 2. **分类**：识别书目表 / 语录表，其余跳过
//! 3. **出题**：用同一个随机源打乱并出题
//! 4. **发送**：交给发送循环按顺序发出
//! 5. **统计**：输出本次运行的统计信息

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::clients::{Messenger, SheetsClient, TableSource, TelegramClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{Sleeper, TokioSleeper};
use crate::models::loaders::classify_all;
use crate::orchestrator::delivery_loop::{DeliveryLoop, DeliveryStats};
use crate::utils::logging;
use crate::workflow::QuestionSetBuilder;

/// 应用主结构
pub struct App<T, M, S> {
    config: Config,
    source: T,
    builder: QuestionSetBuilder,
    delivery: DeliveryLoop<M, S>,
}

impl App<SheetsClient, TelegramClient, TokioSleeper> {
    /// 使用真实的 Google Sheets 和 Telegram 客户端初始化应用
    pub fn initialize(config: Config) -> Self {
        let source = SheetsClient::new(&config);
        let messenger = TelegramClient::new(&config);
        Self::new(config, source, messenger, TokioSleeper)
    }
}

impl<T, M, S> App<T, M, S>
where
    T: TableSource,
    M: Messenger,
    S: Sleeper,
{
    pub fn new(config: Config, source: T, messenger: M, sleeper: S) -> Self {
        let builder = QuestionSetBuilder::new(&config.quiz);
        let delivery = DeliveryLoop::new(messenger, sleeper, config.send_interval());
        Self {
            config,
            source,
            builder,
            delivery,
        }
    }

    pub fn delivery(&self) -> &DeliveryLoop<M, S> {
        &self.delivery
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<DeliveryStats> {
        logging::log_startup(&self.config);

        info!("\n📁 正在读取表格...");
        let worksheets = self.source.fetch_tables().await?;
        let tables = classify_all(&worksheets);
        logging::log_tables_loaded(worksheets.len(), tables.len());

        let mut rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sets = self.builder.build(tables, &mut rng);

        if sets.is_empty() {
            warn!("⚠️ 没有任何表能出题，程序结束");
            return Ok(DeliveryStats::default());
        }

        let total: usize = sets.iter().map(|s| s.len()).sum();
        info!("✓ 共生成 {} 个题集、{} 道题", sets.len(), total);

        let stats = self.delivery.deliver_all(&sets).await?;
        logging::print_final_stats(&stats);

        Ok(stats)
    }
}
