//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `quiz_runner` - 一次完整运行
//! - 持有数据源、出题器和发送循环
//! - 读取 → 分类 → 出题 → 发送
//! - 输出全局统计信息
//!
//! ### `delivery_loop` - 发送循环
//! - 逐张表、逐道题串行发送
//! - 发送间隔和限流重试
//!
//! ## 层次关系
//!
//! ```text
//! quiz_runner (处理 Vec<Worksheet>)
//!     ↓
//! workflow::QuestionSetBuilder (处理单张表)
//!     ↓
//! services (能力层：formatter / sampler / generator)
//!
//! quiz_runner
//!     ↓
//! delivery_loop (处理 Vec<QuestionSet>)
//!     ↓
//! clients / infrastructure (Telegram、Sleeper)
//! ```

pub mod delivery_loop;
pub mod quiz_runner;

// 重新导出主要类型
pub use delivery_loop::{DeliveryLoop, DeliveryStats};
pub use quiz_runner::App;
