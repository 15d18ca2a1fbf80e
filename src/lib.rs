//! # Sheet Quiz Bot
//!
//! 把表格里的"作者-书名""作者-语录"数据变成单选测验，逐条推送到 Telegram
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露能力
//! - `Sleeper` - 发送节奏和限流等待
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 外部服务
//! - `TableSource` / `SheetsClient` - 只读表格数据源
//! - `Messenger` / `TelegramClient` - 发送文本和投票
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 只处理单张表，纯函数，随机源由调用方注入
//! - `OptionFormatter` - 选项截断
//! - `DistractorSampler` - 干扰项抽样
//! - `QuestionGenerator` - 出题
//!
//! ### ④ 流程层（Workflow）
//! - `QuestionSetBuilder` - 打乱、出题、过滤空表
//! - `DeliveryCtx` - 发送上下文（表 + 题号）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/quiz_runner` - 一次完整运行
//! - `orchestrator/delivery_loop` - 串行发送、限流重试
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

mod test_utils;

// 重新导出常用类型
pub use clients::{Messenger, SendOutcome, TableSource};
pub use config::{Config, QuizSettings};
pub use error::{AppError, AppResult};
pub use infrastructure::{Sleeper, TokioSleeper};
pub use models::{QuestionItem, QuestionSet, RawWorksheet};
pub use orchestrator::{App, DeliveryLoop, DeliveryStats};
pub use workflow::QuestionSetBuilder;
