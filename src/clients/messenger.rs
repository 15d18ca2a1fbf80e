use async_trait::async_trait;
use std::time::Duration;

use crate::error::AppResult;
use crate::models::question::QuestionItem;

/// 单次发送的结果
///
/// 限流不是错误：调用方按 `Throttled` 里的时长等待后重发同一条
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Throttled(Duration),
}

/// 消息通道
///
/// 目标会话在构造时确定；返回 `Err` 表示传输失败，整个运行随之终止
#[async_trait]
pub trait Messenger: Send + Sync {
    /// 发送一条普通文本消息
    async fn send_message(&self, text: &str) -> AppResult<SendOutcome>;

    /// 发送一道单选测验投票
    async fn send_poll(&self, item: &QuestionItem) -> AppResult<SendOutcome>;
}
