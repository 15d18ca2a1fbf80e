//! 发送循环 - 编排层
//!
//! ## 职责
//!
//! 把题集按顺序逐条发出去：先发表标题，再逐题发投票。
//!
//! ## 状态机（每条消息）
//!
//! ```text
//! Pending --成功--> Sent --等待发送间隔--> 完成
//! Pending --限流--> Waiting --等待 retry_after--> Pending
//! ```
//!
//! 限流无限重试、不算错误；其它发送失败直接向上返回并终止运行。
//! 全程串行，不会并发发送。

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clients::messenger::{Messenger, SendOutcome};
use crate::error::AppResult;
use crate::infrastructure::Sleeper;
use crate::models::question::{QuestionItem, QuestionSet};
use crate::workflow::DeliveryCtx;

/// 单条消息的发送状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeliveryState {
    Pending,
    Waiting(Duration),
    Sent,
}

/// 待发送的一条消息
#[derive(Debug, Clone, Copy)]
enum Outgoing<'a> {
    Announcement(&'a str),
    Poll(&'a QuestionItem),
}

/// 发送统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryStats {
    /// 发出的题集数
    pub sets: usize,
    /// 发出的投票数
    pub polls: usize,
    /// 发出的标题数
    pub announcements: usize,
    /// 被限流的次数
    pub throttled: usize,
}

/// 发送循环
pub struct DeliveryLoop<M, S> {
    messenger: M,
    sleeper: S,
    send_interval: Duration,
}

impl<M, S> DeliveryLoop<M, S>
where
    M: Messenger,
    S: Sleeper,
{
    pub fn new(messenger: M, sleeper: S, send_interval: Duration) -> Self {
        Self {
            messenger,
            sleeper,
            send_interval,
        }
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// 按顺序发送所有题集
    pub async fn deliver_all(&self, sets: &[QuestionSet]) -> AppResult<DeliveryStats> {
        let mut stats = DeliveryStats::default();

        for (idx, set) in sets.iter().enumerate() {
            self.deliver_set(set, idx + 1, &mut stats).await?;
        }

        Ok(stats)
    }

    /// 发送一张表的题集：先标题，后题目
    pub async fn deliver_set(
        &self,
        set: &QuestionSet,
        table_index: usize,
        stats: &mut DeliveryStats,
    ) -> AppResult<()> {
        let ctx = DeliveryCtx::header(&set.table_name, table_index, set.len());
        info!("{} 📢 发送标题: {}", ctx, set.header);
        stats.throttled += self
            .send_until_sent(&ctx, Outgoing::Announcement(&set.header))
            .await?;
        stats.announcements += 1;

        for (idx, item) in set.items.iter().enumerate() {
            let item_ctx = ctx.item(idx + 1);
            info!("{} 📤 发送题目: {}", item_ctx, item.question);
            stats.throttled += self.send_until_sent(&item_ctx, Outgoing::Poll(item)).await?;
            stats.polls += 1;
        }

        stats.sets += 1;
        info!("{} ✓ 本表发送完成", ctx);
        Ok(())
    }

    /// 发送一道题，限流时等待后重发，成功后等待发送间隔
    pub async fn deliver(&self, item: &QuestionItem) -> AppResult<()> {
        let ctx = DeliveryCtx::header("-", 0, 1).item(1);
        self.send_until_sent(&ctx, Outgoing::Poll(item)).await?;
        Ok(())
    }

    /// 发送一条普通消息，规则同 [`deliver`](Self::deliver)
    pub async fn announce(&self, text: &str) -> AppResult<()> {
        let ctx = DeliveryCtx::header("-", 0, 0);
        self.send_until_sent(&ctx, Outgoing::Announcement(text)).await?;
        Ok(())
    }

    /// 驱动单条消息的状态机，返回被限流的次数
    async fn send_until_sent(&self, ctx: &DeliveryCtx, outgoing: Outgoing<'_>) -> AppResult<usize> {
        let mut state = DeliveryState::Pending;
        let mut throttled = 0;

        loop {
            state = match state {
                DeliveryState::Pending => match self.attempt(outgoing).await? {
                    SendOutcome::Sent => DeliveryState::Sent,
                    SendOutcome::Throttled(wait) => {
                        throttled += 1;
                        warn!(
                            "{} ⏳ 发送过于频繁 (第 {} 次)，等待 {} 秒后重试",
                            ctx,
                            throttled,
                            wait.as_secs()
                        );
                        DeliveryState::Waiting(wait)
                    }
                },
                DeliveryState::Waiting(wait) => {
                    self.sleeper.sleep(wait).await;
                    DeliveryState::Pending
                }
                DeliveryState::Sent => {
                    debug!("{} ✓ 已发送", ctx);
                    self.sleeper.sleep(self.send_interval).await;
                    return Ok(throttled);
                }
            };
        }
    }

    async fn attempt(&self, outgoing: Outgoing<'_>) -> AppResult<SendOutcome> {
        match outgoing {
            Outgoing::Announcement(text) => self.messenger.send_message(text).await,
            Outgoing::Poll(item) => self.messenger.send_poll(item).await,
        }
    }
}
