
#[cfg(test)]
pub mod fakes {
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use crate::clients::{Messenger, SendOutcome, TableSource};
    use crate::error::AppResult;
    use crate::infrastructure::Sleeper;
    use crate::models::loaders::RawWorksheet;
    use crate::models::question::QuestionItem;

    /// 记录下来的一次发送
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Sent {
        Message(String),
        Poll(QuestionItem),
    }

    /// 按脚本返回结果的消息通道，脚本用完后一律成功
    #[derive(Default)]
    pub struct ScriptedMessenger {
        outcomes: Mutex<VecDeque<AppResult<SendOutcome>>>,
        sent: Mutex<Vec<Sent>>,
    }

    impl ScriptedMessenger {
        pub fn with_outcomes(outcomes: Vec<AppResult<SendOutcome>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                sent: Mutex::new(Vec::new()),
            }
        }

        /// 所有发送尝试（包括被限流和失败的）
        pub fn sent(&self) -> Vec<Sent> {
            self.sent.lock().unwrap().clone()
        }

        fn next(&self, sent: Sent) -> AppResult<SendOutcome> {
            self.sent.lock().unwrap().push(sent);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(SendOutcome::Sent))
        }
    }

    #[async_trait]
    impl Messenger for ScriptedMessenger {
        async fn send_message(&self, text: &str) -> AppResult<SendOutcome> {
            self.next(Sent::Message(text.to_string()))
        }

        async fn send_poll(&self, item: &QuestionItem) -> AppResult<SendOutcome> {
            self.next(Sent::Poll(item.clone()))
        }
    }

    /// 只记录时长、不真正等待的暂停器
    #[derive(Default)]
    pub struct RecordingSleeper {
        sleeps: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }

    /// 固定返回若干工作表的数据源
    pub struct StaticTableSource {
        pub worksheets: Vec<RawWorksheet>,
    }

    #[async_trait]
    impl TableSource for StaticTableSource {
        async fn fetch_tables(&self) -> AppResult<Vec<RawWorksheet>> {
            Ok(self.worksheets.clone())
        }
    }
}
