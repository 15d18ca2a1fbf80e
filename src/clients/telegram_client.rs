/// Telegram Bot API 客户端
///
/// 封装发送文本消息和测验投票两个调用
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::clients::messenger::{Messenger, SendOutcome};
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::question::QuestionItem;

/// Telegram 统一响应结构
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}

/// Telegram 客户端
pub struct TelegramClient {
    http: Client,
    base_url: String,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    /// 创建新的 Telegram 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.telegram_api_base_url.trim_end_matches('/').to_string(),
            token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        }
    }

    /// 构建 `sendMessage` 请求体
    fn message_payload(&self, text: &str) -> Value {
        json!({
            "chat_id": self.chat_id,
            "text": text,
        })
    }

    /// 构建 `sendPoll` 请求体（quiz 类型，单选，实名）
    fn poll_payload(&self, item: &QuestionItem) -> Value {
        let options: Vec<Value> = item
            .options
            .iter()
            .map(|text| json!({ "text": text }))
            .collect();

        json!({
            "chat_id": self.chat_id,
            "question": item.question,
            "options": options,
            "type": "quiz",
            "correct_option_id": item.answer_index,
            "is_anonymous": false,
            "allows_multiple_answers": false,
        })
    }

    /// 调用 Bot API 方法
    async fn call(&self, method: &str, payload: &Value) -> AppResult<SendOutcome> {
        // URL 里带着 token，错误信息中去掉 URL
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);

        debug!("调用 Telegram API: {}", method);

        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(method, e.without_url()))?;

        let status = response.status();
        let body: TelegramResponse = response
            .json()
            .await
            .map_err(|e| ApiError::json_parse_failed(method, e.without_url()))?;

        debug!("Telegram API 返回: HTTP {} ok={}", status, body.ok);

        Ok(interpret_response(method, body)?)
    }
}

/// 把 Bot API 响应转换为发送结果
///
/// 429 且带 `retry_after` 时视为限流，其余失败都是传输错误
fn interpret_response(method: &str, body: TelegramResponse) -> Result<SendOutcome, ApiError> {
    if body.ok {
        return Ok(SendOutcome::Sent);
    }

    let retry_after = body.parameters.as_ref().and_then(|p| p.retry_after);
    match (body.error_code, retry_after) {
        (Some(429), Some(secs)) => Ok(SendOutcome::Throttled(Duration::from_secs(secs))),
        (code, _) => Err(ApiError::BadResponse {
            endpoint: method.to_string(),
            code,
            message: body.description,
        }),
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(&self, text: &str) -> AppResult<SendOutcome> {
        self.call("sendMessage", &self.message_payload(text)).await
    }

    async fn send_poll(&self, item: &QuestionItem) -> AppResult<SendOutcome> {
        self.call("sendPoll", &self.poll_payload(item)).await
    }
}
