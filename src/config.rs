use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// 出题参数
///
/// 纯粹的生成逻辑配置，不从环境读取
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    /// 选项文本最大长度（Telegram 投票选项上限）
    pub max_option_len: usize,
    /// 每种题型从打乱后的表中取多少行
    pub questions_per_mode: usize,
    /// 每道题最多几个干扰项
    pub distractors: usize,
    /// 作者去重后至少需要几个，少于这个数的表不出题
    pub min_distinct_authors: usize,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            max_option_len: 100,
            questions_per_mode: 5,
            distractors: 3,
            min_distinct_authors: 4,
        }
    }
}

/// Google 服务账号密钥（`GOOGLE_CREDS` 的内容）
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- 必填，缺任何一个都无法启动 ---
    pub bot_token: String,
    pub chat_id: String,
    /// 表格 ID
    pub sheet_id: String,
    pub google_creds: ServiceAccountKey,
    // --- 可选 ---
    /// 两次发送之间的间隔（秒）
    pub send_interval_secs: u64,
    pub telegram_api_base_url: String,
    pub sheets_api_base_url: String,
    /// 固定随机种子，便于复现同一套题
    pub rng_seed: Option<u64>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    pub quiz: QuizSettings,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// `lookup` 返回 `None` 表示该键不存在
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::missing(key))
        };

        let bot_token = required("BOT_TOKEN")?;
        let chat_id = required("CHAT_ID")?;
        let sheet_id = required("SHEET_ID")?;
        let google_creds = serde_json::from_str(&required("GOOGLE_CREDS")?)
            .map_err(|source| ConfigError::InvalidCredentials { source })?;

        let send_interval_secs = parse_optional(&lookup, "SEND_INTERVAL_SECS", "u64")?.unwrap_or(3);
        let rng_seed = parse_optional(&lookup, "RNG_SEED", "u64")?;
        let verbose_logging = parse_optional(&lookup, "VERBOSE_LOGGING", "bool")?.unwrap_or(false);

        Ok(Self {
            bot_token,
            chat_id,
            sheet_id,
            google_creds,
            send_interval_secs,
            telegram_api_base_url: lookup("TELEGRAM_API_BASE_URL")
                .unwrap_or_else(|| "https://api.telegram.org".to_string()),
            sheets_api_base_url: lookup("SHEETS_API_BASE_URL")
                .unwrap_or_else(|| "https://sheets.googleapis.com".to_string()),
            rng_seed,
            verbose_logging,
            quiz: QuizSettings::default(),
        })
    }

    /// 发送间隔
    pub fn send_interval(&self) -> Duration {
        Duration::from_secs(self.send_interval_secs)
    }
}

fn parse_optional<F, T>(lookup: &F, key: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ConfigError::EnvVarParseFailed {
            var_name: key.to_string(),
            value,
            expected_type: expected_type.to_string(),
        }),
    }
}
