use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// API 调用错误（Telegram / Google）
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 表格数据源错误
    #[error("数据源错误: {0}")]
    Sheet(#[from] SheetError),
}

/// 配置错误
///
/// 任何一个都是致命的，在生成和发送开始之前终止运行
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 服务账号凭据不是合法的 JSON
    #[error("GOOGLE_CREDS 不是合法的服务账号 JSON: {source}")]
    InvalidCredentials {
        #[source]
        source: serde_json::Error,
    },
}

/// API 调用错误
///
/// 除了限流以外的所有发送失败都归为此类，整个运行随之终止
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): code={code:?}, message={message:?}")]
    BadResponse {
        endpoint: String,
        code: Option<i64>,
        message: Option<String>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

/// 表格数据源错误
#[derive(Debug, Error)]
pub enum SheetError {
    /// 服务账号私钥无效或签名失败
    #[error("服务账号令牌签名失败: {source}")]
    TokenSigningFailed {
        #[source]
        source: jsonwebtoken::errors::Error,
    },
    /// Google 拒绝了令牌交换
    #[error("Google 授权失败 (HTTP {status}): {body}")]
    AuthRejected { status: u16, body: String },
}

// ========== 便捷构造函数 ==========

impl ApiError {
    /// 创建API请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建JSON解析失败错误
    pub fn json_parse_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::JsonParseFailed {
            endpoint: endpoint.into(),
            source,
        }
    }
}

impl ConfigError {
    /// 创建环境变量缺失错误
    pub fn missing(var_name: impl Into<String>) -> Self {
        ConfigError::EnvVarNotFound {
            var_name: var_name.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message_names_variable() {
        let err = AppError::from(ConfigError::missing("BOT_TOKEN"));
        assert_eq!(err.to_string(), "配置错误: 环境变量 BOT_TOKEN 不存在");
    }

    #[test]
    fn test_bad_response_message() {
        let err = ApiError::BadResponse {
            endpoint: "sendPoll".to_string(),
            code: Some(400),
            message: Some("Bad Request: poll must have at least 2 options".to_string()),
        };
        assert!(err.to_string().contains("sendPoll"));
        assert!(err.to_string().contains("400"));
    }
}
