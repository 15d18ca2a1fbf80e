/// Google Sheets API 客户端
///
/// 用服务账号密钥换取只读访问令牌，读取表格中所有工作表
use async_trait::async_trait;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::clients::table_source::TableSource;
use crate::config::{Config, ServiceAccountKey};
use crate::error::{ApiError, AppResult, SheetError};
use crate::models::loaders::RawWorksheet;

const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// 访问令牌有效期（秒），Google 上限为一小时
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// JWT 声明
#[derive(Debug, Serialize)]
struct ServiceAccountClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchGetResponse {
    #[serde(default)]
    value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Sheets 客户端
pub struct SheetsClient {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    credentials: ServiceAccountKey,
}

impl SheetsClient {
    /// 创建新的 Sheets 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.sheets_api_base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.sheet_id.clone(),
            credentials: config.google_creds.clone(),
        }
    }

    /// 签发服务账号断言（RS256）
    fn signed_assertion(&self, now: i64) -> Result<String, SheetError> {
        let claims = ServiceAccountClaims {
            iss: &self.credentials.client_email,
            scope: READONLY_SCOPE,
            aud: &self.credentials.token_uri,
            iat: now,
            exp: now + TOKEN_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .map_err(|source| SheetError::TokenSigningFailed { source })?;

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|source| SheetError::TokenSigningFailed { source })
    }

    /// 用断言换取访问令牌
    async fn access_token(&self) -> AppResult<String> {
        let assertion = self.signed_assertion(chrono::Utc::now().timestamp())?;
        let endpoint = "oauth2/token";

        let response = self
            .http
            .post(&self.credentials.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SheetError::AuthRejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::json_parse_failed(endpoint, e))?;

        debug!("✓ 已获取 Google 访问令牌");
        Ok(token.access_token)
    }

    /// 发起带令牌的 GET 请求并解析 JSON
    async fn get_json<T>(&self, endpoint: &str, url: &str, query: &[(&str, String)], token: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok();
            return Err(ApiError::BadResponse {
                endpoint: endpoint.to_string(),
                code: Some(i64::from(status.as_u16())),
                message,
            }
            .into());
        }

        let parsed = response
            .json()
            .await
            .map_err(|e| ApiError::json_parse_failed(endpoint, e))?;
        Ok(parsed)
    }
}

/// A1 表示法中的工作表名（单引号包裹，内部单引号加倍）
fn quoted_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

#[async_trait]
impl TableSource for SheetsClient {
    async fn fetch_tables(&self) -> AppResult<Vec<RawWorksheet>> {
        let token = self.access_token().await?;
        let spreadsheet_url = format!("{}/v4/spreadsheets/{}", self.base_url, self.spreadsheet_id);

        let meta: SpreadsheetMeta = self
            .get_json(
                "spreadsheets.get",
                &spreadsheet_url,
                &[("fields", "sheets.properties.title".to_string())],
                &token,
            )
            .await?;

        let titles: Vec<String> = meta.sheets.into_iter().map(|s| s.properties.title).collect();
        info!("📄 表格共有 {} 个工作表: {:?}", titles.len(), titles);
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: Vec<(&str, String)> = titles
            .iter()
            .map(|title| ("ranges", quoted_range(title)))
            .collect();
        query.push(("valueRenderOption", "UNFORMATTED_VALUE".to_string()));

        let batch: BatchGetResponse = self
            .get_json(
                "values.batchGet",
                &format!("{}/values:batchGet", spreadsheet_url),
                &query,
                &token,
            )
            .await?;

        // batchGet 按请求顺序返回
        let worksheets = titles
            .into_iter()
            .zip(batch.value_ranges.into_iter().map(|r| r.values).chain(std::iter::repeat_with(Vec::new)))
            .map(|(title, values)| RawWorksheet::from_values(title, values))
            .collect();

        Ok(worksheets)
    }
}
