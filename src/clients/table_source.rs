use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::loaders::RawWorksheet;

/// 只读表格数据源
#[async_trait]
pub trait TableSource: Send + Sync {
    /// 按表格中的顺序读取全部工作表
    async fn fetch_tables(&self) -> AppResult<Vec<RawWorksheet>>;
}
