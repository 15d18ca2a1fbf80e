use crate::models::record::{BookRecord, QuizRecord, QuoteRecord};
use crate::models::table::{ClassifiedTable, Table, TableKind, AUTHOR_COLUMN};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// 工作表原始数据
///
/// 第一行是表头，其余每行是一条记录，单元格保持原始 JSON 值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawWorksheet {
    pub title: String,
    pub header: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl RawWorksheet {
    /// 从 Sheets API 返回的二维数组构建（第一行作为表头）
    pub fn from_values(title: impl Into<String>, mut values: Vec<Vec<Value>>) -> Self {
        let header = if values.is_empty() {
            Vec::new()
        } else {
            values.remove(0).iter().map(cell_text).collect()
        };
        Self {
            title: title.into(),
            header,
            rows: values,
        }
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }
}

/// 单元格转为文本
///
/// 数字、布尔值按字面输出，空单元格为空字符串
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 对单张工作表分类并转为强类型记录
///
/// 缺少必需列返回 `None`；作者或考查列为空的行被丢弃
pub fn classify(sheet: &RawWorksheet) -> Option<ClassifiedTable> {
    let kind = TableKind::classify(sheet.header.as_slice())?;
    let table = match kind {
        TableKind::Books => ClassifiedTable::Books(typed_table::<BookRecord>(sheet)?),
        TableKind::Quotes => ClassifiedTable::Quotes(typed_table::<QuoteRecord>(sheet)?),
    };
    Some(table)
}

fn typed_table<R: QuizRecord>(sheet: &RawWorksheet) -> Option<Table<R>> {
    let author_idx = sheet.column_index(AUTHOR_COLUMN)?;
    let subject_idx = sheet.column_index(R::KIND.column())?;

    let cell = |row: &[Value], idx: usize| {
        row.get(idx)
            .map(cell_text)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let records: Vec<R> = sheet
        .rows
        .iter()
        .filter_map(|row| {
            let row = row.as_slice();
            let author = cell(row, author_idx);
            let subject = cell(row, subject_idx);
            if author.is_empty() || subject.is_empty() {
                return None;
            }
            Some(R::from_fields(author, subject))
        })
        .collect();

    let dropped = sheet.rows.len() - records.len();
    if dropped > 0 {
        debug!("[{}] 丢弃 {} 行空白记录", sheet.title, dropped);
    }

    Some(Table::new(sheet.title.clone(), records))
}

/// 对所有工作表分类，保持输入顺序，跳过无法识别的表
pub fn classify_all(sheets: &[RawWorksheet]) -> Vec<ClassifiedTable> {
    sheets
        .iter()
        .filter_map(|sheet| match classify(sheet) {
            Some(table) => {
                info!(
                    "✓ 工作表「{}」识别为{}表，共 {} 条记录",
                    sheet.title,
                    table.kind(),
                    table.len()
                );
                Some(table)
            }
            None => {
                debug!("工作表「{}」缺少必需列，跳过: {:?}", sheet.title, sheet.header);
                None
            }
        })
        .collect()
}
