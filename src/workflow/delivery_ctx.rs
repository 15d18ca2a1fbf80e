//! 发送上下文
//!
//! 封装"我正在发哪张表的第几题"这一信息，只用于日志

use std::fmt::Display;

/// 发送上下文
#[derive(Debug, Clone)]
pub struct DeliveryCtx {
    /// 表名（工作表标题）
    pub table_name: String,

    /// 表序号（从1开始）
    pub table_index: usize,

    /// 题目在表中的序号（从1开始，0 表示标题）
    pub item_index: usize,

    /// 本表题目总数
    pub item_total: usize,
}

impl DeliveryCtx {
    /// 创建标题的上下文
    pub fn header(table_name: impl Into<String>, table_index: usize, item_total: usize) -> Self {
        Self {
            table_name: table_name.into(),
            table_index,
            item_index: 0,
            item_total,
        }
    }

    /// 切换到本表的第 `item_index` 题
    pub fn item(&self, item_index: usize) -> Self {
        Self {
            item_index,
            ..self.clone()
        }
    }
}

impl Display for DeliveryCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.item_index == 0 {
            write!(f, "[表#{} {} 标题]", self.table_index, self.table_name)
        } else {
            write!(
                f,
                "[表#{} {} 题目 {}/{}]",
                self.table_index, self.table_name, self.item_index, self.item_total
            )
        }
    }
}
