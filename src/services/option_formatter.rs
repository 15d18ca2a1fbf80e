//! 选项格式化 - 业务能力层
//!
//! 所有出现在选项里、或要和选项比较的值都必须先经过这里

const ELLIPSIS: &str = "...";

/// 选项格式化器
///
/// 超过 `max_len` 个字符时截断为 `max_len - 3` 个字符再加 `...`，
/// 结果长度正好是 `max_len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionFormatter {
    max_len: usize,
}

impl OptionFormatter {
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// 格式化一个值（按字符计数，不按字节）
    pub fn format(&self, value: &str) -> String {
        if value.chars().count() <= self.max_len {
            return value.to_string();
        }
        let keep = self.max_len.saturating_sub(ELLIPSIS.len());
        value.chars().take(keep).collect::<String>() + ELLIPSIS
    }
}

impl Default for OptionFormatter {
    fn default() -> Self {
        Self::new(100)
    }
}
