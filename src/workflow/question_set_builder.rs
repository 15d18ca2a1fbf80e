//! 题集构建 - 流程层
//!
//! 核心职责：把分好类的表逐张变成题集
//!
//! 流程顺序（每张表）：
//! 1. 打乱行顺序（每张表只打乱一次）
//! 2. 按表类型调用出题服务
//! 3. 没出到题的表整张丢弃，连标题都不发

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::config::QuizSettings;
use crate::models::question::QuestionSet;
use crate::models::record::QuizRecord;
use crate::models::table::{ClassifiedTable, Table};
use crate::services::QuestionGenerator;

/// 题集构建器
#[derive(Debug, Clone, Default)]
pub struct QuestionSetBuilder {
    generator: QuestionGenerator,
}

impl QuestionSetBuilder {
    pub fn new(settings: &QuizSettings) -> Self {
        Self {
            generator: QuestionGenerator::new(settings),
        }
    }

    /// 按输入顺序为每张表构建题集
    pub fn build<G>(&self, tables: Vec<ClassifiedTable>, rng: &mut G) -> Vec<QuestionSet>
    where
        G: Rng + ?Sized,
    {
        tables
            .into_iter()
            .filter_map(|table| match table {
                ClassifiedTable::Books(t) => self.build_one(t, &mut *rng),
                ClassifiedTable::Quotes(t) => self.build_one(t, &mut *rng),
            })
            .collect()
    }

    fn build_one<R, G>(&self, mut table: Table<R>, rng: &mut G) -> Option<QuestionSet>
    where
        R: QuizRecord,
        G: Rng + ?Sized,
    {
        table.records.shuffle(rng);
        let items = self.generator.generate(&table.records, rng);

        if items.is_empty() {
            info!(
                "⏭️ 表「{}」没有足够的数据出题（作者 {} 个），跳过",
                table.name,
                table.distinct_authors()
            );
            return None;
        }

        info!("✓ 表「{}」生成 {} 道{}题", table.name, items.len(), R::KIND);
        Some(QuestionSet::new(table.name, items))
    }
}
