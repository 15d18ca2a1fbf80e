//! 干扰项抽样 - 业务能力层

use rand::seq::SliceRandom;
use rand::Rng;

/// 干扰项抽样器
///
/// 候选池不够时直接全部返回（题目变简单，但不报错）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistractorSampler {
    count: usize,
}

impl DistractorSampler {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// 从候选池中无放回地均匀抽取最多 `count` 个
    ///
    /// 候选池需要调用方提前去掉正确答案
    pub fn sample<T, R>(&self, pool: &[T], rng: &mut R) -> Vec<T>
    where
        T: Clone,
        R: Rng + ?Sized,
    {
        if pool.len() <= self.count {
            return pool.to_vec();
        }
        pool.choose_multiple(rng, self.count).cloned().collect()
    }
}

impl Default for DistractorSampler {
    fn default() -> Self {
        Self::new(3)
    }
}
