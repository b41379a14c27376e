//! 均匀区间随机采样
//!
//! 发射器通过 [`RangeSampler`] 采样位置、角度、速度和大小，
//! 方便在测试中替换为确定性的实现。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 均匀区间采样器
pub trait RangeSampler: Send + Sync {
    /// 在 `[min, max)` 内均匀采样
    ///
    /// 区间反转（`min > max`）或退化（`min == max`）时不报错，
    /// 结果由 `min + u * (max - min)` 的算术决定。
    fn sample(&mut self, min: f32, max: f32) -> f32;
}

/// 基于 `rand` 的默认采样器
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    /// 使用系统熵创建
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 使用固定种子创建（仅用于测试，不保证跨版本回放一致）
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeSampler for RandomSampler {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        // gen_range 在空区间上会 panic，这里保持宽松的算术语义
        min + self.rng.gen::<f32>() * (max - min)
    }
}

/// 固定比例采样器
///
/// 总是返回 `min + t * (max - min)`，用于可预测的测试和基准。
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler {
    pub t: f32,
}

impl FixedSampler {
    pub fn new(t: f32) -> Self {
        Self { t }
    }

    /// 总是返回区间下界
    pub fn min() -> Self {
        Self { t: 0.0 }
    }
}

impl RangeSampler for FixedSampler {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        min + self.t * (max - min)
    }
}
