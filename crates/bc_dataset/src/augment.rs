// crates/bc_dataset/src/augment.rs

//! 同步随机水平翻转
//!
//! 每次调用只抛一次硬币，传入的所有张量要么全部翻转，要么全部不变，
//! 保证同一样本内各物理场的空间对应关系不被破坏。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use bc_foundation::tensor::hflip;
use bc_foundation::Tensor;

/// 翻转概率为 0.5 的增强器，持有自己的随机数源
#[derive(Debug, Clone)]
pub struct FlipAugmenter {
    enabled: bool,
    rng: StdRng,
}

impl FlipAugmenter {
    /// 创建增强器
    ///
    /// `seed` 为 `None` 时从系统熵初始化，结果不可复现。
    pub fn new(enabled: bool, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { enabled, rng }
    }

    /// 是否启用
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// 抽取一次翻转决定；未启用时不消耗随机数
    pub fn draw(&mut self) -> bool {
        self.enabled && self.rng.gen::<f64>() > 0.5
    }

    /// 对一组张量施加同一个随机决定，返回是否翻转
    pub fn apply(&mut self, tensors: &mut [&mut Tensor]) -> bool {
        let flip = self.draw();
        Self::apply_decision(tensors, flip);
        trace!(flip, count = tensors.len(), "shared augmentation");
        flip
    }

    /// 按给定决定翻转全部张量
    pub fn apply_decision(tensors: &mut [&mut Tensor], flip: bool) {
        if flip {
            for tensor in tensors.iter_mut() {
                hflip(tensor);
            }
        }
    }
}
