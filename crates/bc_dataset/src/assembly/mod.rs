// crates/bc_dataset/src/assembly/mod.rs

//! 样本组装策略
//!
//! 每个 [`SampleVariant`] 对应一个无状态的组装函数，全部基于
//! [`WindowedAccessor`] 的提取原语实现。张量顺序固定，与训练端约定一致。
//!
//! | 变体 | 输入通道 | 输出通道 |
//! |---|---|---|
//! | `temp_input` | coords? + 3·tw + 2·fw | fw |
//! | `vel_input` | 3·tw | 2·fw |
//! | `vel_coord_input` | coords? + 3·tw | 2·fw |
//! | `vel_dfun` | 3·tw + 1 | 3·fw |
//! | `temp_vel` | coords? + 4·tw | 3·fw |
//!
//! coords? 在启用坐标时为 2，否则为 0。坐标张量总是随样本返回，
//! `use_coords` 只影响通道计数。

pub mod temp_input;
pub mod temp_vel;
pub mod vel_coord;
pub mod vel_dfun;
pub mod vel_input;

use serde::Serialize;

use bc_config::{SampleVariant, WindowConfig};
use bc_foundation::{BcResult, Tensor};

use crate::accessor::WindowedAccessor;
use crate::nucleation::NucleationDeriver;

/// 坐标通道数
pub const COORD_CHANNELS: usize = 2;

/// 通道布局
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelLayout {
    /// 模型输入通道数
    pub in_channels: usize,
    /// 模型输出通道数
    pub out_channels: usize,
}

impl ChannelLayout {
    /// 由变体与窗口配置计算通道布局
    pub fn for_variant(variant: SampleVariant, window: &WindowConfig, use_coords: bool) -> Self {
        let tw = window.time_window;
        let fw = window.future_window;
        let coords = if use_coords { COORD_CHANNELS } else { 0 };

        let (in_channels, out_channels) = match variant {
            SampleVariant::TempInput => (coords + 3 * tw + 2 * fw, fw),
            SampleVariant::VelInput => (3 * tw, 2 * fw),
            SampleVariant::VelCoordInput => (coords + 3 * tw, 2 * fw),
            SampleVariant::VelDfun => (3 * tw + 1, 3 * fw),
            SampleVariant::TempVel => (coords + 4 * tw, 3 * fw),
        };

        Self {
            in_channels,
            out_channels,
        }
    }
}

/// 一个组装完成的样本
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    /// `(coords, temps, vel, label)`
    TempInput {
        /// 坐标 `(2, H, W)`，不参与翻转
        coords: Tensor,
        /// 输入温度 `(tw, H, W)`
        temps: Tensor,
        /// 过去与未来速度 `(2(tw + fw), H, W)`
        vel: Tensor,
        /// 温度标签 `(fw, H, W)`
        label: Tensor,
    },
    /// `(vel, dfun, label)`
    VelInput {
        /// 输入速度 `(1, 2tw, H, W)`
        vel: Tensor,
        /// 输入相指示 `(1, tw, H, W)`
        dfun: Tensor,
        /// 速度标签 `(1, 2fw, H, W)`
        label: Tensor,
    },
    /// `(coords, vel, dfun, label)`
    VelCoordInput {
        /// 坐标 `(1, 2, H, W)`
        coords: Tensor,
        /// 输入速度 `(1, 2tw, H, W)`
        vel: Tensor,
        /// 输入相指示 `(1, tw, H, W)`
        dfun: Tensor,
        /// 速度标签 `(1, 2fw, H, W)`
        label: Tensor,
    },
    /// `(vel, dfun, nucleation, vel_label, dfun_label)`
    VelDfun {
        /// 输入速度 `(1, 2tw, H, W)`
        vel: Tensor,
        /// 输入相指示 `(1, tw, H, W)`
        dfun: Tensor,
        /// 成核层 `(1, 1, H, W)`，不参与翻转
        nucleation: Tensor,
        /// 速度标签 `(1, 2fw, H, W)`
        vel_label: Tensor,
        /// 相指示标签 `(1, fw, H, W)`
        dfun_label: Tensor,
    },
    /// `(coords, temp, vel, dfun, temp_label, vel_label)`，首轴为推进步
    TempVel {
        /// 坐标 `(N, 2, H, W)`
        coords: Tensor,
        /// 输入温度 `(N, tw, H, W)`
        temp: Tensor,
        /// 输入速度 `(N, 2tw, H, W)`
        vel: Tensor,
        /// 输入相指示 `(N, tw, H, W)`
        dfun: Tensor,
        /// 温度标签 `(N, fw, H, W)`
        temp_label: Tensor,
        /// 速度标签 `(N, 2fw, H, W)`
        vel_label: Tensor,
    },
}

impl Sample {
    /// 样本所属变体
    pub fn variant(&self) -> SampleVariant {
        match self {
            Self::TempInput { .. } => SampleVariant::TempInput,
            Self::VelInput { .. } => SampleVariant::VelInput,
            Self::VelCoordInput { .. } => SampleVariant::VelCoordInput,
            Self::VelDfun { .. } => SampleVariant::VelDfun,
            Self::TempVel { .. } => SampleVariant::TempVel,
        }
    }

    /// 按固定顺序借出全部张量
    pub fn tensors(&self) -> Vec<&Tensor> {
        match self {
            Self::TempInput { coords, temps, vel, label } => vec![coords, temps, vel, label],
            Self::VelInput { vel, dfun, label } => vec![vel, dfun, label],
            Self::VelCoordInput { coords, vel, dfun, label } => vec![coords, vel, dfun, label],
            Self::VelDfun { vel, dfun, nucleation, vel_label, dfun_label } => {
                vec![vel, dfun, nucleation, vel_label, dfun_label]
            }
            Self::TempVel { coords, temp, vel, dfun, temp_label, vel_label } => {
                vec![coords, temp, vel, dfun, temp_label, vel_label]
            }
        }
    }

    /// 按固定顺序取出全部张量
    pub fn into_tensors(self) -> Vec<Tensor> {
        match self {
            Self::TempInput { coords, temps, vel, label } => vec![coords, temps, vel, label],
            Self::VelInput { vel, dfun, label } => vec![vel, dfun, label],
            Self::VelCoordInput { coords, vel, dfun, label } => vec![coords, vel, dfun, label],
            Self::VelDfun { vel, dfun, nucleation, vel_label, dfun_label } => {
                vec![vel, dfun, nucleation, vel_label, dfun_label]
            }
            Self::TempVel { coords, temp, vel, dfun, temp_label, vel_label } => {
                vec![coords, temp, vel, dfun, temp_label, vel_label]
            }
        }
    }

    /// 全部张量的形状
    pub fn shapes(&self) -> Vec<Vec<usize>> {
        self.tensors().iter().map(|t| t.shape().to_vec()).collect()
    }
}

/// 按变体组装逻辑时间步 `timestep` 处的样本
///
/// 调用方负责保证 `timestep < accessor.len()`。
pub fn assemble(
    accessor: &mut WindowedAccessor,
    variant: SampleVariant,
    deriver: &NucleationDeriver,
    timestep: usize,
) -> BcResult<Sample> {
    match variant {
        SampleVariant::TempInput => temp_input::assemble(accessor, timestep),
        SampleVariant::VelInput => vel_input::assemble(accessor, timestep),
        SampleVariant::VelCoordInput => vel_coord::assemble(accessor, timestep),
        SampleVariant::VelDfun => vel_dfun::assemble(accessor, deriver, timestep),
        SampleVariant::TempVel => temp_vel::assemble(accessor, timestep),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_layouts() {
        let w = WindowConfig::new(0, 3, 2, 1).unwrap();
        let layout = |v, c| ChannelLayout::for_variant(v, &w, c);

        assert_eq!(layout(SampleVariant::TempInput, false).in_channels, 13);
        assert_eq!(layout(SampleVariant::TempInput, true).in_channels, 15);
        assert_eq!(layout(SampleVariant::TempInput, true).out_channels, 2);
        assert_eq!(layout(SampleVariant::VelInput, true).in_channels, 9);
        assert_eq!(layout(SampleVariant::VelInput, false).out_channels, 4);
        assert_eq!(layout(SampleVariant::VelCoordInput, true).in_channels, 11);
        assert_eq!(layout(SampleVariant::VelDfun, true).in_channels, 10);
        assert_eq!(layout(SampleVariant::VelDfun, false).out_channels, 6);
        assert_eq!(layout(SampleVariant::TempVel, true).in_channels, 14);
        assert_eq!(layout(SampleVariant::TempVel, false).out_channels, 6);
    }

    #[test]
    fn test_tensor_order_is_fixed() {
        let t = |v: f32| Tensor::from_elem(vec![1], v);
        let sample = Sample::TempInput {
            coords: t(0.0),
            temps: t(1.0),
            vel: t(2.0),
            label: t(3.0),
        };
        let values: Vec<f32> = sample.tensors().iter().map(|x| x.sum()).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(sample.variant(), SampleVariant::TempInput);

        let sample = Sample::TempVel {
            coords: t(0.0),
            temp: t(1.0),
            vel: t(2.0),
            dfun: t(3.0),
            temp_label: t(4.0),
            vel_label: t(5.0),
        };
        let values: Vec<f32> = sample.into_tensors().iter().map(|x| x.sum()).collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
