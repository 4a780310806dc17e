// crates/bc_foundation/src/tensor.rs

//! 样本张量别名与通道操作
//!
//! 所有样本张量均为通道优先 (channel-first) 布局：
//! 单帧 `(H, W)`，窗口 `(C, H, W)`，带批/推进轴时再在前面增加维度。
//! 宽度轴恒为最后一维，水平翻转沿该轴进行。

use ndarray::{Array2, Array3, ArrayD, ArrayView2, ArrayView3, ArrayViewD, Axis};

use crate::error::{BcError, BcResult};

/// 单个时间步的二维场 `(H, W)`
pub type Frame = Array2<f32>;

/// 任意维度的样本张量
pub type Tensor = ArrayD<f32>;

/// 沿新的第 0 轴堆叠若干帧: `n × (H, W) -> (n, H, W)`
pub fn stack_frames(frames: &[Frame]) -> BcResult<Array3<f32>> {
    if frames.is_empty() {
        return Err(BcError::shape_mismatch("stack_frames", &[1], &[0]));
    }
    let views: Vec<ArrayView2<'_, f32>> = frames.iter().map(|f| f.view()).collect();
    Ok(ndarray::stack(Axis(0), &views)?)
}

/// 沿通道轴拼接: `[(c1, H, W), (c2, H, W)] -> (c1 + c2, H, W)`
pub fn concat_channels(stacks: &[Array3<f32>]) -> BcResult<Array3<f32>> {
    if stacks.is_empty() {
        return Err(BcError::shape_mismatch("concat_channels", &[1], &[0]));
    }
    let views: Vec<ArrayView3<'_, f32>> = stacks.iter().map(|s| s.view()).collect();
    Ok(ndarray::concatenate(Axis(0), &views)?)
}

/// 沿新的第 0 轴堆叠同形状张量 (推进轴)
pub fn stack_tensors(tensors: &[Tensor]) -> BcResult<Tensor> {
    if tensors.is_empty() {
        return Err(BcError::shape_mismatch("stack_tensors", &[1], &[0]));
    }
    let views: Vec<ArrayViewD<'_, f32>> = tensors.iter().map(|t| t.view()).collect();
    Ok(ndarray::stack(Axis(0), &views)?)
}

/// 在最前面插入长度为 1 的轴
pub fn unsqueeze(tensor: Tensor) -> Tensor {
    tensor.insert_axis(Axis(0))
}

/// 沿宽度轴（最后一维）水平镜像
///
/// 结果总是标准 (C 连续) 布局，翻转两次得到原张量。
pub fn hflip(tensor: &mut Tensor) {
    if tensor.ndim() == 0 {
        return;
    }
    let width = Axis(tensor.ndim() - 1);
    tensor.invert_axis(width);
    *tensor = tensor.as_standard_layout().into_owned();
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};

    #[test]
    fn test_stack_frames_shape() {
        let frames = vec![Frame::zeros((3, 4)), Frame::ones((3, 4))];
        let stacked = stack_frames(&frames).unwrap();
        assert_eq!(stacked.shape(), &[2, 3, 4]);
        assert_eq!(stacked[[1, 2, 3]], 1.0);
    }

    #[test]
    fn test_stack_frames_rejects_empty() {
        assert!(stack_frames(&[]).is_err());
    }

    #[test]
    fn test_concat_channels_order() {
        let a = Array3::from_elem((2, 2, 2), 1.0f32);
        let b = Array3::from_elem((1, 2, 2), 2.0f32);
        let c = concat_channels(&[a, b]).unwrap();
        assert_eq!(c.shape(), &[3, 2, 2]);
        assert_eq!(c[[0, 0, 0]], 1.0);
        assert_eq!(c[[2, 1, 1]], 2.0);
    }

    #[test]
    fn test_hflip_mirrors_last_axis() {
        let mut t = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();
        hflip(&mut t);
        assert_eq!(t, array![[3.0f32, 2.0, 1.0], [6.0, 5.0, 4.0]].into_dyn());
        assert!(t.is_standard_layout());
    }

    #[test]
    fn test_hflip_twice_is_identity() {
        let original = Array::from_shape_fn((2, 3, 4, 5), |(a, b, c, d)| {
            (a * 1000 + b * 100 + c * 10 + d) as f32
        })
        .into_dyn();
        let mut t = original.clone();
        hflip(&mut t);
        assert_ne!(t, original);
        hflip(&mut t);
        assert_eq!(t, original);
    }

    #[test]
    fn test_unsqueeze() {
        let t = Tensor::zeros(vec![3, 4]);
        assert_eq!(unsqueeze(t).shape(), &[1, 3, 4]);
    }
}
