// crates/bc_io/src/store.rs

//! 时间序列归档抽象接口
//!
//! 归档按场名存储逐时间步的二维数组，时间为第一维。
//! 同一归档内所有场共享相同的帧形状和时间步总数。
//! 实现只负责读取，不做额外缓冲。

use ndarray::{Array3, ArrayD, Axis, Ix2, Ix3};

use bc_foundation::{BcError, BcResult, Field, Frame};

/// 只读时间序列归档
pub trait TimeSeriesStore: Send {
    /// 归档名称（用于日志）
    fn name(&self) -> &str;

    /// 场的时间步总数
    fn len(&self, field: Field) -> BcResult<usize>;

    /// 场的单帧形状 `[H, W]`
    fn frame_shape(&self, field: Field) -> BcResult<[usize; 2]>;

    /// 读取单个时间步
    ///
    /// # 错误
    ///
    /// - 场不存在: [`BcError::FieldNotFound`]
    /// - 时间步越界: [`BcError::IndexOutOfBounds`]
    fn at(&self, field: Field, timestep: usize) -> BcResult<Frame>;

    /// 读取 `from` 到末尾的全部时间步 `(T - from, H, W)`，仅用于归约
    fn tail(&self, field: Field, from: usize) -> BcResult<Array3<f32>>;

    /// 是否包含该场
    fn contains(&self, field: Field) -> bool {
        self.len(field).is_ok()
    }
}

impl<S: TimeSeriesStore + ?Sized> TimeSeriesStore for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn len(&self, field: Field) -> BcResult<usize> {
        (**self).len(field)
    }

    fn frame_shape(&self, field: Field) -> BcResult<[usize; 2]> {
        (**self).frame_shape(field)
    }

    fn at(&self, field: Field, timestep: usize) -> BcResult<Frame> {
        (**self).at(field, timestep)
    }

    fn tail(&self, field: Field, from: usize) -> BcResult<Array3<f32>> {
        (**self).tail(field, from)
    }
}

/// 将单帧数据规整为 `(H, W)`
///
/// 接受 `(H, W)` 或带尾部单例轴的 `(H, W, 1)`。
pub fn frame_from_dyn(field: Field, data: ArrayD<f32>) -> BcResult<Frame> {
    let data = squeeze_trailing(data, 2);
    let shape = data.shape().to_vec();
    data.into_dimensionality::<Ix2>()
        .map_err(|_| BcError::shape_mismatch(field.as_str(), &[0, 0], &shape))
}

/// 将整段数据规整为 `(T, H, W)`
///
/// 接受 `(T, H, W)` 或 `(T, H, W, 1)`。
pub fn series_from_dyn(field: Field, data: ArrayD<f32>) -> BcResult<Array3<f32>> {
    let data = squeeze_trailing(data, 3);
    let shape = data.shape().to_vec();
    data.into_dimensionality::<Ix3>()
        .map_err(|_| BcError::shape_mismatch(field.as_str(), &[0, 0, 0], &shape))
}

fn squeeze_trailing(data: ArrayD<f32>, target_ndim: usize) -> ArrayD<f32> {
    if data.ndim() == target_ndim + 1 && data.shape()[target_ndim] == 1 {
        data.index_axis_move(Axis(target_ndim), 0)
    } else {
        data
    }
}
