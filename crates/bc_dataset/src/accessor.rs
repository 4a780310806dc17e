// crates/bc_dataset/src/accessor.rs

//! 窗口化样本访问核心
//!
//! `WindowedAccessor` 独占一个只读归档，负责：
//!
//! - 逻辑样本索引到原始时间步的换算（跳过 `steady_time` 瞬态）
//! - 温度/速度的还原量纲与归一化
//! - 坐标、相指示场的提取
//! - 同步随机翻转
//!
//! 温度与速度尺度必须在任何提取之前设置，通常由
//! [`fit_scales`](crate::normalization::fit_scales) 在全部归档上拟合得到。
//!
//! # 单帧变换
//!
//! | 提取 | 公式 |
//! |---|---|
//! | 温度 | `2 · (T · wall_temp) / temp_scale - 1` |
//! | 速度 | `(u, v) / vel_scale` |
//! | 坐标 | `(x / max x, y / max y)`，各轴独立 |
//! | 相指示 | `(dfun > 0) - 0.5`，即 ±0.5 |

use std::path::Path;

use ndarray::Array3;
use tracing::{debug, info, warn};

use bc_config::{SimulationParams, WindowConfig};
use bc_foundation::tensor::{concat_channels, stack_frames};
use bc_foundation::{BcError, BcResult, Field, Frame, Tensor};
use bc_io::{open_store, TimeSeriesStore};

use crate::augment::FlipAugmenter;

/// 访问器构造选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessorOptions {
    /// 时间窗口
    pub window: WindowConfig,
    /// 是否启用随机翻转
    pub transform: bool,
    /// 是否包含坐标通道
    pub use_coords: bool,
    /// 翻转随机数种子
    pub seed: Option<u64>,
}

impl AccessorOptions {
    /// 以窗口配置创建，其余取默认
    pub fn new(window: WindowConfig) -> Self {
        Self {
            window,
            ..Default::default()
        }
    }

    /// 设置是否翻转
    pub fn with_transform(mut self, transform: bool) -> Self {
        self.transform = transform;
        self
    }

    /// 设置是否包含坐标
    pub fn with_coords(mut self, use_coords: bool) -> Self {
        self.use_coords = use_coords;
        self
    }

    /// 设置随机数种子
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// 单个归档上的窗口化访问器
pub struct WindowedAccessor {
    store: Box<dyn TimeSeriesStore>,
    window: WindowConfig,
    params: SimulationParams,
    use_coords: bool,
    raw_total: usize,
    temp_scale: Option<f32>,
    vel_scale: Option<f32>,
    augmenter: FlipAugmenter,
}

impl std::fmt::Debug for WindowedAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowedAccessor")
            .field("store", &self.store.name())
            .field("window", &self.window)
            .field("params", &self.params)
            .field("raw_total", &self.raw_total)
            .field("temp_scale", &self.temp_scale)
            .field("vel_scale", &self.vel_scale)
            .finish_non_exhaustive()
    }
}

impl WindowedAccessor {
    /// 由已打开的归档与边界参数构造
    ///
    /// # 错误
    ///
    /// - 窗口配置无效（如 `time_window == 0`）
    /// - 归档中没有任何可确定时间步数的场
    pub fn new(
        store: Box<dyn TimeSeriesStore>,
        params: SimulationParams,
        options: AccessorOptions,
    ) -> BcResult<Self> {
        options.window.validate()?;

        let raw_total = [Field::Temperature, Field::VelX, Field::Dfun]
            .into_iter()
            .find_map(|field| store.len(field).ok())
            .ok_or_else(|| BcError::field_not_found(format!("{} 中的 temperature/velx/dfun", store.name())))?;

        let accessor = Self {
            store,
            window: options.window,
            params,
            use_coords: options.use_coords,
            raw_total,
            temp_scale: None,
            vel_scale: None,
            augmenter: FlipAugmenter::new(options.transform, options.seed),
        };

        info!(
            "Opened archive {}: {} raw timesteps, {} samples, wall temperature {}",
            accessor.store.name(),
            raw_total,
            accessor.len(),
            accessor.params.wall_temperature
        );
        if accessor.is_empty() {
            warn!(
                "Archive {} yields no samples for {:?}",
                accessor.store.name(),
                accessor.window
            );
        }

        Ok(accessor)
    }

    /// 按路径打开归档，文件名在此处一次性解析为 [`SimulationParams`]
    pub fn open(path: &Path, options: AccessorOptions) -> BcResult<Self> {
        options.window.validate()?;
        let params = SimulationParams::from_path(path)?;
        let store = open_store(path)?;
        Self::new(store, params, options)
    }

    // ========================================================================
    // 元数据
    // ========================================================================

    /// 有效样本数
    pub fn len(&self) -> usize {
        self.window.sample_count(self.raw_total)
    }

    /// 是否没有有效样本
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 归档原始时间步总数
    pub fn raw_len(&self) -> usize {
        self.raw_total
    }

    /// 温度场单帧形状
    pub fn datum_shape(&self) -> BcResult<[usize; 2]> {
        self.store.frame_shape(Field::Temperature)
    }

    /// 归档名称
    pub fn name(&self) -> &str {
        self.store.name()
    }

    /// 窗口配置
    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    /// 归档是否包含某个场
    pub fn has_field(&self, field: Field) -> bool {
        self.store.contains(field)
    }

    /// 模拟参数
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// 是否包含坐标通道
    pub fn use_coords(&self) -> bool {
        self.use_coords
    }

    /// 是否启用翻转
    pub fn transform(&self) -> bool {
        self.augmenter.is_enabled()
    }

    // ========================================================================
    // 归一化
    // ========================================================================

    /// 稳态段内 `|T · wall_temp|` 的最大值
    pub fn abs_max_temperature(&self) -> BcResult<f32> {
        let wall = self.params.wall_temperature;
        let data = self.store.tail(Field::Temperature, self.window.steady_time)?;
        Ok(data.iter().fold(0.0f32, |m, &v| m.max((v * wall).abs())))
    }

    /// 稳态段内 `max(max|u|, max|v|)`
    ///
    /// 两个分量分别取最大值，而不是速度模长。
    pub fn abs_max_velocity(&self) -> BcResult<f32> {
        let from = self.window.steady_time;
        let abs_max = |field| -> BcResult<f32> {
            let data = self.store.tail(field, from)?;
            Ok(data.iter().fold(0.0f32, |m, &v| m.max(v.abs())))
        };
        Ok(abs_max(Field::VelX)?.max(abs_max(Field::VelY)?))
    }

    /// 设置温度尺度
    pub fn set_temperature_scale(&mut self, scale: f32) {
        debug!("{}: temperature scale = {}", self.store.name(), scale);
        self.temp_scale = Some(scale);
    }

    /// 设置速度尺度
    pub fn set_velocity_scale(&mut self, scale: f32) {
        debug!("{}: velocity scale = {}", self.store.name(), scale);
        self.vel_scale = Some(scale);
    }

    /// 当前温度尺度
    pub fn temperature_scale(&self) -> Option<f32> {
        self.temp_scale
    }

    /// 当前速度尺度
    pub fn velocity_scale(&self) -> Option<f32> {
        self.vel_scale
    }

    /// y 方向网格间距，取首个采样时间步 y 坐标的前两行之差
    pub fn grid_spacing_y(&self) -> BcResult<f32> {
        let y = self.store.at(Field::Y, self.window.steady_time)?;
        if y.nrows() < 2 {
            return Err(BcError::shape_mismatch("y", &[2, y.ncols()], y.shape()));
        }
        Ok(y[[1, 0]] - y[[0, 0]])
    }

    // ========================================================================
    // 单帧提取（逻辑时间步）
    // ========================================================================

    /// 归一化温度，映射到 [-1, 1]
    pub fn temperature(&self, timestep: usize) -> BcResult<Frame> {
        let scale = self.temp_scale.ok_or(BcError::scale_not_set("temperature"))?;
        let wall = self.params.wall_temperature;
        let raw = self.store.at(Field::Temperature, self.window.raw_offset(timestep))?;
        Ok(raw.mapv(|t| 2.0 * (t * wall) / scale - 1.0))
    }

    /// 归一化速度 `(2, H, W)`，通道顺序 (u, v)
    pub fn velocity(&self, timestep: usize) -> BcResult<Array3<f32>> {
        let scale = self.vel_scale.ok_or(BcError::scale_not_set("velocity"))?;
        let raw = self.window.raw_offset(timestep);
        let u = self.store.at(Field::VelX, raw)? / scale;
        let v = self.store.at(Field::VelY, raw)? / scale;
        stack_frames(&[u, v])
    }

    /// 归一化坐标 `(2, H, W)`，各轴除以自身最大值
    pub fn coordinates(&self, timestep: usize) -> BcResult<Array3<f32>> {
        let raw = self.window.raw_offset(timestep);
        let x = normalize_by_max(self.store.at(Field::X, raw)?);
        let y = normalize_by_max(self.store.at(Field::Y, raw)?);
        stack_frames(&[x, y])
    }

    /// 相指示场：汽相 0.5，液相 -0.5
    pub fn phase_indicator(&self, timestep: usize) -> BcResult<Frame> {
        let dfun = self.store.at(Field::Dfun, self.window.raw_offset(timestep))?;
        Ok(dfun.mapv(|d| if d > 0.0 { 0.5 } else { -0.5 }))
    }

    // ========================================================================
    // 窗口提取
    // ========================================================================

    /// `start..start + count` 的温度帧 `(count, H, W)`
    pub fn temperature_window(&self, start: usize, count: usize) -> BcResult<Array3<f32>> {
        let frames = (start..start + count)
            .map(|t| self.temperature(t))
            .collect::<BcResult<Vec<_>>>()?;
        stack_frames(&frames)
    }

    /// `start..start + count` 的速度 `(2·count, H, W)`，通道 `u0, v0, u1, v1, ...`
    pub fn velocity_window(&self, start: usize, count: usize) -> BcResult<Array3<f32>> {
        let stacks = (start..start + count)
            .map(|t| self.velocity(t))
            .collect::<BcResult<Vec<_>>>()?;
        concat_channels(&stacks)
    }

    /// `start..start + count` 的相指示帧 `(count, H, W)`
    pub fn phase_window(&self, start: usize, count: usize) -> BcResult<Array3<f32>> {
        let frames = (start..start + count)
            .map(|t| self.phase_indicator(t))
            .collect::<BcResult<Vec<_>>>()?;
        stack_frames(&frames)
    }

    // ========================================================================
    // 原始数据
    // ========================================================================

    /// 原始第 0 个时间步的网格坐标 `(x, y)`，不做归一化
    pub fn grid(&self) -> BcResult<(Frame, Frame)> {
        Ok((self.store.at(Field::X, 0)?, self.store.at(Field::Y, 0)?))
    }

    /// 首个输入窗口之后的原始水平集 `dfun[steady_time + time_window..]`
    pub fn level_set_history(&self) -> BcResult<Array3<f32>> {
        self.store.tail(
            Field::Dfun,
            self.window.raw_offset(self.window.time_window),
        )
    }

    // ========================================================================
    // 增强
    // ========================================================================

    /// 对一组张量施加同一次随机翻转决定
    pub fn augment(&mut self, tensors: &mut [&mut Tensor]) -> bool {
        self.augmenter.apply(tensors)
    }
}

fn normalize_by_max(frame: Frame) -> Frame {
    let max = frame.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    frame / max
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bc_io::MemoryStore;
    use ndarray::Array3;

    const T: usize = 10;
    const H: usize = 3;
    const W: usize = 4;

    fn store() -> MemoryStore {
        let temp = Array3::from_shape_fn((T, H, W), |(t, _, _)| t as f32 * 0.1);
        let velx = Array3::from_shape_fn((T, H, W), |(t, _, j)| t as f32 + j as f32);
        let vely = Array3::from_shape_fn((T, H, W), |(t, _, _)| -(t as f32) * 2.0);
        let dfun = Array3::from_shape_fn((T, H, W), |(_, _, j)| j as f32 - 1.5);
        let x = Array3::from_shape_fn((T, H, W), |(_, _, j)| 0.5 + j as f32);
        let y = Array3::from_shape_fn((T, H, W), |(_, i, _)| 0.25 + 0.5 * i as f32);
        MemoryStore::new("unit")
            .with_field(Field::Temperature, temp)
            .and_then(|s| s.with_field(Field::VelX, velx))
            .and_then(|s| s.with_field(Field::VelY, vely))
            .and_then(|s| s.with_field(Field::Dfun, dfun))
            .and_then(|s| s.with_field(Field::X, x))
            .and_then(|s| s.with_field(Field::Y, y))
            .unwrap()
    }

    fn accessor(params: SimulationParams, steady_time: usize) -> WindowedAccessor {
        let window = WindowConfig::new(steady_time, 2, 1, 1).unwrap();
        WindowedAccessor::new(Box::new(store()), params, AccessorOptions::new(window)).unwrap()
    }

    #[test]
    fn test_len_and_shape() {
        let acc = accessor(SimulationParams::default(), 0);
        assert_eq!(acc.len(), 8);
        assert_eq!(acc.raw_len(), 10);
        assert_eq!(acc.datum_shape().unwrap(), [H, W]);
    }

    #[test]
    fn test_rejects_zero_time_window() {
        let window = WindowConfig {
            time_window: 0,
            ..WindowConfig::default()
        };
        let result = WindowedAccessor::new(
            Box::new(store()),
            SimulationParams::default(),
            AccessorOptions::new(window),
        );
        assert!(matches!(result, Err(BcError::InvalidConfig { .. })));
    }

    #[test]
    fn test_scale_not_set() {
        let acc = accessor(SimulationParams::default(), 0);
        assert!(matches!(acc.temperature(0), Err(BcError::ScaleNotSet { field: "temperature" })));
        assert!(matches!(acc.velocity(0), Err(BcError::ScaleNotSet { field: "velocity" })));
    }

    #[test]
    fn test_temperature_redimensionalized() {
        let mut acc = accessor(SimulationParams::new(98.0, 22), 1);
        acc.set_temperature_scale(98.0);
        // 原始时间步 1+2 = 3, T = 0.3
        let frame = acc.temperature(2).unwrap();
        assert_abs_diff_eq!(frame[[0, 0]], 2.0 * 0.3 * 98.0 / 98.0 - 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_temperature_bounds() {
        let mut acc = accessor(SimulationParams::new(2.0, 0), 0);
        // 原始温度范围 [0, 0.9]，temp_scale / wall_temp = 0.9
        acc.set_temperature_scale(1.8);
        assert_abs_diff_eq!(acc.temperature(0).unwrap()[[0, 0]], -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(acc.temperature(9).unwrap()[[2, 3]], 1.0, epsilon = 1e-6);
        for t in 0..T {
            assert!(acc.temperature(t).unwrap().iter().all(|&v| (-1.0..=1.0 + 1e-6).contains(&v)));
        }
    }

    #[test]
    fn test_velocity_stack() {
        let mut acc = accessor(SimulationParams::default(), 0);
        acc.set_velocity_scale(2.0);
        let vel = acc.velocity(3).unwrap();
        assert_eq!(vel.dim(), (2, H, W));
        assert_abs_diff_eq!(vel[[0, 0, 2]], (3.0 + 2.0) / 2.0);
        assert_abs_diff_eq!(vel[[1, 1, 1]], -6.0 / 2.0);
    }

    #[test]
    fn test_velocity_window_interleaves_components() {
        let mut acc = accessor(SimulationParams::default(), 0);
        acc.set_velocity_scale(1.0);
        let vel = acc.velocity_window(2, 3).unwrap();
        assert_eq!(vel.dim(), (6, H, W));
        for k in 0..3 {
            assert_abs_diff_eq!(vel[[2 * k, 0, 0]], (2 + k) as f32);
            assert_abs_diff_eq!(vel[[2 * k + 1, 0, 0]], -2.0 * (2 + k) as f32);
        }
    }

    #[test]
    fn test_coordinates_per_axis_max() {
        let acc = accessor(SimulationParams::default(), 0);
        let coords = acc.coordinates(0).unwrap();
        assert_eq!(coords.dim(), (2, H, W));
        assert_abs_diff_eq!(coords[[0, 0, W - 1]], 1.0);
        assert_abs_diff_eq!(coords[[0, 0, 0]], 0.5 / 3.5, epsilon = 1e-6);
        assert_abs_diff_eq!(coords[[1, H - 1, 0]], 1.0);
        assert_abs_diff_eq!(coords[[1, 0, 0]], 0.25 / 1.25, epsilon = 1e-6);
    }

    #[test]
    fn test_phase_indicator() {
        let acc = accessor(SimulationParams::default(), 0);
        let phase = acc.phase_indicator(0).unwrap();
        // dfun = j - 1.5: j = 0, 1 液相; j = 2, 3 汽相
        assert_eq!(phase[[0, 0]], -0.5);
        assert_eq!(phase[[0, 1]], -0.5);
        assert_eq!(phase[[0, 2]], 0.5);
        assert_eq!(phase[[0, 3]], 0.5);
    }

    #[test]
    fn test_abs_max_reductions() {
        let acc = accessor(SimulationParams::new(10.0, 0), 4);
        // 温度 max 0.9 * 10
        assert_abs_diff_eq!(acc.abs_max_temperature().unwrap(), 9.0, epsilon = 1e-5);
        // velx max 9 + 3 = 12, |vely| max 18
        assert_abs_diff_eq!(acc.abs_max_velocity().unwrap(), 18.0);
    }

    #[test]
    fn test_grid_spacing_y() {
        let acc = accessor(SimulationParams::default(), 2);
        assert_abs_diff_eq!(acc.grid_spacing_y().unwrap(), 0.5);
    }

    #[test]
    fn test_level_set_history() {
        let acc = accessor(SimulationParams::default(), 3);
        let history = acc.level_set_history().unwrap();
        assert_eq!(history.dim(), (T - 3 - 2, H, W));
    }

    #[test]
    fn test_out_of_range_propagates() {
        let mut acc = accessor(SimulationParams::default(), 0);
        acc.set_velocity_scale(1.0);
        let err = acc.velocity(T).unwrap_err();
        assert!(err.is_range_error());
    }
}
