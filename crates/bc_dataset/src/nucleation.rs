// crates/bc_dataset/src/nucleation.rs

//! 成核层推导
//!
//! 成核层是一张合成的二值场，标记加热壁面上的沸腾起始点。
//! 成核点数量由壁面温度标识查表得到（见 `bc_config::NUCLEATION_SITES`），
//! 几何部分通过 [`NucleationGeometry`] 抽象，便于替换为其他布点方案。

use ndarray::{Array2, Zip};

use bc_foundation::tensor::unsqueeze;
use bc_foundation::{BcError, BcResult, Frame, Tensor};

use crate::accessor::WindowedAccessor;

/// 加热器沿 x 方向的范围
pub const HEATER_SPAN: (f32, f32) = (-5.0, 5.0);

/// 成核种子半径
pub const SEED_RADIUS: f32 = 0.1;

/// 成核几何
pub trait NucleationGeometry: Send {
    /// 在 `[x_min, x_max]` 上生成 `count` 个种子坐标 `[x, y]`
    fn seed_sites(&self, x_min: f32, x_max: f32, count: usize) -> Vec<[f32; 2]>;

    /// 在网格上计算连续层值，种子内部为正
    fn layer(&self, x: &Frame, y: &Frame, sites: &[[f32; 2]], seed_radius: f32) -> Frame;
}

/// 沿加热线 `y = 0` 均匀布点
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaterSeeding;

impl NucleationGeometry for HeaterSeeding {
    fn seed_sites(&self, x_min: f32, x_max: f32, count: usize) -> Vec<[f32; 2]> {
        if count == 0 {
            return Vec::new();
        }
        let pitch = (x_max - x_min) / count as f32;
        (0..count)
            .map(|i| [x_min + (i as f32 + 0.5) * pitch, 0.0])
            .collect()
    }

    fn layer(&self, x: &Frame, y: &Frame, sites: &[[f32; 2]], seed_radius: f32) -> Frame {
        Zip::from(x).and(y).map_collect(|&px, &py| {
            sites
                .iter()
                .map(|&[sx, sy]| seed_radius - ((px - sx).powi(2) + (py - sy).powi(2)).sqrt())
                .fold(f32::NEG_INFINITY, f32::max)
        })
    }
}

/// 成核层推导器
pub struct NucleationDeriver {
    geometry: Box<dyn NucleationGeometry>,
    heater_span: (f32, f32),
    seed_radius: f32,
}

impl Default for NucleationDeriver {
    fn default() -> Self {
        Self::new(Box::new(HeaterSeeding))
    }
}

impl std::fmt::Debug for NucleationDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NucleationDeriver")
            .field("heater_span", &self.heater_span)
            .field("seed_radius", &self.seed_radius)
            .finish_non_exhaustive()
    }
}

impl NucleationDeriver {
    /// 使用自定义几何
    pub fn new(geometry: Box<dyn NucleationGeometry>) -> Self {
        Self {
            geometry,
            heater_span: HEATER_SPAN,
            seed_radius: SEED_RADIUS,
        }
    }

    /// 二值成核场：层值 `>= 0` 为 1，否则为 0
    pub fn binary_layer(&self, x: &Frame, y: &Frame, site_count: usize) -> BcResult<Frame> {
        BcError::check_shape("y", x.shape(), y.shape())?;
        let (x_min, x_max) = self.heater_span;
        let sites = self.geometry.seed_sites(x_min, x_max, site_count);
        let layer = self.geometry.layer(x, y, &sites, self.seed_radius);
        Ok(layer.mapv(|v| if v >= 0.0 { 1.0 } else { 0.0 }))
    }

    /// 从访问器推导成核层，形状 `(1, 1, H, W)`
    ///
    /// 网格取原始第 0 个时间步的坐标，与采样时间步无关。
    pub fn derive(&self, accessor: &WindowedAccessor) -> BcResult<Tensor> {
        let (x, y) = accessor.grid()?;
        let layer: Array2<f32> = self.binary_layer(&x, &y, accessor.params().nucleation_sites)?;
        Ok(unsqueeze(unsqueeze(layer.into_dyn())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    fn grid(h: usize, w: usize, dx: f32) -> (Frame, Frame) {
        let x = Array2::from_shape_fn((h, w), |(_, j)| -5.0 + j as f32 * dx);
        let y = Array2::from_shape_fn((h, w), |(i, _)| i as f32 * dx);
        (x, y)
    }

    #[test]
    fn test_seed_sites_evenly_spaced() {
        let sites = HeaterSeeding.seed_sites(-5.0, 5.0, 4);
        assert_eq!(sites.len(), 4);
        assert_abs_diff_eq!(sites[0][0], -3.75);
        assert_abs_diff_eq!(sites[3][0], 3.75);
        assert!(sites.iter().all(|s| s[1] == 0.0));
        assert!(HeaterSeeding.seed_sites(-5.0, 5.0, 0).is_empty());
    }

    #[test]
    fn test_layer_positive_inside_seed() {
        let x = Array2::from_elem((1, 2), 1.0f32);
        let y = Array2::from_shape_vec((1, 2), vec![0.05, 0.5]).unwrap();
        let layer = HeaterSeeding.layer(&x, &y, &[[1.0, 0.0]], 0.1);
        assert_abs_diff_eq!(layer[[0, 0]], 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(layer[[0, 1]], -0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_sites_all_zero() {
        let (x, y) = grid(4, 101, 0.1);
        let layer = NucleationDeriver::default().binary_layer(&x, &y, 0).unwrap();
        assert!(layer.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_binary_layer_marks_sites() {
        // 10 个点: x = -4.5, -3.5, ..., 4.5，网格间距 0.05 覆盖每个种子中心
        let (x, y) = grid(3, 201, 0.05);
        let layer = NucleationDeriver::default().binary_layer(&x, &y, 10).unwrap();
        assert!(layer.iter().all(|&v| v == 0.0 || v == 1.0));

        let marked_bottom = layer.row(0).iter().filter(|&&v| v == 1.0).count();
        // 每个种子覆盖 [c - 0.1, c + 0.1] 内的 3 到 5 个网格点
        assert!((30..=50).contains(&marked_bottom), "marked = {marked_bottom}");
        // 第 2 行 y = 0.1 恰在半径上
        let marked_top = layer.row(2).iter().filter(|&&v| v == 1.0).count();
        assert!(marked_top < marked_bottom);
    }

    #[test]
    fn test_shape_mismatch() {
        let x = Array2::zeros((2, 3));
        let y = Array2::zeros((3, 2));
        assert!(NucleationDeriver::default().binary_layer(&x, &y, 1).is_err());
    }
}
