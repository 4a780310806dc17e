// crates/bc_dataset/src/normalization.rs

//! 跨归档尺度拟合
//!
//! 多个模拟共用一组全局尺度：温度尺度取各归档 `max |T · wall_temp|`
//! 的最大值，速度尺度取各归档 `max(max|u|, max|v|)` 的最大值。
//! 尺度必须在任何样本访问之前设置到每个访问器上。

use serde::Serialize;
use tracing::{info, warn};

use bc_foundation::{BcResult, Field};

use crate::accessor::WindowedAccessor;

/// 拟合得到的全局尺度
///
/// 只要有一个归档缺少对应的场，该尺度就为 `None`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScaleFit {
    /// 温度尺度
    pub temp_scale: Option<f32>,
    /// 速度尺度
    pub vel_scale: Option<f32>,
}

impl ScaleFit {
    /// 用显式值覆盖拟合结果
    pub fn with_overrides(self, temp_scale: Option<f32>, vel_scale: Option<f32>) -> Self {
        Self {
            temp_scale: temp_scale.or(self.temp_scale),
            vel_scale: vel_scale.or(self.vel_scale),
        }
    }

    /// 把已知尺度设置到访问器上
    pub fn apply(&self, accessor: &mut WindowedAccessor) {
        if let Some(scale) = self.temp_scale {
            accessor.set_temperature_scale(scale);
        }
        if let Some(scale) = self.vel_scale {
            accessor.set_velocity_scale(scale);
        }
    }
}

/// 在全部访问器上拟合温度与速度尺度
pub fn fit_scales(accessors: &[&WindowedAccessor]) -> BcResult<ScaleFit> {
    if accessors.is_empty() {
        return Ok(ScaleFit::default());
    }

    let temp_scale = if accessors.iter().all(|a| a.has_field(Field::Temperature)) {
        Some(max_over(accessors, WindowedAccessor::abs_max_temperature)?)
    } else {
        None
    };

    let vel_scale = if accessors
        .iter()
        .all(|a| a.has_field(Field::VelX) && a.has_field(Field::VelY))
    {
        Some(max_over(accessors, WindowedAccessor::abs_max_velocity)?)
    } else {
        None
    };

    for (name, scale) in [("temperature", temp_scale), ("velocity", vel_scale)] {
        if scale == Some(0.0) {
            warn!("Fitted {} scale is zero, normalized values will not be finite", name);
        }
    }

    info!(
        "Fitted scales over {} archives: temperature {:?}, velocity {:?}",
        accessors.len(),
        temp_scale,
        vel_scale
    );

    Ok(ScaleFit {
        temp_scale,
        vel_scale,
    })
}

fn max_over(
    accessors: &[&WindowedAccessor],
    reduce: fn(&WindowedAccessor) -> BcResult<f32>,
) -> BcResult<f32> {
    accessors
        .iter()
        .try_fold(0.0f32, |acc, a| Ok(acc.max(reduce(a)?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::AccessorOptions;
    use bc_config::{SimulationParams, WindowConfig};
    use bc_io::MemoryStore;
    use ndarray::Array3;

    fn accessor(wall: f32, peak: f32, with_temperature: bool) -> WindowedAccessor {
        let ramp = |scale: f32| Array3::from_shape_fn((6, 2, 2), |(t, _, _)| scale * t as f32 / 5.0);
        let mut store = MemoryStore::new("fit")
            .with_field(Field::VelX, ramp(peak))
            .and_then(|s| s.with_field(Field::VelY, ramp(-0.5 * peak)))
            .unwrap();
        if with_temperature {
            store.insert(Field::Temperature, ramp(1.0)).unwrap();
        }
        WindowedAccessor::new(
            Box::new(store),
            SimulationParams::new(wall, 0),
            AccessorOptions::new(WindowConfig::default()),
        )
        .unwrap()
    }

    #[test]
    fn test_fit_takes_global_maximum() {
        let a = accessor(95.0, 2.0, true);
        let b = accessor(110.0, 3.0, true);
        let fit = fit_scales(&[&a, &b]).unwrap();
        assert_eq!(fit.temp_scale, Some(110.0));
        assert_eq!(fit.vel_scale, Some(3.0));
    }

    #[test]
    fn test_fit_skips_missing_temperature() {
        let a = accessor(95.0, 2.0, true);
        let b = accessor(100.0, 1.0, false);
        let fit = fit_scales(&[&a, &b]).unwrap();
        assert!(fit.temp_scale.is_none());
        assert_eq!(fit.vel_scale, Some(2.0));
    }

    #[test]
    fn test_apply_and_overrides() {
        let mut a = accessor(1.0, 4.0, true);
        let fit = fit_scales(&[&a]).unwrap().with_overrides(None, Some(8.0));
        fit.apply(&mut a);
        assert_eq!(a.temperature_scale(), Some(1.0));
        assert_eq!(a.velocity_scale(), Some(8.0));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(fit_scales(&[]).unwrap(), ScaleFit::default());
    }
}
