// crates/bc_dataset/src/assembly/temp_input.rs

//! 温度预测样本：速度视为已知输入

use bc_foundation::BcResult;

use super::Sample;
use crate::accessor::WindowedAccessor;

/// 组装 `(coords, temps, vel, label)`
///
/// 速度覆盖 `time_window + future_window` 个时间步，未来段作为已知驱动量。
/// 坐标在翻转之外提取，始终保持原始方向。
pub fn assemble(accessor: &mut WindowedAccessor, timestep: usize) -> BcResult<Sample> {
    let window = *accessor.window();

    let coords = accessor.coordinates(timestep)?.into_dyn();
    let mut temps = accessor
        .temperature_window(timestep, window.time_window)?
        .into_dyn();
    let mut vel = accessor
        .velocity_window(timestep, window.time_window + window.future_window)?
        .into_dyn();
    let mut label = accessor
        .temperature_window(window.base_time(timestep), window.future_window)?
        .into_dyn();

    accessor.augment(&mut [&mut temps, &mut vel, &mut label]);

    Ok(Sample::TempInput {
        coords,
        temps,
        vel,
        label,
    })
}
