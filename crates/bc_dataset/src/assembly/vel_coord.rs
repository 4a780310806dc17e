// crates/bc_dataset/src/assembly/vel_coord.rs

//! 带坐标通道的速度预测样本

use bc_foundation::tensor::unsqueeze;
use bc_foundation::BcResult;

use super::Sample;
use crate::accessor::WindowedAccessor;

/// 组装 `(coords, vel, dfun, label)`
///
/// 与 [`vel_input`](super::vel_input) 不同，坐标与其余张量一起翻转。
pub fn assemble(accessor: &mut WindowedAccessor, timestep: usize) -> BcResult<Sample> {
    let window = *accessor.window();

    let mut coords = unsqueeze(accessor.coordinates(timestep)?.into_dyn());
    let mut vel = unsqueeze(accessor.velocity_window(timestep, window.time_window)?.into_dyn());
    let mut label = unsqueeze(
        accessor
            .velocity_window(window.base_time(timestep), window.future_window)?
            .into_dyn(),
    );
    let mut dfun = unsqueeze(accessor.phase_window(timestep, window.time_window)?.into_dyn());

    accessor.augment(&mut [&mut coords, &mut vel, &mut dfun, &mut label]);

    Ok(Sample::VelCoordInput {
        coords,
        vel,
        dfun,
        label,
    })
}
