// crates/bc_dataset/src/assembly/vel_input.rs

//! 速度预测样本

use bc_foundation::tensor::unsqueeze;
use bc_foundation::BcResult;

use super::Sample;
use crate::accessor::WindowedAccessor;

/// 组装 `(vel, dfun, label)`，每个张量带一个前置单例轴
pub fn assemble(accessor: &mut WindowedAccessor, timestep: usize) -> BcResult<Sample> {
    let window = *accessor.window();

    let mut vel = unsqueeze(accessor.velocity_window(timestep, window.time_window)?.into_dyn());
    let mut label = unsqueeze(
        accessor
            .velocity_window(window.base_time(timestep), window.future_window)?
            .into_dyn(),
    );
    let mut dfun = unsqueeze(accessor.phase_window(timestep, window.time_window)?.into_dyn());

    accessor.augment(&mut [&mut vel, &mut dfun, &mut label]);

    Ok(Sample::VelInput { vel, dfun, label })
}
