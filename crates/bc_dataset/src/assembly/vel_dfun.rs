// crates/bc_dataset/src/assembly/vel_dfun.rs

//! 速度与相场联合预测样本，附加成核层输入

use bc_foundation::tensor::unsqueeze;
use bc_foundation::BcResult;

use super::Sample;
use crate::accessor::WindowedAccessor;
use crate::nucleation::NucleationDeriver;

/// 组装 `(vel, dfun, nucleation, vel_label, dfun_label)`
///
/// 成核层不参与共享翻转：其余四个张量翻转时它保持原方向。
/// 成核层每次调用都重新推导。
pub fn assemble(
    accessor: &mut WindowedAccessor,
    deriver: &NucleationDeriver,
    timestep: usize,
) -> BcResult<Sample> {
    let window = *accessor.window();
    let base_time = window.base_time(timestep);

    let mut vel = unsqueeze(accessor.velocity_window(timestep, window.time_window)?.into_dyn());
    let mut vel_label = unsqueeze(
        accessor
            .velocity_window(base_time, window.future_window)?
            .into_dyn(),
    );
    let mut dfun = unsqueeze(accessor.phase_window(timestep, window.time_window)?.into_dyn());
    let mut dfun_label = unsqueeze(
        accessor
            .phase_window(base_time, window.future_window)?
            .into_dyn(),
    );
    let nucleation = deriver.derive(accessor)?;

    accessor.augment(&mut [&mut vel, &mut dfun, &mut vel_label, &mut dfun_label]);

    Ok(Sample::VelDfun {
        vel,
        dfun,
        nucleation,
        vel_label,
        dfun_label,
    })
}
