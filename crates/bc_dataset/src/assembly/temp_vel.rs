// crates/bc_dataset/src/assembly/temp_vel.rs

//! 温度、速度、相场联合样本，带推进展开
//!
//! 第 `k` 个推进步是逻辑时间步 `timestep + k·future_window` 处的单步样本，
//! 各字段沿新的首轴堆叠为 `(push_forward_steps, C, H, W)`。
//! 每个推进步独立抽取一次翻转决定。

use bc_foundation::tensor::stack_tensors;
use bc_foundation::{BcResult, Tensor};

use super::Sample;
use crate::accessor::WindowedAccessor;

/// 单个推进步的全部字段
struct Step {
    coords: Tensor,
    temp: Tensor,
    vel: Tensor,
    dfun: Tensor,
    temp_label: Tensor,
    vel_label: Tensor,
}

fn assemble_step(accessor: &mut WindowedAccessor, timestep: usize) -> BcResult<Step> {
    let window = *accessor.window();
    let base_time = window.base_time(timestep);

    let mut coords = accessor.coordinates(timestep)?.into_dyn();
    let mut temp = accessor
        .temperature_window(timestep, window.time_window)?
        .into_dyn();
    let mut vel = accessor
        .velocity_window(timestep, window.time_window)?
        .into_dyn();
    let mut dfun = accessor.phase_window(timestep, window.time_window)?.into_dyn();
    let mut temp_label = accessor
        .temperature_window(base_time, window.future_window)?
        .into_dyn();
    let mut vel_label = accessor
        .velocity_window(base_time, window.future_window)?
        .into_dyn();

    accessor.augment(&mut [
        &mut coords,
        &mut temp,
        &mut vel,
        &mut dfun,
        &mut temp_label,
        &mut vel_label,
    ]);

    Ok(Step {
        coords,
        temp,
        vel,
        dfun,
        temp_label,
        vel_label,
    })
}

/// 组装 `(coords, temp, vel, dfun, temp_label, vel_label)`，首轴长度为推进步数
pub fn assemble(accessor: &mut WindowedAccessor, timestep: usize) -> BcResult<Sample> {
    let window = *accessor.window();

    let steps = (0..window.push_forward_steps)
        .map(|k| assemble_step(accessor, window.rollout_start(timestep, k)))
        .collect::<BcResult<Vec<_>>>()?;

    let stack = |pick: fn(&Step) -> &Tensor| -> BcResult<Tensor> {
        let tensors: Vec<Tensor> = steps.iter().map(|s| pick(s).clone()).collect();
        stack_tensors(&tensors)
    };

    Ok(Sample::TempVel {
        coords: stack(|s| &s.coords)?,
        temp: stack(|s| &s.temp)?,
        vel: stack(|s| &s.vel)?,
        dfun: stack(|s| &s.dfun)?,
        temp_label: stack(|s| &s.temp_label)?,
        vel_label: stack(|s| &s.vel_label)?,
    })
}
