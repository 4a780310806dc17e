// crates/bc_config/src/window.rs

//! 时间窗口配置
//!
//! 逻辑样本索引 `t` 与原始归档时间步的关系：
//!
//! ```text
//! raw(t)        = steady_time + t
//! 输入窗口      = raw(t) .. raw(t) + time_window
//! 第 k 步标签   = raw(t) + k·future_window + time_window .. + future_window
//! 有效样本数    = raw_total - steady_time - time_window - (future_window·push_forward_steps - 1)
//! ```
//!
//! 该公式保证每个样本的输入窗口、输出窗口以及全部推进步都落在归档内。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 时间窗口配置，构造后不可变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 跳过的初始瞬态时间步数
    #[serde(default)]
    pub steady_time: usize,

    /// 输入回看窗口长度 (> 0)
    #[serde(default = "default_one")]
    pub time_window: usize,

    /// 每个推进步的输出窗口长度 (>= 1)
    #[serde(default = "default_one")]
    pub future_window: usize,

    /// 串联推进步数 (>= 1)
    #[serde(default = "default_one")]
    pub push_forward_steps: usize,
}

fn default_one() -> usize {
    1
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            steady_time: 0,
            time_window: 1,
            future_window: 1,
            push_forward_steps: 1,
        }
    }
}

impl WindowConfig {
    /// 创建并校验窗口配置
    pub fn new(
        steady_time: usize,
        time_window: usize,
        future_window: usize,
        push_forward_steps: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            steady_time,
            time_window,
            future_window,
            push_forward_steps,
        };
        config.validate()?;
        Ok(config)
    }

    /// 校验参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_window == 0 {
            return Err(ConfigError::invalid("time_window", self.time_window, "时间窗口必须为正"));
        }
        if self.future_window == 0 {
            return Err(ConfigError::invalid("future_window", self.future_window, "未来窗口至少为 1"));
        }
        if self.push_forward_steps == 0 {
            return Err(ConfigError::invalid(
                "push_forward_steps",
                self.push_forward_steps,
                "推进步数至少为 1",
            ));
        }
        Ok(())
    }

    /// 单个样本覆盖的原始时间步数
    #[inline]
    pub fn span(&self) -> usize {
        self.time_window + self.future_window * self.push_forward_steps
    }

    /// 有效样本数，公式非正时为 0
    pub fn sample_count(&self, raw_total: usize) -> usize {
        let available = raw_total.saturating_sub(self.steady_time);
        if available < self.span() {
            0
        } else {
            available - self.span() + 1
        }
    }

    /// 逻辑时间步对应的原始时间步
    #[inline]
    pub fn raw_offset(&self, timestep: usize) -> usize {
        self.steady_time + timestep
    }

    /// 标签窗口起点 (逻辑时间步)
    #[inline]
    pub fn base_time(&self, timestep: usize) -> usize {
        timestep + self.time_window
    }

    /// 第 `step` 个推进步的窗口起点 (逻辑时间步)
    #[inline]
    pub fn rollout_start(&self, timestep: usize, step: usize) -> usize {
        timestep + step * self.future_window
    }
}
