// crates/bc_config/src/params.rs

//! 模拟参数
//!
//! 每个归档对温度做了相同范围的无量纲化。当不同模拟的壁面温度不同时，
//! 需要先乘以壁面温度还原量纲，才能在多个模拟之间统一归一化。
//! 壁面温度编码在文件名中 (`..._Twall-98.h5`)，仅在文件名包含
//! `Twall-` 标记时才做还原，否则取 1。
//!
//! 同一个标识还决定成核层的成核点数量，见 [`NUCLEATION_SITES`]。

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// 文件名中的壁面温度标记
pub const TWALL_MARKER: &str = "Twall-";

/// 壁面温度标识 → 成核点数量
pub const NUCLEATION_SITES: [(&str, usize); 10] = [
    ("90", 15),
    ("92", 17),
    ("95", 19),
    ("97", 21),
    ("98", 22),
    ("100", 24),
    ("102", 25),
    ("106", 27),
    ("108", 27),
    ("110", 27),
];

/// 查询成核点数量，未收录的标识返回 0
pub fn nucleation_site_count(twall_id: &str) -> usize {
    NUCLEATION_SITES
        .iter()
        .find(|(id, _)| *id == twall_id)
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

/// 归档级模拟参数，在边界处解析一次后按值传入核心
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// 壁面温度，用于温度还原量纲
    pub wall_temperature: f32,

    /// 成核点数量
    pub nucleation_sites: usize,

    /// 文件名中的壁面温度标识
    pub twall_id: Option<String>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            wall_temperature: 1.0,
            nucleation_sites: 0,
            twall_id: None,
        }
    }
}

impl SimulationParams {
    /// 显式指定壁面温度与成核点数量
    pub fn new(wall_temperature: f32, nucleation_sites: usize) -> Self {
        Self {
            wall_temperature,
            nucleation_sites,
            twall_id: None,
        }
    }

    /// 从归档路径的文件名主干解析
    ///
    /// 标识取最后一个 `Twall-` 之后的文本。
    ///
    /// # 错误
    ///
    /// 标识无法解析为数字时返回 [`ConfigError::InvalidValue`]。
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_stem(&stem)
    }

    /// 从文件名主干解析
    pub fn from_stem(stem: &str) -> Result<Self, ConfigError> {
        let Some(pos) = stem.rfind(TWALL_MARKER) else {
            return Ok(Self::default());
        };

        let id = &stem[pos + TWALL_MARKER.len()..];
        let wall_temperature: f32 = id
            .parse()
            .map_err(|_| ConfigError::invalid("wall_temperature", id, "Twall- 后应为数字"))?;

        let nucleation_sites = nucleation_site_count(id);
        if nucleation_sites == 0 {
            warn!("No nucleation site count tabulated for Twall-{}", id);
        }

        Ok(Self {
            wall_temperature,
            nucleation_sites,
            twall_id: Some(id.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twall_98() {
        let p = SimulationParams::from_path(Path::new("data/run_Twall-98.h5")).unwrap();
        assert_eq!(p.wall_temperature, 98.0);
        assert_eq!(p.nucleation_sites, 22);
        assert_eq!(p.twall_id.as_deref(), Some("98"));
    }

    #[test]
    fn test_plain_prefix() {
        let p = SimulationParams::from_stem("Twall-100").unwrap();
        assert_eq!(p.wall_temperature, 100.0);
        assert_eq!(p.nucleation_sites, 24);
    }

    #[test]
    fn test_no_marker_defaults() {
        let p = SimulationParams::from_path(Path::new("run_flat.h5")).unwrap();
        assert_eq!(p.wall_temperature, 1.0);
        assert_eq!(p.nucleation_sites, 0);
        assert!(p.twall_id.is_none());
    }

    #[test]
    fn test_untabulated_twall() {
        let p = SimulationParams::from_stem("Twall-81").unwrap();
        assert_eq!(p.wall_temperature, 81.0);
        assert_eq!(p.nucleation_sites, 0);
    }

    #[test]
    fn test_non_numeric_suffix() {
        assert!(SimulationParams::from_stem("run_Twall-hot").is_err());
    }

    #[test]
    fn test_lookup_table() {
        assert_eq!(nucleation_site_count("90"), 15);
        assert_eq!(nucleation_site_count("110"), 27);
        assert_eq!(nucleation_site_count("flat"), 0);
        assert_eq!(nucleation_site_count(""), 0);
    }
}
