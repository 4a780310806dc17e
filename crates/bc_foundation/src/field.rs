// crates/bc_foundation/src/field.rs

//! 归档物理场名称
//!
//! 每个沸腾模拟归档按名称存储逐时间步的二维场：
//!
//! | 场 | 键名 | 含义 |
//! |---|---|---|
//! | [`Field::Temperature`] | `temperature` | 无量纲温度 |
//! | [`Field::VelX`] | `velx` | x 方向速度 |
//! | [`Field::VelY`] | `vely` | y 方向速度 |
//! | [`Field::Dfun`] | `dfun` | 带符号水平集，正值为汽相 |
//! | [`Field::X`] | `x` | 网格 x 坐标 |
//! | [`Field::Y`] | `y` | 网格 y 坐标 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BcError;

/// 归档中的物理场
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// 温度
    Temperature,
    /// x 方向速度
    #[serde(rename = "velx")]
    VelX,
    /// y 方向速度
    #[serde(rename = "vely")]
    VelY,
    /// 相指示水平集
    Dfun,
    /// x 坐标
    X,
    /// y 坐标
    Y,
}

impl Field {
    /// 全部物理场
    pub const ALL: [Field; 6] = [
        Field::Temperature,
        Field::VelX,
        Field::VelY,
        Field::Dfun,
        Field::X,
        Field::Y,
    ];

    /// 归档中的键名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::VelX => "velx",
            Self::VelY => "vely",
            Self::Dfun => "dfun",
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = BcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| BcError::field_not_found(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_roundtrip() {
        for field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_field() {
        let err = "pressure".parse::<Field>().unwrap_err();
        assert!(matches!(err, BcError::FieldNotFound { .. }));
        assert!(err.is_range_error());
    }
}
