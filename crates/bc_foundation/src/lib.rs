// crates/bc_foundation/src/lib.rs

//! BoilCast Foundation Layer
//!
//! 基础层，提供整个项目共享的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`field`]: 归档中的物理场名称
//! - [`tensor`]: 样本张量别名与堆叠/翻转工具
//!
//! # 示例
//!
//! ```
//! use bc_foundation::{Field, BcError, BcResult};
//!
//! fn check(field: &str) -> BcResult<Field> {
//!     field.parse::<Field>()
//! }
//!
//! assert_eq!(check("velx").unwrap(), Field::VelX);
//! assert!(matches!(check("pressure"), Err(BcError::FieldNotFound { .. })));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod field;
pub mod tensor;

// 重导出常用类型
pub use error::{BcError, BcResult};
pub use field::Field;
pub use tensor::{Frame, Tensor};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{BcError, BcResult};
    pub use crate::field::Field;
    pub use crate::tensor::{concat_channels, hflip, stack_frames, unsqueeze, Frame, Tensor};
}
