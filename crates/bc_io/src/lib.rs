// crates/bc_io/src/lib.rs

//! BoilCast IO 模块
//!
//! 提供沸腾模拟归档的只读时间序列访问。
//!
//! # 模块
//!
//! - [`store`]: `TimeSeriesStore` 抽象接口
//! - [`memory`]: 内存归档（测试与合成数据）
//! - [`npy`]: 每场一个 `.npy` 文件的目录归档
//! - [`netcdf_store`]: netCDF-4/HDF5 归档驱动
//!
//! # 可选依赖
//!
//! - `netcdf`: 启用 netCDF-4/HDF5 驱动
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use bc_io::{open_store, TimeSeriesStore};
//! use bc_foundation::Field;
//!
//! let store = open_store(Path::new("runs/Twall-98.h5"))?;
//! let frame = store.at(Field::Temperature, 10)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod netcdf_store;
pub mod npy;
pub mod store;

use std::path::Path;

use bc_foundation::{BcError, BcResult};

// 重导出常用类型
pub use memory::MemoryStore;
pub use netcdf_store::NetCdfStore;
pub use npy::NpyDirStore;
pub use store::TimeSeriesStore;

/// 支持的归档扩展名
pub const ARCHIVE_EXTENSIONS: [&str; 3] = ["nc", "h5", "hdf5"];

/// 按路径打开归档
///
/// - 目录: [`NpyDirStore`]
/// - `.nc` / `.h5` / `.hdf5`: [`NetCdfStore`]
pub fn open_store(path: &Path) -> BcResult<Box<dyn TimeSeriesStore>> {
    if !path.exists() {
        return Err(BcError::file_not_found(path));
    }
    if path.is_dir() {
        return Ok(Box::new(NpyDirStore::open(path)?));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(Box::new(NetCdfStore::open(path)?))
    } else {
        let mut supported: Vec<String> = ARCHIVE_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        supported.push("<npy 目录>".to_string());
        Err(BcError::unsupported_format(ext, supported))
    }
}
