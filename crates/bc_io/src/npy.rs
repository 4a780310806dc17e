// crates/bc_io/src/npy.rs

//! NPY 目录归档
//!
//! 目录中每个场对应一个 `<场名>.npy` 文件：
//!
//! ```text
//! <root>/
//!   temperature.npy   # (T, H, W) 或 (T, H, W, 1)
//!   velx.npy
//!   vely.npy
//!   dfun.npy
//!   x.npy
//!   y.npy
//! ```
//!
//! 打开时整体读入内存，之后由 [`MemoryStore`] 提供访问。
//! 支持 `f32` 与 `f64` 数据（后者转换为 `f32`）。

use std::fs::File;
use std::path::{Path, PathBuf};

use ndarray::{Array3, ArrayD};
use ndarray_npy::ReadNpyExt;
use tracing::{debug, info};

use bc_foundation::{BcError, BcResult, Field, Frame};

use crate::memory::MemoryStore;
use crate::store::{series_from_dyn, TimeSeriesStore};

/// 每场一个 `.npy` 文件的目录归档
#[derive(Debug, Clone)]
pub struct NpyDirStore {
    root: PathBuf,
    inner: MemoryStore,
}

impl NpyDirStore {
    /// 打开目录归档
    ///
    /// 缺失的场文件被跳过；一个场都没有时报错。
    pub fn open(root: &Path) -> BcResult<Self> {
        if !root.is_dir() {
            return Err(BcError::file_not_found(root));
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        let mut inner = MemoryStore::new(name);

        for field in Field::ALL {
            let path = root.join(format!("{}.npy", field.as_str()));
            if !path.exists() {
                debug!("Skipping {}: file not present", path.display());
                continue;
            }
            let series = load_series(field, &path)?;
            inner.insert(field, series)?;
        }

        if inner.fields().next().is_none() {
            return Err(BcError::field_not_found(format!(
                "{} 中没有任何 .npy 场文件",
                root.display()
            )));
        }

        info!(
            "NpyDirStore: loaded {} fields from {}",
            inner.fields().count(),
            root.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            inner,
        })
    }

    /// 归档根目录
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TimeSeriesStore for NpyDirStore {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn len(&self, field: Field) -> BcResult<usize> {
        self.inner.len(field)
    }

    fn frame_shape(&self, field: Field) -> BcResult<[usize; 2]> {
        self.inner.frame_shape(field)
    }

    fn at(&self, field: Field, timestep: usize) -> BcResult<Frame> {
        self.inner.at(field, timestep)
    }

    fn tail(&self, field: Field, from: usize) -> BcResult<Array3<f32>> {
        self.inner.tail(field, from)
    }
}

fn load_series(field: Field, path: &Path) -> BcResult<Array3<f32>> {
    let open = || {
        File::open(path)
            .map_err(|e| BcError::io_with_source(format!("无法打开 {}", path.display()), e))
    };

    let data: ArrayD<f32> = match ArrayD::<f32>::read_npy(open()?) {
        Ok(arr) => arr,
        Err(_) => ArrayD::<f64>::read_npy(open()?)
            .map_err(|e| BcError::backend("npy", format!("{}: {}", path.display(), e)))?
            .mapv(|v| v as f32),
    };

    series_from_dyn(field, data)
}
