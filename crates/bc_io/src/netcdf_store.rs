// crates/bc_io/src/netcdf_store.rs

//! netCDF-4/HDF5 归档驱动
//!
//! 每个场为一个变量，第一维为时间。`at` 每次只读取一个时间切片。
//!
//! # 依赖
//!
//! 需要启用 `netcdf` feature 并安装 netCDF 库。

use std::path::Path;

use ndarray::Array3;

use bc_foundation::{BcError, BcResult, Field, Frame};

use crate::store::TimeSeriesStore;

/// netCDF-4/HDF5 归档
#[cfg(feature = "netcdf")]
pub struct NetCdfStore {
    name: String,
    file: netcdf::File,
}

#[cfg(feature = "netcdf")]
impl NetCdfStore {
    /// 只读打开归档
    pub fn open(path: impl AsRef<Path>) -> BcResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BcError::file_not_found(path));
        }

        let file = netcdf::open(path)
            .map_err(|e| BcError::backend("netcdf", format!("{}: {}", path.display(), e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        tracing::info!("NetCdfStore: opened {}", path.display());
        Ok(Self { name, file })
    }

    /// 变量及其各维长度
    fn variable(&self, field: Field) -> BcResult<(netcdf::Variable<'_>, Vec<usize>)> {
        let var = self
            .file
            .variable(field.as_str())
            .ok_or_else(|| BcError::field_not_found(field.as_str()))?;
        let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
        if dims.len() < 3 {
            return Err(BcError::shape_mismatch(field.as_str(), &[0, 0, 0], &dims));
        }
        Ok((var, dims))
    }

    /// 读取时间范围 `[start, end)` 的数据，返回 `(end - start, 其余维...)`
    fn read_range(&self, field: Field, start: usize, end: usize) -> BcResult<ndarray::ArrayD<f32>> {
        let (var, dims) = self.variable(field)?;

        let extents: Vec<std::ops::Range<usize>> = std::iter::once(start..end)
            .chain(dims[1..].iter().map(|&d| 0..d))
            .collect();

        let data: Vec<f32> = var
            .get_values::<f32, _>(extents.as_slice())
            .map_err(|e| BcError::backend("netcdf", e.to_string()))?;

        let mut shape = vec![end - start];
        shape.extend_from_slice(&dims[1..]);
        Ok(ndarray::ArrayD::from_shape_vec(ndarray::IxDyn(&shape), data)?)
    }
}

#[cfg(feature = "netcdf")]
impl TimeSeriesStore for NetCdfStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self, field: Field) -> BcResult<usize> {
        let (_, dims) = self.variable(field)?;
        Ok(dims[0])
    }

    fn frame_shape(&self, field: Field) -> BcResult<[usize; 2]> {
        let (_, dims) = self.variable(field)?;
        Ok([dims[1], dims[2]])
    }

    fn at(&self, field: Field, timestep: usize) -> BcResult<Frame> {
        let len = self.len(field)?;
        BcError::check_index("timestep", timestep, len)?;
        let data = self.read_range(field, timestep, timestep + 1)?;
        crate::store::frame_from_dyn(field, data.index_axis_move(ndarray::Axis(0), 0))
    }

    fn tail(&self, field: Field, from: usize) -> BcResult<Array3<f32>> {
        let len = self.len(field)?;
        if from > len {
            return Err(BcError::index_out_of_bounds("timestep", from, len + 1));
        }
        let data = self.read_range(field, from, len)?;
        crate::store::series_from_dyn(field, data)
    }
}

/// 无 netCDF 支持时的占位实现
#[cfg(not(feature = "netcdf"))]
pub struct NetCdfStore;

#[cfg(not(feature = "netcdf"))]
impl NetCdfStore {
    /// 打开归档 (无 netCDF 支持)
    pub fn open(_path: impl AsRef<Path>) -> BcResult<Self> {
        Err(BcError::NotAvailable { feature: "netcdf" })
    }
}

#[cfg(not(feature = "netcdf"))]
impl TimeSeriesStore for NetCdfStore {
    fn name(&self) -> &str {
        "netcdf (unavailable)"
    }

    fn len(&self, _field: Field) -> BcResult<usize> {
        Err(BcError::NotAvailable { feature: "netcdf" })
    }

    fn frame_shape(&self, _field: Field) -> BcResult<[usize; 2]> {
        Err(BcError::NotAvailable { feature: "netcdf" })
    }

    fn at(&self, _field: Field, _timestep: usize) -> BcResult<Frame> {
        Err(BcError::NotAvailable { feature: "netcdf" })
    }

    fn tail(&self, _field: Field, _from: usize) -> BcResult<Array3<f32>> {
        Err(BcError::NotAvailable { feature: "netcdf" })
    }
}

#[cfg(all(test, not(feature = "netcdf")))]
mod tests {
    use super::*;

    #[test]
    fn test_open_without_feature() {
        let err = NetCdfStore::open("missing.h5").err().unwrap();
        assert!(matches!(err, BcError::NotAvailable { feature: "netcdf" }));
    }
}
