// crates/bc_io/src/memory.rs

//! 内存归档
//!
//! 以 `(T, H, W)` 数组保存每个场，插入时校验归档不变量：
//! 所有场的时间步数与帧形状必须一致。

use std::collections::BTreeMap;

use ndarray::{s, Array3};

use bc_foundation::{BcError, BcResult, Field, Frame};

use crate::store::TimeSeriesStore;

/// 内存中的多场时间序列归档
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    name: String,
    fields: BTreeMap<Field, Array3<f32>>,
}

impl MemoryStore {
    /// 创建空归档
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// 链式插入场
    pub fn with_field(mut self, field: Field, data: Array3<f32>) -> BcResult<Self> {
        self.insert(field, data)?;
        Ok(self)
    }

    /// 插入或替换场
    ///
    /// # 错误
    ///
    /// 与已有场的 `(T, H, W)` 不一致时返回 [`BcError::ShapeMismatch`]。
    pub fn insert(&mut self, field: Field, data: Array3<f32>) -> BcResult<()> {
        if let Some((other, existing)) = self.fields.iter().find(|(f, _)| **f != field) {
            BcError::check_shape(
                &format!("{} (参照 {})", field, other),
                existing.shape(),
                data.shape(),
            )?;
        }
        self.fields.insert(field, data);
        Ok(())
    }

    /// 已包含的场
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.keys().copied()
    }

    fn series(&self, field: Field) -> BcResult<&Array3<f32>> {
        self.fields
            .get(&field)
            .ok_or_else(|| BcError::field_not_found(field.as_str()))
    }
}

impl TimeSeriesStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self, field: Field) -> BcResult<usize> {
        Ok(self.series(field)?.len_of(ndarray::Axis(0)))
    }

    fn frame_shape(&self, field: Field) -> BcResult<[usize; 2]> {
        let (_, h, w) = self.series(field)?.dim();
        Ok([h, w])
    }

    fn at(&self, field: Field, timestep: usize) -> BcResult<Frame> {
        let series = self.series(field)?;
        BcError::check_index("timestep", timestep, series.len_of(ndarray::Axis(0)))?;
        Ok(series.slice(s![timestep, .., ..]).to_owned())
    }

    fn tail(&self, field: Field, from: usize) -> BcResult<Array3<f32>> {
        let series = self.series(field)?;
        let len = series.len_of(ndarray::Axis(0));
        if from > len {
            return Err(BcError::index_out_of_bounds("timestep", from, len + 1));
        }
        Ok(series.slice(s![from.., .., ..]).to_owned())
    }
}
