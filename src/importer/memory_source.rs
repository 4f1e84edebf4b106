// ==========================================
// 表格行绑定引擎 - 内存行数据源
// ==========================================
// 用途: 测试 / 调用方已物化好的行
// ==========================================

use crate::domain::types::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::row_source_trait::{RowSource, RowStream};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    tables: HashMap<PathBuf, Vec<RawRow>>,
}

impl MemoryRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册一张表（同一标识重复注册时覆盖）
    pub fn with_rows(mut self, path: impl Into<PathBuf>, rows: Vec<RawRow>) -> Self {
        self.tables.insert(path.into(), rows);
        self
    }
}

impl RowSource for MemoryRowSource {
    fn open<'a>(&'a self, path: &Path) -> ImportResult<RowStream<'a>> {
        let rows = self
            .tables
            .get(path)
            .ok_or_else(|| ImportError::FileNotFound(path.display().to_string()))?;

        Ok(Box::new(rows.iter().cloned().map(Ok)))
    }
}
