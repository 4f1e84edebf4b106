// ==========================================
// 表格行绑定引擎 - 行数据源 Trait
// ==========================================
// 职责: 定义行数据源接口（不包含实现）
// 契约: 按标识打开数据源,产出有限的惰性行序列
//   - 行 = 列名 → 原始值
//   - 打开失败 / 迭代中途失败 均为致命错误
// ==========================================

use crate::domain::types::RawRow;
use crate::importer::error::ImportResult;
use std::path::Path;

/// 惰性行序列
pub type RowStream<'a> = Box<dyn Iterator<Item = ImportResult<RawRow>> + 'a>;

// ==========================================
// RowSource Trait
// ==========================================
// 实现者: CsvRowSource, ExcelRowSource, UniversalRowSource, MemoryRowSource
pub trait RowSource: Send + Sync {
    /// 打开数据源
    ///
    /// # 参数
    /// - path: 数据源标识（文件路径）
    ///
    /// # 返回
    /// - Ok(RowStream): 行序列（表头已消费,空白行已跳过）
    /// - Err: 文件不存在 / 格式不支持 / 缺少表头 / 读取失败
    fn open<'a>(&'a self, path: &Path) -> ImportResult<RowStream<'a>>;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn open<'a>(&'a self, path: &Path) -> ImportResult<RowStream<'a>> {
        (**self).open(path)
    }
}

impl<S: RowSource + ?Sized> RowSource for &S {
    fn open<'a>(&'a self, path: &Path) -> ImportResult<RowStream<'a>> {
        (**self).open(path)
    }
}
