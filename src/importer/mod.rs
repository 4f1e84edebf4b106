// ==========================================
// 表格行绑定引擎 - 行数据源层
// ==========================================
// 职责: 把外部表格读成 列名 → 原始值 的行序列
// 支持: CSV, Excel, 内存
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod memory_source;
pub mod row_source_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvRowSource, ExcelRowSource, UniversalRowSource};
pub use memory_source::MemoryRowSource;

// 重导出 Trait 接口
pub use row_source_trait::{RowSource, RowStream};
