// ==========================================
// 表格行绑定引擎 - 核心库
// ==========================================
// 职责: 按声明式绑定计划,把表格行（列名 → 原始值）
//       写入强类型的嵌套对象图
// 技术栈: Rust + csv + calamine
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 原始值/字段描述/目标模型契约
pub mod domain;

// 引擎层 - 解析/转换/校验/映射
pub mod engine;

// 行数据源层 - CSV/Excel/内存
pub mod importer;

// 配置层 - 绑定配置与校验策略
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BindEnum, BindTarget, FieldDescriptor, FieldType, FieldValue, FromFieldValue, RawRow,
    RawValue, WriteError,
};

// 引擎
pub use engine::{
    BindObserver, BindingPlan, MappingReport, RowMapper, RowOutcome, SilentObserver, SkipKind,
    SkipReason,
};

// 配置
pub use config::{BindingConfig, ConfigError, Policy};

// 数据源
pub use importer::{
    CsvRowSource, ExcelRowSource, ImportError, ImportResult, MemoryRowSource, RowSource,
    UniversalRowSource,
};

// ==========================================
// 常量定义
// ==========================================

// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
