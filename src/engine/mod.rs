// ==========================================
// 表格行绑定引擎 - 引擎层
// ==========================================
// 流水线: 路径解析 → 值转换 → 写入 → 非空校验 → 收集
// 红线: 单列失败不影响同行其他列,单行失败不影响其他行
// ==========================================

pub mod binding_plan;
pub mod diagnostics;
pub mod path_resolver;
pub mod row_mapper;
pub mod validator;
pub mod value_converter;

#[cfg(test)]
mod test_models;

// 重导出核心引擎
pub use binding_plan::{BindingPlan, ColumnBinding, ColumnOutcome, RowOutcome};
pub use diagnostics::{
    BindObserver, MappingReport, RejectedRow, SilentObserver, SkipKind, SkipReason, SkippedColumn,
};
pub use path_resolver::{resolve, FieldPath, FieldSlot, ResolveError};
pub use row_mapper::RowMapper;
pub use validator::Validator;
pub use value_converter::{ConversionError, ConversionResult, ValueConverter};
