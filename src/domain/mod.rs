// ==========================================
// 表格行绑定引擎 - 领域模型层
// ==========================================
// 职责: 原始行/值类型、字段描述符、目标模型能力接口
// 红线: 不含解析逻辑,不含绑定流程
// ==========================================

pub mod model;
pub mod types;

// 重导出核心类型
pub use model::{BindEnum, BindTarget, FromFieldValue, WriteError};
pub use types::{FieldDescriptor, FieldType, FieldValue, RawRow, RawValue};
