// ==========================================
// 表格行绑定引擎 - 配置层
// ==========================================
// 职责: 绑定配置与校验策略的加载/导出
// 存储: JSON
// ==========================================

pub mod binding_config;

// 重导出核心配置类型
pub use binding_config::{BindingConfig, ConfigError, Policy};
