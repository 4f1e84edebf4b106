// ==========================================
// 表格行绑定引擎 - 绑定配置
// ==========================================
// 职责: 列名 → 点分字段路径映射 + 校验策略的可序列化描述
// 存储: JSON（文件或字符串）
// 红线: 不含文件格式知识,不做路径合法性校验（路径在首次解析时惰性校验）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// 校验策略
///
/// 后续策略项在此追加,未出现的键取默认值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// 是否强制非空（非可选引用类型字段必须有值,否则整行丢弃）
    pub enforce_non_nullable: bool,
}

impl Policy {
    pub fn enforcing() -> Self {
        Self {
            enforce_non_nullable: true,
        }
    }

    pub fn lenient() -> Self {
        Self {
            enforce_non_nullable: false,
        }
    }
}

/// 绑定配置（持久化对象）
///
/// # JSON 示例
/// ```json
/// {
///   "columns": { "车名": "Name", "Engine Type": "Engine.Type", "备注": "" },
///   "policy": { "enforce_non_nullable": true }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// 列名 → 点分字段路径（空字符串表示显式不绑定）
    #[serde(default)]
    pub columns: BTreeMap<String, String>,

    /// 校验策略
    #[serde(default)]
    pub policy: Policy,
}

impl BindingConfig {
    pub fn new(policy: Policy) -> Self {
        Self {
            columns: BTreeMap::new(),
            policy,
        }
    }

    /// 追加一列绑定（同名列后写覆盖）
    pub fn bind(mut self, column: impl Into<String>, path: impl Into<String>) -> Self {
        self.columns.insert(column.into(), path.into());
        self
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// 导出为 JSON 字符串（用于记录本次映射所用配置快照）
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "columns": { "车名": "Name", "Engine Type": "Engine.Type", "备注": "" },
            "policy": { "enforce_non_nullable": true }
        }"#;

        let config = BindingConfig::from_json_str(json).unwrap();
        assert_eq!(config.columns.len(), 3);
        assert_eq!(config.columns.get("Engine Type"), Some(&"Engine.Type".to_string()));
        assert_eq!(config.columns.get("备注"), Some(&"".to_string()));
        assert!(config.policy.enforce_non_nullable);
    }

    #[test]
    fn test_policy_defaults_to_lenient() {
        let config = BindingConfig::from_json_str(r#"{ "columns": { "a": "A" } }"#).unwrap();
        assert_eq!(config.policy, Policy::lenient());

        let config = BindingConfig::from_json_str(r#"{ "policy": {} }"#).unwrap();
        assert!(config.columns.is_empty());
        assert!(!config.policy.enforce_non_nullable);
    }

    #[test]
    fn test_invalid_json() {
        let result = BindingConfig::from_json_str(r#"{ "columns": ["a"] }"#);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{ "columns": {{ "年份": "Year" }} }}"#).unwrap();

        let config = BindingConfig::from_json_file(temp_file.path()).unwrap();
        assert_eq!(config.columns.get("年份"), Some(&"Year".to_string()));
    }

    #[test]
    fn test_from_missing_file() {
        let result = BindingConfig::from_json_file("non_existent_binding.json");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let config = BindingConfig::new(Policy::enforcing())
            .bind("Engine Type", "Engine.Type")
            .bind("车名", "Name");

        let json = config.to_json_string().unwrap();
        assert_eq!(BindingConfig::from_json_str(&json).unwrap(), config);
    }
}
