// ==========================================
// 表格行绑定引擎 - 非空校验器
// ==========================================
// 规则:
//   - enforce_non_nullable = false → 一律通过
//   - enforce_non_nullable = true  → 根对象一级字段中,非可选的引用类型字段必须有值
// 限制: 只检查一层,不递归进入嵌套对象; 值类型字段豁免
// ==========================================

use crate::config::Policy;
use crate::domain::model::BindTarget;

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: Policy,
}

impl Validator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// 缺失的必填字段（仅用于诊断,对外只暴露通过/不通过）
    pub fn missing_required(&self, model: &dyn BindTarget) -> Vec<&'static str> {
        if !self.policy.enforce_non_nullable {
            return Vec::new();
        }

        model
            .fields()
            .iter()
            .filter(|field| field.requires_value() && !model.is_set(field.name))
            .map(|field| field.name)
            .collect()
    }

    pub fn is_valid(&self, model: &dyn BindTarget) -> bool {
        self.missing_required(model).is_empty()
    }
}
