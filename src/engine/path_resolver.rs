// ==========================================
// 表格行绑定引擎 - 字段路径解析器
// ==========================================
// 规则: 沿点分路径逐段下钻,遇到未初始化的嵌套对象即构造默认实例并挂载
// 红线: 只定位字段槽位,不读写字段值
// 限制: Schema 必须为树形（存在环时行为未定义）
// ==========================================

use crate::domain::model::BindTarget;
use crate::domain::types::FieldDescriptor;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// 字段路径（点分字符串拆出的有序字段名序列）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// 解析点分路径（如 "Engine.Type"）
    ///
    /// # 返回
    /// - Some(FieldPath): 非空路径（各段已 trim）
    /// - None: 空白字符串（显式不绑定）
    pub fn parse(dotted: &str) -> Option<Self> {
        let trimmed = dotted.trim();
        if trimmed.is_empty() {
            return None;
        }

        let segments = trimmed
            .split('.')
            .map(|segment| segment.trim().to_string())
            .collect();
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// 路径解析失败（配置错误,单列跳过,不影响整行）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("字段路径为空")]
    EmptyPath,

    #[error("类型 {type_name} 不存在字段 {field}")]
    UnknownField {
        field: String,
        type_name: &'static str,
    },

    #[error("字段 {field} (类型 {type_name}) 不是嵌套对象,无法继续下钻")]
    NotNested {
        field: String,
        type_name: &'static str,
    },

    #[error("无法为字段 {field} (类型 {type_name}) 构造默认实例")]
    ConstructionFailed {
        field: String,
        type_name: &'static str,
    },
}

/// 解析结果: 待写入的持有者对象 + 字段描述符
pub struct FieldSlot<'a> {
    pub holder: &'a mut dyn BindTarget,
    pub descriptor: &'static FieldDescriptor,
}

impl fmt::Debug for FieldSlot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSlot")
            .field("holder", &self.holder.type_name())
            .field("descriptor", self.descriptor)
            .finish()
    }
}

/// 沿路径定位字段槽位
///
/// # 规则
/// 1. 非末段: 字段必须存在且为嵌套对象；为空时构造默认实例并挂到父对象
/// 2. 末段: 只查找字段描述符,不读不写
///
/// # 副作用
/// - 构造出的中间对象保留在模型中（同一行后续列可复用）
pub fn resolve<'a>(
    root: &'a mut dyn BindTarget,
    path: &FieldPath,
) -> Result<FieldSlot<'a>, ResolveError> {
    let (terminal, parents) = path
        .segments()
        .split_last()
        .ok_or(ResolveError::EmptyPath)?;

    let mut holder = root;
    for segment in parents {
        let type_name = holder.type_name();
        let descriptor = holder
            .field(segment)
            .ok_or_else(|| ResolveError::UnknownField {
                field: segment.clone(),
                type_name,
            })?;

        if !descriptor.ty.is_object() {
            return Err(ResolveError::NotNested {
                field: segment.clone(),
                type_name,
            });
        }

        if !holder.is_set(segment) {
            if !holder.attach_default(segment) {
                return Err(ResolveError::ConstructionFailed {
                    field: segment.clone(),
                    type_name,
                });
            }
            trace!(field = %segment, holder = type_name, "构造中间对象");
        }

        holder = match holder.nested_mut(segment) {
            Some(child) => child,
            None => {
                return Err(ResolveError::ConstructionFailed {
                    field: segment.clone(),
                    type_name,
                })
            }
        };
    }

    let type_name = holder.type_name();
    let descriptor = holder
        .field(terminal)
        .ok_or_else(|| ResolveError::UnknownField {
            field: terminal.clone(),
            type_name,
        })?;

    Ok(FieldSlot { holder, descriptor })
}
