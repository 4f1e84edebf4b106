// ==========================================
// 表格行绑定引擎 - 目标模型 Schema 描述接口
// ==========================================
// 职责: 以能力接口替代运行时反射
//   - fields()         : resolve(type, fieldName) 的数据来源
//   - attach_default() : construct(type) 并挂到父节点
//   - nested_mut()     : 下钻到子对象
//   - write_field()    : 写入转换成功的值
//   - is_set()         : 非空校验
// ==========================================

use crate::domain::types::{FieldDescriptor, FieldValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// 模型侧拒绝写入
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("字段不可写入: {0}")]
    UnknownField(String),

    #[error("字段 {field} 类型不匹配: 收到 {found}")]
    TypeMismatch { field: String, found: &'static str },
}

// ==========================================
// BindTarget Trait
// ==========================================
// 用途: 行绑定的目标对象（根对象与嵌套对象都实现）
// 约定: Schema 为树形,不存在环
pub trait BindTarget {
    /// 类型名（用于错误信息）
    fn type_name(&self) -> &'static str;

    /// 静态字段表
    fn fields(&self) -> &'static [FieldDescriptor];

    /// 按名称查找字段描述符（区分大小写）
    fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// 获取嵌套对象（未初始化时返回 None）
    fn nested_mut(&mut self, name: &str) -> Option<&mut dyn BindTarget> {
        let _ = name;
        None
    }

    /// 为嵌套对象字段构造默认实例并挂到当前对象上
    ///
    /// # 返回
    /// - true: 已挂载
    /// - false: 该字段不是可构造的嵌套对象
    fn attach_default(&mut self, name: &str) -> bool {
        let _ = name;
        false
    }

    /// 写入已转换的值
    fn write_field(&mut self, name: &str, value: FieldValue) -> Result<(), WriteError>;

    /// 字段当前是否有值（值类型字段恒为 true）
    fn is_set(&self, name: &str) -> bool;
}

// ==========================================
// FromFieldValue Trait
// ==========================================
// 用途: FieldValue → 模型字段的 Rust 类型
// 列表字段通过 Vec<T> 的实现按元素类型逐个提取
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> Option<Self>;
}

impl FieldValue {
    /// 提取为目标 Rust 类型,失败时返回 TypeMismatch
    ///
    /// # 示例
    /// ```
    /// use row_binder::domain::FieldValue;
    ///
    /// let year: i32 = FieldValue::Int(2024).extract("Year").unwrap();
    /// assert_eq!(year, 2024);
    /// ```
    pub fn extract<T: FromFieldValue>(self, field: &str) -> Result<T, WriteError> {
        let found = self.kind_name();
        T::from_field_value(self).ok_or_else(|| WriteError::TypeMismatch {
            field: field.to_string(),
            found,
        })
    }

    /// 提取为枚举成员
    pub fn into_enum<E: BindEnum>(self) -> Option<E> {
        match self {
            FieldValue::Enum(index) => E::from_index(index),
            _ => None,
        }
    }
}

// ==========================================
// BindEnum Trait
// ==========================================
// NAMES 与 VARIANTS 一一对应（下标相同）
pub trait BindEnum: Sized + Copy + 'static {
    const NAMES: &'static [&'static str];
    const VARIANTS: &'static [Self];

    fn from_index(index: usize) -> Option<Self> {
        Self::VARIANTS.get(index).copied()
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

macro_rules! impl_from_field_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromFieldValue for $ty {
                fn from_field_value(value: FieldValue) -> Option<Self> {
                    match value {
                        FieldValue::Int(v) => <$ty>::try_from(v).ok(),
                        FieldValue::UInt(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_field_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Float(v) => Some(v),
            FieldValue::Int(v) => Some(v as f64),
            FieldValue::UInt(v) => Some(v as f64),
            _ => None,
        }
    }
}

impl FromFieldValue for f32 {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        f64::from_field_value(value).map(|v| v as f32)
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for NaiveDate {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Date(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for NaiveDateTime {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::DateTime(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for DateTime<Utc> {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Timestamp(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for Uuid {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Guid(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::List(items) => items.into_iter().map(T::from_field_value).collect(),
            _ => None,
        }
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: FieldValue) -> Option<Self> {
        T::from_field_value(value).map(Some)
    }
}
