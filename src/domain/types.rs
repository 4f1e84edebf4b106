// ==========================================
// 表格行绑定引擎 - 领域类型定义
// ==========================================
// 职责: 原始行 / 原始值 / 字段类型 / 字段描述符 / 转换后值
// 红线: 纯数据结构,不含转换与解析逻辑
// ==========================================

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::borrow::Cow;
use std::fmt;
use uuid::Uuid;

// ==========================================
// RawValue - 原始单元格值
// ==========================================
// 来源: Row Source（CSV 全部为文本,Excel 可能已是数值/日期）
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Empty, // 空单元格（视为 null）
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl RawValue {
    /// 是否为 null（空单元格）
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    /// 原始值的字符串形式
    ///
    /// 日期统一输出为 ISO 格式,保证与转换器的解析规则互通
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Empty => Cow::Borrowed(""),
            RawValue::Text(s) => Cow::Borrowed(s.as_str()),
            RawValue::Int(i) => Cow::Owned(i.to_string()),
            RawValue::Float(f) => Cow::Owned(f.to_string()),
            RawValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            RawValue::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            RawValue::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(value: NaiveDate) -> Self {
        RawValue::Date(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::DateTime(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Empty)
    }
}

// ==========================================
// RawRow - 原始行（列名 → 原始值）
// ==========================================
// 迭代顺序 = 插入顺序（即表头顺序）
// 重复列名: 后写覆盖先写,位置保持不变
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    cells: Vec<(String, RawValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一列,返回被覆盖的旧值
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RawValue>) -> Option<RawValue> {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.cells.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// 整行全部为空（Row Source 用于跳过空白行）
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, value)| value.is_null())
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

// ==========================================
// FieldType - 字段声明类型（已剥离可空包装）
// ==========================================
// 引用类型: Text / List / Object（可为 null,受非空校验约束）
// 值类型: 其余全部（总有默认值,免于非空校验）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Date,      // chrono::NaiveDate
    DateTime,  // chrono::NaiveDateTime
    Timestamp, // chrono::DateTime<Utc>
    Guid,      // uuid::Uuid
    Enum(&'static [&'static str]),
    List(&'static FieldType),
    Object(&'static str),
}

impl FieldType {
    pub fn is_reference(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::List(_) | FieldType::Object(_))
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::DateTime | FieldType::Timestamp)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, FieldType::Object(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "text"),
            FieldType::I8 => write!(f, "i8"),
            FieldType::I16 => write!(f, "i16"),
            FieldType::I32 => write!(f, "i32"),
            FieldType::I64 => write!(f, "i64"),
            FieldType::U8 => write!(f, "u8"),
            FieldType::U16 => write!(f, "u16"),
            FieldType::U32 => write!(f, "u32"),
            FieldType::U64 => write!(f, "u64"),
            FieldType::F32 => write!(f, "f32"),
            FieldType::F64 => write!(f, "f64"),
            FieldType::Bool => write!(f, "bool"),
            FieldType::Date => write!(f, "date"),
            FieldType::DateTime => write!(f, "datetime"),
            FieldType::Timestamp => write!(f, "timestamp"),
            FieldType::Guid => write!(f, "guid"),
            FieldType::Enum(members) => write!(f, "enum[{}]", members.join("|")),
            FieldType::List(element) => write!(f, "list<{}>", element),
            FieldType::Object(type_name) => write!(f, "{}", type_name),
        }
    }
}

// ==========================================
// FieldDescriptor - 字段描述符（Schema 的最小单元）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str, // 字段名（路径段匹配用,区分大小写）
    pub ty: FieldType,      // 底层类型
    pub optional: bool,     // 可空包装（Option<T> / 显式可选引用）
}

impl FieldDescriptor {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            optional: true,
        }
    }

    /// 非空策略下是否必须有值（非可选的引用类型字段）
    pub fn requires_value(&self) -> bool {
        !self.optional && self.ty.is_reference()
    }
}

// ==========================================
// FieldValue - 转换成功后的强类型值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Guid(Uuid),
    Enum(usize), // 枚举成员下标（对应 FieldType::Enum 的成员表）
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// 变体名称（用于错误信息）
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Int(_) => "int",
            FieldValue::UInt(_) => "uint",
            FieldValue::Float(_) => "float",
            FieldValue::Bool(_) => "bool",
            FieldValue::Date(_) => "date",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Guid(_) => "guid",
            FieldValue::Enum(_) => "enum",
            FieldValue::List(_) => "list",
        }
    }
}
