// ==========================================
// 表格行绑定引擎 - 值转换器
// ==========================================
// 职责: 原始值 → 字段声明类型（可空包装已由调用方剥离）
// 分派规则（按优先级,首个命中即生效）:
//   1. 日期时间 → 区域无关的日期解析
//   2. 枚举     → 成员名大小写不敏感匹配
//   3. GUID     → 标准 UUID 解析
//   4. 布尔     → yes/true/1 与 no/false/0
//   5. 列表     → 按 ',' 拆分,逐个转换,失败元素跳过
//   6. 其他     → 标量强制转换（数值宽化/窄化、字符串→数值、字符串原样）
// 红线: 转换不修改模型,失败一律返回 ConversionError
// ==========================================

use crate::domain::types::{FieldType, FieldValue, RawValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;
use tracing::trace;
use uuid::Uuid;

/// 布尔真值令牌（大小写不敏感）
pub const TRUE_TOKENS: [&str; 3] = ["yes", "true", "1"];

/// 布尔假值令牌（大小写不敏感）
pub const FALSE_TOKENS: [&str; 3] = ["no", "false", "0"];

/// 列表元素分隔符
pub const LIST_SEPARATOR: char = ',';

// 日期时间格式（先于纯日期尝试）
const DATETIME_FORMATS: [&str; 9] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y%m%d%H%M%S",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

/// 转换失败原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("无法解析为日期时间: {value:?}")]
    InvalidDate { value: String },

    #[error("枚举成员不存在: {value:?}")]
    UnknownEnumMember { value: String },

    #[error("无法解析为 GUID: {value:?}")]
    InvalidGuid { value: String },

    #[error("无法识别的布尔值: {value:?}")]
    InvalidBool { value: String },

    #[error("无法将 {value:?} 转换为 {target}")]
    Incompatible { value: String, target: FieldType },

    #[error("数值 {value} 超出 {target} 范围")]
    OutOfRange { value: String, target: FieldType },

    #[error("嵌套对象字段 {target} 不接受原始值")]
    ObjectTarget { target: FieldType },
}

/// 转换结果
pub type ConversionResult = Result<FieldValue, ConversionError>;

// 解析出的时间点: 无时区 / 已知 UTC
enum ParsedInstant {
    Local(NaiveDateTime),
    Zoned(DateTime<Utc>),
}

// ==========================================
// ValueConverter - 值转换器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueConverter;

impl ValueConverter {
    pub fn new() -> Self {
        Self
    }

    /// 将原始值转换为目标类型
    ///
    /// # 参数
    /// - raw: 原始值（调用方已排除 null）
    /// - target: 底层字段类型
    ///
    /// # 返回
    /// - Ok(FieldValue): 转换成功
    /// - Err(ConversionError): 无法转换
    pub fn convert(&self, raw: &RawValue, target: &FieldType) -> ConversionResult {
        match target {
            FieldType::Date | FieldType::DateTime | FieldType::Timestamp => {
                self.convert_temporal(raw, target)
            }
            FieldType::Enum(members) => self.convert_enum(raw, members),
            FieldType::Guid => self.convert_guid(raw),
            FieldType::Bool => self.convert_bool(raw),
            FieldType::List(element) => Ok(self.convert_list(raw, element)),
            _ => self.convert_scalar(raw, target),
        }
    }

    // ===== 规则 1: 日期时间 =====
    fn convert_temporal(&self, raw: &RawValue, target: &FieldType) -> ConversionResult {
        let instant = parse_instant(raw).ok_or_else(|| ConversionError::InvalidDate {
            value: raw.as_text().into_owned(),
        })?;

        let value = match (target, instant) {
            (FieldType::Date, ParsedInstant::Local(dt)) => FieldValue::Date(dt.date()),
            (FieldType::Date, ParsedInstant::Zoned(dt)) => FieldValue::Date(dt.date_naive()),
            (FieldType::DateTime, ParsedInstant::Local(dt)) => FieldValue::DateTime(dt),
            (FieldType::DateTime, ParsedInstant::Zoned(dt)) => FieldValue::DateTime(dt.naive_utc()),
            // 无时区的时间按 UTC 解释
            (_, ParsedInstant::Local(dt)) => {
                FieldValue::Timestamp(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
            }
            (_, ParsedInstant::Zoned(dt)) => FieldValue::Timestamp(dt),
        };
        Ok(value)
    }

    // ===== 规则 2: 枚举 =====
    fn convert_enum(&self, raw: &RawValue, members: &[&str]) -> ConversionResult {
        let text = raw.as_text();
        let token = text.trim();
        members
            .iter()
            .position(|member| member.eq_ignore_ascii_case(token))
            .map(FieldValue::Enum)
            .ok_or_else(|| ConversionError::UnknownEnumMember {
                value: token.to_string(),
            })
    }

    // ===== 规则 3: GUID =====
    fn convert_guid(&self, raw: &RawValue) -> ConversionResult {
        let text = raw.as_text();
        Uuid::parse_str(text.trim())
            .map(FieldValue::Guid)
            .map_err(|_| ConversionError::InvalidGuid {
                value: text.to_string(),
            })
    }

    // ===== 规则 4: 布尔 =====
    fn convert_bool(&self, raw: &RawValue) -> ConversionResult {
        let text = raw.as_text();
        let token = text.trim();
        if TRUE_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            Ok(FieldValue::Bool(true))
        } else if FALSE_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(token)) {
            Ok(FieldValue::Bool(false))
        } else {
            Err(ConversionError::InvalidBool {
                value: token.to_string(),
            })
        }
    }

    // ===== 规则 5: 列表 =====
    // 单个元素失败不影响整体,结果可能为空列表
    fn convert_list(&self, raw: &RawValue, element: &FieldType) -> FieldValue {
        let text = raw.as_text();
        let items = text
            .split(LIST_SEPARATOR)
            .map(str::trim)
            .filter_map(|piece| {
                match self.convert(&RawValue::Text(piece.to_string()), element) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        trace!(piece = piece, error = %e, "列表元素转换失败,跳过");
                        None
                    }
                }
            })
            .collect();
        FieldValue::List(items)
    }

    // ===== 规则 6: 标量 =====
    fn convert_scalar(&self, raw: &RawValue, target: &FieldType) -> ConversionResult {
        match target {
            FieldType::Text => Ok(FieldValue::Text(raw.as_text().into_owned())),
            FieldType::I8 | FieldType::I16 | FieldType::I32 | FieldType::I64 => {
                let value = self.integer_in_range(raw, target)?;
                // 范围已按目标宽度校验
                i64::try_from(value)
                    .map(FieldValue::Int)
                    .map_err(|_| out_of_range(value, target))
            }
            FieldType::U8 | FieldType::U16 | FieldType::U32 | FieldType::U64 => {
                let value = self.integer_in_range(raw, target)?;
                u64::try_from(value)
                    .map(FieldValue::UInt)
                    .map_err(|_| out_of_range(value, target))
            }
            FieldType::F32 => {
                let value = self.float_of(raw, target)?;
                if value.is_finite() && value.abs() > f64::from(f32::MAX) {
                    return Err(ConversionError::OutOfRange {
                        value: value.to_string(),
                        target: *target,
                    });
                }
                Ok(FieldValue::Float(value))
            }
            FieldType::F64 => self.float_of(raw, target).map(FieldValue::Float),
            FieldType::Object(_) => Err(ConversionError::ObjectTarget { target: *target }),
            _ => Err(incompatible(raw, target)),
        }
    }

    fn integer_in_range(&self, raw: &RawValue, target: &FieldType) -> Result<i128, ConversionError> {
        let value = match raw {
            RawValue::Int(v) => i128::from(*v),
            RawValue::Bool(b) => i128::from(*b),
            RawValue::Float(f) => {
                if !f.is_finite() {
                    return Err(incompatible(raw, target));
                }
                let rounded = f.round_ties_even();
                // i128 可容纳所有目标宽度,越界值在下方范围检查中拒绝
                if rounded.abs() >= 1e30 {
                    return Err(out_of_range_text(raw.as_text().into_owned(), target));
                }
                rounded as i128
            }
            RawValue::Text(text) => text
                .trim()
                .parse::<i128>()
                .map_err(|_| incompatible(raw, target))?,
            _ => return Err(incompatible(raw, target)),
        };

        let (min, max) = integer_bounds(target);
        if value < min || value > max {
            return Err(out_of_range(value, target));
        }
        Ok(value)
    }

    fn float_of(&self, raw: &RawValue, target: &FieldType) -> Result<f64, ConversionError> {
        match raw {
            RawValue::Float(f) => Ok(*f),
            RawValue::Int(v) => Ok(*v as f64),
            RawValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            RawValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| incompatible(raw, target)),
            _ => Err(incompatible(raw, target)),
        }
    }
}

fn integer_bounds(target: &FieldType) -> (i128, i128) {
    match target {
        FieldType::I8 => (i128::from(i8::MIN), i128::from(i8::MAX)),
        FieldType::I16 => (i128::from(i16::MIN), i128::from(i16::MAX)),
        FieldType::I32 => (i128::from(i32::MIN), i128::from(i32::MAX)),
        FieldType::U8 => (0, i128::from(u8::MAX)),
        FieldType::U16 => (0, i128::from(u16::MAX)),
        FieldType::U32 => (0, i128::from(u32::MAX)),
        FieldType::U64 => (0, i128::from(u64::MAX)),
        _ => (i128::from(i64::MIN), i128::from(i64::MAX)),
    }
}

fn incompatible(raw: &RawValue, target: &FieldType) -> ConversionError {
    ConversionError::Incompatible {
        value: raw.as_text().into_owned(),
        target: *target,
    }
}

fn out_of_range(value: i128, target: &FieldType) -> ConversionError {
    out_of_range_text(value.to_string(), target)
}

fn out_of_range_text(value: String, target: &FieldType) -> ConversionError {
    ConversionError::OutOfRange {
        value,
        target: *target,
    }
}

fn parse_instant(raw: &RawValue) -> Option<ParsedInstant> {
    match raw {
        RawValue::Date(d) => d.and_hms_opt(0, 0, 0).map(ParsedInstant::Local),
        RawValue::DateTime(dt) => Some(ParsedInstant::Local(*dt)),
        RawValue::Empty => None,
        other => parse_instant_str(other.as_text().trim()),
    }
}

/// 区域无关的日期解析（ISO / 斜杠 / 美式不变区域 / 紧凑格式 / RFC 3339）
fn parse_instant_str(text: &str) -> Option<ParsedInstant> {
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(ParsedInstant::Zoned(dt.with_timezone(&Utc)));
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(ParsedInstant::Local(dt));
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(ParsedInstant::Local)
}
