// ==========================================
// 表格行绑定引擎 - 绑定计划
// ==========================================
// 职责: 列名 → 字段路径表 + 校验策略,逐行驱动 解析 → 转换 → 写入 → 校验
// 红线: 构造后只读; 单字段失败只跳过该列,行的丢弃只发生在校验阶段
// ==========================================

use crate::config::{BindingConfig, Policy};
use crate::domain::model::BindTarget;
use crate::domain::types::{RawRow, RawValue};
use crate::engine::diagnostics::{BindObserver, SkipReason};
use crate::engine::path_resolver::{self, FieldPath};
use crate::engine::validator::Validator;
use crate::engine::value_converter::ValueConverter;
use std::collections::HashMap;
use tracing::debug;

/// 单列的绑定目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnBinding {
    Unbound, // 显式不绑定（路径为空白）
    Path(FieldPath),
}

/// 单列处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOutcome {
    Bound,                 // 已写入
    Ignored,               // 列不在绑定计划中
    Skipped(SkipReason),   // 跳过（模型未被写入该字段）
}

/// 单行处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome<T> {
    Accepted(T),
    Rejected { missing: Vec<&'static str> },
}

impl<T> RowOutcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RowOutcome::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            RowOutcome::Accepted(model) => Some(model),
            RowOutcome::Rejected { .. } => None,
        }
    }
}

// ==========================================
// BindingPlan - 绑定计划
// ==========================================
#[derive(Debug, Clone)]
pub struct BindingPlan {
    columns: HashMap<String, ColumnBinding>,
    policy: Policy,
    converter: ValueConverter,
    validator: Validator,
}

impl BindingPlan {
    /// 创建绑定计划
    ///
    /// # 参数
    /// - columns: 列名 → 点分字段路径（如 "Engine.Type"; 空白表示显式不绑定）
    /// - policy: 校验策略
    ///
    /// # 说明
    /// - 列名两端空白会被去除（与 Row Source 的表头处理一致）
    /// - 路径段是否存在不在此处校验,首次解析时才暴露
    pub fn new<I, K, V>(columns: I, policy: Policy) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let columns = columns
            .into_iter()
            .map(|(column, path)| {
                let binding = match FieldPath::parse(path.as_ref()) {
                    Some(path) => ColumnBinding::Path(path),
                    None => ColumnBinding::Unbound,
                };
                (column.into().trim().to_string(), binding)
            })
            .collect();

        Self {
            columns,
            policy,
            converter: ValueConverter::new(),
            validator: Validator::new(policy),
        }
    }

    /// 从绑定配置创建
    pub fn from_config(config: BindingConfig) -> Self {
        Self::new(config.columns, config.policy)
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn binding(&self, column: &str) -> Option<&ColumnBinding> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 处理单列: 解析路径 → 空值检查 → 转换 → 写入
    ///
    /// 路径解析先于空值检查,因此空值列也可能已构造出中间对象
    pub fn bind_column(
        &self,
        model: &mut dyn BindTarget,
        column: &str,
        raw: &RawValue,
    ) -> ColumnOutcome {
        let path = match self.columns.get(column) {
            None => return ColumnOutcome::Ignored,
            Some(ColumnBinding::Unbound) => return ColumnOutcome::Skipped(SkipReason::Unbound),
            Some(ColumnBinding::Path(path)) => path,
        };

        let slot = match path_resolver::resolve(model, path) {
            Ok(slot) => slot,
            Err(e) => return ColumnOutcome::Skipped(e.into()),
        };

        if raw.is_null() {
            return ColumnOutcome::Skipped(SkipReason::NullValue);
        }

        // 描述符中的类型已剥离可空包装
        let value = match self.converter.convert(raw, &slot.descriptor.ty) {
            Ok(value) => value,
            Err(e) => return ColumnOutcome::Skipped(e.into()),
        };

        match slot.holder.write_field(slot.descriptor.name, value) {
            Ok(()) => ColumnOutcome::Bound,
            Err(e) => ColumnOutcome::Skipped(e.into()),
        }
    }

    /// 将一行写入模型（按原始行的列顺序）
    ///
    /// # 返回
    /// - 成功写入的列数
    pub fn apply_row(
        &self,
        row: &RawRow,
        model: &mut dyn BindTarget,
        row_number: usize,
        observer: &mut dyn BindObserver,
    ) -> usize {
        let mut bound = 0;
        for (column, raw) in row.iter() {
            match self.bind_column(model, column, raw) {
                ColumnOutcome::Bound => bound += 1,
                ColumnOutcome::Ignored => {}
                ColumnOutcome::Skipped(reason) => {
                    debug!(row_number, column, reason = %reason, "列已跳过");
                    observer.column_skipped(row_number, column, &reason);
                }
            }
        }
        bound
    }

    /// 绑定并校验一行
    ///
    /// # 参数
    /// - row: 原始行
    /// - row_number: 行号（从 1 开始,仅用于诊断）
    /// - observer: 诊断观察者
    pub fn bind_row<T>(
        &self,
        row: &RawRow,
        row_number: usize,
        observer: &mut dyn BindObserver,
    ) -> RowOutcome<T>
    where
        T: BindTarget + Default,
    {
        let mut model = T::default();
        self.apply_row(row, &mut model, row_number, observer);

        let missing = self.validator.missing_required(&model);
        if missing.is_empty() {
            observer.row_accepted(row_number);
            RowOutcome::Accepted(model)
        } else {
            debug!(row_number, missing = ?missing, "行未通过非空校验,已丢弃");
            observer.row_rejected(row_number, &missing);
            RowOutcome::Rejected { missing }
        }
    }
}
