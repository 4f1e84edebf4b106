// ==========================================
// 表格行绑定引擎 - 绑定诊断通道
// ==========================================
// 职责: 可选地暴露被跳过的列与被丢弃的行
// 默认: SilentObserver（对外行为保持静默降级）
// ==========================================

use crate::domain::model::WriteError;
use crate::engine::path_resolver::ResolveError;
use crate::engine::value_converter::ConversionError;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// 单列被跳过的原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("列已显式解除绑定")]
    Unbound,

    #[error("原始值为空")]
    NullValue,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// 跳过原因分类（用于汇总统计）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipKind {
    Unbound,
    NullValue,
    UnresolvedPath,
    ConversionFailed,
    WriteRejected,
}

impl SkipReason {
    pub fn kind(&self) -> SkipKind {
        match self {
            SkipReason::Unbound => SkipKind::Unbound,
            SkipReason::NullValue => SkipKind::NullValue,
            SkipReason::Resolve(_) => SkipKind::UnresolvedPath,
            SkipReason::Conversion(_) => SkipKind::ConversionFailed,
            SkipReason::Write(_) => SkipKind::WriteRejected,
        }
    }
}

// ==========================================
// BindObserver Trait
// ==========================================
// 行号从 1 开始（不含表头）
pub trait BindObserver {
    /// 某列在某行被跳过
    fn column_skipped(&mut self, row_number: usize, column: &str, reason: &SkipReason) {
        let _ = (row_number, column, reason);
    }

    /// 某行通过校验
    fn row_accepted(&mut self, row_number: usize) {
        let _ = row_number;
    }

    /// 某行未通过校验被丢弃
    fn row_rejected(&mut self, row_number: usize, missing: &[&'static str]) {
        let _ = (row_number, missing);
    }
}

/// 静默观察者（默认）
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl BindObserver for SilentObserver {}

/// 被跳过的列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedColumn {
    pub row_number: usize,
    pub column: String,
    pub kind: SkipKind,
    pub message: String,
}

/// 被丢弃的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub row_number: usize,
    pub missing_fields: Vec<String>,
}

/// 映射报告（收集型观察者）
///
/// 空值跳过属于常态,只计数不记录明细
#[derive(Debug, Clone, Default, Serialize)]
pub struct MappingReport {
    pub accepted_rows: usize,
    pub rejected_rows: Vec<RejectedRow>,
    pub skipped_columns: Vec<SkippedColumn>,
    pub skip_counts: BTreeMap<SkipKind, usize>,
}

impl MappingReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已处理的行数（通过 + 丢弃）
    pub fn total_rows(&self) -> usize {
        self.accepted_rows + self.rejected_rows.len()
    }

    pub fn skip_count(&self, kind: SkipKind) -> usize {
        self.skip_counts.get(&kind).copied().unwrap_or(0)
    }

    /// 是否存在需要关注的问题（配置错误/转换失败/写入拒绝/整行丢弃）
    pub fn has_issues(&self) -> bool {
        !self.rejected_rows.is_empty() || !self.skipped_columns.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl BindObserver for MappingReport {
    fn column_skipped(&mut self, row_number: usize, column: &str, reason: &SkipReason) {
        let kind = reason.kind();
        *self.skip_counts.entry(kind).or_insert(0) += 1;

        if matches!(kind, SkipKind::NullValue | SkipKind::Unbound) {
            return;
        }
        self.skipped_columns.push(SkippedColumn {
            row_number,
            column: column.to_string(),
            kind,
            message: reason.to_string(),
        });
    }

    fn row_accepted(&mut self, _row_number: usize) {
        self.accepted_rows += 1;
    }

    fn row_rejected(&mut self, row_number: usize, missing: &[&'static str]) {
        self.rejected_rows.push(RejectedRow {
            row_number,
            missing_fields: missing.iter().map(|f| f.to_string()).collect(),
        });
    }
}
