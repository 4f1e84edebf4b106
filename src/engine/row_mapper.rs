// ==========================================
// 表格行绑定引擎 - 行映射器
// ==========================================
// 流程: 打开数据源 → 逐行绑定 → 校验 → 收集通过的行
// 红线:
//   - 数据源打开/读取失败 → 整个调用失败,不返回部分结果
//   - 单列失败只跳过该列,单行失败只丢弃该行
//   - 输出顺序 = 数据源行顺序
// ==========================================

use crate::domain::model::BindTarget;
use crate::engine::binding_plan::{BindingPlan, RowOutcome};
use crate::engine::diagnostics::{BindObserver, SilentObserver, SkipReason};
use crate::importer::error::ImportResult;
use crate::importer::row_source_trait::RowSource;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument, warn};

// ==========================================
// RowMapper - 行映射器
// ==========================================
pub struct RowMapper<S: RowSource> {
    source: S,
}

impl<S: RowSource> RowMapper<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 映射数据源中的全部行
    ///
    /// # 参数
    /// - source_id: 数据源标识（文件路径）
    /// - plan: 绑定计划
    ///
    /// # 返回
    /// - Ok(Vec<T>): 通过校验的模型（可能为空,空 ≠ 数据源不存在）
    /// - Err(ImportError): 数据源打开/读取失败
    pub fn map<T>(&self, source_id: impl AsRef<Path>, plan: &BindingPlan) -> ImportResult<Vec<T>>
    where
        T: BindTarget + Default,
    {
        self.map_with_observer(source_id, plan, &mut SilentObserver)
    }

    /// 映射全部行,并把跳过的列/丢弃的行通知给观察者
    #[instrument(skip_all, fields(source = %source_id.as_ref().display()))]
    pub fn map_with_observer<T>(
        &self,
        source_id: impl AsRef<Path>,
        plan: &BindingPlan,
        observer: &mut dyn BindObserver,
    ) -> ImportResult<Vec<T>>
    where
        T: BindTarget + Default,
    {
        let source_id = source_id.as_ref();
        info!(columns = plan.len(), enforce_non_nullable = plan.policy().enforce_non_nullable, "开始映射");

        let rows = self.source.open(source_id)?;
        let mut observer = PlanWarnings::new(observer);

        let mut models = Vec::new();
        let mut rejected = 0usize;
        for (idx, row) in rows.enumerate() {
            let row = row?;
            let row_number = idx + 1;

            match plan.bind_row::<T>(&row, row_number, &mut observer) {
                RowOutcome::Accepted(model) => models.push(model),
                RowOutcome::Rejected { .. } => rejected += 1,
            }
        }

        info!(accepted = models.len(), rejected, "映射完成");
        Ok(models)
    }
}

// ==========================================
// PlanWarnings - 配置错误告警
// ==========================================
// 路径无法解析属于绑定计划的配置错误,每列只告警一次
struct PlanWarnings<'o> {
    inner: &'o mut dyn BindObserver,
    warned: HashSet<String>,
}

impl<'o> PlanWarnings<'o> {
    fn new(inner: &'o mut dyn BindObserver) -> Self {
        Self {
            inner,
            warned: HashSet::new(),
        }
    }
}

impl BindObserver for PlanWarnings<'_> {
    fn column_skipped(&mut self, row_number: usize, column: &str, reason: &SkipReason) {
        if let SkipReason::Resolve(e) = reason {
            if self.warned.insert(column.to_string()) {
                warn!(column, error = %e, "绑定路径无法解析,该列将被忽略");
            }
        }
        self.inner.column_skipped(row_number, column, reason);
    }

    fn row_accepted(&mut self, row_number: usize) {
        self.inner.row_accepted(row_number);
    }

    fn row_rejected(&mut self, row_number: usize, missing: &[&'static str]) {
        self.inner.row_rejected(row_number, missing);
    }
}
