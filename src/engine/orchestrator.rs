// ==========================================
// 多菜式餐单聚合系统 - 聚合编排器
// ==========================================
// 主流程:
// 1) 读取配置（并行系数 / 争用操作类型）
// 2) 并发读取用料 / 厨具 / 任务三类记录（三者互不依赖）
// 3) 食材合并、厨具合并、冲突检测、时间线构建（纯计算）
// 4) 时间估算（基于时间线）、成本估算（基于合并食材）
// 5) 组装 MealPlan
// 红线: 记录获取失败直接向上传播;第3-5步不抛错
// ==========================================

use crate::config::AggregatorConfigReader;
use crate::domain::meal_plan::MealPlan;
use crate::domain::recipe::{IngredientUsageRecord, MealRecipeSelection, Task, ToolUsageRecord};
use crate::engine::conflict_detector::{ConflictDetector, DEFAULT_CONTENDED_TASK_TYPES};
use crate::engine::cost_estimator::{CostEstimator, NoPricingCostEstimator};
use crate::engine::ingredient_consolidator::IngredientConsolidator;
use crate::engine::time_estimator::{TimeEstimator, DEFAULT_PARALLELIZATION_FACTOR};
use crate::engine::timeline_builder::TimelineBuilder;
use crate::engine::tool_consolidator::ToolConsolidator;
use crate::repository::{RecordFetcher, RepositoryError};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// AggregationError - 聚合错误
// ==========================================
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("记录获取失败: {0}")]
    Fetch(#[from] RepositoryError),

    #[error("配置读取失败: {0}")]
    Config(String),
}

// ==========================================
// FetchedRecords - 一次聚合所需的原始记录
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FetchedRecords {
    pub ingredient_usages: Vec<IngredientUsageRecord>,
    pub tool_usages: Vec<ToolUsageRecord>,
    pub tasks: Vec<Task>,
}

// ==========================================
// AggregationSettings - 聚合参数
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSettings {
    pub parallelization_factor: f64,
    pub contended_task_types: Vec<String>,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            parallelization_factor: DEFAULT_PARALLELIZATION_FACTOR,
            contended_task_types: DEFAULT_CONTENDED_TASK_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

// ==========================================
// MealPlanAggregator - 聚合编排器
// ==========================================
pub struct MealPlanAggregator<F, C>
where
    F: RecordFetcher,
    C: AggregatorConfigReader,
{
    fetcher: Arc<F>,
    config: Arc<C>,
    cost_estimator: Arc<dyn CostEstimator>,
}

impl<F, C> MealPlanAggregator<F, C>
where
    F: RecordFetcher,
    C: AggregatorConfigReader,
{
    /// 创建编排器（成本估算使用 NoPricingCostEstimator）
    ///
    /// # 参数
    /// - fetcher: 记录获取
    /// - config: 配置读取器
    pub fn new(fetcher: Arc<F>, config: Arc<C>) -> Self {
        Self {
            fetcher,
            config,
            cost_estimator: Arc::new(NoPricingCostEstimator),
        }
    }

    /// 替换成本估算实现
    pub fn with_cost_estimator(mut self, cost_estimator: Arc<dyn CostEstimator>) -> Self {
        self.cost_estimator = cost_estimator;
        self
    }

    pub fn fetcher(&self) -> &Arc<F> {
        &self.fetcher
    }

    /// 执行一次餐单聚合
    ///
    /// # 参数
    /// - selections: 选菜列表
    ///
    /// # 返回
    /// - Ok(MealPlan): 聚合结果
    /// - Err: 配置或记录获取失败
    #[instrument(skip_all, fields(selections_count = selections.len()))]
    pub async fn aggregate(
        &self,
        selections: &[MealRecipeSelection],
    ) -> Result<MealPlan, AggregationError> {
        let settings = self.load_settings().await?;

        let recipe_ids = distinct_recipe_ids(selections);
        info!(recipe_count = recipe_ids.len(), "开始读取菜谱记录");

        let (ingredient_usages, tool_usages, tasks) = futures::try_join!(
            self.fetcher.fetch_ingredient_usages(&recipe_ids),
            self.fetcher.fetch_tool_usages(&recipe_ids),
            self.fetcher.fetch_tasks(&recipe_ids),
        )?;

        let records = FetchedRecords {
            ingredient_usages,
            tool_usages,
            tasks,
        };

        Ok(build_meal_plan(
            selections,
            &records,
            &settings,
            self.cost_estimator.as_ref(),
        ))
    }

    async fn load_settings(&self) -> Result<AggregationSettings, AggregationError> {
        let parallelization_factor = self
            .config
            .get_parallelization_factor()
            .await
            .map_err(|e| AggregationError::Config(e.to_string()))?;
        let contended_task_types = self
            .config
            .get_contended_task_types()
            .await
            .map_err(|e| AggregationError::Config(e.to_string()))?;

        Ok(AggregationSettings {
            parallelization_factor,
            contended_task_types,
        })
    }
}

// ==========================================
// 纯计算部分
// ==========================================

/// 基于已获取的记录构建 MealPlan（同步、无 IO）
#[instrument(skip_all, fields(
    selections_count = selections.len(),
    ingredient_rows = records.ingredient_usages.len(),
    tool_rows = records.tool_usages.len(),
    task_rows = records.tasks.len()
))]
pub fn build_meal_plan(
    selections: &[MealRecipeSelection],
    records: &FetchedRecords,
    settings: &AggregationSettings,
    cost_estimator: &dyn CostEstimator,
) -> MealPlan {
    let total_servings = selections
        .iter()
        .fold(0u32, |acc, s| acc.saturating_add(s.requested_servings));

    let consolidated_ingredients =
        IngredientConsolidator::new().consolidate(&records.ingredient_usages, selections);

    let tool_consolidator = ToolConsolidator::new();
    let mut consolidated_tools = tool_consolidator.consolidate(&records.tool_usages, selections);
    let tool_catalog = tool_consolidator.tool_catalog(&records.tool_usages);

    let tool_conflicts = ConflictDetector::with_contended_task_types(
        settings.contended_task_types.iter().cloned(),
    )
    .detect(&records.tasks, selections, &tool_catalog);
    tool_consolidator.attach_conflicts(&mut consolidated_tools, &tool_conflicts);

    let task_timeline = TimelineBuilder::new().build(&records.tasks, selections);

    let time_estimate = TimeEstimator::with_parallelization_factor(settings.parallelization_factor)
        .estimate(&task_timeline);

    let estimated_cost = cost_estimator.estimate(&consolidated_ingredients);

    debug!(
        ingredients = consolidated_ingredients.len(),
        tools = consolidated_tools.len(),
        conflicts = tool_conflicts.len(),
        timeline = task_timeline.len(),
        total_time = time_estimate.total_time,
        "餐单聚合完成"
    );

    MealPlan {
        plan_id: Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        recipes: selections.to_vec(),
        total_servings,
        consolidated_ingredients,
        consolidated_tools,
        task_timeline,
        estimated_total_time: time_estimate.total_time,
        estimated_active_time: time_estimate.active_time,
        estimated_passive_time: time_estimate.passive_time,
        tool_conflicts,
        estimated_cost,
    }
}

/// 选菜中出现的菜谱ID（去重,保持首次出现顺序）
pub fn distinct_recipe_ids(selections: &[MealRecipeSelection]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::with_capacity(selections.len());
    for selection in selections {
        if !ids.contains(&selection.recipe.id) {
            ids.push(selection.recipe.id.clone());
        }
    }
    ids
}
