// ==========================================
// 多菜式餐单聚合系统 - 餐单 API
// ==========================================
// 职责: 餐单聚合入口、菜谱ID解析、购物清单 / 备餐时间线视图、CSV 导出
// ==========================================

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::config::AggregatorConfigReader;
use crate::domain::meal_plan::MealPlan;
use crate::domain::recipe::MealRecipeSelection;
use crate::domain::types::CourseRole;
use crate::engine::cost_estimator::CostEstimator;
use crate::engine::formatter::{
    generate_prep_timeline, generate_shopping_list, shopping_list_to_csv, PrepTimeline,
    ShoppingList,
};
use crate::engine::orchestrator::MealPlanAggregator;
use crate::repository::RecordFetcher;

// ==========================================
// RecipeRequest - 按菜谱ID选菜
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeRequest {
    pub recipe_id: String,
    pub course_role: CourseRole,
    pub requested_servings: u32,
}

impl RecipeRequest {
    pub fn new(recipe_id: impl Into<String>, course_role: CourseRole, requested_servings: u32) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            course_role,
            requested_servings,
        }
    }

    /// 解析 "RECIPE_ID:COURSE:SERVINGS" 形式的文本
    ///
    /// # 示例
    /// ```
    /// use meal_plan_aggregator::api::RecipeRequest;
    /// use meal_plan_aggregator::domain::CourseRole;
    ///
    /// let req = RecipeRequest::parse("r1:dessert:6").unwrap();
    /// assert_eq!(req.course_role, CourseRole::Dessert);
    /// assert_eq!(req.requested_servings, 6);
    /// ```
    pub fn parse(text: &str) -> ApiResult<Self> {
        let parts: Vec<&str> = text.split(':').map(str::trim).collect();
        let [recipe_id, course, servings] = parts.as_slice() else {
            return Err(ApiError::InvalidInput(format!(
                "选菜格式应为 RECIPE_ID:COURSE:SERVINGS, 实际: {}",
                text
            )));
        };

        if recipe_id.is_empty() {
            return Err(ApiError::InvalidInput("recipe_id 不能为空".to_string()));
        }
        let course_role = CourseRole::parse(course)
            .ok_or_else(|| ApiError::InvalidInput(format!("未知菜式角色: {}", course)))?;
        let requested_servings = servings
            .parse::<u32>()
            .map_err(|_| ApiError::InvalidInput(format!("份数无效: {}", servings)))?;

        Ok(Self::new(*recipe_id, course_role, requested_servings))
    }
}

// ==========================================
// MealPlanApi - 餐单 API
// ==========================================
pub struct MealPlanApi<F, C>
where
    F: RecordFetcher,
    C: AggregatorConfigReader,
{
    aggregator: MealPlanAggregator<F, C>,
}

impl<F, C> MealPlanApi<F, C>
where
    F: RecordFetcher,
    C: AggregatorConfigReader,
{
    /// 创建新的 MealPlanApi 实例
    ///
    /// # 参数
    /// - fetcher: 记录获取
    /// - config: 配置读取器
    pub fn new(fetcher: Arc<F>, config: Arc<C>) -> Self {
        Self {
            aggregator: MealPlanAggregator::new(fetcher, config),
        }
    }

    /// 替换成本估算实现
    pub fn with_cost_estimator(self, cost_estimator: Arc<dyn CostEstimator>) -> Self {
        Self {
            aggregator: self.aggregator.with_cost_estimator(cost_estimator),
        }
    }

    /// 聚合餐单（调用方已给出完整菜谱元数据）
    pub async fn build_meal_plan(&self, selections: &[MealRecipeSelection]) -> ApiResult<MealPlan> {
        let plan = self.aggregator.aggregate(selections).await?;

        info!(
            plan_id = %plan.plan_id,
            total_servings = plan.total_servings,
            conflicts = plan.tool_conflicts.len(),
            "餐单聚合成功"
        );
        Ok(plan)
    }

    /// 按菜谱ID聚合餐单: 先读取菜谱元数据,再执行聚合
    ///
    /// # 返回
    /// - Err(ApiError::NotFound): 存在未知的菜谱ID
    pub async fn build_meal_plan_for_recipes(
        &self,
        requests: &[RecipeRequest],
    ) -> ApiResult<MealPlan> {
        let selections = self.resolve_selections(requests).await?;
        self.build_meal_plan(&selections).await
    }

    /// 将按ID的选菜请求解析为完整选菜（保持请求顺序）
    pub async fn resolve_selections(
        &self,
        requests: &[RecipeRequest],
    ) -> ApiResult<Vec<MealRecipeSelection>> {
        let mut ids: Vec<String> = Vec::with_capacity(requests.len());
        for request in requests {
            if !ids.contains(&request.recipe_id) {
                ids.push(request.recipe_id.clone());
            }
        }

        let recipes = self.aggregator.fetcher().fetch_recipes(&ids).await?;

        let mut selections = Vec::with_capacity(requests.len());
        for request in requests {
            let Some(recipe) = recipes.iter().find(|r| r.id == request.recipe_id) else {
                warn!(recipe_id = %request.recipe_id, "菜谱不存在");
                return Err(ApiError::NotFound(format!(
                    "Recipe(id={})不存在",
                    request.recipe_id
                )));
            };
            selections.push(MealRecipeSelection::new(
                recipe.clone(),
                request.course_role,
                request.requested_servings,
            ));
        }

        Ok(selections)
    }

    /// 购物清单视图
    pub fn shopping_list(&self, plan: &MealPlan) -> ShoppingList {
        generate_shopping_list(&plan.consolidated_ingredients)
    }

    /// 备餐时间线视图
    pub fn prep_timeline(&self, plan: &MealPlan) -> PrepTimeline {
        generate_prep_timeline(&plan.task_timeline)
    }

    /// 导出购物清单 CSV
    pub fn export_shopping_list_csv(&self, plan: &MealPlan) -> ApiResult<String> {
        shopping_list_to_csv(&self.shopping_list(plan))
            .map_err(|e| ApiError::ExportError(e.to_string()))
    }
}
