// ==========================================
// 多菜式餐单聚合系统 - 引擎层
// ==========================================
// 职责: 跨菜谱的用量合并、冲突检测、排序与估算
// 红线: Engine 不拼 SQL,不抛错（错误只来自记录获取边界）
// ==========================================

pub mod conflict_detector;
pub mod cost_estimator;
pub mod formatter;
pub mod ingredient_consolidator;
pub mod orchestrator;
pub mod selection_index;
pub mod time_estimator;
pub mod timeline_builder;
pub mod tool_consolidator;

// 重导出核心引擎
pub use conflict_detector::ConflictDetector;
pub use cost_estimator::{CostEstimator, NoPricingCostEstimator};
pub use formatter::{
    generate_prep_timeline, generate_shopping_list, shopping_list_to_csv, PrepTimeline,
    PrepTimelineSection, ShoppingList, ShoppingListSection,
};
pub use ingredient_consolidator::IngredientConsolidator;
pub use orchestrator::{
    build_meal_plan, AggregationError, AggregationSettings, FetchedRecords, MealPlanAggregator,
};
pub use selection_index::SelectionIndex;
pub use time_estimator::TimeEstimator;
pub use timeline_builder::TimelineBuilder;
pub use tool_consolidator::ToolConsolidator;
