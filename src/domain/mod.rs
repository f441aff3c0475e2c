// ==========================================
// 多菜式餐单聚合系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod meal_plan;
pub mod recipe;
pub mod types;

// 重导出核心类型
pub use meal_plan::{
    ConsolidatedIngredient, ConsolidatedTool, MealPlan, TaskTimelineEntry, TimeEstimate,
    ToolConflict,
};
pub use recipe::{
    Ingredient, IngredientUsageRecord, MealRecipeSelection, Recipe, RecipeIngredientUsage,
    RecipeToolUsage, Task, Tool, ToolUsageRecord,
};
pub use types::{CourseRole, KitchenRole, ShoppingCategory, UNKNOWN_ROLE_PRIORITY};
