// ==========================================
// 多菜式餐单聚合系统 - API 层
// ==========================================
// 职责: 对外暴露餐单聚合与视图接口
// ==========================================

pub mod error;
pub mod meal_plan_api;

pub use error::{ApiError, ApiResult};
pub use meal_plan_api::{MealPlanApi, RecipeRequest};
