// ==========================================
// 多菜式餐单聚合系统 - 成本估算
// ==========================================
// 现状: 尚未接入食材单价数据源,默认实现恒返回 0
// 扩展: 接入价格数据后实现 CostEstimator 并注入 MealPlanAggregator
// ==========================================

use crate::domain::meal_plan::ConsolidatedIngredient;

/// 成本估算接口
pub trait CostEstimator: Send + Sync {
    /// 估算购物清单总成本（货币单位）
    fn estimate(&self, ingredients: &[ConsolidatedIngredient]) -> f64;
}

/// 无价格数据时的估算器,恒返回 0
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPricingCostEstimator;

impl CostEstimator for NoPricingCostEstimator {
    fn estimate(&self, _ingredients: &[ConsolidatedIngredient]) -> f64 {
        0.0
    }
}
