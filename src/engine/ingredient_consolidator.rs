// ==========================================
// 多菜式餐单聚合系统 - 食材合并引擎
// ==========================================
// 职责: 将各菜谱用料按份数倍率缩放后,合并为每种食材一行的购物清单
// 输入: 用料记录（已关联食材目录） + 选菜列表
// 输出: ConsolidatedIngredient 列表（按类别稳定排序）
// 红线: 不抛错;未选中菜谱的用料行直接丢弃
// ==========================================

use crate::domain::meal_plan::ConsolidatedIngredient;
use crate::domain::recipe::{IngredientUsageRecord, MealRecipeSelection};
use crate::engine::selection_index::SelectionIndex;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// IngredientConsolidator - 食材合并引擎
// ==========================================
pub struct IngredientConsolidator {
    // 无状态引擎,不需要注入依赖
}

impl IngredientConsolidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 合并食材
    ///
    /// 规则:
    /// 1) 按 recipe_id 定位选菜,找不到则跳过该行
    /// 2) adjusted = amount(缺失为0) * requested / max(base, 1)
    /// 3) 按 ingredient.id 分组: 首行建条目,后续行累加用量并追加菜谱名
    /// 4) 按 category 字典序稳定排序
    ///
    /// # 参数
    /// - `records`: 用料记录
    /// - `selections`: 选菜列表
    ///
    /// # 返回
    /// 合并后的购物清单行
    #[instrument(skip_all, fields(
        records_count = records.len(),
        selections_count = selections.len()
    ))]
    pub fn consolidate(
        &self,
        records: &[IngredientUsageRecord],
        selections: &[MealRecipeSelection],
    ) -> Vec<ConsolidatedIngredient> {
        let index = SelectionIndex::new(selections);

        // ingredient_id -> consolidated 中的下标
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut consolidated: Vec<ConsolidatedIngredient> = Vec::new();
        let mut skipped = 0usize;

        for record in records {
            let Some(selection) = index.find(&record.usage.recipe_id) else {
                skipped += 1;
                continue;
            };

            let adjusted_amount =
                record.usage.amount.unwrap_or(0.0) * selection.serving_multiplier();

            match slots.get(record.ingredient.id.as_str()) {
                Some(&slot) => {
                    let entry = &mut consolidated[slot];
                    entry.total_amount += adjusted_amount;
                    entry.used_in.push(selection.recipe.name.clone());
                }
                None => {
                    slots.insert(record.ingredient.id.as_str(), consolidated.len());
                    consolidated.push(ConsolidatedIngredient {
                        ingredient: record.ingredient.clone(),
                        total_amount: adjusted_amount,
                        unit: record
                            .usage
                            .unit
                            .clone()
                            .filter(|u| !u.trim().is_empty())
                            .or_else(|| record.ingredient.standard_unit.clone()),
                        used_in: vec![selection.recipe.name.clone()],
                        category: record.ingredient.category.clone(),
                    });
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, "跳过未选中菜谱的用料行");
        }

        consolidated.sort_by(|a, b| a.category.cmp(&b.category));
        consolidated
    }
}

impl Default for IngredientConsolidator {
    fn default() -> Self {
        Self::new()
    }
}
