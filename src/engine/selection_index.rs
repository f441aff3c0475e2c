// ==========================================
// 多菜式餐单聚合系统 - 选菜索引
// ==========================================
// 职责: 按 recipe_id 定位调用方选中的菜谱
// 说明: 同一 recipe_id 出现多次时,以第一条为准
// ==========================================

use crate::domain::recipe::MealRecipeSelection;
use std::collections::HashMap;

/// 单次聚合调用内的选菜索引（生命周期绑定到调用方的选菜列表）
pub struct SelectionIndex<'a> {
    by_recipe_id: HashMap<&'a str, &'a MealRecipeSelection>,
}

impl<'a> SelectionIndex<'a> {
    pub fn new(selections: &'a [MealRecipeSelection]) -> Self {
        let mut by_recipe_id = HashMap::with_capacity(selections.len());
        for selection in selections {
            by_recipe_id
                .entry(selection.recipe.id.as_str())
                .or_insert(selection);
        }
        Self { by_recipe_id }
    }

    /// 查找选菜记录,未选中返回 None
    pub fn find(&self, recipe_id: &str) -> Option<&'a MealRecipeSelection> {
        self.by_recipe_id.get(recipe_id).copied()
    }

    pub fn contains(&self, recipe_id: &str) -> bool {
        self.by_recipe_id.contains_key(recipe_id)
    }

    /// 菜谱展示名称,未选中时回退为 recipe_id
    pub fn recipe_name(&self, recipe_id: &str) -> String {
        self.find(recipe_id)
            .map(|s| s.recipe.name.clone())
            .unwrap_or_else(|| recipe_id.to_string())
    }
}
