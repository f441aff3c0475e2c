// ==========================================
// 多菜式餐单聚合系统 - 厨具合并引擎
// ==========================================
// 职责: 将各菜谱所需厨具合并为每种厨具一行
// 红线: 数量取各菜谱峰值（max）,不求和
// ==========================================

use crate::domain::meal_plan::{ConsolidatedTool, ToolConflict};
use crate::domain::recipe::{MealRecipeSelection, Tool, ToolUsageRecord};
use crate::engine::selection_index::SelectionIndex;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// quantity_needed 缺失时的默认数量
pub const DEFAULT_TOOL_QUANTITY: u32 = 1;

// ==========================================
// ToolConsolidator - 厨具合并引擎
// ==========================================
pub struct ToolConsolidator {
    // 无状态引擎,不需要注入依赖
}

impl ToolConsolidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 合并厨具
    ///
    /// # 参数
    /// - `records`: 厨具记录（已关联厨具目录）
    /// - `selections`: 选菜列表
    ///
    /// # 返回
    /// 按厨具类别稳定排序的厨具清单,conflicts 为空（由 attach_conflicts 填充）
    #[instrument(skip_all, fields(
        records_count = records.len(),
        selections_count = selections.len()
    ))]
    pub fn consolidate(
        &self,
        records: &[ToolUsageRecord],
        selections: &[MealRecipeSelection],
    ) -> Vec<ConsolidatedTool> {
        let index = SelectionIndex::new(selections);

        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut consolidated: Vec<ConsolidatedTool> = Vec::new();

        for record in records {
            let Some(selection) = index.find(&record.usage.recipe_id) else {
                debug!(
                    recipe_id = %record.usage.recipe_id,
                    tool_id = %record.tool.id,
                    "跳过未选中菜谱的厨具行"
                );
                continue;
            };

            let quantity = record.usage.quantity_needed.unwrap_or(DEFAULT_TOOL_QUANTITY);

            match slots.get(record.tool.id.as_str()) {
                Some(&slot) => {
                    let entry = &mut consolidated[slot];
                    entry.max_simultaneous_needed = entry.max_simultaneous_needed.max(quantity);
                    entry.used_in.push(selection.recipe.name.clone());
                }
                None => {
                    slots.insert(record.tool.id.as_str(), consolidated.len());
                    consolidated.push(ConsolidatedTool {
                        tool: record.tool.clone(),
                        max_simultaneous_needed: quantity,
                        used_in: vec![selection.recipe.name.clone()],
                        conflicts: Vec::new(),
                    });
                }
            }
        }

        consolidated.sort_by(|a, b| a.tool.category.cmp(&b.tool.category));
        consolidated
    }

    /// 将冲突挂到对应厨具行
    pub fn attach_conflicts(&self, tools: &mut [ConsolidatedTool], conflicts: &[ToolConflict]) {
        for tool in tools.iter_mut() {
            tool.conflicts = conflicts
                .iter()
                .filter(|c| c.tool.id == tool.tool.id)
                .cloned()
                .collect();
        }
    }

    /// 厨具目录（tool_id -> Tool）,供冲突检测解析任务引用的厨具
    pub fn tool_catalog(&self, records: &[ToolUsageRecord]) -> HashMap<String, Tool> {
        let mut catalog = HashMap::new();
        for record in records {
            catalog
                .entry(record.tool.id.clone())
                .or_insert_with(|| record.tool.clone());
        }
        catalog
    }
}

impl Default for ToolConsolidator {
    fn default() -> Self {
        Self::new()
    }
}
