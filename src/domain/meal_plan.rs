// ==========================================
// 多菜式餐单聚合系统 - 餐单聚合结果模型
// ==========================================
// 职责: 合并后的食材/厨具、冲突、时间线与 MealPlan 聚合根
// 红线: 每次聚合新建,构造后不再修改,本系统不持久化
// ==========================================

use crate::domain::recipe::{Ingredient, MealRecipeSelection, Recipe, Task, Tool};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ConsolidatedIngredient - 购物清单行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedIngredient {
    pub ingredient: Ingredient,
    pub total_amount: f64,    // 按份数倍率缩放后的合计用量
    pub unit: Option<String>, // 首次出现行的单位（回退到标准单位）
    pub used_in: Vec<String>, // 使用该食材的菜谱名称
    pub category: String,
}

// ==========================================
// ToolConflict - 厨具冲突
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConflict {
    pub tool: Tool,
    pub recipe1: Recipe,
    pub recipe2: Recipe,
    pub task1_id: String,
    pub task2_id: String,
    pub overlapping_minutes: u32, // min(两任务时长)
}

// ==========================================
// ConsolidatedTool - 厨具清单行
// ==========================================
// 红线: max_simultaneous_needed 取最大值而非求和（厨具可清洗复用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedTool {
    pub tool: Tool,
    pub max_simultaneous_needed: u32,
    pub used_in: Vec<String>,
    pub conflicts: Vec<ToolConflict>,
}

// ==========================================
// TaskTimelineEntry - 时间线条目
// ==========================================
// start_time 相对于开餐准备起点（分钟）,当前模型恒为 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTimelineEntry {
    pub start_time: u32,
    pub end_time: u32,
    pub task: Task,
    pub recipe_name: String, // 所属菜谱名称（未选中时回退为 recipe_id）
    pub role: String,
    pub can_be_parallel: bool,
    pub dependencies: Vec<String>,
}

// ==========================================
// TimeEstimate - 时间估算（分钟）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub total_time: u32,
    pub active_time: u32,
    pub passive_time: u32,
}

// ==========================================
// MealPlan - 餐单聚合根
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub plan_id: String,
    pub generated_at: DateTime<Utc>,
    pub recipes: Vec<MealRecipeSelection>,
    pub total_servings: u32,
    pub consolidated_ingredients: Vec<ConsolidatedIngredient>,
    pub consolidated_tools: Vec<ConsolidatedTool>,
    pub task_timeline: Vec<TaskTimelineEntry>,
    pub estimated_total_time: u32,
    pub estimated_active_time: u32,
    pub estimated_passive_time: u32,
    pub tool_conflicts: Vec<ToolConflict>,
    pub estimated_cost: f64,
}

impl MealPlan {
    /// 是否存在厨具冲突
    pub fn has_conflicts(&self) -> bool {
        !self.tool_conflicts.is_empty()
    }

    /// 时间估算视图
    pub fn time_estimate(&self) -> TimeEstimate {
        TimeEstimate {
            total_time: self.estimated_total_time,
            active_time: self.estimated_active_time,
            passive_time: self.estimated_passive_time,
        }
    }
}
