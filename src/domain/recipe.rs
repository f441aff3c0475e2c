// ==========================================
// 多菜式餐单聚合系统 - 菜谱领域模型
// ==========================================
// 职责: 菜谱 / 食材 / 厨具 / 备餐任务的原始记录
// 红线: 只读记录,由外部记录获取层提供,本系统不做持久化
// ==========================================

use crate::common::json_utils::{parse_id_list, parse_id_list_or_empty};
use crate::domain::types::CourseRole;
use serde::{Deserialize, Serialize};

// ==========================================
// Recipe - 菜谱元数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,                 // 菜谱ID
    pub name: String,               // 展示名称
    pub base_servings: Option<u32>, // 菜谱原始份数（未设置时按 1 处理）
}

impl Recipe {
    /// 有效原始份数: max(base_servings, 1)
    pub fn effective_base_servings(&self) -> u32 {
        self.base_servings.unwrap_or(1).max(1)
    }
}

// ==========================================
// MealRecipeSelection - 餐单中选定的一道菜
// ==========================================
// 不可变输入: 调用方给出 (菜谱, 菜式角色, 期望份数)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecipeSelection {
    pub recipe: Recipe,
    pub course_role: CourseRole,
    pub requested_servings: u32,
}

impl MealRecipeSelection {
    pub fn new(recipe: Recipe, course_role: CourseRole, requested_servings: u32) -> Self {
        Self {
            recipe,
            course_role,
            requested_servings,
        }
    }

    /// 份数倍率 = requested_servings / max(base_servings, 1)
    pub fn serving_multiplier(&self) -> f64 {
        f64::from(self.requested_servings) / f64::from(self.recipe.effective_base_servings())
    }
}

// ==========================================
// Ingredient - 食材目录项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: String,              // 类别（produce/meat/...）
    pub standard_unit: Option<String>, // 标准单位
}

// ==========================================
// RecipeIngredientUsage - 菜谱用料（原始份数下）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientUsage {
    pub recipe_id: String,
    pub ingredient_id: String,
    pub amount: Option<f64>,  // 缺失按 0 处理
    pub unit: Option<String>, // 缺失时回退到食材标准单位
}

/// 用料行 + 食材目录（获取层已完成关联）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientUsageRecord {
    pub usage: RecipeIngredientUsage,
    pub ingredient: Ingredient,
}

// ==========================================
// Tool - 厨具目录项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub category: String,
}

impl Tool {
    /// 目录中不存在的厨具ID（仅被任务引用）使用的占位记录
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            category: "other".to_string(),
        }
    }
}

// ==========================================
// RecipeToolUsage - 菜谱所需厨具
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeToolUsage {
    pub recipe_id: String,
    pub tool_id: String,
    pub quantity_needed: Option<u32>, // 缺失按 1 处理
}

/// 厨具行 + 厨具目录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUsageRecord {
    pub usage: RecipeToolUsage,
    pub tool: Tool,
}

// ==========================================
// Task - 备餐任务
// ==========================================
// tool_ids / depends_on_task_ids 在存储层是序列化的 JSON 文本,
// 解码统一走 common::json_utils,解析失败不报错
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub recipe_id: String,
    pub task_order: i32,                     // 菜谱内顺序
    pub role: String,                        // 厨房岗位（原始字符串,可能无法识别）
    pub task_type: String,                   // 操作类型（baking/roasting/sauteing/...）
    pub description: Option<String>,         // 任务描述
    pub active_time: u32,                    // 主动操作时长（分钟）
    pub passive_time: Option<u32>,           // 被动等待时长（分钟,缺失按 0）
    pub can_be_parallel: bool,               // 是否可与其他任务并行
    pub depends_on_task_ids: Option<String>, // 依赖任务ID（JSON 数组文本）
    pub tool_ids: Option<String>,            // 占用厨具ID（JSON 数组文本）
}

impl Task {
    /// 任务总时长 = active_time + passive_time
    pub fn duration(&self) -> u32 {
        self.active_time
            .saturating_add(self.passive_time.unwrap_or(0))
    }

    /// 依赖任务ID（解析失败或缺失时为空）
    pub fn dependencies(&self) -> Vec<String> {
        parse_id_list_or_empty(self.depends_on_task_ids.as_deref())
    }

    /// 占用的厨具ID
    ///
    /// # 返回
    /// - Some(ids): 字段缺失时为 Some(空)
    /// - None: 字段存在但无法解析为列表
    pub fn tool_ids(&self) -> Option<Vec<String>> {
        match self.tool_ids.as_deref() {
            None => Some(Vec::new()),
            Some(raw) => parse_id_list(raw),
        }
    }
}
