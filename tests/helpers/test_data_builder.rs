// ==========================================
// 测试数据构建器
// ==========================================
// 职责: 快速构造菜谱 / 用料 / 厨具 / 任务记录
// ==========================================

use meal_plan_aggregator::common::serialize_id_list;
use meal_plan_aggregator::domain::{
    CourseRole, Ingredient, IngredientUsageRecord, MealRecipeSelection, Recipe,
    RecipeIngredientUsage, RecipeToolUsage, Task, Tool, ToolUsageRecord,
};

pub fn recipe(id: &str, name: &str, base_servings: Option<u32>) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        base_servings,
    }
}

pub fn selection(recipe: Recipe, course_role: CourseRole, requested: u32) -> MealRecipeSelection {
    MealRecipeSelection::new(recipe, course_role, requested)
}

pub fn ingredient_usage(
    recipe_id: &str,
    ingredient_id: &str,
    category: &str,
    amount: Option<f64>,
    unit: Option<&str>,
) -> IngredientUsageRecord {
    IngredientUsageRecord {
        usage: RecipeIngredientUsage {
            recipe_id: recipe_id.to_string(),
            ingredient_id: ingredient_id.to_string(),
            amount,
            unit: unit.map(str::to_string),
        },
        ingredient: Ingredient {
            id: ingredient_id.to_string(),
            name: ingredient_id.to_string(),
            category: category.to_string(),
            standard_unit: None,
        },
    }
}

pub fn tool_usage(recipe_id: &str, tool_id: &str, quantity: Option<u32>) -> ToolUsageRecord {
    ToolUsageRecord {
        usage: RecipeToolUsage {
            recipe_id: recipe_id.to_string(),
            tool_id: tool_id.to_string(),
            quantity_needed: quantity,
        },
        tool: Tool {
            id: tool_id.to_string(),
            name: tool_id.to_string(),
            category: "appliance".to_string(),
        },
    }
}

/// 任务构建器
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str, recipe_id: &str) -> Self {
        Self {
            task: Task {
                id: id.to_string(),
                recipe_id: recipe_id.to_string(),
                task_order: 1,
                role: "line_cook".to_string(),
                task_type: "sauteing".to_string(),
                description: None,
                active_time: 10,
                passive_time: None,
                can_be_parallel: false,
                depends_on_task_ids: None,
                tool_ids: None,
            },
        }
    }

    pub fn order(mut self, order: i32) -> Self {
        self.task.task_order = order;
        self
    }

    pub fn role(mut self, role: &str) -> Self {
        self.task.role = role.to_string();
        self
    }

    pub fn task_type(mut self, task_type: &str) -> Self {
        self.task.task_type = task_type.to_string();
        self
    }

    pub fn times(mut self, active: u32, passive: Option<u32>) -> Self {
        self.task.active_time = active;
        self.task.passive_time = passive;
        self
    }

    pub fn tools(mut self, tool_ids_json: &str) -> Self {
        self.task.tool_ids = Some(tool_ids_json.to_string());
        self
    }

    pub fn tool_list(mut self, tool_ids: &[&str]) -> Self {
        let ids: Vec<String> = tool_ids.iter().map(|s| s.to_string()).collect();
        self.task.tool_ids = serialize_id_list(&ids);
        self
    }

    pub fn depends_on(mut self, deps_json: &str) -> Self {
        self.task.depends_on_task_ids = Some(deps_json.to_string());
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}
