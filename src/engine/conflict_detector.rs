// ==========================================
// 多菜式餐单聚合系统 - 厨具冲突检测引擎
// ==========================================
// 职责: 找出不同菜谱中争用同一受限厨具的任务对
// 规则: 同一厨具 + 不同菜谱 + 相同 task_type + 该类型属于争用类型（默认 baking/roasting）
// 约束: task_type 按原文精确比较,不做大小写 / 空白归一化
// 说明: 按操作类型的粗粒度判断,不做时间区间重叠计算
// 红线: tool_ids 无法解析的任务直接跳过,不抛错
// ==========================================

use crate::domain::meal_plan::ToolConflict;
use crate::domain::recipe::{MealRecipeSelection, Task, Tool};
use crate::engine::selection_index::SelectionIndex;
use std::collections::{BTreeMap, HashMap};
use tracing::{instrument, warn};

/// 默认争用类型: 依赖烤箱的操作
pub const DEFAULT_CONTENDED_TASK_TYPES: [&str; 2] = ["baking", "roasting"];

// ==========================================
// ConflictDetector - 厨具冲突检测引擎
// ==========================================
pub struct ConflictDetector {
    contended_task_types: Vec<String>,
}

impl ConflictDetector {
    /// 使用默认争用类型构造
    pub fn new() -> Self {
        Self::with_contended_task_types(
            DEFAULT_CONTENDED_TASK_TYPES.iter().map(|s| s.to_string()),
        )
    }

    /// 使用自定义争用类型构造
    pub fn with_contended_task_types<I>(types: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            contended_task_types: types.into_iter().collect(),
        }
    }

    /// 判断操作类型是否会争用厨具
    pub fn is_contended(&self, task_type: &str) -> bool {
        self.contended_task_types.iter().any(|t| t == task_type)
    }

    /// 检测冲突
    ///
    /// # 参数
    /// - `tasks`: 所有任务记录
    /// - `selections`: 选菜列表（只考虑选中菜谱的任务）
    /// - `tool_catalog`: 厨具目录,目录中没有的ID使用占位厨具
    ///
    /// # 返回
    /// 冲突列表,按 tool_id 升序、任务输入顺序排列
    #[instrument(skip_all, fields(tasks_count = tasks.len()))]
    pub fn detect(
        &self,
        tasks: &[Task],
        selections: &[MealRecipeSelection],
        tool_catalog: &HashMap<String, Tool>,
    ) -> Vec<ToolConflict> {
        let index = SelectionIndex::new(selections);

        // tool_id -> 引用该厨具的任务
        let mut tasks_by_tool: BTreeMap<String, Vec<&Task>> = BTreeMap::new();
        for task in tasks {
            if !index.contains(&task.recipe_id) {
                continue;
            }
            let Some(mut tool_ids) = task.tool_ids() else {
                warn!(task_id = %task.id, "tool_ids 解析失败,跳过该任务的冲突检测");
                continue;
            };
            tool_ids.sort();
            tool_ids.dedup();
            for tool_id in tool_ids {
                tasks_by_tool.entry(tool_id).or_default().push(task);
            }
        }

        let mut conflicts = Vec::new();
        for (tool_id, tool_tasks) in &tasks_by_tool {
            for (i, task1) in tool_tasks.iter().enumerate() {
                for task2 in &tool_tasks[i + 1..] {
                    if !self.is_conflicting_pair(task1, task2) {
                        continue;
                    }
                    let (Some(selection1), Some(selection2)) =
                        (index.find(&task1.recipe_id), index.find(&task2.recipe_id))
                    else {
                        continue;
                    };

                    conflicts.push(ToolConflict {
                        tool: tool_catalog
                            .get(tool_id)
                            .cloned()
                            .unwrap_or_else(|| Tool::placeholder(tool_id)),
                        recipe1: selection1.recipe.clone(),
                        recipe2: selection2.recipe.clone(),
                        task1_id: task1.id.clone(),
                        task2_id: task2.id.clone(),
                        overlapping_minutes: task1.duration().min(task2.duration()),
                    });
                }
            }
        }

        conflicts
    }

    fn is_conflicting_pair(&self, task1: &Task, task2: &Task) -> bool {
        task1.recipe_id != task2.recipe_id
            && task1.task_type == task2.task_type
            && self.is_contended(&task1.task_type)
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
