// ==========================================
// 多菜式餐单聚合系统 - 任务时间线构建引擎
// ==========================================
// 职责: 将所有菜谱的任务合并为一条有序时间线
// 排序键:
// 1) 厨房岗位优先级（prep_cook=1 ... expeditor=6,未知岗位最后）
// 2) 菜谱内 task_order 升序
// 说明: 只给出顺序,start_time 恒为 0,end_time = 任务时长
// ==========================================

use crate::domain::meal_plan::TaskTimelineEntry;
use crate::domain::recipe::{MealRecipeSelection, Task};
use crate::domain::types::KitchenRole;
use crate::engine::selection_index::SelectionIndex;
use tracing::instrument;

// ==========================================
// TimelineBuilder - 时间线构建引擎
// ==========================================
pub struct TimelineBuilder {
    // 无状态引擎,不需要注入依赖
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 构建时间线
    ///
    /// # 参数
    /// - `tasks`: 所有任务记录（每条任务对应一个条目）
    /// - `selections`: 选菜列表（用于解析菜谱名称）
    ///
    /// # 返回
    /// 按 (岗位优先级, task_order) 稳定排序的时间线
    #[instrument(skip_all, fields(tasks_count = tasks.len()))]
    pub fn build(
        &self,
        tasks: &[Task],
        selections: &[MealRecipeSelection],
    ) -> Vec<TaskTimelineEntry> {
        let index = SelectionIndex::new(selections);

        let mut timeline: Vec<TaskTimelineEntry> = tasks
            .iter()
            .map(|task| TaskTimelineEntry {
                start_time: 0,
                end_time: task.duration(),
                task: task.clone(),
                recipe_name: index.recipe_name(&task.recipe_id),
                role: task.role.clone(),
                can_be_parallel: task.can_be_parallel,
                dependencies: task.dependencies(),
            })
            .collect();

        timeline.sort_by_key(|entry| {
            (
                KitchenRole::priority_of(&entry.role),
                entry.task.task_order,
            )
        });
        timeline
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
