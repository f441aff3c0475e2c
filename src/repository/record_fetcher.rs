// ==========================================
// 多菜式餐单聚合系统 - 记录获取 Trait
// ==========================================
// 职责: 定义聚合所需的数据读取接口（不包含业务逻辑）
// 红线: Repository 不含业务规则,只做读取
// ==========================================

use crate::domain::recipe::{IngredientUsageRecord, Recipe, Task, ToolUsageRecord};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// RecordFetcher Trait
// ==========================================
// 用途: 按菜谱ID批量读取原始记录
// 实现者: SqliteRecordFetcher（使用 rusqlite）;测试中使用内存实现
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// 查询菜谱元数据（id / 名称 / 原始份数）
    ///
    /// # 返回
    /// - 找到的菜谱（不存在的ID不报错,直接缺省）
    async fn fetch_recipes(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<Recipe>>;

    /// 查询用料记录（已关联食材目录）
    async fn fetch_ingredient_usages(
        &self,
        recipe_ids: &[String],
    ) -> RepositoryResult<Vec<IngredientUsageRecord>>;

    /// 查询厨具记录（已关联厨具目录）
    async fn fetch_tool_usages(
        &self,
        recipe_ids: &[String],
    ) -> RepositoryResult<Vec<ToolUsageRecord>>;

    /// 查询备餐任务
    ///
    /// # 返回
    /// - 按 recipe_id、task_order 排序的任务列表
    async fn fetch_tasks(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<Task>>;
}
