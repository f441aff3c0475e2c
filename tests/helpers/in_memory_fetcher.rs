// ==========================================
// 内存记录获取实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use meal_plan_aggregator::domain::{IngredientUsageRecord, Recipe, Task, ToolUsageRecord};
use meal_plan_aggregator::repository::{RecordFetcher, RepositoryError, RepositoryResult};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 内存记录集合,按 recipe_id 过滤返回
#[derive(Debug, Default)]
pub struct InMemoryRecordFetcher {
    pub recipes: Vec<Recipe>,
    pub ingredient_usages: Vec<IngredientUsageRecord>,
    pub tool_usages: Vec<ToolUsageRecord>,
    pub tasks: Vec<Task>,
    fetch_calls: AtomicUsize,
}

impl InMemoryRecordFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(mut self, recipes: Vec<Recipe>) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn with_ingredient_usages(mut self, records: Vec<IngredientUsageRecord>) -> Self {
        self.ingredient_usages = records;
        self
    }

    pub fn with_tool_usages(mut self, records: Vec<ToolUsageRecord>) -> Self {
        self.tool_usages = records;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// 记录类查询次数（不含 fetch_recipes）
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

fn contains(ids: &[String], id: &str) -> bool {
    ids.iter().any(|x| x == id)
}

#[async_trait]
impl RecordFetcher for InMemoryRecordFetcher {
    async fn fetch_recipes(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .filter(|r| contains(recipe_ids, &r.id))
            .cloned()
            .collect())
    }

    async fn fetch_ingredient_usages(
        &self,
        recipe_ids: &[String],
    ) -> RepositoryResult<Vec<IngredientUsageRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .ingredient_usages
            .iter()
            .filter(|r| contains(recipe_ids, &r.usage.recipe_id))
            .cloned()
            .collect())
    }

    async fn fetch_tool_usages(
        &self,
        recipe_ids: &[String],
    ) -> RepositoryResult<Vec<ToolUsageRecord>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tool_usages
            .iter()
            .filter(|r| contains(recipe_ids, &r.usage.recipe_id))
            .cloned()
            .collect())
    }

    async fn fetch_tasks(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<Task>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tasks
            .iter()
            .filter(|t| contains(recipe_ids, &t.recipe_id))
            .cloned()
            .collect())
    }
}

// ==========================================
// 任务读取失败的实现（验证错误传播）
// ==========================================
pub struct FailingRecordFetcher;

#[async_trait]
impl RecordFetcher for FailingRecordFetcher {
    async fn fetch_recipes(&self, _recipe_ids: &[String]) -> RepositoryResult<Vec<Recipe>> {
        Err(RepositoryError::DatabaseConnectionError(
            "store unreachable".to_string(),
        ))
    }

    async fn fetch_ingredient_usages(
        &self,
        _recipe_ids: &[String],
    ) -> RepositoryResult<Vec<IngredientUsageRecord>> {
        Ok(Vec::new())
    }

    async fn fetch_tool_usages(
        &self,
        _recipe_ids: &[String],
    ) -> RepositoryResult<Vec<ToolUsageRecord>> {
        Ok(Vec::new())
    }

    async fn fetch_tasks(&self, _recipe_ids: &[String]) -> RepositoryResult<Vec<Task>> {
        Err(RepositoryError::DatabaseConnectionError(
            "store unreachable".to_string(),
        ))
    }
}

// ==========================================
// 三类查询互相等待的实现（验证并发读取）
// ==========================================
// 三个记录查询各自在同一个 Barrier 上等待,
// 只有三者同时在途时才能全部返回;串行调用会永久挂起
pub struct BarrierRecordFetcher {
    barrier: tokio::sync::Barrier,
}

impl BarrierRecordFetcher {
    pub fn new() -> Self {
        Self {
            barrier: tokio::sync::Barrier::new(3),
        }
    }
}

#[async_trait]
impl RecordFetcher for BarrierRecordFetcher {
    async fn fetch_recipes(&self, _recipe_ids: &[String]) -> RepositoryResult<Vec<Recipe>> {
        Ok(Vec::new())
    }

    async fn fetch_ingredient_usages(
        &self,
        _recipe_ids: &[String],
    ) -> RepositoryResult<Vec<IngredientUsageRecord>> {
        self.barrier.wait().await;
        Ok(Vec::new())
    }

    async fn fetch_tool_usages(
        &self,
        _recipe_ids: &[String],
    ) -> RepositoryResult<Vec<ToolUsageRecord>> {
        self.barrier.wait().await;
        Ok(Vec::new())
    }

    async fn fetch_tasks(&self, _recipe_ids: &[String]) -> RepositoryResult<Vec<Task>> {
        self.barrier.wait().await;
        Ok(Vec::new())
    }
}
