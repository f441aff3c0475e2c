// ==========================================
// 多菜式餐单聚合系统 - SQLite 记录获取实现
// ==========================================
// 职责: 基于 rusqlite 实现 RecordFetcher
// 约束: 所有查询使用参数化（IN 占位符动态生成）,防止 SQL 注入
// 说明: 数值字段为负数时视为缺失,交由引擎按默认值处理
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::recipe::{
    Ingredient, IngredientUsageRecord, Recipe, RecipeIngredientUsage, RecipeToolUsage, Task, Tool,
    ToolUsageRecord,
};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::record_fetcher::RecordFetcher;
use async_trait::async_trait;
use rusqlite::{params_from_iter, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

// ==========================================
// SqliteRecordFetcher
// ==========================================

/// 菜谱记录仓储（只读）
pub struct SqliteRecordFetcher {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordFetcher {
    /// 打开数据库文件创建实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 同步查询实现
    // ==========================================

    pub fn find_recipes(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<Recipe>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT recipe_id, name, base_servings FROM recipe WHERE recipe_id IN ({}) ORDER BY recipe_id",
            placeholders(recipe_ids.len())
        );

        let mut stmt = conn.prepare(&sql)?;
        let recipes = stmt
            .query_map(params_from_iter(recipe_ids.iter()), |row| {
                Ok(Recipe {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    base_servings: non_negative(row.get(2)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    pub fn find_ingredient_usages(
        &self,
        recipe_ids: &[String],
    ) -> RepositoryResult<Vec<IngredientUsageRecord>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT
                ri.recipe_id, ri.ingredient_id, ri.amount, ri.unit,
                i.name, i.category, i.standard_unit
            FROM recipe_ingredient ri
            JOIN ingredient i ON i.ingredient_id = ri.ingredient_id
            WHERE ri.recipe_id IN ({})
            ORDER BY ri.rowid
            "#,
            placeholders(recipe_ids.len())
        );

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(recipe_ids.iter()), |row| {
                let ingredient_id: String = row.get(1)?;
                Ok(IngredientUsageRecord {
                    usage: RecipeIngredientUsage {
                        recipe_id: row.get(0)?,
                        ingredient_id: ingredient_id.clone(),
                        amount: row.get(2)?,
                        unit: row.get(3)?,
                    },
                    ingredient: Ingredient {
                        id: ingredient_id,
                        name: row.get(4)?,
                        category: row.get(5)?,
                        standard_unit: row.get(6)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = records.len(), "读取用料记录");
        Ok(records)
    }

    pub fn find_tool_usages(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<ToolUsageRecord>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT rt.recipe_id, rt.tool_id, rt.quantity_needed, t.name, t.category
            FROM recipe_tool rt
            JOIN tool t ON t.tool_id = rt.tool_id
            WHERE rt.recipe_id IN ({})
            ORDER BY rt.rowid
            "#,
            placeholders(recipe_ids.len())
        );

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(recipe_ids.iter()), |row| {
                let tool_id: String = row.get(1)?;
                Ok(ToolUsageRecord {
                    usage: RecipeToolUsage {
                        recipe_id: row.get(0)?,
                        tool_id: tool_id.clone(),
                        quantity_needed: non_negative(row.get(2)?),
                    },
                    tool: Tool {
                        id: tool_id,
                        name: row.get(3)?,
                        category: row.get(4)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = records.len(), "读取厨具记录");
        Ok(records)
    }

    pub fn find_tasks(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<Task>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT
                task_id, recipe_id, task_order, role, task_type, description,
                active_time, passive_time, can_be_parallel, depends_on_task_ids, tool_ids
            FROM recipe_task
            WHERE recipe_id IN ({})
            ORDER BY recipe_id, task_order
            "#,
            placeholders(recipe_ids.len())
        );

        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params_from_iter(recipe_ids.iter()), |row| {
                Ok(Task {
                    id: row.get(0)?,
                    recipe_id: row.get(1)?,
                    task_order: row.get(2)?,
                    role: row.get(3)?,
                    task_type: row.get(4)?,
                    description: row.get(5)?,
                    active_time: non_negative(row.get(6)?).unwrap_or(0),
                    passive_time: non_negative(row.get(7)?),
                    can_be_parallel: row.get::<_, i64>(8)? != 0,
                    depends_on_task_ids: row.get(9)?,
                    tool_ids: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = tasks.len(), "读取备餐任务");
        Ok(tasks)
    }
}

// ==========================================
// RecordFetcher trait 实现
// ==========================================
#[async_trait]
impl RecordFetcher for SqliteRecordFetcher {
    async fn fetch_recipes(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<Recipe>> {
        self.find_recipes(recipe_ids)
    }

    async fn fetch_ingredient_usages(
        &self,
        recipe_ids: &[String],
    ) -> RepositoryResult<Vec<IngredientUsageRecord>> {
        self.find_ingredient_usages(recipe_ids)
    }

    async fn fetch_tool_usages(
        &self,
        recipe_ids: &[String],
    ) -> RepositoryResult<Vec<ToolUsageRecord>> {
        self.find_tool_usages(recipe_ids)
    }

    async fn fetch_tasks(&self, recipe_ids: &[String]) -> RepositoryResult<Vec<Task>> {
        self.find_tasks(recipe_ids)
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn placeholders(n: usize) -> String {
    std::iter::repeat("?").take(n).collect::<Vec<_>>().join(", ")
}

fn non_negative(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}
