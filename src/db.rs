// ==========================================
// 多菜式餐单聚合系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发读写时的偶发 busy 错误
// - 提供菜谱记录表的建表脚本（测试 / CLI 首次运行）
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明:
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化 schema（幂等）
///
/// tool_ids / depends_on_task_ids 以 JSON 数组文本存储
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS recipe (
            recipe_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            base_servings INTEGER
        );

        CREATE TABLE IF NOT EXISTS ingredient (
            ingredient_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'other',
            standard_unit TEXT
        );

        CREATE TABLE IF NOT EXISTS recipe_ingredient (
            recipe_id TEXT NOT NULL REFERENCES recipe(recipe_id),
            ingredient_id TEXT NOT NULL REFERENCES ingredient(ingredient_id),
            amount REAL,
            unit TEXT
        );

        CREATE TABLE IF NOT EXISTS tool (
            tool_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'other'
        );

        CREATE TABLE IF NOT EXISTS recipe_tool (
            recipe_id TEXT NOT NULL REFERENCES recipe(recipe_id),
            tool_id TEXT NOT NULL REFERENCES tool(tool_id),
            quantity_needed INTEGER
        );

        CREATE TABLE IF NOT EXISTS recipe_task (
            task_id TEXT PRIMARY KEY,
            recipe_id TEXT NOT NULL REFERENCES recipe(recipe_id),
            task_order INTEGER NOT NULL DEFAULT 0,
            role TEXT NOT NULL DEFAULT '',
            task_type TEXT NOT NULL DEFAULT '',
            description TEXT,
            active_time INTEGER NOT NULL DEFAULT 0,
            passive_time INTEGER,
            can_be_parallel INTEGER NOT NULL DEFAULT 0,
            depends_on_task_ids TEXT,
            tool_ids TEXT
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE INDEX IF NOT EXISTS idx_recipe_ingredient_recipe ON recipe_ingredient(recipe_id);
        CREATE INDEX IF NOT EXISTS idx_recipe_tool_recipe ON recipe_tool(recipe_id);
        CREATE INDEX IF NOT EXISTS idx_recipe_task_recipe ON recipe_task(recipe_id, task_order);
        "#,
    )
}
