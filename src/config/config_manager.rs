// ==========================================
// 多菜式餐单聚合系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// 说明: 配置缺失或无法解析时使用默认值,不报错
// ==========================================

use crate::config::aggregator_config_trait::{AggregatorConfigReader, ConfigResult};
use crate::db::open_sqlite_connection;
use crate::engine::conflict_detector::DEFAULT_CONTENDED_TASK_TYPES;
use crate::engine::time_estimator::DEFAULT_PARALLELIZATION_FACTOR;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 写入 global scope 配置（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;

        Ok(())
    }
}

// ==========================================
// AggregatorConfigReader 实现
// ==========================================
#[async_trait]
impl AggregatorConfigReader for ConfigManager {
    async fn get_parallelization_factor(&self) -> ConfigResult<f64> {
        let Some(value) = self.get_global_config_value(config_keys::PARALLELIZATION_FACTOR)? else {
            return Ok(DEFAULT_PARALLELIZATION_FACTOR);
        };

        match value.trim().parse::<f64>() {
            Ok(factor) if factor.is_finite() && factor >= 0.0 => Ok(factor),
            _ => {
                warn!(value = %value, "parallelization_factor 配置无效,使用默认值");
                Ok(DEFAULT_PARALLELIZATION_FACTOR)
            }
        }
    }

    async fn get_contended_task_types(&self) -> ConfigResult<Vec<String>> {
        let value = self.get_global_config_value(config_keys::CONTENDED_TASK_TYPES)?;

        let types: Vec<String> = value
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if types.is_empty() {
            Ok(DEFAULT_CONTENDED_TASK_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect())
        } else {
            Ok(types)
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 时间估算
    pub const PARALLELIZATION_FACTOR: &str = "parallelization_factor";

    // 冲突检测（逗号分隔）
    pub const CONTENDED_TASK_TYPES: &str = "contended_task_types";
}
