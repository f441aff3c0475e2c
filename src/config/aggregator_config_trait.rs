// ==========================================
// 多菜式餐单聚合系统 - 聚合配置读取 Trait
// ==========================================
// 职责: 定义聚合引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::engine::conflict_detector::DEFAULT_CONTENDED_TASK_TYPES;
use crate::engine::time_estimator::DEFAULT_PARALLELIZATION_FACTOR;
use async_trait::async_trait;
use std::error::Error;

/// 配置读取结果
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// AggregatorConfigReader Trait
// ==========================================
// 实现者: ConfigManager（config_kv 表）、AggregatorConfig（内存默认值）
#[async_trait]
pub trait AggregatorConfigReader: Send + Sync {
    /// 获取并行系数
    ///
    /// # 默认值
    /// - 0.7
    async fn get_parallelization_factor(&self) -> ConfigResult<f64>;

    /// 获取会争用厨具的操作类型
    ///
    /// # 默认值
    /// - ["baking", "roasting"]
    async fn get_contended_task_types(&self) -> ConfigResult<Vec<String>>;
}

// ==========================================
// AggregatorConfig - 内存配置
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatorConfig {
    pub parallelization_factor: f64,
    pub contended_task_types: Vec<String>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            parallelization_factor: DEFAULT_PARALLELIZATION_FACTOR,
            contended_task_types: DEFAULT_CONTENDED_TASK_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[async_trait]
impl AggregatorConfigReader for AggregatorConfig {
    async fn get_parallelization_factor(&self) -> ConfigResult<f64> {
        Ok(self.parallelization_factor)
    }

    async fn get_contended_task_types(&self) -> ConfigResult<Vec<String>> {
        Ok(self.contended_task_types.clone())
    }
}
