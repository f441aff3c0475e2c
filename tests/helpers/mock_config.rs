// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use meal_plan_aggregator::config::{AggregatorConfigReader, ConfigResult};

/// 配置读取总是失败
#[derive(Debug, Clone, Default)]
pub struct BrokenConfig;

#[async_trait]
impl AggregatorConfigReader for BrokenConfig {
    async fn get_parallelization_factor(&self) -> ConfigResult<f64> {
        Err("config store offline".into())
    }

    async fn get_contended_task_types(&self) -> ConfigResult<Vec<String>> {
        Err("config store offline".into())
    }
}
