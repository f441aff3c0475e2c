// ==========================================
// 多菜式餐单聚合系统 - 配置层
// ==========================================
// 职责: 聚合参数（并行系数 / 争用操作类型）的读取与覆写
// 存储: config_kv 表
// ==========================================

pub mod aggregator_config_trait;
pub mod config_manager;

// 重导出核心配置
pub use aggregator_config_trait::{AggregatorConfig, AggregatorConfigReader, ConfigResult};
pub use config_manager::{config_keys, ConfigManager};
