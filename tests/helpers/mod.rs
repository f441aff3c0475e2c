// ==========================================
// 集成测试辅助模块
// ==========================================

#![allow(dead_code)]

pub mod in_memory_fetcher;
pub mod mock_config;
pub mod test_data_builder;
