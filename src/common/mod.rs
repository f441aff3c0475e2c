// ==========================================
// 多菜式餐单聚合系统 - 公共工具
// ==========================================

pub mod json_utils;

pub use json_utils::{parse_id_list, parse_id_list_or_empty, serialize_id_list};
