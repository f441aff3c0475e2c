// ==========================================
// 多菜式餐单聚合系统 - JSON 工具模块
// ==========================================
// 职责: 序列化ID列表字段的统一解码（tool_ids / depends_on_task_ids）
// 红线: 解析失败不抛错,容错策略只在此处实现
// ==========================================

use serde::Deserialize;

/// 列表中的单个ID: 存储层可能写成字符串或数字
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Integer(n) => n.to_string(),
        }
    }
}

/// 解析序列化的ID列表
///
/// # 参数
/// - `raw`: JSON 数组文本,如 `["oven-1", 2]`
///
/// # 返回
/// - Some(ids): 解析成功（空白文本视为空列表）
/// - None: 不是合法的字符串/整数数组
///
/// # 示例
/// ```
/// use meal_plan_aggregator::common::json_utils::parse_id_list;
///
/// assert_eq!(parse_id_list(r#"["a", 3]"#), Some(vec!["a".to_string(), "3".to_string()]));
/// assert_eq!(parse_id_list("not a list"), None);
/// ```
pub fn parse_id_list(raw: &str) -> Option<Vec<String>> {
    if raw.trim().is_empty() {
        return Some(Vec::new());
    }

    serde_json::from_str::<Vec<RawId>>(raw)
        .ok()
        .map(|ids| ids.into_iter().map(RawId::into_string).collect())
}

/// 解析可选的序列化ID列表,None 或解析失败时返回空向量
///
/// # 示例
/// ```
/// use meal_plan_aggregator::common::json_utils::parse_id_list_or_empty;
///
/// assert_eq!(parse_id_list_or_empty(Some("[1]")), vec!["1".to_string()]);
/// assert!(parse_id_list_or_empty(Some("{oops")).is_empty());
/// assert!(parse_id_list_or_empty(None).is_empty());
/// ```
pub fn parse_id_list_or_empty(raw: Option<&str>) -> Vec<String> {
    raw.and_then(parse_id_list).unwrap_or_default()
}

/// 将ID列表序列化为 JSON 文本（写入存储层时使用）
///
/// 空列表返回 None
pub fn serialize_id_list(ids: &[String]) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        serde_json::to_string(ids).ok()
    }
}
