// ==========================================
// 多菜式餐单聚合系统 - 购物清单 / 备餐时间线视图
// ==========================================
// 职责: 纯重组,不做新的计算
// - 购物清单: 按超市分区分组,未知类别归入 other
// - 备餐时间线: 按厨房岗位分组,未知岗位归入 sous_chef
// ==========================================

use crate::domain::meal_plan::{ConsolidatedIngredient, TaskTimelineEntry};
use crate::domain::types::{KitchenRole, ShoppingCategory};
use serde::{Deserialize, Serialize};

// ==========================================
// 购物清单视图
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListSection {
    pub category: ShoppingCategory,
    pub items: Vec<ConsolidatedIngredient>,
}

/// 购物清单: 固定包含全部分区（可能为空）,顺序同 ShoppingCategory::ALL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub sections: Vec<ShoppingListSection>,
}

impl ShoppingList {
    /// 指定分区的条目
    pub fn items(&self, category: ShoppingCategory) -> &[ConsolidatedIngredient] {
        self.sections
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// 生成购物清单
pub fn generate_shopping_list(ingredients: &[ConsolidatedIngredient]) -> ShoppingList {
    let mut sections: Vec<ShoppingListSection> = ShoppingCategory::ALL
        .iter()
        .map(|&category| ShoppingListSection {
            category,
            items: Vec::new(),
        })
        .collect();

    for ingredient in ingredients {
        let category = ShoppingCategory::from_category(&ingredient.category);
        if let Some(section) = sections.iter_mut().find(|s| s.category == category) {
            section.items.push(ingredient.clone());
        }
    }

    ShoppingList { sections }
}

// ==========================================
// 备餐时间线视图
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepTimelineSection {
    pub role: KitchenRole,
    pub entries: Vec<TaskTimelineEntry>,
}

/// 按岗位分组的备餐时间线,顺序同 KitchenRole::ALL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepTimeline {
    pub sections: Vec<PrepTimelineSection>,
}

impl PrepTimeline {
    pub fn entries(&self, role: KitchenRole) -> &[TaskTimelineEntry] {
        self.sections
            .iter()
            .find(|s| s.role == role)
            .map(|s| s.entries.as_slice())
            .unwrap_or(&[])
    }
}

/// 生成备餐时间线（各岗位内保持时间线原有顺序）
pub fn generate_prep_timeline(timeline: &[TaskTimelineEntry]) -> PrepTimeline {
    let mut sections: Vec<PrepTimelineSection> = KitchenRole::ALL
        .iter()
        .map(|&role| PrepTimelineSection {
            role,
            entries: Vec::new(),
        })
        .collect();

    for entry in timeline {
        let role = KitchenRole::parse(&entry.role).unwrap_or(KitchenRole::SousChef);
        if let Some(section) = sections.iter_mut().find(|s| s.role == role) {
            section.entries.push(entry.clone());
        }
    }

    PrepTimeline { sections }
}

// ==========================================
// CSV 导出
// ==========================================

/// 导出购物清单为 CSV
///
/// 列: category, ingredient, amount, unit, used_in（菜谱名以 "; " 连接）
pub fn shopping_list_to_csv(list: &ShoppingList) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["category", "ingredient", "amount", "unit", "used_in"])?;

    for section in &list.sections {
        for item in &section.items {
            writer.write_record([
                section.category.as_str(),
                item.ingredient.name.as_str(),
                format_amount(item.total_amount).as_str(),
                item.unit.as_deref().unwrap_or(""),
                item.used_in.join("; ").as_str(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 用量格式化: 最多保留两位小数,去掉多余的 0
fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
