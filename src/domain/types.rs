// ==========================================
// 多菜式餐单聚合系统 - 领域类型定义
// ==========================================
// 职责: 菜式角色 / 厨房岗位 / 购物清单分区
// 红线: 岗位优先级只在本文件定义,不允许在其他位置写死数字
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 菜式角色 (Course Role)
// ==========================================
// 一道菜在整套餐单中承担的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseRole {
    Appetizer, // 前菜
    Main,      // 主菜
    Side,      // 配菜
    Dessert,   // 甜点
}

impl CourseRole {
    /// 从字符串解析菜式角色（大小写不敏感）
    ///
    /// # 返回
    /// - Some(CourseRole): 识别成功
    /// - None: 未知角色
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "appetizer" => Some(CourseRole::Appetizer),
            "main" => Some(CourseRole::Main),
            "side" => Some(CourseRole::Side),
            "dessert" => Some(CourseRole::Dessert),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseRole::Appetizer => "appetizer",
            CourseRole::Main => "main",
            CourseRole::Side => "side",
            CourseRole::Dessert => "dessert",
        }
    }
}

impl fmt::Display for CourseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 厨房岗位 (Kitchen Role)
// ==========================================
// 顺序: 时间线按 priority() 升序合并
// 新增岗位时只需在 ALL 中追加并指定优先级,不需要重新编号已有岗位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KitchenRole {
    PrepCook,    // 初加工
    GardeManger, // 冷菜
    LineCook,    // 线上厨师
    Pastry,      // 面点
    SousChef,    // 副主厨
    Expeditor,   // 出菜协调
}

/// 未识别岗位的排序优先级（排在所有已知岗位之后）
pub const UNKNOWN_ROLE_PRIORITY: u32 = 99;

impl KitchenRole {
    /// 所有岗位（按优先级排列）
    pub const ALL: [KitchenRole; 6] = [
        KitchenRole::PrepCook,
        KitchenRole::GardeManger,
        KitchenRole::LineCook,
        KitchenRole::Pastry,
        KitchenRole::SousChef,
        KitchenRole::Expeditor,
    ];

    /// 岗位优先级（越小越靠前）
    pub fn priority(&self) -> u32 {
        match self {
            KitchenRole::PrepCook => 1,
            KitchenRole::GardeManger => 2,
            KitchenRole::LineCook => 3,
            KitchenRole::Pastry => 4,
            KitchenRole::SousChef => 5,
            KitchenRole::Expeditor => 6,
        }
    }

    /// 从字符串解析岗位（精确匹配,未识别返回 None）
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "prep_cook" => Some(KitchenRole::PrepCook),
            "garde_manger" => Some(KitchenRole::GardeManger),
            "line_cook" => Some(KitchenRole::LineCook),
            "pastry" => Some(KitchenRole::Pastry),
            "sous_chef" => Some(KitchenRole::SousChef),
            "expeditor" => Some(KitchenRole::Expeditor),
            _ => None,
        }
    }

    /// 原始岗位字符串对应的排序优先级,未识别岗位返回 UNKNOWN_ROLE_PRIORITY
    pub fn priority_of(raw: &str) -> u32 {
        Self::parse(raw)
            .map(|role| role.priority())
            .unwrap_or(UNKNOWN_ROLE_PRIORITY)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KitchenRole::PrepCook => "prep_cook",
            KitchenRole::GardeManger => "garde_manger",
            KitchenRole::LineCook => "line_cook",
            KitchenRole::Pastry => "pastry",
            KitchenRole::SousChef => "sous_chef",
            KitchenRole::Expeditor => "expeditor",
        }
    }
}

impl fmt::Display for KitchenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 购物清单分区 (Shopping Category)
// ==========================================
// 按超市货架划分,未知类别一律归入 Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoppingCategory {
    Produce,    // 蔬果
    Meat,       // 肉类
    Seafood,    // 海鲜
    Dairy,      // 乳制品
    Grains,     // 谷物
    Baking,     // 烘焙原料
    Spices,     // 香料
    Condiments, // 调味品
    Canned,     // 罐头
    Frozen,     // 冷冻
    Beverages,  // 饮品
    Other,      // 其他
}

impl ShoppingCategory {
    /// 所有分区（购物清单展示顺序）
    pub const ALL: [ShoppingCategory; 12] = [
        ShoppingCategory::Produce,
        ShoppingCategory::Meat,
        ShoppingCategory::Seafood,
        ShoppingCategory::Dairy,
        ShoppingCategory::Grains,
        ShoppingCategory::Baking,
        ShoppingCategory::Spices,
        ShoppingCategory::Condiments,
        ShoppingCategory::Canned,
        ShoppingCategory::Frozen,
        ShoppingCategory::Beverages,
        ShoppingCategory::Other,
    ];

    /// 从食材类别字符串映射到分区（未知类别 -> Other）
    pub fn from_category(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "produce" => ShoppingCategory::Produce,
            "meat" => ShoppingCategory::Meat,
            "seafood" => ShoppingCategory::Seafood,
            "dairy" => ShoppingCategory::Dairy,
            "grains" => ShoppingCategory::Grains,
            "baking" => ShoppingCategory::Baking,
            "spices" => ShoppingCategory::Spices,
            "condiments" => ShoppingCategory::Condiments,
            "canned" => ShoppingCategory::Canned,
            "frozen" => ShoppingCategory::Frozen,
            "beverages" => ShoppingCategory::Beverages,
            _ => ShoppingCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShoppingCategory::Produce => "produce",
            ShoppingCategory::Meat => "meat",
            ShoppingCategory::Seafood => "seafood",
            ShoppingCategory::Dairy => "dairy",
            ShoppingCategory::Grains => "grains",
            ShoppingCategory::Baking => "baking",
            ShoppingCategory::Spices => "spices",
            ShoppingCategory::Condiments => "condiments",
            ShoppingCategory::Canned => "canned",
            ShoppingCategory::Frozen => "frozen",
            ShoppingCategory::Beverages => "beverages",
            ShoppingCategory::Other => "other",
        }
    }
}

impl fmt::Display for ShoppingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
