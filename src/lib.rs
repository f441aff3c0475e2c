// ==========================================
// 多菜式餐单聚合系统 - 核心库
// ==========================================
// 输入: (菜谱, 菜式角色, 份数) 列表
// 输出: MealPlan（购物清单、厨具清单、冲突、备餐时间线、时间/成本估算）
// 系统定位: 纯计算聚合,记录读取 / 持久化 / 界面由外部协作方负责
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 公共工具
pub mod common;

// 数据仓储层 - 记录读取
pub mod repository;

// 引擎层 - 合并与排序规则
pub mod engine;

// 配置层 - 聚合参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CourseRole, KitchenRole, ShoppingCategory};

// 领域实体
pub use domain::{
    ConsolidatedIngredient, ConsolidatedTool, Ingredient, IngredientUsageRecord, MealPlan,
    MealRecipeSelection, Recipe, Task, TaskTimelineEntry, Tool, ToolConflict, ToolUsageRecord,
};

// 引擎
pub use engine::{
    build_meal_plan, generate_prep_timeline, generate_shopping_list, ConflictDetector,
    CostEstimator, IngredientConsolidator, MealPlanAggregator, NoPricingCostEstimator,
    TimeEstimator, TimelineBuilder, ToolConsolidator,
};

// API
pub use api::{ApiError, MealPlanApi, RecipeRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "多菜式餐单聚合系统";
