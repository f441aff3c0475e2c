// ==========================================
// MealPlanAggregator 集成测试
// ==========================================
// 测试目标: 记录获取 -> 合并 -> 冲突 -> 时间线 -> 估算 的完整链路
// ==========================================

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::in_memory_fetcher::{
    BarrierRecordFetcher, FailingRecordFetcher, InMemoryRecordFetcher,
};
use helpers::mock_config::BrokenConfig;
use helpers::test_data_builder::{ingredient_usage, recipe, selection, tool_usage, TaskBuilder};
use meal_plan_aggregator::config::AggregatorConfig;
use meal_plan_aggregator::domain::{CourseRole, KitchenRole, ShoppingCategory};
use meal_plan_aggregator::engine::{
    generate_prep_timeline, generate_shopping_list, AggregationError, MealPlanAggregator,
};
use meal_plan_aggregator::logging;
use meal_plan_aggregator::repository::RepositoryError;

fn aggregator(fetcher: InMemoryRecordFetcher) -> MealPlanAggregator<InMemoryRecordFetcher, AggregatorConfig> {
    logging::init_test();
    MealPlanAggregator::new(Arc::new(fetcher), Arc::new(AggregatorConfig::default()))
}

// ==========================================
// 份数与食材合并
// ==========================================

#[tokio::test]
async fn test_total_servings_is_sum_of_requested() {
    let selections = vec![
        selection(recipe("r1", "Roast Chicken", Some(4)), CourseRole::Main, 8),
        selection(recipe("r2", "Bread", Some(4)), CourseRole::Side, 4),
        selection(recipe("r3", "Salad", None), CourseRole::Appetizer, 2),
    ];

    let plan = aggregator(InMemoryRecordFetcher::new())
        .aggregate(&selections)
        .await
        .expect("aggregation should succeed");

    assert_eq!(plan.total_servings, 14);
    assert_eq!(plan.recipes, selections);
}

#[tokio::test]
async fn test_shared_ingredient_consolidated_across_recipes() {
    let fetcher = InMemoryRecordFetcher::new().with_ingredient_usages(vec![
        ingredient_usage("r1", "butter", "dairy", Some(2.0), Some("tbsp")),
        ingredient_usage("r2", "butter", "dairy", Some(2.0), Some("tbsp")),
    ]);
    let selections = vec![
        selection(recipe("r1", "Roast Chicken", Some(4)), CourseRole::Main, 4),
        selection(recipe("r2", "Bread", Some(4)), CourseRole::Side, 4),
    ];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();

    assert_eq!(plan.consolidated_ingredients.len(), 1);
    let butter = &plan.consolidated_ingredients[0];
    assert_eq!(butter.total_amount, 4.0);
    assert_eq!(butter.unit.as_deref(), Some("tbsp"));
    assert_eq!(butter.used_in, vec!["Roast Chicken", "Bread"]);
}

#[tokio::test]
async fn test_ingredient_scaled_by_serving_multiplier() {
    let fetcher = InMemoryRecordFetcher::new().with_ingredient_usages(vec![ingredient_usage(
        "r1",
        "flour",
        "baking",
        Some(2.0),
        Some("cup"),
    )]);
    let selections = vec![selection(recipe("r1", "Bread", Some(4)), CourseRole::Side, 8)];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();

    assert_eq!(plan.consolidated_ingredients[0].total_amount, 4.0);
}

#[tokio::test]
async fn test_unknown_category_lands_in_other_bucket() {
    let fetcher = InMemoryRecordFetcher::new().with_ingredient_usages(vec![
        ingredient_usage("r1", "saffron", "exotic", Some(1.0), Some("pinch")),
        ingredient_usage("r1", "carrot", "produce", Some(3.0), None),
    ]);
    let selections = vec![selection(recipe("r1", "Stew", Some(2)), CourseRole::Main, 2)];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();
    let list = generate_shopping_list(&plan.consolidated_ingredients);

    assert_eq!(list.item_count(), 2);
    assert_eq!(list.items(ShoppingCategory::Other).len(), 1);
    assert_eq!(list.items(ShoppingCategory::Other)[0].ingredient.id, "saffron");
    assert_eq!(list.items(ShoppingCategory::Produce)[0].ingredient.id, "carrot");
}

// ==========================================
// 厨具合并与冲突检测
// ==========================================

#[tokio::test]
async fn test_tool_quantity_is_max_not_sum() {
    let fetcher = InMemoryRecordFetcher::new().with_tool_usages(vec![
        tool_usage("r1", "oven", Some(1)),
        tool_usage("r2", "oven", Some(1)),
    ]);
    let selections = vec![
        selection(recipe("r1", "Roast Chicken", Some(4)), CourseRole::Main, 4),
        selection(recipe("r2", "Bread", Some(4)), CourseRole::Side, 4),
    ];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();

    assert_eq!(plan.consolidated_tools.len(), 1);
    assert_eq!(plan.consolidated_tools[0].max_simultaneous_needed, 1);
    assert_eq!(plan.consolidated_tools[0].used_in.len(), 2);
}

#[tokio::test]
async fn test_baking_conflict_detected_and_sauteing_ignored() {
    let fetcher = InMemoryRecordFetcher::new()
        .with_tool_usages(vec![
            tool_usage("r1", "oven", Some(1)),
            tool_usage("r2", "oven", Some(1)),
            tool_usage("r1", "pan", Some(1)),
            tool_usage("r2", "pan", Some(1)),
        ])
        .with_tasks(vec![
            TaskBuilder::new("t1", "r1")
                .task_type("baking")
                .times(20, Some(30))
                .tools(r#"["oven"]"#)
                .build(),
            TaskBuilder::new("t2", "r2")
                .task_type("baking")
                .times(10, Some(60))
                .tools(r#"["oven"]"#)
                .build(),
            TaskBuilder::new("t3", "r1")
                .task_type("sauteing")
                .tool_list(&["pan"])
                .build(),
            TaskBuilder::new("t4", "r2")
                .task_type("Sauteing")
                .tool_list(&["pan"])
                .build(),
        ]);
    let selections = vec![
        selection(recipe("r1", "Roast Chicken", Some(4)), CourseRole::Main, 4),
        selection(recipe("r2", "Bread", Some(4)), CourseRole::Side, 4),
    ];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();

    assert!(plan.has_conflicts());
    assert_eq!(plan.tool_conflicts.len(), 1);
    let conflict = &plan.tool_conflicts[0];
    assert_eq!(conflict.tool.id, "oven");
    assert_eq!(conflict.task1_id, "t1");
    assert_eq!(conflict.task2_id, "t2");
    assert_eq!(conflict.recipe1.id, "r1");
    assert_eq!(conflict.recipe2.id, "r2");
    assert_eq!(conflict.overlapping_minutes, 50);

    let oven = plan
        .consolidated_tools
        .iter()
        .find(|t| t.tool.id == "oven")
        .unwrap();
    assert_eq!(oven.conflicts.len(), 1);
    let pan = plan
        .consolidated_tools
        .iter()
        .find(|t| t.tool.id == "pan")
        .unwrap();
    assert!(pan.conflicts.is_empty());
}

#[tokio::test]
async fn test_malformed_tool_ids_do_not_fail_aggregation() {
    let fetcher = InMemoryRecordFetcher::new().with_tasks(vec![
        TaskBuilder::new("t1", "r1")
            .task_type("roasting")
            .tools("not json")
            .build(),
        TaskBuilder::new("t2", "r2")
            .task_type("roasting")
            .tools(r#"["oven"]"#)
            .build(),
    ]);
    let selections = vec![
        selection(recipe("r1", "Roast Chicken", Some(4)), CourseRole::Main, 4),
        selection(recipe("r2", "Roast Potatoes", Some(4)), CourseRole::Side, 4),
    ];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();

    assert!(plan.tool_conflicts.is_empty());
    assert_eq!(plan.task_timeline.len(), 2);
}

// ==========================================
// 时间线与估算
// ==========================================

#[tokio::test]
async fn test_role_priority_dominates_task_order() {
    let fetcher = InMemoryRecordFetcher::new().with_tasks(vec![
        TaskBuilder::new("line", "r1").role("line_cook").order(1).build(),
        TaskBuilder::new("garde", "r1").role("garde_manger").order(5).build(),
        TaskBuilder::new("mystery", "r1").role("dishwasher").order(0).build(),
    ]);
    let selections = vec![selection(recipe("r1", "Salad", Some(2)), CourseRole::Appetizer, 2)];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();

    let ids: Vec<&str> = plan.task_timeline.iter().map(|e| e.task.id.as_str()).collect();
    assert_eq!(ids, vec!["garde", "line", "mystery"]);
    assert!(plan.task_timeline.iter().all(|e| e.start_time == 0));
    assert_eq!(plan.task_timeline[0].recipe_name, "Salad");

    let prep = generate_prep_timeline(&plan.task_timeline);
    assert_eq!(prep.entries(KitchenRole::GardeManger).len(), 1);
    assert_eq!(prep.entries(KitchenRole::SousChef)[0].task.id, "mystery");
}

#[tokio::test]
async fn test_time_estimate_applies_parallelization_factor() {
    let fetcher = InMemoryRecordFetcher::new().with_tasks(vec![
        TaskBuilder::new("t1", "r1").times(60, Some(20)).build(),
        TaskBuilder::new("t2", "r1").times(40, Some(30)).depends_on(r#"["t1"]"#).build(),
    ]);
    let selections = vec![selection(recipe("r1", "Braise", Some(4)), CourseRole::Main, 4)];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();

    assert_eq!(plan.estimated_active_time, 100);
    assert_eq!(plan.estimated_passive_time, 50);
    assert_eq!(plan.estimated_total_time, 105);
    assert_eq!(plan.task_timeline[1].dependencies, vec!["t1"]);
}

#[tokio::test]
async fn test_cost_is_zero_without_pricing_source() {
    let fetcher = InMemoryRecordFetcher::new().with_ingredient_usages(vec![
        ingredient_usage("r1", "beef", "meat", Some(500.0), Some("g")),
        ingredient_usage("r1", "wine", "beverages", Some(1.0), Some("bottle")),
    ]);
    let selections = vec![selection(recipe("r1", "Stew", Some(4)), CourseRole::Main, 12)];

    let plan = aggregator(fetcher).aggregate(&selections).await.unwrap();

    assert_eq!(plan.consolidated_ingredients.len(), 2);
    assert_eq!(plan.estimated_cost, 0.0);
}

// ==========================================
// 边界与错误传播
// ==========================================

#[tokio::test]
async fn test_empty_selection_yields_empty_plan() {
    let fetcher = InMemoryRecordFetcher::new()
        .with_ingredient_usages(vec![ingredient_usage("r1", "salt", "spices", Some(1.0), None)])
        .with_tasks(vec![TaskBuilder::new("t1", "r1").build()]);

    let plan = aggregator(fetcher).aggregate(&[]).await.unwrap();

    assert_eq!(plan.total_servings, 0);
    assert!(plan.consolidated_ingredients.is_empty());
    assert!(plan.consolidated_tools.is_empty());
    assert!(plan.task_timeline.is_empty());
    assert!(plan.tool_conflicts.is_empty());
    assert_eq!(plan.estimated_total_time, 0);
    assert_eq!(plan.estimated_cost, 0.0);
}

#[tokio::test]
async fn test_fetch_failure_propagates() {
    logging::init_test();
    let aggregator = MealPlanAggregator::new(
        Arc::new(FailingRecordFetcher),
        Arc::new(AggregatorConfig::default()),
    );
    let selections = vec![selection(recipe("r1", "Stew", Some(4)), CourseRole::Main, 4)];

    let result = aggregator.aggregate(&selections).await;

    assert!(matches!(
        result,
        Err(AggregationError::Fetch(RepositoryError::DatabaseConnectionError(_)))
    ));
}

#[tokio::test]
async fn test_config_failure_propagates() {
    logging::init_test();
    let aggregator =
        MealPlanAggregator::new(Arc::new(InMemoryRecordFetcher::new()), Arc::new(BrokenConfig));

    let result = aggregator.aggregate(&[]).await;

    assert!(matches!(result, Err(AggregationError::Config(_))));
}

#[tokio::test]
async fn test_each_aggregation_gets_fresh_plan_id() {
    let aggregator = aggregator(InMemoryRecordFetcher::new());
    let selections = vec![selection(recipe("r1", "Stew", Some(4)), CourseRole::Main, 4)];

    let first = aggregator.aggregate(&selections).await.unwrap();
    let second = aggregator.aggregate(&selections).await.unwrap();

    assert_ne!(first.plan_id, second.plan_id);
    assert_eq!(aggregator.fetcher().fetch_calls(), 6);
}

#[tokio::test]
async fn test_record_fetches_run_concurrently() {
    logging::init_test();
    let aggregator = MealPlanAggregator::new(
        Arc::new(BarrierRecordFetcher::new()),
        Arc::new(AggregatorConfig::default()),
    );
    let selections = vec![selection(recipe("r1", "Stew", Some(4)), CourseRole::Main, 4)];

    let result = tokio::time::timeout(Duration::from_secs(5), aggregator.aggregate(&selections)).await;

    let plan = result
        .expect("三类记录查询应同时在途")
        .expect("聚合应成功");
    assert_eq!(plan.total_servings, 4);
    assert!(plan.consolidated_ingredients.is_empty());
}
