// ==========================================
// 多菜式餐单聚合系统 - 命令行入口
// ==========================================
// 用法:
//   meal-plan [--db PATH] [--csv] [--verbose] [--json-log] RECIPE_ID:COURSE:SERVINGS ...
//
// 默认输出 MealPlan JSON; --csv 输出购物清单 CSV
// 日志写入 stderr,stdout 只有结果
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use meal_plan_aggregator::api::{MealPlanApi, RecipeRequest};
use meal_plan_aggregator::config::ConfigManager;
use meal_plan_aggregator::db::{init_schema, open_sqlite_connection};
use meal_plan_aggregator::logging;
use meal_plan_aggregator::repository::SqliteRecordFetcher;

const USAGE: &str = "用法: meal-plan [--db PATH] [--csv] [--verbose] [--json-log] RECIPE_ID:COURSE:SERVINGS ...";

struct CliArgs {
    db_path: Option<String>,
    csv: bool,
    verbose: bool,
    json_log: bool,
    selections: Vec<String>,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        db_path: None,
        csv: false,
        verbose: false,
        json_log: false,
        selections: Vec::new(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let path = args.next().ok_or("--db 需要一个路径参数")?;
                parsed.db_path = Some(path);
            }
            "--csv" => parsed.csv = true,
            "--verbose" | "-v" => parsed.verbose = true,
            "--json-log" => parsed.json_log = true,
            "--help" | "-h" => return Err(USAGE.to_string()),
            other if other.starts_with("--") => {
                return Err(format!("未知参数: {}\n{}", other, USAGE));
            }
            _ => parsed.selections.push(arg.clone()),
        }
    }

    if parsed.selections.is_empty() {
        return Err(USAGE.to_string());
    }
    Ok(parsed)
}

/// 默认数据库路径: <data_dir>/meal-plan-aggregator/meal_plan.db
fn default_db_path() -> String {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("meal-plan-aggregator");
    if let Err(e) = std::fs::create_dir_all(&path) {
        tracing::warn!(error = %e, path = %path.display(), "无法创建数据目录");
    }
    path.push("meal_plan.db");
    path.to_string_lossy().to_string()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    if args.json_log {
        logging::init_json();
    } else {
        logging::init_with_level(if args.verbose { "debug" } else { logging::DEFAULT_LOG_LEVEL });
    }

    let db_path = args.db_path.clone().unwrap_or_else(default_db_path);
    tracing::info!(db_path = %db_path, version = meal_plan_aggregator::VERSION, "使用数据库");

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    let requests = args
        .selections
        .iter()
        .map(|s| RecipeRequest::parse(s))
        .collect::<Result<Vec<_>, _>>()?;

    let fetcher = Arc::new(SqliteRecordFetcher::from_connection(conn.clone()));
    let config = Arc::new(ConfigManager::from_connection(conn));
    let api = MealPlanApi::new(fetcher, config);

    let plan = api.build_meal_plan_for_recipes(&requests).await?;

    if args.csv {
        print!("{}", api.export_shopping_list_csv(&plan)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    }

    Ok(())
}
