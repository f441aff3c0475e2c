// ==========================================
// 多菜式餐单聚合系统 - 时间估算引擎
// ==========================================
// 规则:
// - active = Σ active_time, passive = Σ passive_time（缺失按 0）
// - total = round((active + passive) * 并行系数),默认系数 0.7
// 说明: 并行系数是整体折减,不是关键路径计算
// ==========================================

use crate::domain::meal_plan::{TaskTimelineEntry, TimeEstimate};

/// 默认并行系数: 多道菜同时准备约节省 30%
pub const DEFAULT_PARALLELIZATION_FACTOR: f64 = 0.7;

// ==========================================
// TimeEstimator - 时间估算引擎
// ==========================================
pub struct TimeEstimator {
    parallelization_factor: f64,
}

impl TimeEstimator {
    pub fn new() -> Self {
        Self::with_parallelization_factor(DEFAULT_PARALLELIZATION_FACTOR)
    }

    /// 指定并行系数（非有限值或负数时回退到默认值）
    pub fn with_parallelization_factor(factor: f64) -> Self {
        let parallelization_factor = if factor.is_finite() && factor >= 0.0 {
            factor
        } else {
            DEFAULT_PARALLELIZATION_FACTOR
        };
        Self {
            parallelization_factor,
        }
    }

    pub fn parallelization_factor(&self) -> f64 {
        self.parallelization_factor
    }

    /// 估算整套餐单的准备时间（分钟）
    pub fn estimate(&self, timeline: &[TaskTimelineEntry]) -> TimeEstimate {
        let (active_time, passive_time) =
            timeline.iter().fold((0u32, 0u32), |(active, passive), entry| {
                (
                    active.saturating_add(entry.task.active_time),
                    passive.saturating_add(entry.task.passive_time.unwrap_or(0)),
                )
            });

        let summed = f64::from(active_time) + f64::from(passive_time);
        let total_time = (summed * self.parallelization_factor).round() as u32;

        TimeEstimate {
            total_time,
            active_time,
            passive_time,
        }
    }
}

impl Default for TimeEstimator {
    fn default() -> Self {
        Self::new()
    }
}
