//! Meal Planner
//!
//! レシピ・献立・買い物リストをローカルのJSONストアで管理する。
//! 数量集計は `meal_planner_common` の純粋関数で行う。

pub mod cli;
pub mod config;
pub mod error;
pub mod meals;
pub mod recipes;
pub mod shopping;
pub mod store;

pub use error::{MealPlannerError, Result};
