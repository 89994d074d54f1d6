//! Meal Planner Common Library
//!
//! 買い物リストの数量集計と、CLI・ストアで共有される型

pub mod types;
pub mod error;
pub mod quantity;
pub mod grouping;
pub mod planner;
pub mod calendar;
pub mod filter;

pub use types::{
    AggregatedQuantity, Difficulty, Ingredient, IngredientGroup, IngredientId, IngredientLine,
    MealPlan, MealPlanId, MealType, NewRecipe, NewShoppingItem, Recipe, RecipeId, Season,
    ShoppingItem, ShoppingItemId, ShoppingItemPatch, ShoppingItemRef,
};
pub use error::{Error, Result};
pub use quantity::{
    add_quantities, add_to_quantity, aggregate_quantities, display_quantity, format_quantity,
    normalize_unit, parse_quantity, step_down_quantity,
};
pub use grouping::{collect_ingredient_groups, default_line, select_meals};
pub use planner::{merge_into_existing, plan_shopping_writes, PlannedWrite};
pub use filter::{filter_recipes, RecipeFilter};
