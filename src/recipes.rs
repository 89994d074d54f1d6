//! レシピ登録
//!
//! CLIの `name:quantity:unit` 形式の材料指定を解析し、
//! 材料マスタを名前で解決（なければ作成）してレシピを登録する。

use crate::error::{MealPlannerError, Result};
use crate::store::{ensure_ingredient, BackingStore};
use meal_planner_common::{IngredientLine, NewRecipe, Recipe};

/// 材料指定（"flour:200:g", "garlic:2 cloves", "salt"）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientSpec {
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl std::str::FromStr for IngredientSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':').map(str::trim);
        let name = parts.next().unwrap_or("");
        if name.is_empty() {
            return Err(format!("材料名が空です: {}", s));
        }

        let non_empty = |p: Option<&str>| p.filter(|v| !v.is_empty()).map(str::to_string);
        let quantity = non_empty(parts.next());
        let unit = non_empty(parts.next());

        Ok(IngredientSpec {
            name: name.to_string(),
            quantity,
            unit,
        })
    }
}

/// 材料指定つきでレシピを登録
pub async fn create_recipe<S: BackingStore + ?Sized>(
    store: &S,
    mut recipe: NewRecipe,
    specs: &[IngredientSpec],
) -> Result<Recipe> {
    if recipe.name.trim().is_empty() {
        return Err(MealPlannerError::InvalidInput("レシピ名が空です".into()));
    }

    for spec in specs {
        let ingredient_id = ensure_ingredient(store, &spec.name).await?;
        recipe.ingredients.push(IngredientLine {
            ingredient_id: Some(ingredient_id),
            quantity: spec.quantity.clone(),
            unit: spec.unit.clone(),
        });
    }

    store.create_recipe(recipe).await
}
