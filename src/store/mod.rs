//! バックエンドストア
//!
//! 材料・レシピ・献立・買い物リストのCRUD。
//! 各書き込みは独立した呼び出しで、複数書き込みをまたぐトランザクションはない。

mod json;

pub use json::{JsonStore, StoreData};

use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use meal_planner_common::{
    Ingredient, IngredientId, MealPlan, MealPlanId, MealType, NewRecipe, NewShoppingItem, Recipe,
    RecipeId, ShoppingItem, ShoppingItemId, ShoppingItemPatch,
};

#[async_trait]
pub trait BackingStore: Send + Sync {
    /// 買い物リスト（未チェック → 並び順 → 作成日時の順）
    async fn list_shopping_items(&self) -> Result<Vec<ShoppingItem>>;

    async fn create_shopping_item(&self, item: NewShoppingItem) -> Result<ShoppingItem>;

    async fn update_shopping_item(&self, id: ShoppingItemId, patch: ShoppingItemPatch) -> Result<ShoppingItem>;

    async fn delete_shopping_item(&self, id: ShoppingItemId) -> Result<()>;

    /// チェック済み項目を削除し、削除件数を返す
    async fn delete_checked_shopping_items(&self) -> Result<usize>;

    /// 全項目を削除し、削除件数を返す
    async fn delete_all_shopping_items(&self) -> Result<usize>;

    /// 期間内の献立（両端を含む、日付順）
    async fn list_meal_plans(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MealPlan>>;

    async fn create_meal_plan(&self, recipe_id: RecipeId, planned_date: NaiveDate, meal_type: MealType) -> Result<MealPlan>;

    async fn delete_meal_plan(&self, id: MealPlanId) -> Result<()>;

    async fn get_recipe_with_ingredients(&self, id: RecipeId) -> Result<Option<Recipe>>;

    /// レシピ一覧（新しい順）
    async fn list_recipes(&self) -> Result<Vec<Recipe>>;

    async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe>;

    /// レシピと、それを使う献立を削除
    async fn delete_recipe(&self, id: RecipeId) -> Result<()>;

    /// 材料一覧（名前順）
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>>;

    async fn create_ingredient(&self, name: &str) -> Result<Ingredient>;

    /// 名前で材料を検索（大文字小文字を区別しない）
    async fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>>;
}

/// 名前で材料を探し、なければ作成
pub async fn ensure_ingredient<S: BackingStore + ?Sized>(store: &S, name: &str) -> Result<IngredientId> {
    match store.find_ingredient_by_name(name).await? {
        Some(ingredient) => Ok(ingredient.id),
        None => Ok(store.create_ingredient(name).await?.id),
    }
}
