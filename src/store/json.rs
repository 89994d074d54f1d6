//! JSONファイルストア
//!
//! 全データを1つのJSONドキュメントとして保持し、書き込みごとに保存する。
//! 保存は一時ファイルに書いてからリネーム。

use super::BackingStore;
use crate::error::{MealPlannerError, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use meal_planner_common::{
    Ingredient, MealPlan, MealPlanId, MealType, NewRecipe, NewShoppingItem, Recipe,
    RecipeId, ShoppingItem, ShoppingItemId, ShoppingItemPatch, ShoppingItemRef,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// ストアファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 次に払い出すID（全エンティティ共通）
    next_id: u64,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub meal_plans: Vec<MealPlan>,
    #[serde(default)]
    pub shopping_items: Vec<ShoppingItem>,
}

impl StoreData {
    const CURRENT_VERSION: u32 = 1;

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn shopping_item_mut(&mut self, id: ShoppingItemId) -> Result<&mut ShoppingItem> {
        self.shopping_items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| MealPlannerError::NotFound(format!("買い物リスト項目 #{}", id)))
    }
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            next_id: 1,
            ingredients: Vec::new(),
            recipes: Vec::new(),
            meal_plans: Vec::new(),
            shopping_items: Vec::new(),
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub struct JsonStore {
    path: Option<PathBuf>,
    data: Mutex<StoreData>,
}

impl JsonStore {
    /// ストアファイルを開く（なければ空のストア）
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let data = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await?;
            let data: StoreData = serde_json::from_str(&content)?;
            if data.version != StoreData::CURRENT_VERSION {
                return Err(MealPlannerError::Store(format!(
                    "未対応のストアバージョン: {} ({})",
                    data.version,
                    path.display()
                )));
            }
            info!(path = %path.display(), recipes = data.recipes.len(), "ストアを読み込みました");
            data
        } else {
            info!(path = %path.display(), "ストアファイルがないため新規作成します");
            StoreData::default()
        };

        Ok(Self {
            path: Some(path),
            data: Mutex::new(data),
        })
    }

    /// ディスクに保存しないストア
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: Mutex::new(StoreData::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 現在のデータの複製
    pub async fn snapshot(&self) -> StoreData {
        self.data.lock().await.clone()
    }

    async fn persist(&self, data: &StoreData) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(data)?;
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content).await?;
        tokio::fs::rename(&tmp_path, path).await?;
        Ok(())
    }

    /// 複製に変更を適用して保存し、成功したら反映
    async fn write<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut StoreData) -> Result<T> + Send,
        T: Send,
    {
        let mut guard = self.data.lock().await;
        let mut next = guard.clone();
        let output = mutate(&mut next)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(output)
    }
}

#[async_trait]
impl BackingStore for JsonStore {
    async fn list_shopping_items(&self) -> Result<Vec<ShoppingItem>> {
        let mut items = self.data.lock().await.shopping_items.clone();
        items.sort_by(|a, b| {
            a.checked
                .cmp(&b.checked)
                .then(a.sort_order.cmp(&b.sort_order))
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(items)
    }

    async fn create_shopping_item(&self, item: NewShoppingItem) -> Result<ShoppingItem> {
        let item_ref = match item.item {
            ShoppingItemRef::Custom(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(MealPlannerError::InvalidInput("項目名が空です".into()));
                }
                ShoppingItemRef::Custom(name)
            }
            other => other,
        };

        let created = self
            .write(move |data| {
                let created = ShoppingItem {
                    id: data.allocate_id(),
                    item: item_ref,
                    quantity: item.quantity,
                    unit: item.unit,
                    checked: false,
                    count: item.count,
                    sort_order: 0,
                    created_at: Utc::now(),
                };
                data.shopping_items.push(created.clone());
                Ok(created)
            })
            .await?;

        debug!(id = created.id, quantity = ?created.quantity, unit = ?created.unit, "買い物リスト項目を作成");
        Ok(created)
    }

    async fn update_shopping_item(&self, id: ShoppingItemId, patch: ShoppingItemPatch) -> Result<ShoppingItem> {
        let updated = self
            .write(move |data| {
                let item = data.shopping_item_mut(id)?;
                patch.apply_to(item);
                Ok(item.clone())
            })
            .await?;

        debug!(id, quantity = ?updated.quantity, unit = ?updated.unit, checked = updated.checked, "買い物リスト項目を更新");
        Ok(updated)
    }

    async fn delete_shopping_item(&self, id: ShoppingItemId) -> Result<()> {
        self.write(|data| {
            let before = data.shopping_items.len();
            data.shopping_items.retain(|item| item.id != id);
            if data.shopping_items.len() == before {
                return Err(MealPlannerError::NotFound(format!("買い物リスト項目 #{}", id)));
            }
            Ok(())
        })
        .await
    }

    async fn delete_checked_shopping_items(&self) -> Result<usize> {
        self.write(|data| {
            let before = data.shopping_items.len();
            data.shopping_items.retain(|item| !item.checked);
            Ok(before - data.shopping_items.len())
        })
        .await
    }

    async fn delete_all_shopping_items(&self) -> Result<usize> {
        self.write(|data| {
            let removed = data.shopping_items.len();
            data.shopping_items.clear();
            Ok(removed)
        })
        .await
    }

    async fn list_meal_plans(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MealPlan>> {
        let data = self.data.lock().await;
        let mut plans: Vec<MealPlan> = data
            .meal_plans
            .iter()
            .filter(|mp| mp.planned_date >= start && mp.planned_date <= end)
            .cloned()
            .collect();
        plans.sort_by(|a, b| a.planned_date.cmp(&b.planned_date).then(a.id.cmp(&b.id)));
        Ok(plans)
    }

    async fn create_meal_plan(&self, recipe_id: RecipeId, planned_date: NaiveDate, meal_type: MealType) -> Result<MealPlan> {
        self.write(move |data| {
            if !data.recipes.iter().any(|r| r.id == recipe_id) {
                return Err(MealPlannerError::NotFound(format!("レシピ #{}", recipe_id)));
            }
            let plan = MealPlan {
                id: data.allocate_id(),
                recipe_id,
                planned_date,
                meal_type,
            };
            data.meal_plans.push(plan.clone());
            Ok(plan)
        })
        .await
    }

    async fn delete_meal_plan(&self, id: MealPlanId) -> Result<()> {
        self.write(|data| {
            let before = data.meal_plans.len();
            data.meal_plans.retain(|mp| mp.id != id);
            if data.meal_plans.len() == before {
                return Err(MealPlannerError::NotFound(format!("献立 #{}", id)));
            }
            Ok(())
        })
        .await
    }

    async fn get_recipe_with_ingredients(&self, id: RecipeId) -> Result<Option<Recipe>> {
        let data = self.data.lock().await;
        Ok(data.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let mut recipes = self.data.lock().await.recipes.clone();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(recipes)
    }

    async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe> {
        let name = recipe.name.trim().to_string();
        if name.is_empty() {
            return Err(MealPlannerError::InvalidInput("レシピ名が空です".into()));
        }

        self.write(move |data| {
            let unknown = recipe
                .ingredients
                .iter()
                .filter_map(|line| line.ingredient_id)
                .find(|id| !data.ingredients.iter().any(|i| i.id == *id));
            if let Some(id) = unknown {
                return Err(MealPlannerError::NotFound(format!("材料 #{}", id)));
            }

            let created = Recipe {
                id: data.allocate_id(),
                name,
                ingredients: recipe.ingredients,
                tags: recipe.tags,
                seasons: recipe.seasons,
                cuisine: recipe.cuisine,
                base: recipe.base,
                difficulty: recipe.difficulty,
                created_at: Utc::now(),
            };
            data.recipes.push(created.clone());
            Ok(created)
        })
        .await
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<()> {
        self.write(|data| {
            let before = data.recipes.len();
            data.recipes.retain(|r| r.id != id);
            if data.recipes.len() == before {
                return Err(MealPlannerError::NotFound(format!("レシピ #{}", id)));
            }
            data.meal_plans.retain(|mp| mp.recipe_id != id);
            Ok(())
        })
        .await
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        let mut ingredients = self.data.lock().await.ingredients.clone();
        ingredients.sort_by_key(|i| i.name.to_lowercase());
        Ok(ingredients)
    }

    async fn create_ingredient(&self, name: &str) -> Result<Ingredient> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(MealPlannerError::InvalidInput("材料名が空です".into()));
        }

        self.write(move |data| {
            if data.ingredients.iter().any(|i| same_name(&i.name, &name)) {
                return Err(MealPlannerError::InvalidInput(format!("材料「{}」は登録済みです", name)));
            }
            let ingredient = Ingredient {
                id: data.allocate_id(),
                name,
            };
            data.ingredients.push(ingredient.clone());
            Ok(ingredient)
        })
        .await
    }

    async fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        let name = name.trim();
        let data = self.data.lock().await;
        Ok(data
            .ingredients
            .iter()
            .find(|i| same_name(&i.name, name))
            .cloned())
    }
}
