//! 買い物リストの手動操作

use crate::error::{MealPlannerError, Result};
use crate::store::BackingStore;
use meal_planner_common::{
    add_to_quantity, display_quantity, step_down_quantity, Ingredient, IngredientId,
    NewShoppingItem, ShoppingItem, ShoppingItemId, ShoppingItemPatch, ShoppingItemRef,
};
use tracing::debug;

/// 材料追加の結果
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// 新規作成
    Created(ShoppingItem),
    /// 既存の未チェック項目を+1
    Incremented(ShoppingItem),
}

async fn find_item<S: BackingStore + ?Sized>(store: &S, id: ShoppingItemId) -> Result<ShoppingItem> {
    store
        .list_shopping_items()
        .await?
        .into_iter()
        .find(|item| item.id == id)
        .ok_or_else(|| MealPlannerError::NotFound(format!("買い物リスト項目 #{}", id)))
}

/// 材料を追加（未チェックの同じ材料があれば+1）
pub async fn add_ingredient<S: BackingStore + ?Sized>(store: &S, ingredient_id: IngredientId) -> Result<AddOutcome> {
    let existing = store
        .list_shopping_items()
        .await?
        .into_iter()
        .find(|item| item.ingredient_id() == Some(ingredient_id) && !item.checked);

    match existing {
        Some(item) => {
            let added = add_to_quantity(item.quantity.as_deref(), item.unit.as_deref(), Some("1"));
            let updated = store
                .update_shopping_item(item.id, ShoppingItemPatch::quantity(added.quantity, added.unit))
                .await?;
            Ok(AddOutcome::Incremented(updated))
        }
        None => {
            let created = store
                .create_shopping_item(NewShoppingItem {
                    item: ShoppingItemRef::Ingredient(ingredient_id),
                    quantity: Some("1".to_string()),
                    unit: None,
                    count: 1,
                })
                .await?;
            Ok(AddOutcome::Created(created))
        }
    }
}

/// 材料マスタにない自由入力の項目を追加
pub async fn add_custom<S: BackingStore + ?Sized>(store: &S, name: &str) -> Result<ShoppingItem> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MealPlannerError::InvalidInput("項目名が空です".into()));
    }

    store
        .create_shopping_item(NewShoppingItem {
            item: ShoppingItemRef::Custom(name.to_string()),
            quantity: Some("1".to_string()),
            unit: None,
            count: 1,
        })
        .await
}

/// チェック状態を反転
pub async fn toggle<S: BackingStore + ?Sized>(store: &S, id: ShoppingItemId) -> Result<ShoppingItem> {
    let item = find_item(store, id).await?;
    store.update_shopping_item(id, ShoppingItemPatch::checked(!item.checked)).await
}

/// 数量を1増やす
pub async fn increment<S: BackingStore + ?Sized>(store: &S, id: ShoppingItemId) -> Result<ShoppingItem> {
    let item = find_item(store, id).await?;
    let added = add_to_quantity(item.quantity.as_deref(), item.unit.as_deref(), Some("1"));
    store
        .update_shopping_item(id, ShoppingItemPatch::quantity(added.quantity, added.unit))
        .await
}

/// 数量を1減らす（0になったら数量なし）
pub async fn decrement<S: BackingStore + ?Sized>(store: &S, id: ShoppingItemId) -> Result<ShoppingItem> {
    let item = find_item(store, id).await?;
    let reduced = step_down_quantity(item.quantity.as_deref(), item.unit.as_deref());
    if reduced.quantity == item.quantity && reduced.unit == item.unit {
        debug!(id, "数量を減らせないため変更しません");
        return Ok(item);
    }
    store
        .update_shopping_item(id, ShoppingItemPatch::quantity(reduced.quantity, reduced.unit))
        .await
}

pub async fn remove<S: BackingStore + ?Sized>(store: &S, id: ShoppingItemId) -> Result<()> {
    store.delete_shopping_item(id).await
}

/// チェック済み項目を削除
pub async fn clear_checked<S: BackingStore + ?Sized>(store: &S) -> Result<usize> {
    store.delete_checked_shopping_items().await
}

/// 全項目を削除
pub async fn clear_all<S: BackingStore + ?Sized>(store: &S) -> Result<usize> {
    store.delete_all_shopping_items().await
}

/// 表示用のラベル（"名前  数量 単位"）
pub fn item_label(item: &ShoppingItem, ingredients: &[Ingredient]) -> String {
    let name = match &item.item {
        ShoppingItemRef::Custom(name) => name.as_str(),
        ShoppingItemRef::Ingredient(id) => ingredients
            .iter()
            .find(|i| i.id == *id)
            .map(|i| i.name.as_str())
            .unwrap_or("?"),
    };

    match display_quantity(item.quantity.as_deref(), item.unit.as_deref()) {
        Some(details) => format!("{}  {}", name, details),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(item: ShoppingItemRef, quantity: Option<&str>, unit: Option<&str>) -> ShoppingItem {
        ShoppingItem {
            id: 1,
            item,
            quantity: quantity.map(str::to_string),
            unit: unit.map(str::to_string),
            checked: false,
            count: 1,
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_item_label_ingredient() {
        let ingredients = vec![Ingredient { id: 3, name: "flour".into() }];
        let label = item_label(&item(ShoppingItemRef::Ingredient(3), Some("300"), Some("g")), &ingredients);
        assert_eq!(label, "flour  300 g");
    }

    #[test]
    fn test_item_label_custom_without_quantity() {
        let label = item_label(&item(ShoppingItemRef::Custom("paper towels".into()), None, None), &[]);
        assert_eq!(label, "paper towels");
    }

    #[test]
    fn test_item_label_unknown_ingredient() {
        let label = item_label(&item(ShoppingItemRef::Ingredient(99), Some("2"), None), &[]);
        assert_eq!(label, "?  2");
    }
}
