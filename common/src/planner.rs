//! 買い物リストへの書き込み計画
//!
//! 材料グループを集計し、既存の未チェック項目があれば合算、
//! なければ新規作成する書き込みを、副作用なしのデータとして組み立てる。

use crate::error::{Error, Result};
use crate::quantity::add_quantities;
use crate::types::{
    IngredientGroup, IngredientId, NewShoppingItem, ShoppingItem, ShoppingItemId,
    ShoppingItemPatch, ShoppingItemRef,
};
use std::collections::HashMap;

/// 1材料分の書き込み
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedWrite {
    /// 新規項目を作成
    Create(NewShoppingItem),
    /// 既存項目に合算
    Update {
        id: ShoppingItemId,
        patch: ShoppingItemPatch,
    },
}

impl PlannedWrite {
    pub fn is_create(&self) -> bool {
        matches!(self, PlannedWrite::Create(_))
    }
}

/// 未チェックの既存項目を材料IDで引けるようにする
///
/// 同じ材料が複数あれば後のものが優先。
pub fn index_unchecked(existing: &[ShoppingItem]) -> HashMap<IngredientId, &ShoppingItem> {
    existing
        .iter()
        .filter(|item| !item.checked)
        .filter_map(|item| item.ingredient_id().map(|id| (id, item)))
        .collect()
}

/// 既存項目へ集計結果を合算するパッチ
pub fn merge_into_existing(existing: &ShoppingItem, group: &IngredientGroup) -> ShoppingItemPatch {
    let aggregated = group.aggregate();
    let existing_qty = existing.quantity.as_deref().filter(|q| !q.is_empty()).unwrap_or("0");
    let existing_unit = existing.unit.as_deref().unwrap_or("");

    let added = add_quantities(
        Some(existing_qty),
        Some(existing_unit),
        aggregated.quantity.as_deref(),
        aggregated.unit.as_deref(),
    );

    ShoppingItemPatch {
        quantity: Some(added.quantity),
        unit: Some(added.unit),
        checked: None,
        count: Some(existing.count.max(1).saturating_add(group.count)),
    }
}

/// 材料グループから書き込み計画を作成
///
/// グループが空なら `NoIngredientsFound`（何も書き込まない）。
pub fn plan_shopping_writes(
    groups: &[IngredientGroup],
    existing: &[ShoppingItem],
) -> Result<Vec<PlannedWrite>> {
    if groups.is_empty() {
        return Err(Error::NoIngredientsFound);
    }

    let existing_map = index_unchecked(existing);

    let writes = groups
        .iter()
        .map(|group| match existing_map.get(&group.ingredient_id) {
            Some(item) => PlannedWrite::Update {
                id: item.id,
                patch: merge_into_existing(item, group),
            },
            None => {
                let aggregated = group.aggregate();
                PlannedWrite::Create(NewShoppingItem {
                    item: ShoppingItemRef::Ingredient(group.ingredient_id),
                    quantity: aggregated.quantity,
                    unit: aggregated.unit,
                    count: group.count,
                })
            }
        })
        .collect();

    Ok(writes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn group(ingredient_id: u64, quantities: &[&str], units: &[&str]) -> IngredientGroup {
        IngredientGroup {
            ingredient_id,
            quantities: quantities.iter().map(|q| q.to_string()).collect(),
            units: units.iter().map(|u| u.to_string()).collect(),
            count: quantities.len() as u32,
        }
    }

    fn existing(id: u64, ingredient_id: u64, quantity: Option<&str>, unit: Option<&str>, checked: bool) -> ShoppingItem {
        ShoppingItem {
            id,
            item: ShoppingItemRef::Ingredient(ingredient_id),
            quantity: quantity.map(str::to_string),
            unit: unit.map(str::to_string),
            checked,
            count: 1,
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_plan_empty_groups() {
        let result = plan_shopping_writes(&[], &[]);
        assert!(matches!(result, Err(Error::NoIngredientsFound)));
    }

    #[test]
    fn test_plan_creates_new_items() {
        let groups = vec![group(1, &["200", "100"], &["g", "g"])];
        let writes = plan_shopping_writes(&groups, &[]).expect("計画作成失敗");

        assert_eq!(writes, vec![PlannedWrite::Create(NewShoppingItem {
            item: ShoppingItemRef::Ingredient(1),
            quantity: Some("300".into()),
            unit: Some("g".into()),
            count: 2,
        })]);
    }

    #[test]
    fn test_plan_merges_into_unchecked() {
        let groups = vec![group(1, &["100"], &["g"])];
        let items = vec![existing(42, 1, Some("250"), Some("g"), false)];

        let writes = plan_shopping_writes(&groups, &items).expect("計画作成失敗");
        assert_eq!(writes, vec![PlannedWrite::Update {
            id: 42,
            patch: ShoppingItemPatch {
                quantity: Some(Some("350".into())),
                unit: Some(Some("g".into())),
                checked: None,
                count: Some(2),
            },
        }]);
    }

    #[test]
    fn test_plan_ignores_checked_items() {
        let groups = vec![group(1, &["100"], &["g"])];
        let items = vec![existing(42, 1, Some("250"), Some("g"), true)];

        let writes = plan_shopping_writes(&groups, &items).expect("計画作成失敗");
        assert!(writes[0].is_create());
    }

    #[test]
    fn test_merge_into_item_without_quantity() {
        let item = existing(3, 1, None, None, false);
        let patch = merge_into_existing(&item, &group(1, &["2"], &["tbsp"]));

        assert_eq!(patch.quantity, Some(Some("2".into())));
        assert_eq!(patch.unit, Some(Some("tbsp".into())));
    }

    #[test]
    fn test_merge_mismatched_units_concatenates() {
        let item = existing(3, 1, Some("1"), Some("kg"), false);
        let patch = merge_into_existing(&item, &group(1, &["200"], &["g"]));

        assert_eq!(patch.quantity, Some(Some("1 kg + 200 g".into())));
        assert_eq!(patch.unit, Some(None));
    }

    #[test]
    fn test_merge_count_zero_counts_as_one() {
        let mut item = existing(3, 1, Some("1"), None, false);
        item.count = 0;
        let patch = merge_into_existing(&item, &group(1, &["1", "1"], &["", ""]));

        assert_eq!(patch.count, Some(3));
        assert_eq!(patch.quantity, Some(Some("3".into())));
    }

    #[test]
    fn test_merge_count_saturates() {
        let mut item = existing(5, 1, Some("1"), None, false);
        item.count = u32::MAX;
        let patch = merge_into_existing(&item, &group(1, &["1"], &[""]));
        assert_eq!(patch.count, Some(u32::MAX));
    }

    #[test]
    fn test_index_unchecked_last_wins() {
        let items = vec![
            existing(1, 5, Some("1"), None, false),
            existing(2, 5, Some("2"), None, false),
        ];
        let map = index_unchecked(&items);
        assert_eq!(map.get(&5).map(|i| i.id), Some(2));
    }
}
