//! 材料行のグループ化
//!
//! 選択された献立のレシピから材料行を集め、材料IDごとにまとめる。
//! 数量未入力の行は「1個」として扱う（集計前に適用）。

use crate::quantity::aggregate_quantities;
use crate::types::{AggregatedQuantity, IngredientGroup, IngredientId, IngredientLine, MealPlan, Recipe};
use chrono::NaiveDate;
use std::collections::HashMap;

/// 数量未入力の行に既定値を適用
///
/// 戻り値は (数量, 単位)。数量が空なら ("1", "")。
pub fn default_line(line: &IngredientLine) -> (String, String) {
    let raw_qty = line.quantity.as_deref().map(str::trim).unwrap_or("");
    let raw_unit = line.unit.as_deref().map(str::trim).unwrap_or("");

    if raw_qty.is_empty() {
        ("1".to_string(), String::new())
    } else {
        (raw_qty.to_string(), raw_unit.to_string())
    }
}

/// 選択日に該当する献立を抽出
pub fn select_meals<'a>(meal_plans: &'a [MealPlan], selected_dates: &[NaiveDate]) -> Vec<&'a MealPlan> {
    meal_plans
        .iter()
        .filter(|mp| selected_dates.contains(&mp.planned_date))
        .collect()
}

/// レシピ群の材料行を材料IDごとにグループ化
///
/// 同じレシピが複数回選ばれていれば、その回数分だけ寄与する。
/// 材料IDのない行はスキップ。グループは最初に現れた順。
pub fn collect_ingredient_groups<'a, I>(recipes: I) -> Vec<IngredientGroup>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut groups: Vec<IngredientGroup> = Vec::new();
    let mut index: HashMap<IngredientId, usize> = HashMap::new();

    for recipe in recipes {
        for line in &recipe.ingredients {
            let Some(ingredient_id) = line.ingredient_id else {
                continue;
            };
            let (qty, unit) = default_line(line);

            match index.get(&ingredient_id) {
                Some(&i) => {
                    let group = &mut groups[i];
                    group.quantities.push(qty);
                    group.units.push(unit);
                    group.count += 1;
                }
                None => {
                    index.insert(ingredient_id, groups.len());
                    groups.push(IngredientGroup {
                        ingredient_id,
                        quantities: vec![qty],
                        units: vec![unit],
                        count: 1,
                    });
                }
            }
        }
    }

    groups
}

impl IngredientGroup {
    /// グループの数量を1つにまとめる
    pub fn aggregate(&self) -> AggregatedQuantity {
        let quantities: Vec<Option<&str>> = self.quantities.iter().map(|q| Some(q.as_str())).collect();
        let units: Vec<Option<&str>> = self.units.iter().map(|u| Some(u.as_str())).collect();
        aggregate_quantities(&quantities, &units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipe(id: u64, lines: Vec<IngredientLine>) -> Recipe {
        Recipe {
            id,
            name: format!("recipe-{}", id),
            ingredients: lines,
            tags: vec![],
            seasons: vec![],
            cuisine: None,
            base: None,
            difficulty: Default::default(),
            created_at: Utc::now(),
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_default_line_empty_quantity() {
        let line = IngredientLine::new(1, Some("  "), Some("g"));
        assert_eq!(default_line(&line), ("1".to_string(), String::new()));

        let line = IngredientLine::new(1, None, None);
        assert_eq!(default_line(&line), ("1".to_string(), String::new()));
    }

    #[test]
    fn test_default_line_trims() {
        let line = IngredientLine::new(1, Some(" 200 "), Some(" g "));
        assert_eq!(default_line(&line), ("200".to_string(), "g".to_string()));
    }

    #[test]
    fn test_select_meals() {
        let plans = vec![
            MealPlan { id: 1, recipe_id: 10, planned_date: date(2), meal_type: Default::default() },
            MealPlan { id: 2, recipe_id: 11, planned_date: date(3), meal_type: Default::default() },
            MealPlan { id: 3, recipe_id: 12, planned_date: date(4), meal_type: Default::default() },
        ];

        let selected = select_meals(&plans, &[date(2), date(4)]);
        let ids: Vec<u64> = selected.iter().map(|mp| mp.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_collect_groups_merges_same_ingredient() {
        let a = recipe(1, vec![
            IngredientLine::new(100, Some("200"), Some("g")),
            IngredientLine::new(200, None, None),
        ]);
        let b = recipe(2, vec![IngredientLine::new(100, Some("100"), Some("g"))]);

        let groups = collect_ingredient_groups([&a, &b]);
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].ingredient_id, 100);
        assert_eq!(groups[0].quantities, vec!["200", "100"]);
        assert_eq!(groups[0].units, vec!["g", "g"]);
        assert_eq!(groups[0].count, 2);

        assert_eq!(groups[1].ingredient_id, 200);
        assert_eq!(groups[1].quantities, vec!["1"]);
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn test_collect_groups_skips_lines_without_ingredient() {
        let a = recipe(1, vec![IngredientLine {
            ingredient_id: None,
            quantity: Some("3".into()),
            unit: None,
        }]);

        assert!(collect_ingredient_groups([&a]).is_empty());
    }

    #[test]
    fn test_collect_groups_counts_repeated_recipe() {
        let a = recipe(1, vec![IngredientLine::new(5, Some("2"), None)]);
        let groups = collect_ingredient_groups([&a, &a]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].aggregate(), AggregatedQuantity::new(Some("4"), None));
    }

    #[test]
    fn test_group_aggregate_defaults_to_units() {
        let a = recipe(1, vec![IngredientLine::new(9, None, None)]);
        let b = recipe(2, vec![IngredientLine::new(9, Some(""), Some("pinch"))]);

        let groups = collect_ingredient_groups([&a, &b]);
        assert_eq!(groups[0].aggregate(), AggregatedQuantity::new(Some("2"), None));
    }
}
