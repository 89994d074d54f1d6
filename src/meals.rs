//! 献立カレンダー

use crate::error::Result;
use crate::store::BackingStore;
use chrono::NaiveDate;
use meal_planner_common::calendar::{date_span, days_in_range, days_with_meals, selected_meal_count};
use meal_planner_common::{MealPlan, Recipe};

/// 1日分の献立（レシピ名つき）
#[derive(Debug, Clone)]
pub struct DayMeals {
    pub date: NaiveDate,
    pub meals: Vec<(MealPlan, Option<Recipe>)>,
}

impl DayMeals {
    /// 材料行の合計数
    pub fn ingredient_count(&self) -> usize {
        self.meals
            .iter()
            .filter_map(|(_, recipe)| recipe.as_ref())
            .map(|r| r.ingredients.len())
            .sum()
    }
}

/// 期間内の日ごとの献立
pub async fn overview<S: BackingStore + ?Sized>(store: &S, start: NaiveDate, end: NaiveDate) -> Result<Vec<DayMeals>> {
    let plans = store.list_meal_plans(start, end).await?;

    let mut days = Vec::new();
    for date in days_in_range(start, end) {
        let mut meals = Vec::new();
        for plan in plans.iter().filter(|mp| mp.planned_date == date) {
            let recipe = store.get_recipe_with_ingredients(plan.recipe_id).await?;
            meals.push((plan.clone(), recipe));
        }
        days.push(DayMeals { date, meals });
    }
    Ok(days)
}

/// 期間内で献立のある日（「すべて選択」）
pub async fn dates_with_meals<S: BackingStore + ?Sized>(store: &S, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    let plans = store.list_meal_plans(start, end).await?;
    Ok(days_with_meals(&plans, start, end))
}

/// 選択日に含まれる献立の数
pub async fn count_selected<S: BackingStore + ?Sized>(store: &S, dates: &[NaiveDate]) -> Result<usize> {
    let Some((start, end)) = date_span(dates) else {
        return Ok(0);
    };
    let plans = store.list_meal_plans(start, end).await?;
    Ok(selected_meal_count(&plans, dates))
}
