//! 献立からの買い物リスト生成
//!
//! 1. 選択日の献立を集める
//! 2. 各献立のレシピの材料行を材料IDでまとめる
//! 3. 集計して既存の未チェック項目に合算、なければ新規作成
//!
//! 書き込みは材料ごとに1回ずつ順番に行い、失敗した時点で中断する。
//! それまでに書き込んだ材料はそのまま残る（ロールバックなし）。
//! 同じ献立から2回生成すると数量は2倍になる（置き換えではなく合算）。

use crate::error::{MealPlannerError, Result};
use crate::store::BackingStore;
use chrono::NaiveDate;
use meal_planner_common::calendar::date_span;
use meal_planner_common::{collect_ingredient_groups, plan_shopping_writes, select_meals, PlannedWrite};
use tracing::{debug, info, warn};

/// 生成結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// 対象になった献立の数
    pub meals: usize,
    /// 処理した材料の数（作成 + 合算）
    pub processed: usize,
    /// 新規作成した項目数
    pub created: usize,
    /// 既存項目に合算した数
    pub merged: usize,
}

/// 選択日の献立から買い物リストを生成
pub async fn generate_shopping_list<S: BackingStore + ?Sized>(
    store: &S,
    selected_dates: &[NaiveDate],
) -> Result<GenerateReport> {
    let Some((start, end)) = date_span(selected_dates) else {
        return Err(MealPlannerError::NoIngredientsFound);
    };

    let meal_plans = store.list_meal_plans(start, end).await?;
    let selected = select_meals(&meal_plans, selected_dates);
    debug!(meals = selected.len(), %start, %end, "献立を選択");

    let mut recipes = Vec::with_capacity(selected.len());
    for meal in &selected {
        match store.get_recipe_with_ingredients(meal.recipe_id).await? {
            Some(recipe) => recipes.push(recipe),
            None => warn!(meal_plan = meal.id, recipe = meal.recipe_id, "献立のレシピが見つかりません"),
        }
    }

    let groups = collect_ingredient_groups(&recipes);
    if groups.is_empty() {
        return Err(MealPlannerError::NoIngredientsFound);
    }

    let existing = store.list_shopping_items().await?;
    let writes = plan_shopping_writes(&groups, &existing)?;

    let mut report = GenerateReport {
        meals: selected.len(),
        ..Default::default()
    };

    for write in writes {
        let result = match write {
            PlannedWrite::Create(item) => store.create_shopping_item(item).await.map(|_| report.created += 1),
            PlannedWrite::Update { id, patch } => store.update_shopping_item(id, patch).await.map(|_| report.merged += 1),
        };

        if let Err(e) = result {
            warn!(processed = report.processed, error = %e, "買い物リスト生成を中断しました");
            return Err(e);
        }
        report.processed += 1;
    }

    info!(
        processed = report.processed,
        created = report.created,
        merged = report.merged,
        "買い物リストを生成しました"
    );
    Ok(report)
}
