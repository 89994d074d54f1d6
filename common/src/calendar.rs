//! 献立カレンダーの日付ユーティリティ
//!
//! 週は月曜始まり。

use crate::error::{Error, Result};
use crate::types::MealPlan;
use chrono::{Datelike, Duration, NaiveDate};

/// "YYYY-MM-DD" 形式の日付を解析
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidInput(format!("日付の形式が不正です ({}): {}", text, e)))
}

/// 指定日を含む週（月曜〜日曜）
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    (start, start + Duration::days(6))
}

/// 指定日を含む週から `weeks` 週分の範囲
pub fn weeks_range(date: NaiveDate, weeks: u32) -> (NaiveDate, NaiveDate) {
    let (start, _) = week_range(date);
    let weeks = weeks.max(1) as i64;
    (start, start + Duration::days(weeks * 7 - 1))
}

/// 範囲内の全日付
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// 範囲内で献立のある日付（「すべて選択」用）
pub fn days_with_meals(meal_plans: &[MealPlan], start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    days_in_range(start, end)
        .into_iter()
        .filter(|day| meal_plans.iter().any(|mp| mp.planned_date == *day))
        .collect()
}

/// 選択日に含まれる献立の数
pub fn selected_meal_count(meal_plans: &[MealPlan], selected_dates: &[NaiveDate]) -> usize {
    meal_plans
        .iter()
        .filter(|mp| selected_dates.contains(&mp.planned_date))
        .count()
}

/// 選択日の最小・最大（献立の読み込み範囲）
pub fn date_span(dates: &[NaiveDate]) -> Option<(NaiveDate, NaiveDate)> {
    let min = dates.iter().min()?;
    let max = dates.iter().max()?;
    Some((*min, *max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MealType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan(id: u64, planned_date: NaiveDate) -> MealPlan {
        MealPlan { id, recipe_id: 1, planned_date, meal_type: MealType::Dinner }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-10-18").unwrap(), date(2026, 10, 18));
        assert!(matches!(parse_date("18/10/2026"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_week_range_starts_monday() {
        // 2026-10-18 は日曜日
        assert_eq!(week_range(date(2026, 10, 18)), (date(2026, 10, 12), date(2026, 10, 18)));
        assert_eq!(week_range(date(2026, 10, 19)), (date(2026, 10, 19), date(2026, 10, 25)));
    }

    #[test]
    fn test_weeks_range() {
        assert_eq!(weeks_range(date(2026, 10, 21), 2), (date(2026, 10, 19), date(2026, 11, 1)));
        assert_eq!(weeks_range(date(2026, 10, 21), 0), (date(2026, 10, 19), date(2026, 10, 25)));
    }

    #[test]
    fn test_days_with_meals() {
        let plans = vec![plan(1, date(2026, 10, 20)), plan(2, date(2026, 10, 20)), plan(3, date(2026, 10, 23))];
        let days = days_with_meals(&plans, date(2026, 10, 19), date(2026, 10, 25));
        assert_eq!(days, vec![date(2026, 10, 20), date(2026, 10, 23)]);
    }

    #[test]
    fn test_selected_meal_count() {
        let plans = vec![plan(1, date(2026, 10, 20)), plan(2, date(2026, 10, 20)), plan(3, date(2026, 10, 23))];
        assert_eq!(selected_meal_count(&plans, &[date(2026, 10, 20)]), 2);
        assert_eq!(selected_meal_count(&plans, &[]), 0);
    }

    #[test]
    fn test_date_span() {
        assert_eq!(date_span(&[]), None);
        assert_eq!(
            date_span(&[date(2026, 10, 23), date(2026, 10, 20)]),
            Some((date(2026, 10, 20), date(2026, 10, 23)))
        );
    }
}
