//! エラーケーステスト

use meal_planner::MealPlannerError;
use meal_planner_common::calendar::parse_date;

/// 共通ライブラリのエラーを変換
#[test]
fn test_from_common_error() {
    let err: MealPlannerError = meal_planner_common::Error::NoIngredientsFound.into();
    assert!(matches!(err, MealPlannerError::NoIngredientsFound));

    let err: MealPlannerError = parse_date("2026/10/19").unwrap_err().into();
    assert!(matches!(err, MealPlannerError::InvalidInput(_)));
}

/// エラーメッセージ
#[test]
fn test_error_messages() {
    assert_eq!(
        MealPlannerError::NoIngredientsFound.to_string(),
        "選択した献立に材料が見つかりません"
    );
    assert_eq!(
        MealPlannerError::NotFound("レシピ #3".into()).to_string(),
        "見つかりません: レシピ #3"
    );
}

/// JSON解析エラーの変換
#[test]
fn test_from_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: MealPlannerError = json_err.into();
    assert!(matches!(err, MealPlannerError::JsonParse(_)));
    assert!(err.to_string().starts_with("JSON解析エラー"));
}

/// IOエラーの変換
#[test]
fn test_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: MealPlannerError = io_err.into();
    assert!(matches!(err, MealPlannerError::Io(_)));
}
