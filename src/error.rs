use thiserror::Error;

#[derive(Error, Debug)]
pub enum MealPlannerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("見つかりません: {0}")]
    NotFound(String),

    #[error("入力が不正です: {0}")]
    InvalidInput(String),

    #[error("選択した献立に材料が見つかりません")]
    NoIngredientsFound,

    #[error("ストアエラー: {0}")]
    Store(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<meal_planner_common::Error> for MealPlannerError {
    fn from(error: meal_planner_common::Error) -> Self {
        match error {
            meal_planner_common::Error::NoIngredientsFound => MealPlannerError::NoIngredientsFound,
            meal_planner_common::Error::InvalidInput(msg) => MealPlannerError::InvalidInput(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, MealPlannerError>;
