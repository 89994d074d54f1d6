//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("選択した献立に材料が見つかりません")]
    NoIngredientsFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_no_ingredients() {
        let error = Error::NoIngredientsFound;
        assert_eq!(format!("{}", error), "選択した献立に材料が見つかりません");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let error = Error::InvalidInput("日付が不正".to_string());
        assert_eq!(format!("{}", error), "Invalid input: 日付が不正");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidInput("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidInput"));
        assert!(debug.contains("テスト"));
    }
}
