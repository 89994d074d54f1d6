use crate::error::{MealPlannerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// データファイルの場所を上書きする環境変数
pub const DATA_PATH_ENV: &str = "MEAL_PLANNER_DATA";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ストアのJSONファイル（未設定ならデータディレクトリ）
    pub data_path: Option<PathBuf>,
    /// 買い物リスト生成時の既定の週数
    pub weeks_ahead: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            weeks_ahead: 1,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MealPlannerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("meal-planner").join("config.json"))
    }

    /// ストアファイルのパスを決定
    ///
    /// 優先順位: 環境変数 > 設定ファイル > データディレクトリ
    pub fn data_file(&self) -> Result<PathBuf> {
        if let Ok(path) = std::env::var(DATA_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        if let Some(path) = &self.data_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| MealPlannerError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data_dir.join("meal-planner").join("store.json"))
    }

    pub fn set_data_path(&mut self, path: PathBuf) -> Result<()> {
        self.data_path = Some(path);
        self.save()
    }

    pub fn set_weeks_ahead(&mut self, weeks: u32) -> Result<()> {
        if weeks == 0 {
            return Err(MealPlannerError::Config("週数は1以上を指定してください".into()));
        }
        self.weeks_ahead = weeks;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.data_path.is_none());
        assert_eq!(config.weeks_ahead, 1);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"data_path": "/tmp/store.json"}"#)
            .expect("デシリアライズ失敗");
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/store.json")));
        assert_eq!(config.weeks_ahead, 1);
    }

    #[test]
    fn test_data_file_prefers_config_path() {
        // 環境変数が設定されている環境では検証しない
        if std::env::var(DATA_PATH_ENV).is_ok() {
            return;
        }
        let config = Config {
            data_path: Some(PathBuf::from("/srv/kitchen/store.json")),
            weeks_ahead: 1,
        };
        assert_eq!(config.data_file().unwrap(), PathBuf::from("/srv/kitchen/store.json"));
    }
}
