//! レシピの絞り込み
//!
//! 名前検索・季節・ベース・料理ジャンル・タグ・難易度で絞り込む。

use crate::types::{Difficulty, Recipe, Season};
use serde::{Deserialize, Serialize};

/// 絞り込み条件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeFilter {
    pub search: String,
    pub seasons: Vec<Season>,
    pub bases: Vec<String>,
    pub cuisines: Vec<String>,
    pub tags: Vec<String>,
    pub difficulties: Vec<Difficulty>,
}

impl RecipeFilter {
    /// 何らかの条件が指定されているか
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.seasons.is_empty()
            || !self.bases.is_empty()
            || !self.cuisines.is_empty()
            || !self.tags.is_empty()
            || !self.difficulties.is_empty()
    }

    /// レシピが条件に合うか
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty() && !recipe.name.to_lowercase().contains(&search) {
            return false;
        }

        // 4季節すべて選択は「絞り込みなし」と同じ
        if !self.seasons.is_empty() && self.seasons.len() < Season::ALL.len() {
            if !self.seasons.iter().any(|s| recipe.seasons.contains(s)) {
                return false;
            }
        }

        if !self.bases.is_empty() && !contains_ignore_case(&self.bases, recipe.base.as_deref()) {
            return false;
        }

        if !self.cuisines.is_empty() && !contains_ignore_case(&self.cuisines, recipe.cuisine.as_deref()) {
            return false;
        }

        if !self.tags.is_empty()
            && !self
                .tags
                .iter()
                .any(|t| recipe.tags.iter().any(|rt| same_label(rt, t)))
        {
            return false;
        }

        if !self.difficulties.is_empty() && !self.difficulties.contains(&recipe.difficulty) {
            return false;
        }

        true
    }
}

fn same_label(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn contains_ignore_case(values: &[String], target: Option<&str>) -> bool {
    match target {
        Some(target) => values.iter().any(|v| same_label(v, target)),
        None => false,
    }
}

/// 条件に合うレシピを抽出
pub fn filter_recipes<'a>(recipes: &'a [Recipe], filter: &RecipeFilter) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipe(name: &str, seasons: Vec<Season>, tags: &[&str], cuisine: Option<&str>) -> Recipe {
        Recipe {
            id: 0,
            name: name.to_string(),
            ingredients: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            seasons,
            cuisine: cuisine.map(str::to_string),
            base: None,
            difficulty: Difficulty::Easy,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Recipe> {
        vec![
            recipe("Ratatouille", vec![Season::Summer], &["vegetarian"], Some("French")),
            recipe("Pot-au-feu", vec![Season::Winter], &["comfort"], Some("French")),
            recipe("Pad thai", vec![], &["quick"], Some("Thai")),
        ]
    }

    #[test]
    fn test_labels_match_non_ascii_case() {
        let recipes = vec![
            recipe("Salade niçoise", vec![], &["Été"], Some("Française")),
            recipe("Pot-au-feu", vec![], &["hiver"], Some("Française")),
        ];

        let by_tag = RecipeFilter { tags: vec!["été".into()], ..Default::default() };
        let names: Vec<&str> = filter_recipes(&recipes, &by_tag).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Salade niçoise"]);

        let by_cuisine = RecipeFilter { cuisines: vec!["FRANÇAISE".into()], ..Default::default() };
        assert_eq!(filter_recipes(&recipes, &by_cuisine).len(), 2);
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let recipes = sample();
        let filter = RecipeFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter_recipes(&recipes, &filter).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let recipes = sample();
        let filter = RecipeFilter { search: "RATA".into(), ..Default::default() };
        let names: Vec<&str> = filter_recipes(&recipes, &filter).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ratatouille"]);
    }

    #[test]
    fn test_season_filter() {
        let recipes = sample();
        let filter = RecipeFilter { seasons: vec![Season::Winter], ..Default::default() };
        let names: Vec<&str> = filter_recipes(&recipes, &filter).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pot-au-feu"]);
    }

    #[test]
    fn test_all_seasons_means_no_filter() {
        let recipes = sample();
        let filter = RecipeFilter { seasons: Season::ALL.to_vec(), ..Default::default() };
        assert!(filter.is_active());
        assert_eq!(filter_recipes(&recipes, &filter).len(), 3);
    }

    #[test]
    fn test_cuisine_and_tag_filter() {
        let recipes = sample();
        let filter = RecipeFilter {
            cuisines: vec!["french".into()],
            tags: vec!["Comfort".into(), "quick".into()],
            ..Default::default()
        };
        let names: Vec<&str> = filter_recipes(&recipes, &filter).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pot-au-feu"]);
    }

    #[test]
    fn test_difficulty_filter() {
        let mut recipes = sample();
        recipes[2].difficulty = Difficulty::Hard;
        let filter = RecipeFilter { difficulties: vec![Difficulty::Hard], ..Default::default() };
        let names: Vec<&str> = filter_recipes(&recipes, &filter).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pad thai"]);
    }
}
