//! ドメイン型定義
//!
//! CLIとストアで共有される型:
//! - IngredientLine / Recipe: レシピと材料行
//! - MealPlan: 献立カレンダーの1件
//! - ShoppingItem: 買い物リストの1件
//! - AggregatedQuantity / IngredientGroup: 数量集計の入出力

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type IngredientId = u64;
pub type RecipeId = u64;
pub type MealPlanId = u64;
pub type ShoppingItemId = u64;

/// 材料マスタ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
}

/// レシピ内の材料1行
///
/// 数量・単位はユーザー入力の自由テキスト（"200", "1,5", "2 cloves" など）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngredientLine {
    pub ingredient_id: Option<IngredientId>,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl IngredientLine {
    pub fn new(ingredient_id: IngredientId, quantity: Option<&str>, unit: Option<&str>) -> Self {
        Self {
            ingredient_id: Some(ingredient_id),
            quantity: quantity.map(str::to_string),
            unit: unit.map(str::to_string),
        }
    }
}

/// 季節
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl std::str::FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            _ => Err(format!("Unknown season: {}. Use winter, spring, summer, or autumn", s)),
        }
    }
}

/// 難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Unknown difficulty: {}. Use easy, medium, or hard", s)),
        }
    }
}

/// レシピ（材料行つき）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,

    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub seasons: Vec<Season>,

    #[serde(default)]
    pub cuisine: Option<String>,

    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub difficulty: Difficulty,

    pub created_at: DateTime<Utc>,
}

/// レシピ作成用の入力
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<IngredientLine>,
    pub tags: Vec<String>,
    pub seasons: Vec<Season>,
    pub cuisine: Option<String>,
    pub base: Option<String>,
    pub difficulty: Difficulty,
}

/// 食事区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    #[default]
    Dinner,
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            _ => Err(format!("Unknown meal type: {}. Use breakfast, lunch, or dinner", s)),
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
        }
    }
}

/// 献立（日付にレシピを割り当てたもの）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: MealPlanId,
    pub recipe_id: RecipeId,
    pub planned_date: NaiveDate,
    #[serde(default)]
    pub meal_type: MealType,
}

/// 買い物リスト項目の参照先
///
/// 材料マスタへの参照か、自由入力の名前のどちらか一方
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShoppingItemRef {
    Ingredient(IngredientId),
    Custom(String),
}

impl ShoppingItemRef {
    pub fn ingredient_id(&self) -> Option<IngredientId> {
        match self {
            ShoppingItemRef::Ingredient(id) => Some(*id),
            ShoppingItemRef::Custom(_) => None,
        }
    }
}

/// 買い物リストの1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: ShoppingItemId,
    pub item: ShoppingItemRef,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl ShoppingItem {
    pub fn ingredient_id(&self) -> Option<IngredientId> {
        self.item.ingredient_id()
    }
}

/// 買い物リスト項目の作成入力
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingItem {
    pub item: ShoppingItemRef,
    pub quantity: Option<String>,
    pub unit: Option<String>,
    pub count: u32,
}

/// 買い物リスト項目の部分更新
///
/// `None` は変更なし、`Some(None)` は値のクリア
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShoppingItemPatch {
    pub quantity: Option<Option<String>>,
    pub unit: Option<Option<String>>,
    pub checked: Option<bool>,
    pub count: Option<u32>,
}

impl ShoppingItemPatch {
    /// 数量と単位をまとめて置き換えるパッチ
    pub fn quantity(quantity: Option<String>, unit: Option<String>) -> Self {
        Self {
            quantity: Some(quantity),
            unit: Some(unit),
            ..Default::default()
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Default::default()
        }
    }

    /// パッチを項目に適用
    pub fn apply_to(&self, item: &mut ShoppingItem) {
        if let Some(quantity) = &self.quantity {
            item.quantity = quantity.clone();
        }
        if let Some(unit) = &self.unit {
            item.unit = unit.clone();
        }
        if let Some(checked) = self.checked {
            item.checked = checked;
        }
        if let Some(count) = self.count {
            item.count = count;
        }
    }
}

/// 数量集計の結果（表示用の数量文字列と単位）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedQuantity {
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl AggregatedQuantity {
    pub fn new(quantity: Option<&str>, unit: Option<&str>) -> Self {
        Self {
            quantity: quantity.map(str::to_string),
            unit: unit.map(str::to_string),
        }
    }

    /// 数量なし
    pub fn empty() -> Self {
        Self::default()
    }
}

/// 同じ材料の材料行をまとめたもの
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientGroup {
    pub ingredient_id: IngredientId,
    pub quantities: Vec<String>,
    pub units: Vec<String>,
    pub count: u32,
}
