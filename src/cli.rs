use crate::recipes::IngredientSpec;
use clap::{Parser, Subcommand};
use meal_planner_common::{Difficulty, MealType, Season};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meal-planner")]
#[command(about = "レシピ管理・献立計画・買い物リスト生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ストアファイル（省略時は設定/環境変数/データディレクトリ）
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 材料マスタ
    #[command(subcommand)]
    Ingredient(IngredientCommand),

    /// レシピ
    #[command(subcommand)]
    Recipe(RecipeCommand),

    /// 献立カレンダー
    #[command(subcommand)]
    Plan(PlanCommand),

    /// 買い物リスト
    #[command(subcommand)]
    Shop(ShopCommand),

    /// 設定を表示/編集
    Config {
        /// ストアファイルのパスを設定
        #[arg(long)]
        set_data_path: Option<PathBuf>,

        /// 買い物リスト生成の既定週数を設定
        #[arg(long)]
        set_weeks: Option<u32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum IngredientCommand {
    /// 材料を登録
    Add {
        /// 材料名
        #[arg(required = true)]
        name: String,
    },

    /// 材料一覧
    List,
}

#[derive(Subcommand)]
pub enum RecipeCommand {
    /// レシピを登録
    Add {
        /// レシピ名
        #[arg(required = true)]
        name: String,

        /// 材料（name:quantity:unit、繰り返し指定可）
        #[arg(short, long = "ingredient")]
        ingredients: Vec<IngredientSpec>,

        /// タグ
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// 季節 (winter/spring/summer/autumn)
        #[arg(short, long = "season")]
        seasons: Vec<Season>,

        /// 料理ジャンル
        #[arg(long)]
        cuisine: Option<String>,

        /// ベース（主材料の分類）
        #[arg(long)]
        base: Option<String>,

        /// 難易度 (easy/medium/hard)
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
    },

    /// レシピ一覧（絞り込み）
    List {
        /// 名前で検索
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long = "season")]
        seasons: Vec<Season>,

        #[arg(long = "base")]
        bases: Vec<String>,

        #[arg(long = "cuisine")]
        cuisines: Vec<String>,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long = "difficulty")]
        difficulties: Vec<Difficulty>,
    },

    /// レシピの詳細
    Show {
        #[arg(required = true)]
        id: u64,
    },

    /// レシピを削除（関連する献立も削除）
    Remove {
        #[arg(required = true)]
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum PlanCommand {
    /// 献立を追加
    Add {
        /// レシピID
        #[arg(required = true)]
        recipe_id: u64,

        /// 日付 (YYYY-MM-DD)
        #[arg(required = true)]
        date: String,

        /// 食事区分 (breakfast/lunch/dinner)
        #[arg(short, long, default_value = "dinner")]
        meal_type: MealType,
    },

    /// 週の献立を表示
    List {
        /// 対象週に含まれる日付（省略時は今週）
        #[arg(short, long)]
        week: Option<String>,

        /// 表示する週数
        #[arg(short = 'n', long, default_value = "1")]
        weeks: u32,
    },

    /// 献立を削除
    Remove {
        #[arg(required = true)]
        id: u64,
    },
}

#[derive(Subcommand)]
pub enum ShopCommand {
    /// 献立から買い物リストを生成
    Generate {
        /// 対象週に含まれる日付（省略時は今週）
        #[arg(short, long)]
        week: Option<String>,

        /// 対象の週数（省略時は設定値）
        #[arg(short = 'n', long)]
        weeks: Option<u32>,

        /// 対象日（YYYY-MM-DD、繰り返し指定可。省略時は献立のある全日）
        #[arg(short, long = "day")]
        days: Vec<String>,
    },

    /// 買い物リストを表示
    List,

    /// 材料を追加（リストにあれば+1）
    Add {
        /// 材料名または自由入力の項目名
        #[arg(required = true)]
        name: String,

        /// 材料マスタを使わず自由入力の項目として追加
        #[arg(long)]
        custom: bool,
    },

    /// チェック状態を切り替え
    Toggle {
        #[arg(required = true)]
        id: u64,
    },

    /// 数量を1増やす
    Inc {
        #[arg(required = true)]
        id: u64,
    },

    /// 数量を1減らす
    Dec {
        #[arg(required = true)]
        id: u64,
    },

    /// 項目を削除
    Remove {
        #[arg(required = true)]
        id: u64,
    },

    /// チェック済み項目を削除
    Clear {
        /// チェックに関係なく全項目を削除
        #[arg(long)]
        all: bool,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },
}
