//! 買い物リスト
//!
//! - generator: 献立から買い物リストを生成（既存項目に合算）
//! - list: 手動追加・チェック・増減・削除

mod generator;
mod list;

pub use generator::{generate_shopping_list, GenerateReport};
pub use list::{
    add_custom, add_ingredient, clear_all, clear_checked, decrement, increment, item_label,
    remove, toggle, AddOutcome,
};
