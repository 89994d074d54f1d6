//! 数量集計
//!
//! 自由テキストの数量・単位を、複数レシピ・複数週にわたって合算する。
//! 数値として足せない組み合わせは " + " で連結し、データを落とさない。
//! どの関数もエラーを返さない（解析できない入力は連結にフォールバック）。

use crate::types::AggregatedQuantity;

/// 数量テキストを数値に変換
///
/// 前後の空白を除去し、最初のカンマを小数点として扱う。
/// 空文字・数値以外（"2 cloves" など）は `None`。
pub fn parse_quantity(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = trimmed.replacen(',', ".", 1);
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// 単位を正規化（小文字化・trim）
///
/// `None`・空文字・空白のみはすべて "" （単位なし）として扱う。
pub fn normalize_unit(unit: Option<&str>) -> String {
    match unit {
        Some(u) if !u.trim().is_empty() => u.trim().to_lowercase(),
        _ => String::new(),
    }
}

/// 数量の表示形式
///
/// 整数は小数点なし（"3"）、それ以外は小数1桁（"1.5"）。
/// 小数2桁目の5は切り上げ（"1.25" → "1.3"）。
pub fn format_quantity(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{:.1}", (n * 10.0).round() / 10.0)
    }
}

/// 空文字をNoneに寄せる
fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

/// ゼロまたは未入力の数量か
fn is_absent_or_zero(qty: Option<&str>, parsed: Option<f64>) -> bool {
    parsed == Some(0.0) || matches!(qty, None | Some("") | Some("0"))
}

/// "数量 単位" の連結用断片
fn fragment(qty: Option<&str>, unit: Option<&str>) -> Option<String> {
    let qty = non_empty(qty)?;
    Some(match non_empty(unit) {
        Some(unit) => format!("{} {}", qty, unit),
        None => qty.to_string(),
    })
}

/// 2つの数量・単位を合算
///
/// - 両方数値で正規化単位が一致 → 合計（0ならNone）、単位は先に空でない方
/// - 片方が未入力/ゼロ → もう片方をそのまま返す
/// - それ以外 → "2 g + 3 kg" のように連結し、単位はNone
pub fn add_quantities(
    qty1: Option<&str>,
    unit1: Option<&str>,
    qty2: Option<&str>,
    unit2: Option<&str>,
) -> AggregatedQuantity {
    let num1 = qty1.and_then(parse_quantity);
    let num2 = qty2.and_then(parse_quantity);

    if let (Some(a), Some(b)) = (num1, num2) {
        if normalize_unit(unit1) == normalize_unit(unit2) {
            let total = a + b;
            if total == 0.0 {
                return AggregatedQuantity::empty();
            }
            return AggregatedQuantity {
                quantity: Some(format_quantity(total)),
                unit: non_empty(unit1).or(non_empty(unit2)).map(str::to_string),
            };
        }
    }

    if is_absent_or_zero(qty1, num1) {
        return AggregatedQuantity::new(non_empty(qty2), non_empty(unit2));
    }
    if is_absent_or_zero(qty2, num2) {
        return AggregatedQuantity::new(non_empty(qty1), non_empty(unit1));
    }

    let parts: Vec<String> = [fragment(qty1, unit1), fragment(qty2, unit2)]
        .into_iter()
        .flatten()
        .collect();

    AggregatedQuantity {
        quantity: Some(parts.join(" + ")),
        unit: None,
    }
}

/// 複数の材料行の数量をまとめる
///
/// `quantities` と `units` は材料行ごとの並列配列。
/// 1件ならそのまま、全件数値かつ単位一致なら合計、それ以外は連結。
pub fn aggregate_quantities(
    quantities: &[Option<&str>],
    units: &[Option<&str>],
) -> AggregatedQuantity {
    let unit_at = |i: usize| units.get(i).copied().flatten();

    match quantities {
        [] => return AggregatedQuantity::empty(),
        [single] => return AggregatedQuantity::new(*single, non_empty(unit_at(0))),
        _ => {}
    }

    let parsed: Vec<Option<f64>> = quantities
        .iter()
        .map(|q| q.and_then(parse_quantity))
        .collect();
    let first_unit = normalize_unit(unit_at(0));

    let all_numeric = parsed.iter().all(Option::is_some);
    let all_same_unit = (0..quantities.len()).all(|i| normalize_unit(unit_at(i)) == first_unit);

    if all_numeric && all_same_unit {
        let total: f64 = parsed.iter().flatten().sum();
        let display_unit = (0..quantities.len()).find_map(|i| non_empty(unit_at(i)));
        return AggregatedQuantity {
            quantity: Some(format_quantity(total)),
            unit: display_unit.map(str::to_string),
        };
    }

    let parts: Vec<String> = quantities
        .iter()
        .enumerate()
        .filter_map(|(i, q)| fragment(*q, unit_at(i)))
        .collect();

    AggregatedQuantity {
        quantity: if parts.is_empty() { None } else { Some(parts.join(" + ")) },
        unit: None,
    }
}

/// 手動追加時の加算（"+1" ボタン）
///
/// 単位の一致は見ず、現在の単位を維持する。
pub fn add_to_quantity(
    current_qty: Option<&str>,
    current_unit: Option<&str>,
    add_qty: Option<&str>,
) -> AggregatedQuantity {
    let current_num = current_qty.and_then(parse_quantity);
    let add_num = add_qty.and_then(parse_quantity);
    let unit = non_empty(current_unit);

    if let Some(current) = current_num {
        let total = current + add_num.unwrap_or(1.0);
        return AggregatedQuantity {
            quantity: Some(format_quantity(total)),
            unit: unit.map(str::to_string),
        };
    }

    let add_part = non_empty(add_qty).unwrap_or("1");
    match non_empty(current_qty) {
        Some(current) => AggregatedQuantity {
            quantity: Some(format!("{} + {}", current, add_part)),
            unit: None,
        },
        None => AggregatedQuantity::new(Some(add_part), unit),
    }
}

/// 手動で1つ減らす
///
/// 数値なら1減らし、0以下になったら数量なしにする。
/// 数値でない・未入力の場合は変更しない。
pub fn step_down_quantity(current_qty: Option<&str>, current_unit: Option<&str>) -> AggregatedQuantity {
    match current_qty.and_then(parse_quantity) {
        Some(current) if current - 1.0 > 0.0 => AggregatedQuantity {
            quantity: Some(format_quantity(current - 1.0)),
            unit: non_empty(current_unit).map(str::to_string),
        },
        Some(_) => AggregatedQuantity::empty(),
        None => AggregatedQuantity::new(current_qty, current_unit),
    }
}

/// 表示用の "数量 単位" 文字列
pub fn display_quantity(quantity: Option<&str>, unit: Option<&str>) -> Option<String> {
    fragment(quantity, unit)
}
