//! Roll data substitution: `@abilities.str.mod` becomes `3`.

use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;

use bonus_model::RollData;

static DATA_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@([a-z.0-9_-]+)").expect("static pattern is valid"));

/// Replace every `@path` reference with its roll data value.
///
/// References that resolve to nothing, `null`, an array or an object are
/// left in place, which keeps the formula non-numeric.
pub fn replace_formula_data(formula: &str, data: &RollData) -> String {
    DATA_REFERENCE
        .replace_all(formula, |caps: &Captures<'_>| {
            data.lookup(&caps[1])
                .and_then(render)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(match n.as_f64() {
            // 3.0 prints as 3, like the integer it is.
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> RollData {
        let mut data = RollData::new();
        data.insert("abilities", json!({ "int": { "mod": 4 }, "str": { "mod": -1 } }));
        data.insert("item", json!({ "uses": { "value": 2.0 }, "school": " evo ", "name": null }));
        data.insert("prof", 2.5);
        data.insert("inspired", true);
        data
    }

    #[test]
    fn test_replaces_references() {
        let formula = replace_formula_data("@abilities.int.mod + @abilities.str.mod", &data());
        assert_eq!(formula, "4 + -1");
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(replace_formula_data("@item.uses.value", &data()), "2");
        assert_eq!(replace_formula_data("@prof", &data()), "2.5");
    }

    #[test]
    fn test_strings_are_trimmed() {
        assert_eq!(replace_formula_data("school:@item.school", &data()), "school:evo");
    }

    #[test]
    fn test_unresolved_references_stay() {
        let data = data();
        assert_eq!(replace_formula_data("@abilities.wis.mod", &data), "@abilities.wis.mod");
        assert_eq!(replace_formula_data("@item.name", &data), "@item.name");
        assert_eq!(replace_formula_data("@abilities", &data), "@abilities");
    }

    #[test]
    fn test_case_insensitive_reference() {
        let mut data = RollData::new();
        data.insert("Level", 5);
        assert_eq!(replace_formula_data("@Level", &data), "5");
        assert_eq!(replace_formula_data("@inspired", &self::data()), "true");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(replace_formula_data("abc", &data()), "abc");
        assert_eq!(replace_formula_data("user@", &data()), "user@");
    }
}
