//! Raw record -> [`CanonicalRecipe`] normalization.
//!
//! Normalization never fails: a record without a usable title, or with a
//! non-text value in a text field, is skipped (`None`). Any other field that
//! can't be understood is left absent.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::record::{is_truthy, loose_text, RawRecord};
use crate::types::CanonicalRecipe;

/// Literal some exporters write instead of leaving a text field out.
const NONE_SENTINEL: &str = "None";

/// `<number> h|hr|hrs|hour|hours`
static HOUR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:hours?|hrs?|h)").expect("Invalid hour regex")
});

/// `<number> m|min|mins|minute|minutes`, not followed by a word character,
/// so "3 months" does not read as three minutes.
static MINUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(?:minutes?|mins?|m)\b").expect("Invalid minute regex")
});

static DIGITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("Invalid digits regex"));

/// Leading decimal number, the way `parseFloat` reads "4.5 stars".
static LEADING_FLOAT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("Invalid float regex")
});

/// Map one raw record to a canonical recipe, or `None` to skip it.
pub fn normalize(record: &RawRecord) -> Option<CanonicalRecipe> {
    let title = record.get_str("title").map(str::trim).filter(|t| !t.is_empty())?;

    Some(CanonicalRecipe {
        title: title.to_string(),
        description: text_field(record, "description")?,
        cuisine: text_field(record, "cuisine")?,
        rating: record.get("rating").and_then(parse_rating),
        prep_time: record.get("prep_time").and_then(parse_duration_minutes),
        cook_time: record.get("cook_time").and_then(parse_duration_minutes),
        total_time: record.get("total_time").and_then(parse_duration_minutes),
        serves: record.get("serves").and_then(serves_text),
        nutrients: record.get("nutrients").filter(|v| is_truthy(v)).cloned(),
    })
}

/// `Some(None)` for an absent, falsy or `"None"` field. `None` when the field
/// holds a truthy non-string, which rejects the whole record.
fn text_field(record: &RawRecord, key: &str) -> Option<Option<String>> {
    let Some(value) = record.get(key).filter(|v| is_truthy(v)) else {
        return Some(None);
    };
    match value {
        Value::String(s) if s == NONE_SENTINEL => Some(None),
        Value::String(s) => {
            let trimmed = s.trim();
            Some((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        _ => None,
    }
}

fn serves_text(value: &Value) -> Option<String> {
    is_truthy(value).then(|| loose_text(value))
}

/// Parse a duration into whole minutes.
///
/// Numbers are taken as minutes. Strings may combine an hour and a minute
/// component ("1h 30m", "2 hours", "45 minutes") or be bare digits ("90").
///
/// A total of zero is reported as absent, not `Some(0)`: "0 minutes" and
/// "no duration given" are indistinguishable downstream.
pub fn parse_duration_minutes(value: &Value) -> Option<i32> {
    let minutes = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_duration_text(s)?,
        _ => return None,
    };

    let rounded = minutes.round();
    if !rounded.is_finite() || rounded <= 0.0 || rounded > f64::from(i32::MAX) {
        return None;
    }
    Some(rounded as i32)
}

fn parse_duration_text(raw: &str) -> Option<f64> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() || text == "null" {
        return None;
    }

    let mut total = 0.0;

    if let Some(hours) = first_number(&HOUR_REGEX, &text) {
        total += hours * 60.0;
    }
    if let Some(minutes) = first_number(&MINUTE_REGEX, &text) {
        total += minutes;
    }

    if total == 0.0 && DIGITS_REGEX.is_match(&text) {
        total = text.parse::<f64>().ok()?;
    }

    Some(total)
}

fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Coerce a rating. Falsy values (including `0`) are absent; strings are read
/// up to the first non-numeric character.
pub fn parse_rating(value: &Value) -> Option<f64> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => LEADING_FLOAT_REGEX
            .find(s)
            .and_then(|m| m.as_str().trim().parse::<f64>().ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    fn duration(value: Value) -> Option<i32> {
        parse_duration_minutes(&value)
    }

    #[test]
    fn test_duration_hours_and_minutes() {
        assert_eq!(duration(json!("1h 30m")), Some(90));
        assert_eq!(duration(json!("45 minutes")), Some(45));
        assert_eq!(duration(json!("2 hours")), Some(120));
        assert_eq!(duration(json!("1 hr 5 mins")), Some(65));
        assert_eq!(duration(json!("1.5 hours")), Some(90));
        assert_eq!(duration(json!("PT1H20M")), Some(80));
    }

    #[test]
    fn test_duration_bare_digits() {
        assert_eq!(duration(json!("90")), Some(90));
        assert_eq!(duration(json!("  15 ")), Some(15));
        assert_eq!(duration(json!(25)), Some(25));
        assert_eq!(duration(json!(12.6)), Some(13));
    }

    #[test]
    fn test_duration_zero_is_absent() {
        // Lossy on purpose: a zero-minute duration is stored as absent
        assert_eq!(duration(json!("0m")), None);
        assert_eq!(duration(json!("0")), None);
        assert_eq!(duration(json!(0)), None);
    }

    #[test]
    fn test_duration_unparsable() {
        assert_eq!(duration(Value::Null), None);
        assert_eq!(duration(json!("garbage")), None);
        assert_eq!(duration(json!("null")), None);
        assert_eq!(duration(json!("")), None);
        assert_eq!(duration(json!(-10)), None);
        assert_eq!(duration(json!(["1h"])), None);
        assert_eq!(duration(json!(true)), None);
    }

    #[test]
    fn test_duration_minute_unit_needs_word_boundary() {
        assert_eq!(duration(json!("3 months")), None);
        assert_eq!(duration(json!("2 hours 3 months")), Some(120));
    }

    #[test]
    fn test_rating() {
        assert_eq!(parse_rating(&json!(4.5)), Some(4.5));
        assert_eq!(parse_rating(&json!("4.2")), Some(4.2));
        assert_eq!(parse_rating(&json!("4.5 stars")), Some(4.5));
        assert_eq!(parse_rating(&json!("bad")), None);
        assert_eq!(parse_rating(&json!(-1)), Some(-1.0));
        assert_eq!(parse_rating(&json!({"value": 4})), None);
    }

    #[test]
    fn test_rating_zero_is_absent() {
        // Falsy numbers are treated as missing, so a genuine 0 rating is lost
        assert_eq!(parse_rating(&json!(0)), None);
        assert_eq!(parse_rating(&json!("")), None);
        assert_eq!(parse_rating(&Value::Null), None);
    }

    #[test]
    fn test_title_required() {
        assert!(normalize(&record(json!({"title": "   "}))).is_none());
        assert!(normalize(&record(json!({"title": null}))).is_none());
        assert!(normalize(&record(json!({"cuisine": "Thai"}))).is_none());
        assert!(normalize(&record(json!({"title": 17}))).is_none());
    }

    #[test]
    fn test_full_record() {
        let raw = record(json!({
            "title": "  Sweet Potato Pie ",
            "description": " Rich and creamy. ",
            "cuisine": "Southern Recipes",
            "rating": "4.8",
            "prep_time": "15 mins",
            "cook_time": "1 hr 5 mins",
            "total_time": 80,
            "serves": "8 servings",
            "nutrients": {"calories": "389 kcal", "fatContent": "21 g"}
        }));

        let recipe = normalize(&raw).unwrap();
        assert_eq!(recipe.title, "Sweet Potato Pie");
        assert_eq!(recipe.description.as_deref(), Some("Rich and creamy."));
        assert_eq!(recipe.cuisine.as_deref(), Some("Southern Recipes"));
        assert_eq!(recipe.rating, Some(4.8));
        assert_eq!(recipe.prep_time, Some(15));
        assert_eq!(recipe.cook_time, Some(65));
        assert_eq!(recipe.total_time, Some(80));
        assert_eq!(recipe.serves.as_deref(), Some("8 servings"));
        assert_eq!(
            recipe.nutrients,
            Some(json!({"calories": "389 kcal", "fatContent": "21 g"}))
        );
    }

    #[test]
    fn test_none_sentinel_and_falsy_text() {
        let raw = record(json!({
            "title": "Plain Rice",
            "description": "None",
            "cuisine": 0,
            "serves": 4,
            "nutrients": null
        }));

        let recipe = normalize(&raw).unwrap();
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.cuisine, None);
        assert_eq!(recipe.serves.as_deref(), Some("4"));
        assert_eq!(recipe.nutrients, None);

        let raw = record(json!({"title": "Plain Rice", "description": "   ", "cuisine": false}));
        let recipe = normalize(&raw).unwrap();
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.cuisine, None);
    }

    #[test]
    fn test_non_text_description_or_cuisine_skips_record() {
        assert!(normalize(&record(json!({"title": "Soup", "description": 12}))).is_none());
        assert!(normalize(&record(json!({"title": "Soup", "cuisine": ["Thai"]}))).is_none());
        assert!(normalize(&record(json!({"title": "Soup", "cuisine": {"name": "Thai"}}))).is_none());
    }

    #[test]
    fn test_serves_renders_like_loose_text() {
        let serves = |v: Value| normalize(&record(json!({"title": "Stew", "serves": v}))).unwrap().serves;
        assert_eq!(serves(json!(4.0)).as_deref(), Some("4"));
        assert_eq!(serves(json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(serves(json!([4, "x"])).as_deref(), Some("4,x"));
        assert_eq!(serves(json!(true)).as_deref(), Some("true"));
    }

    #[test]
    fn test_falsy_serves_is_absent() {
        let raw = record(json!({"title": "Toast", "serves": 0}));
        assert_eq!(normalize(&raw).unwrap().serves, None);
    }
}
