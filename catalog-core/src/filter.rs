//! Comparison tokens used by the search endpoint, e.g. `>=4` or `30`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static FILTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>=|<=|>|<|=)?(\d+(?:\.\d+)?)$").expect("Invalid filter regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl FilterOp {
    /// SQL comparison operator. Always one of a fixed set of literals.
    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
        }
    }

    fn from_token(s: &str) -> Option<Self> {
        match s {
            "=" => Some(FilterOp::Eq),
            ">" => Some(FilterOp::Gt),
            ">=" => Some(FilterOp::Ge),
            "<" => Some(FilterOp::Lt),
            "<=" => Some(FilterOp::Le),
            _ => None,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Filter {
    pub op: FilterOp,
    pub value: f64,
}

/// Parse `[op]number`. The operator defaults to `=`.
///
/// Returns `None` for anything else; callers treat that as "no filter on
/// this field" rather than rejecting the request.
pub fn parse_filter(token: &str) -> Option<Filter> {
    let caps = FILTER_REGEX.captures(token.trim())?;

    let op = match caps.get(1) {
        Some(m) => FilterOp::from_token(m.as_str())?,
        None => FilterOp::Eq,
    };
    let value = caps.get(2)?.as_str().parse::<f64>().ok()?;

    Some(Filter { op, value })
}
