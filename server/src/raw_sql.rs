//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! User input is ALWAYS passed via `.bind()`. The only text spliced into SQL
//! here comes from closed enums (`FilterOp`, sort columns and directions)
//! whose string forms are `&'static str` literals.

use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::sql_types::Text;

/// Integer minutes column compared against a float filter value.
pub const TOTAL_TIME_EXPR: &str = "recipes.total_time";

/// Digits of `nutrients->>'calories'` as a number ("389 kcal" -> 389).
///
/// Empty digit strings become NULL so rows without calories simply don't
/// match instead of failing the cast.
pub const CALORIES_EXPR: &str = "CAST(NULLIF(REGEXP_REPLACE(recipes.nutrients->>'calories', \
    '[^0-9]', '', 'g'), '') AS NUMERIC)";

/// Comparison between a SQL expression and a bound `f64`.
///
/// # Safety
/// `$expr` must be one of the constants above; the operator comes from
/// `FilterOp::as_sql()` and the value is bound.
#[macro_export]
macro_rules! numeric_filter {
    ($expr:expr, $filter:expr) => {
        diesel::dsl::sql::<diesel::sql_types::Bool>(&format!(
            "{} {} ",
            $expr,
            $filter.op.as_sql()
        ))
        .bind::<diesel::sql_types::Float8, _>($filter.value)
    };
}

/// `ORDER BY` clause for an allow-listed column.
///
/// # Safety
/// `column` and `direction` are static literals from the sort enums.
/// `NULLS LAST` keeps unrated recipes at the end of a rating sort. Ties are
/// broken by id so pages are stable.
pub fn order_clause(
    column: &'static str,
    direction: &'static str,
    nulls_last: bool,
) -> SqlLiteral<Text> {
    let nulls = if nulls_last { " NULLS LAST" } else { "" };
    sql::<Text>(&format!(
        "recipes.{column} {direction}{nulls}, recipes.id ASC"
    ))
}
