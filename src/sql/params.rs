//! Values bound as positional parameters, and helpers to bind them onto sqlx queries.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs};

/// A value bound to a `$n` placeholder. Ids are INTEGER columns, so they bind as `i32`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlParam {
    Int(i32),
    Text(String),
    NullInt,
    NullText,
}

impl From<i32> for SqlParam {
    fn from(n: i32) -> Self {
        SqlParam::Int(n)
    }
}

impl From<Option<i32>> for SqlParam {
    fn from(n: Option<i32>) -> Self {
        n.map(SqlParam::Int).unwrap_or(SqlParam::NullInt)
    }
}

impl From<&str> for SqlParam {
    fn from(s: &str) -> Self {
        SqlParam::Text(s.to_string())
    }
}

impl From<Option<&str>> for SqlParam {
    fn from(s: Option<&str>) -> Self {
        s.map(SqlParam::from).unwrap_or(SqlParam::NullText)
    }
}

/// Bind params in order onto a plain query.
pub fn bind_query<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[SqlParam],
) -> Query<'q, Postgres, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::Int(n) => query.bind(*n),
            SqlParam::Text(s) => query.bind(s.clone()),
            SqlParam::NullInt => query.bind(None::<i32>),
            SqlParam::NullText => query.bind(None::<String>),
        };
    }
    query
}

/// Bind params in order onto a typed query.
pub fn bind_query_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &[SqlParam],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::Int(n) => query.bind(*n),
            SqlParam::Text(s) => query.bind(s.clone()),
            SqlParam::NullInt => query.bind(None::<i32>),
            SqlParam::NullText => query.bind(None::<String>),
        };
    }
    query
}
