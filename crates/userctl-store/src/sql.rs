//! `UserQuery` to SQL translation
//!
//! Every user-supplied value is bound as a parameter; only column names
//! from the closed `Field` enum are spliced into the statement text.

use rusqlite::types::Value;
use userctl_core::queries::{Predicate, UserQuery};

pub(crate) const USER_COLUMNS: &str = "id, username, email, password";

/// A statement and its positional parameters (`?1`, `?2`, ...)
#[derive(Debug)]
pub(crate) struct BoundSql {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Build the SELECT for a query; rows come back in id (insertion) order
pub(crate) fn select_users(query: &UserQuery) -> BoundSql {
    let mut sql = format!("SELECT {} FROM users", USER_COLUMNS);
    let mut params = Vec::new();

    if !query.predicates().is_empty() {
        let clauses: Vec<String> = query
            .predicates()
            .iter()
            .map(|predicate| {
                let column = predicate.field().column();
                match predicate {
                    Predicate::Exact(_, value) => {
                        params.push(Value::Text(value.clone()));
                        format!("{} = ?{}", column, params.len())
                    }
                    Predicate::Contains(_, needle) => {
                        params.push(Value::Text(format!("%{}%", escape_like(needle))));
                        format!("{} LIKE ?{} ESCAPE '\\'", column, params.len())
                    }
                }
            })
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" OR "));
    }

    sql.push_str(" ORDER BY id");

    if let Some(page) = query.page() {
        params.push(Value::Integer(i64::from(page.limit)));
        params.push(Value::Integer(i64::from(page.offset)));
        sql.push_str(&format!(
            " LIMIT ?{} OFFSET ?{}",
            params.len() - 1,
            params.len()
        ));
    }

    BoundSql { sql, params }
}

/// Escape LIKE wildcards so the needle matches literally
pub(crate) fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
