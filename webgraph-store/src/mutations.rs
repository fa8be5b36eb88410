//! Write-side query builders, pure like the read side.

use crate::node::PageRow;
use crate::sql::SqlQuery;
use rusqlite::types::Value;

fn opt_text(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::from(s.clone()),
        None => Value::Null,
    }
}

/// Insert-or-ignore by href: rediscovering a known page is a no-op, not an
/// error.
pub fn add_page(row: &PageRow) -> SqlQuery {
    SqlQuery::new(
        "INSERT OR IGNORE INTO pages (href, type, title, scraped, description) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        vec![
            Value::from(row.href.clone()),
            opt_text(&row.kind),
            opt_text(&row.title),
            Value::Integer(i64::from(row.scraped)),
            opt_text(&row.description),
        ],
    )
}

/// Insert-or-ignore on the (from, to) pair: no duplicate edges.
pub fn add_edge(from_href: &str, to_href: &str) -> SqlQuery {
    SqlQuery::new(
        "INSERT OR IGNORE INTO links (from_href, to_href) VALUES (?1, ?2)",
        vec![
            Value::from(from_href.to_string()),
            Value::from(to_href.to_string()),
        ],
    )
}

/// Marks a page scraped and records its description. Affects zero rows when
/// the href is unknown; the facade turns that into `NotFound`.
pub fn update_page(href: &str, scraped: bool, description: Option<&str>) -> SqlQuery {
    SqlQuery::new(
        "UPDATE pages SET scraped = ?2, description = ?3 WHERE href = ?1",
        vec![
            Value::from(href.to_string()),
            Value::Integer(i64::from(scraped)),
            match description {
                Some(d) => Value::from(d.to_string()),
                None => Value::Null,
            },
        ],
    )
}

/// Does not touch `links`; cascade is the caller's explicit decision.
pub fn delete_page(href: &str) -> SqlQuery {
    SqlQuery::new(
        "DELETE FROM pages WHERE href = ?1",
        vec![Value::from(href.to_string())],
    )
}

pub fn delete_all_pages() -> SqlQuery {
    SqlQuery::new("DELETE FROM pages", Vec::new())
}

pub fn delete_all_references() -> SqlQuery {
    SqlQuery::new("DELETE FROM links", Vec::new())
}
