//! Read-side query builders. Each function is pure: typed arguments in, a
//! parameterized [`SqlQuery`] out. Nothing here touches a connection.

use crate::sql::{PageColumn, SqlQuery, projection};
use rusqlite::types::Value;

const PAGE_COLUMNS: &str = "href, type, title, scraped, description";

pub fn get_page(href: &str) -> SqlQuery {
    SqlQuery::new(
        format!("SELECT {PAGE_COLUMNS} FROM pages WHERE href = ?1"),
        vec![Value::from(href.to_string())],
    )
}

/// Insertion order (rowid) keeps repeated listings stable.
pub fn get_all_pages(limit: u32) -> SqlQuery {
    SqlQuery::new(
        format!("SELECT {PAGE_COLUMNS} FROM pages ORDER BY rowid LIMIT ?1"),
        vec![Value::Integer(i64::from(limit))],
    )
}

pub fn get_neighbor_ids(href: &str, limit: u32) -> SqlQuery {
    SqlQuery::new(
        "SELECT to_href FROM links WHERE from_href = ?1 ORDER BY rowid LIMIT ?2",
        vec![
            Value::from(href.to_string()),
            Value::Integer(i64::from(limit)),
        ],
    )
}

/// Full page rows of the link targets of `href`. Targets with no page row
/// (dangling forward references) are skipped by the join.
pub fn get_neighbors(href: &str) -> SqlQuery {
    SqlQuery::new(
        format!(
            "SELECT {} FROM links l JOIN pages p ON p.href = l.to_href \
             WHERE l.from_href = ?1 ORDER BY l.rowid",
            projection("p", &PageColumn::ALL)
        ),
        vec![Value::from(href.to_string())],
    )
}

/// Bounded breadth expansion of the link graph as a single recursive CTE.
///
/// The seed band is the given href when `seed` is `Some`, otherwise every
/// scraped page (the crawl frontier). `degrees = 0` means no expansion: only
/// the seed band comes back. The inner `UNION` plus the outer
/// `GROUP BY href / MIN(degree)` guarantee each href appears once, at the
/// lowest degree that reaches it. Ordering is `(degree, href)` ascending.
pub fn multi_degree_nodes(
    seed: Option<&str>,
    degrees: u32,
    limit: u32,
    select: Option<&[PageColumn]>,
) -> SqlQuery {
    let columns = select.unwrap_or(&PageColumn::ALL);
    let proj = projection("p", columns);

    let (base, mut params) = match seed {
        Some(href) => (
            "SELECT href, 0 FROM pages WHERE href = ?1",
            vec![Value::from(href.to_string())],
        ),
        None => ("SELECT href, 0 FROM pages WHERE scraped = 1", Vec::new()),
    };
    let degrees_slot = params.len() + 1;
    let limit_slot = params.len() + 2;
    params.push(Value::Integer(i64::from(degrees)));
    params.push(Value::Integer(i64::from(limit)));

    SqlQuery::new(
        format!(
            "WITH RECURSIVE reach(href, degree) AS (\n\
                 {base}\n\
               UNION\n\
                 SELECT l.to_href, r.degree + 1\n\
                 FROM reach r JOIN links l ON l.from_href = r.href\n\
                 WHERE r.degree < ?{degrees_slot}\n\
             )\n\
             SELECT {proj}\n\
             FROM (SELECT href, MIN(degree) AS degree FROM reach GROUP BY href) m\n\
             JOIN pages p ON p.href = m.href\n\
             ORDER BY m.degree ASC, p.href ASC\n\
             LIMIT ?{limit_slot}"
        ),
        params,
    )
}

/// The two-hop, implicit-seed specialization.
pub fn second_degree_nodes(limit: u32) -> SqlQuery {
    multi_degree_nodes(None, 2, limit, None)
}

pub fn unscraped_pages(limit: u32) -> SqlQuery {
    SqlQuery::new(
        format!("SELECT {PAGE_COLUMNS} FROM pages WHERE scraped = 0 ORDER BY rowid LIMIT ?1"),
        vec![Value::Integer(i64::from(limit))],
    )
}

/// Outgoing link tallies for `href`, most-linked target first.
pub fn connections_from(href: &str, limit: u32) -> SqlQuery {
    SqlQuery::new(
        "SELECT to_href, COUNT(*) AS connections FROM links WHERE from_href = ?1 \
         GROUP BY to_href ORDER BY connections DESC, to_href ASC LIMIT ?2",
        vec![
            Value::from(href.to_string()),
            Value::Integer(i64::from(limit)),
        ],
    )
}

/// Incoming link tallies for `href`, most-linking source first.
pub fn connections_to(href: &str, limit: u32) -> SqlQuery {
    SqlQuery::new(
        "SELECT from_href, COUNT(*) AS connections FROM links WHERE to_href = ?1 \
         GROUP BY from_href ORDER BY connections DESC, from_href ASC LIMIT ?2",
        vec![
            Value::from(href.to_string()),
            Value::Integer(i64::from(limit)),
        ],
    )
}

/// In-degree ranking over the whole graph. Ties break on href so the
/// ordering is deterministic.
pub fn highly_connected_nodes() -> SqlQuery {
    SqlQuery::new(
        "SELECT to_href, COUNT(*) AS connections FROM links \
         GROUP BY to_href ORDER BY connections DESC, to_href ASC",
        Vec::new(),
    )
}

pub fn page_count() -> SqlQuery {
    SqlQuery::new("SELECT COUNT(*) FROM pages", Vec::new())
}

pub fn links_count() -> SqlQuery {
    SqlQuery::new("SELECT COUNT(*) FROM links", Vec::new())
}
