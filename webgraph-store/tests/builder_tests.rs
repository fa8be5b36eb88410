// Tests for the pure query and mutation builders - no connection involved

use rusqlite::types::Value;
use webgraph_store::{PageColumn, PageRow, mutations, queries};

fn text_param(value: &str) -> Value {
    Value::from(value.to_string())
}

#[test]
fn test_get_page_binds_href() {
    let q = queries::get_page("https://example.com/a'; DROP TABLE pages;--");

    // The href travels as a bound parameter, never inside the text
    assert!(q.text.contains("?1"));
    assert!(!q.text.contains("example.com"));
    assert_eq!(
        q.params,
        vec![text_param("https://example.com/a'; DROP TABLE pages;--")]
    );
}

#[test]
fn test_neighbor_ids_binds_href_and_limit() {
    let q = queries::get_neighbor_ids("https://example.com/a", 7);

    assert!(q.text.contains("from_href = ?1"));
    assert!(q.text.contains("LIMIT ?2"));
    assert_eq!(
        q.params,
        vec![text_param("https://example.com/a"), Value::Integer(7)]
    );
}

#[test]
fn test_multi_degree_seeded_parameter_slots() {
    let q = queries::multi_degree_nodes(Some("https://example.com/a"), 2, 50, None);

    assert!(q.text.contains("WITH RECURSIVE"));
    assert!(q.text.contains("href = ?1"));
    assert!(q.text.contains("r.degree < ?2"));
    assert!(q.text.contains("LIMIT ?3"));
    assert_eq!(
        q.params,
        vec![
            text_param("https://example.com/a"),
            Value::Integer(2),
            Value::Integer(50),
        ]
    );
}

#[test]
fn test_multi_degree_implicit_seed_parameter_slots() {
    let q = queries::multi_degree_nodes(None, 3, 10, None);

    assert!(q.text.contains("scraped = 1"));
    assert!(q.text.contains("r.degree < ?1"));
    assert!(q.text.contains("LIMIT ?2"));
    assert_eq!(q.params, vec![Value::Integer(3), Value::Integer(10)]);
}

#[test]
fn test_multi_degree_dedups_by_href() {
    let q = queries::multi_degree_nodes(None, 2, 10, None);

    // UNION inside the CTE plus MIN(degree) grouping outside
    assert!(q.text.contains("UNION"));
    assert!(q.text.contains("MIN(degree)"));
    assert!(q.text.contains("GROUP BY href"));
}

#[test]
fn test_multi_degree_projection_whitelist() {
    let q = queries::multi_degree_nodes(None, 1, 10, Some(&[PageColumn::Href]));

    assert!(q.text.contains("SELECT p.href\n"));
    assert!(!q.text.contains("p.description"));
}

#[test]
fn test_second_degree_is_two_hop_specialization() {
    let q = queries::second_degree_nodes(25);
    let manual = queries::multi_degree_nodes(None, 2, 25, None);
    assert_eq!(q, manual);
}

#[test]
fn test_connection_stats_order_is_deterministic() {
    let from = queries::connections_from("https://example.com/a", 5);
    assert!(from.text.contains("ORDER BY connections DESC, to_href ASC"));

    let to = queries::connections_to("https://example.com/a", 5);
    assert!(to.text.contains("ORDER BY connections DESC, from_href ASC"));

    let ranked = queries::highly_connected_nodes();
    assert!(ranked.text.contains("ORDER BY connections DESC, to_href ASC"));
    assert!(ranked.params.is_empty());
}

#[test]
fn test_add_page_is_insert_or_ignore() {
    let row = PageRow {
        href: "https://example.com/a".to_string(),
        kind: Some("article".to_string()),
        title: None,
        scraped: true,
        description: None,
    };
    let q = mutations::add_page(&row);

    assert!(q.text.starts_with("INSERT OR IGNORE INTO pages"));
    assert_eq!(q.params.len(), 5);
    assert_eq!(q.params[0], text_param("https://example.com/a"));
    assert_eq!(q.params[2], Value::Null);
    assert_eq!(q.params[3], Value::Integer(1));
}

#[test]
fn test_add_edge_is_insert_or_ignore() {
    let q = mutations::add_edge("https://example.com/a", "https://example.com/b");

    assert!(q.text.starts_with("INSERT OR IGNORE INTO links"));
    assert_eq!(
        q.params,
        vec![
            text_param("https://example.com/a"),
            text_param("https://example.com/b"),
        ]
    );
}

#[test]
fn test_update_page_binds_all_values() {
    let q = mutations::update_page("https://example.com/a", true, Some("desc"));

    assert!(q.text.contains("WHERE href = ?1"));
    assert_eq!(
        q.params,
        vec![
            text_param("https://example.com/a"),
            Value::Integer(1),
            text_param("desc"),
        ]
    );

    let q = mutations::update_page("https://example.com/a", false, None);
    assert_eq!(q.params[1], Value::Integer(0));
    assert_eq!(q.params[2], Value::Null);
}

#[test]
fn test_delete_builders() {
    let q = mutations::delete_page("https://example.com/a");
    assert!(q.text.contains("WHERE href = ?1"));
    assert_eq!(q.params, vec![text_param("https://example.com/a")]);

    assert!(mutations::delete_all_pages().params.is_empty());
    assert!(mutations::delete_all_references().params.is_empty());
}
