use webgraph::handlers::*;
use webgraph_store::{ConnectionStat, GraphCounts, Node, PageRow};

#[test]
fn test_resolve_config_prefers_override() {
    let config = resolve_config(Some(&"custom.db".to_string())).unwrap();
    assert_eq!(config.path, std::path::PathBuf::from("custom.db"));
}

#[test]
fn test_format_counts() {
    let counts = GraphCounts {
        node_count: 3,
        link_count: 5,
    };
    assert_eq!(format_counts(&counts), "3 pages, 5 links");
}

#[test]
fn test_format_stat_lines_aligns_counts() {
    let stats = vec![
        ConnectionStat {
            href: "https://example.com/hub".to_string(),
            connections: 12,
        },
        ConnectionStat {
            href: "https://example.com/leaf".to_string(),
            connections: 1,
        },
    ];
    let lines = format_stat_lines(&stats);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "    12  https://example.com/hub");
    assert_eq!(lines[1], "     1  https://example.com/leaf");
}

#[test]
fn test_format_frontier_lines_with_and_without_title() {
    let pages = vec![
        PageRow {
            href: "https://example.com/a".to_string(),
            kind: None,
            title: Some("Page A".to_string()),
            scraped: false,
            description: None,
        },
        PageRow {
            href: "https://example.com/b".to_string(),
            kind: None,
            title: None,
            scraped: false,
            description: None,
        },
    ];
    let lines = format_frontier_lines(&pages);
    assert_eq!(lines[0], "https://example.com/a  (Page A)");
    assert_eq!(lines[1], "https://example.com/b");
}

#[test]
fn test_format_node_lines_scraped_with_neighbors() {
    let mut node = Node::new(
        "https://example.com/a",
        Some("article".to_string()),
        Some("A".to_string()),
        false,
        None,
    );
    node.add_edge("https://example.com/b");

    let lines = format_node_lines(&node);
    assert_eq!(lines[0], "https://example.com/a  [scraped]");
    assert!(lines.contains(&"  links: 1".to_string()));
    assert!(lines.contains(&"    -> https://example.com/b".to_string()));
}

#[test]
fn test_format_node_lines_end_node() {
    let node = Node::new("https://example.com/b", None, None, true, None);
    let lines = format_node_lines(&node);
    assert_eq!(lines[0], "https://example.com/b  [end node]");
    assert!(lines.contains(&"  links: 0".to_string()));
}
