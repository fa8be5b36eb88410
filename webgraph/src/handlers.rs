use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use url::Url;
use webgraph_store::{ConnectionStat, GraphCounts, GraphStore, Node, PageRow, StoreConfig};

// Pure helpers, unit-testable without a database or a terminal

/// Resolves the store configuration: an explicit `--db` path wins over the
/// environment.
pub fn resolve_config(db_override: Option<&String>) -> Result<StoreConfig> {
    match db_override {
        Some(path) => Ok(StoreConfig::new(path)),
        None => StoreConfig::from_env().context("failed to resolve database location"),
    }
}

pub fn format_counts(counts: &GraphCounts) -> String {
    format!(
        "{} pages, {} links",
        counts.node_count, counts.link_count
    )
}

pub fn format_stat_lines(stats: &[ConnectionStat]) -> Vec<String> {
    stats
        .iter()
        .map(|s| format!("{:>6}  {}", s.connections, s.href))
        .collect()
}

pub fn format_frontier_lines(pages: &[PageRow]) -> Vec<String> {
    pages
        .iter()
        .map(|p| match &p.title {
            Some(title) => format!("{}  ({})", p.href, title),
            None => p.href.clone(),
        })
        .collect()
}

pub fn format_node_lines(node: &Node) -> Vec<String> {
    let mut lines = vec![format!(
        "{}  [{}]",
        node.href,
        if node.end_node { "end node" } else { "scraped" }
    )];
    if let Some(kind) = &node.kind {
        lines.push(format!("  kind:  {kind}"));
    }
    if let Some(title) = &node.title {
        lines.push(format!("  title: {title}"));
    }
    if let Some(description) = &node.description {
        lines.push(format!("  desc:  {description}"));
    }
    lines.push(format!("  links: {}", node.neighbors.len()));
    for to_href in &node.neighbors {
        lines.push(format!("    -> {to_href}"));
    }
    lines
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

// Command handlers

pub async fn handle_init(store: &GraphStore, quiet: bool) -> Result<()> {
    // Opening the store already ran the schema sequence; report and show
    // where the graph stands.
    let counts = store.get_count().await?;
    if !quiet {
        print_divider();
        println!("{}", "  WEBGRAPH INITIALIZATION".bright_white().bold());
        print_divider();
    }
    println!("{} Database ready ({})", "✓".green().bold(), format_counts(&counts));
    Ok(())
}

pub async fn handle_add_page(args: &ArgMatches, store: &GraphStore) -> Result<()> {
    let href = args.get_one::<Url>("href").expect("href is required");
    let node = Node::new(
        href.as_str(),
        args.get_one::<String>("kind").cloned(),
        args.get_one::<String>("title").cloned(),
        !args.get_flag("scraped"),
        args.get_one::<String>("description").cloned(),
    );
    store.add_page(&node).await?;
    println!("{} added {}", "✓".green().bold(), node.href.bright_white());
    Ok(())
}

pub async fn handle_add_edge(args: &ArgMatches, store: &GraphStore) -> Result<()> {
    let from = args.get_one::<Url>("from").expect("from is required");
    let to = args.get_one::<Url>("to").expect("to is required");
    store.add_edge(from.as_str(), to.as_str()).await?;
    println!(
        "{} {} {} {}",
        "✓".green().bold(),
        from.as_str().bright_white(),
        "->".blue(),
        to.as_str().bright_white()
    );
    Ok(())
}

pub async fn handle_stats(args: &ArgMatches, store: &GraphStore) -> Result<()> {
    let counts = store.get_count().await?;
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        println!("{}", format_counts(&counts));
    }
    Ok(())
}

pub async fn handle_unscraped(args: &ArgMatches, store: &GraphStore) -> Result<()> {
    let limit = *args.get_one::<u32>("limit").expect("limit has a default");
    let pages = store.get_unscraped_pages(limit).await?;
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }
    if pages.is_empty() {
        println!("frontier is empty - everything discovered has been scraped");
        return Ok(());
    }
    for line in format_frontier_lines(&pages) {
        println!("{line}");
    }
    Ok(())
}

pub async fn handle_connections(args: &ArgMatches, store: &GraphStore) -> Result<()> {
    let href = args.get_one::<Url>("href").expect("href is required");
    let direction = args
        .get_one::<String>("direction")
        .expect("direction has a default")
        .parse()?;
    let limit = *args.get_one::<u32>("limit").expect("limit has a default");

    let stats = store
        .get_connection_stats(href.as_str(), direction, limit)
        .await?;
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    for line in format_stat_lines(&stats) {
        println!("{line}");
    }
    Ok(())
}

pub async fn handle_top(args: &ArgMatches, store: &GraphStore) -> Result<()> {
    let ranked = store.get_highly_connected_nodes().await?;
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }
    for line in format_stat_lines(&ranked) {
        println!("{line}");
    }
    Ok(())
}

pub async fn handle_node(args: &ArgMatches, store: &GraphStore) -> Result<()> {
    let href = args.get_one::<Url>("href").expect("href is required");
    let edges = *args.get_one::<u32>("edges").expect("edges has a default");

    let node = store.get_node(href.as_str(), edges).await?;
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&node)?);
        return Ok(());
    }
    for line in format_node_lines(&node) {
        println!("{line}");
    }
    Ok(())
}
