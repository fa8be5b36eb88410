// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export the pure helpers for convenience
pub use handlers::{
    format_counts, format_frontier_lines, format_node_lines, format_stat_lines, resolve_config,
};
