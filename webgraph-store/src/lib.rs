//! Persistence layer for a web-crawl graph: pages and the links between
//! them, stored in SQLite, queried with graph semantics (neighbors,
//! degree-limited expansion, connection statistics).
//!
//! The facade is [`GraphStore`]; it owns one shared connection and executes
//! the parameterized queries produced by the pure builders in [`queries`]
//! and [`mutations`].

pub mod config;
pub mod error;
pub mod mutations;
pub mod node;
pub mod queries;
pub mod schema;
pub mod sql;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use node::{Node, PageRow, deserialize, serialize};
pub use sql::{PageColumn, SqlQuery};
pub use store::{ConnectionStat, Direction, GraphCounts, GraphStore};
