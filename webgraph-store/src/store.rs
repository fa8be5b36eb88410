use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::node::{self, Node, PageRow};
use crate::sql::{PageColumn, SqlQuery};
use crate::{mutations, queries, schema};
use futures::{StreamExt, TryStreamExt, stream};
use rusqlite::{Connection, Row, params_from_iter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Which endpoint of the edge relation a connection query groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    From,
    To,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::From => "from",
            Direction::To => "to",
        }
    }
}

impl FromStr for Direction {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "from" => Ok(Direction::From),
            "to" => Ok(Direction::To),
            other => Err(StoreError::InvalidArgument(format!(
                "unrecognized direction '{other}', expected 'from' or 'to'"
            ))),
        }
    }
}

/// One row of link-popularity statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStat {
    pub href: String,
    pub connections: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphCounts {
    pub node_count: u64,
    pub link_count: u64,
}

/// The public face of the crawl graph: executes built queries against a
/// single shared connection and composes the multi-query workflows.
///
/// Reads that fan out per node run concurrently but bounded by the
/// configured fan-out, and every query is wrapped in the configured timeout
/// so a wedged connection fails callers instead of hanging them.
pub struct GraphStore {
    conn: Arc<Mutex<Connection>>,
    query_timeout: Duration,
    fan_out: usize,
}

impl GraphStore {
    /// Opens the database, applies pragmas and runs the idempotent schema
    /// sequence. No operation exists before this returns. "Already exists"
    /// from a creation statement is tolerated and logged; any other failure
    /// aborts startup as an initialization error.
    pub fn open(config: StoreConfig) -> Result<Self> {
        debug!("opening graph store at {}", config.path.display());
        let conn = Connection::open(&config.path)
            .map_err(|e| StoreError::Initialization(e.to_string()))?;
        conn.execute_batch(schema::PRAGMAS)
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        for statement in schema::statements() {
            if let Err(e) = conn.execute(statement, []) {
                let message = e.to_string();
                if message.contains("already exists") {
                    warn!("schema object already exists, continuing: {message}");
                    continue;
                }
                return Err(StoreError::Initialization(message));
            }
        }

        info!("graph store ready at {}", config.path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            query_timeout: config.query_timeout,
            fan_out: config.fan_out.max(1),
        })
    }

    /// The execution primitive every read goes through: runs the built query
    /// on the blocking pool, maps each row, and times the whole thing out.
    async fn run<T, F>(&self, query: SqlQuery, map: F) -> Result<Vec<T>>
    where
        T: Send + 'static,
        F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let handle = task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let mut stmt = conn.prepare(query.text.as_ref())?;
            let rows = stmt
                .query_map(params_from_iter(query.params), |row| map(row))?
                .collect::<rusqlite::Result<Vec<T>>>()?;
            Ok::<_, rusqlite::Error>(rows)
        });
        match timeout(self.query_timeout, handle).await {
            Ok(joined) => Ok(joined??),
            Err(_) => Err(StoreError::Timeout(self.query_timeout)),
        }
    }

    /// Write-side twin of [`run`]: returns the affected row count.
    async fn execute(&self, query: SqlQuery) -> Result<usize> {
        let conn = Arc::clone(&self.conn);
        let handle = task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.execute(query.text.as_ref(), params_from_iter(query.params))
        });
        match timeout(self.query_timeout, handle).await {
            Ok(joined) => Ok(joined??),
            Err(_) => Err(StoreError::Timeout(self.query_timeout)),
        }
    }

    /// Fetches the raw page row for `href`. An absent href is `NotFound`,
    /// never an empty success.
    pub async fn get_page(&self, href: &str) -> Result<PageRow> {
        let mut rows = self.run(queries::get_page(href), page_row).await?;
        rows.pop()
            .ok_or_else(|| StoreError::NotFound(href.to_string()))
    }

    /// Fetches a node and attaches up to `edge_limit` outgoing neighbor
    /// hrefs. Two sequential queries; the attached edges are a snapshot at
    /// query time.
    pub async fn get_node(&self, href: &str, edge_limit: u32) -> Result<Node> {
        require_positive(edge_limit, "edge_limit")?;
        let row = self.get_page(href).await?;
        let mut node = node::deserialize(row);
        let neighbors: Vec<String> = self
            .run(queries::get_neighbor_ids(href, edge_limit), |row| {
                row.get(0)
            })
            .await?;
        for to_href in neighbors {
            node.add_edge(to_href);
        }
        Ok(node)
    }

    /// Concurrent fan-out of [`get_node`] over `hrefs`, bounded by the
    /// configured fan-out, input order preserved. Fails as a whole if any
    /// individual fetch fails; there is no partial-success mode.
    pub async fn get_nodes(&self, hrefs: &[String], edge_limit: u32) -> Result<Vec<Node>> {
        require_positive(edge_limit, "edge_limit")?;
        stream::iter(hrefs.iter().cloned())
            .map(|href| async move { self.get_node(&href, edge_limit).await })
            .buffered(self.fan_out)
            .try_collect()
            .await
    }

    /// Fetches up to `page_limit` pages and concurrently attaches neighbors
    /// to each. `neighbor_limit` defaults to `page_limit` when `None` - the
    /// historical behavior, kept as the documented equivalence.
    pub async fn get_all_nodes(
        &self,
        page_limit: u32,
        neighbor_limit: Option<u32>,
    ) -> Result<Vec<Node>> {
        require_positive(page_limit, "page_limit")?;
        let per_node = neighbor_limit.unwrap_or(page_limit);
        require_positive(per_node, "neighbor_limit")?;

        let pages = self.run(queries::get_all_pages(page_limit), page_row).await?;
        stream::iter(pages.into_iter().map(node::deserialize))
            .map(|mut node| async move {
                let neighbors: Vec<String> = self
                    .run(queries::get_neighbor_ids(&node.href, per_node), |row| {
                        row.get(0)
                    })
                    .await?;
                for to_href in neighbors {
                    node.add_edge(to_href);
                }
                Ok::<_, StoreError>(node)
            })
            .buffered(self.fan_out)
            .try_collect()
            .await
    }

    pub async fn get_all_pages(&self, limit: u32) -> Result<Vec<PageRow>> {
        require_positive(limit, "limit")?;
        self.run(queries::get_all_pages(limit), page_row).await
    }

    /// Full page rows of the link targets of `href`, deserialized but with
    /// no neighbors of their own attached.
    pub async fn get_neighbors(&self, href: &str) -> Result<Vec<Node>> {
        let rows = self.run(queries::get_neighbors(href), page_row).await?;
        Ok(rows.into_iter().map(node::deserialize).collect())
    }

    pub async fn get_neighbor_ids(&self, href: &str, limit: u32) -> Result<Vec<String>> {
        require_positive(limit, "limit")?;
        self.run(queries::get_neighbor_ids(href, limit), |row| row.get(0))
            .await
    }

    /// Nodes within `degrees` hops of the seed set - the given href, or
    /// every scraped page when `seed` is `None`. Each node appears once, at
    /// its lowest degree; `degrees = 0` selects the seed band only.
    pub async fn get_multi_degree_nodes(
        &self,
        seed: Option<&str>,
        degrees: u32,
        limit: u32,
    ) -> Result<Vec<Node>> {
        require_positive(limit, "limit")?;
        let rows = self
            .run(
                queries::multi_degree_nodes(seed, degrees, limit, None),
                page_row,
            )
            .await?;
        Ok(rows.into_iter().map(node::deserialize).collect())
    }

    /// The href-only projection of [`get_multi_degree_nodes`].
    pub async fn get_multi_degree_hrefs(
        &self,
        seed: Option<&str>,
        degrees: u32,
        limit: u32,
    ) -> Result<Vec<String>> {
        require_positive(limit, "limit")?;
        self.run(
            queries::multi_degree_nodes(seed, degrees, limit, Some(&[PageColumn::Href])),
            |row| row.get(0),
        )
        .await
    }

    pub async fn get_second_degree_nodes(&self, limit: u32) -> Result<Vec<Node>> {
        require_positive(limit, "limit")?;
        let rows = self.run(queries::second_degree_nodes(limit), page_row).await?;
        Ok(rows.into_iter().map(node::deserialize).collect())
    }

    /// The crawl frontier: pages discovered but not yet scraped.
    pub async fn get_unscraped_pages(&self, limit: u32) -> Result<Vec<PageRow>> {
        require_positive(limit, "limit")?;
        self.run(queries::unscraped_pages(limit), page_row).await
    }

    /// Link-popularity statistics around `href`, grouped by the far
    /// endpoint in the given direction.
    pub async fn get_connection_stats(
        &self,
        href: &str,
        direction: Direction,
        limit: u32,
    ) -> Result<Vec<ConnectionStat>> {
        require_positive(limit, "limit")?;
        let query = match direction {
            Direction::From => queries::connections_from(href, limit),
            Direction::To => queries::connections_to(href, limit),
        };
        self.run(query, stat_row).await
    }

    /// Whole-graph in-degree ranking, most linked-to first.
    pub async fn get_highly_connected_nodes(&self) -> Result<Vec<ConnectionStat>> {
        self.run(queries::highly_connected_nodes(), stat_row).await
    }

    pub async fn get_count(&self) -> Result<GraphCounts> {
        let nodes = self.run(queries::page_count(), count_row).await?;
        let links = self.run(queries::links_count(), count_row).await?;
        Ok(GraphCounts {
            node_count: nodes.first().copied().unwrap_or(0),
            link_count: links.first().copied().unwrap_or(0),
        })
    }

    /// Records a discovered page. Idempotent by href: re-adding a known
    /// page succeeds and leaves the existing row untouched.
    pub async fn add_page(&self, node: &Node) -> Result<()> {
        self.execute(mutations::add_page(&node::serialize(node)))
            .await?;
        Ok(())
    }

    /// Records a link. Idempotent on the (from, to) pair. The target may
    /// not exist as a page yet; that forward reference is how new pages get
    /// discovered, and no stub page row is created for it.
    pub async fn add_edge(&self, from_href: &str, to_href: &str) -> Result<()> {
        self.execute(mutations::add_edge(from_href, to_href)).await?;
        Ok(())
    }

    /// Marks `href` scraped and stores its description. `NotFound` when the
    /// href has no row, consistent with [`get_page`].
    pub async fn update_page(
        &self,
        href: &str,
        scraped: bool,
        description: Option<&str>,
    ) -> Result<()> {
        let affected = self
            .execute(mutations::update_page(href, scraped, description))
            .await?;
        if affected == 0 {
            return Err(StoreError::NotFound(href.to_string()));
        }
        Ok(())
    }

    /// Removes a single page row. Its edges stay; cascade is explicit.
    pub async fn remove_page(&self, href: &str) -> Result<()> {
        self.execute(mutations::delete_page(href)).await?;
        Ok(())
    }

    pub async fn remove_all_pages(&self) -> Result<()> {
        self.execute(mutations::delete_all_pages()).await?;
        Ok(())
    }

    pub async fn remove_all_references(&self) -> Result<()> {
        self.execute(mutations::delete_all_references()).await?;
        Ok(())
    }
}

fn require_positive(limit: u32, name: &str) -> Result<()> {
    if limit == 0 {
        return Err(StoreError::InvalidArgument(format!(
            "{name} must be positive"
        )));
    }
    Ok(())
}

fn page_row(row: &Row<'_>) -> rusqlite::Result<PageRow> {
    Ok(PageRow {
        href: row.get(0)?,
        kind: row.get(1)?,
        title: row.get(2)?,
        scraped: row.get(3)?,
        description: row.get(4)?,
    })
}

fn stat_row(row: &Row<'_>) -> rusqlite::Result<ConnectionStat> {
    Ok(ConnectionStat {
        href: row.get(0)?,
        connections: row.get::<_, i64>(1)? as u64,
    })
}

fn count_row(row: &Row<'_>) -> rusqlite::Result<u64> {
    row.get::<_, i64>(0).map(|n| n as u64)
}
