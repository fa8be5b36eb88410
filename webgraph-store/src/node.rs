use serde::{Deserialize, Serialize};

/// An in-memory graph node: a crawled or discovered page plus a snapshot of
/// its outgoing edges. Returned values are detached - mutating one does not
/// touch storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub href: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Discovered only as a link target, not yet scraped.
    pub end_node: bool,
    /// Outgoing edge targets, attached on request. Not part of the base row.
    #[serde(default)]
    pub neighbors: Vec<String>,
}

impl Node {
    pub fn new(
        href: impl Into<String>,
        kind: Option<String>,
        title: Option<String>,
        end_node: bool,
        description: Option<String>,
    ) -> Self {
        Self {
            href: href.into(),
            kind,
            title,
            description,
            end_node,
            neighbors: Vec::new(),
        }
    }

    pub fn add_edge(&mut self, to_href: impl Into<String>) {
        self.neighbors.push(to_href.into());
    }
}

/// The stored row shape of a page: what the `pages` table holds, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRow {
    pub href: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub scraped: bool,
    pub description: Option<String>,
}

/// Maps a node to its row representation. `scraped` is derived as the
/// negation of `end_node`; the neighbor list is dropped (edges live in the
/// `links` table).
pub fn serialize(node: &Node) -> PageRow {
    PageRow {
        href: node.href.clone(),
        kind: node.kind.clone(),
        title: node.title.clone(),
        scraped: !node.end_node,
        description: node.description.clone(),
    }
}

/// Reconstructs a node from its row. `end_node` is recomputed as `!scraped`,
/// so a node serialized with an inconsistent `end_node` normalizes here -
/// intended, the storage boundary treats the two flags as strict negations.
/// Neighbors start empty; callers attach them separately.
pub fn deserialize(row: PageRow) -> Node {
    Node {
        href: row.href,
        kind: row.kind,
        title: row.title,
        description: row.description,
        end_node: !row.scraped,
        neighbors: Vec::new(),
    }
}
