use crate::error::{Result, StoreError};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_FAN_OUT: usize = 16;
const DEFAULT_DB_FILE: &str = "webgraph.db";

/// Where the store lives and how it behaves. Connection-string parsing stays
/// out here; the store itself only ever sees a resolved config.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub query_timeout: Duration,
    pub fan_out: usize,
}

impl StoreConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            fan_out: DEFAULT_FAN_OUT,
        }
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Caps how many per-node queries `get_nodes`/`get_all_nodes` keep in
    /// flight at once.
    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out.max(1);
        self
    }

    /// Resolves the database location from the environment: `DATABASE_URL`
    /// (a `sqlite:` URL) wins, then `WEBGRAPH_DB` (a plain path), then the
    /// default file in the working directory.
    pub fn from_env() -> Result<Self> {
        if let Ok(raw) = env::var("DATABASE_URL") {
            return Ok(Self::new(parse_database_url(&raw)?));
        }
        if let Ok(path) = env::var("WEBGRAPH_DB") {
            return Ok(Self::new(path));
        }
        Ok(Self::new(DEFAULT_DB_FILE))
    }
}

fn parse_database_url(raw: &str) -> Result<PathBuf> {
    let url = Url::parse(raw)
        .map_err(|e| StoreError::InvalidArgument(format!("DATABASE_URL is not a URL: {e}")))?;
    if url.scheme() != "sqlite" {
        return Err(StoreError::InvalidArgument(format!(
            "unsupported DATABASE_URL scheme '{}', expected 'sqlite'",
            url.scheme()
        )));
    }
    let path = url.path().trim_start_matches("//");
    if path.is_empty() {
        return Err(StoreError::InvalidArgument(
            "DATABASE_URL carries no database path".to_string(),
        ));
    }
    Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sqlite_url() {
        assert_eq!(
            parse_database_url("sqlite:crawl.db").unwrap(),
            PathBuf::from("crawl.db")
        );
        assert_eq!(
            parse_database_url("sqlite:///var/lib/webgraph/crawl.db").unwrap(),
            PathBuf::from("/var/lib/webgraph/crawl.db")
        );
    }

    #[test]
    fn rejects_foreign_scheme() {
        let err = parse_database_url("mysql://root@localhost/crawl").unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_empty_path() {
        let err = parse_database_url("sqlite:").unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }
}
