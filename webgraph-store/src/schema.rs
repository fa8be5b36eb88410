//! Idempotent DDL for the two crawl-graph tables. Executed statement by
//! statement at store open so "already exists" can be tolerated per statement
//! while any other failure aborts startup.

/// Connection pragmas applied before any query runs.
pub const PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;
    PRAGMA temp_store = MEMORY;
";

const CREATE_PAGES: &str = "CREATE TABLE IF NOT EXISTS pages (
    href        TEXT PRIMARY KEY,
    type        TEXT,
    title       TEXT,
    scraped     INTEGER NOT NULL DEFAULT 0,
    description TEXT
)";

const CREATE_LINKS: &str = "CREATE TABLE IF NOT EXISTS links (
    from_href TEXT NOT NULL,
    to_href   TEXT NOT NULL,
    UNIQUE(from_href, to_href)
)";

const INDEX_LINKS_FROM: &str = "CREATE INDEX IF NOT EXISTS idx_links_from ON links(from_href)";
const INDEX_LINKS_TO: &str = "CREATE INDEX IF NOT EXISTS idx_links_to ON links(to_href)";
const INDEX_PAGES_SCRAPED: &str = "CREATE INDEX IF NOT EXISTS idx_pages_scraped ON pages(scraped)";

/// The full creation sequence, in execution order.
pub fn statements() -> &'static [&'static str] {
    &[
        CREATE_PAGES,
        CREATE_LINKS,
        INDEX_LINKS_FROM,
        INDEX_LINKS_TO,
        INDEX_PAGES_SCRAPED,
    ]
}
