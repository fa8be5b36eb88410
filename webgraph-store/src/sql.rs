use rusqlite::types::Value;
use std::borrow::Cow;

/// A built query: parameterized text plus the values to bind. Builders never
/// interpolate runtime values into the text; everything variable travels as a
/// `?N` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub text: Cow<'static, str>,
    pub params: Vec<Value>,
}

impl SqlQuery {
    pub fn new(text: impl Into<Cow<'static, str>>, params: Vec<Value>) -> Self {
        Self {
            text: text.into(),
            params,
        }
    }
}

/// Whitelist for identifier-position inputs. Column projections go through
/// this enum so no caller-supplied string ever lands in query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageColumn {
    Href,
    Kind,
    Title,
    Scraped,
    Description,
}

impl PageColumn {
    pub const ALL: [PageColumn; 5] = [
        PageColumn::Href,
        PageColumn::Kind,
        PageColumn::Title,
        PageColumn::Scraped,
        PageColumn::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageColumn::Href => "href",
            PageColumn::Kind => "type",
            PageColumn::Title => "title",
            PageColumn::Scraped => "scraped",
            PageColumn::Description => "description",
        }
    }
}

/// Renders a projection list qualified with the given table alias.
pub(crate) fn projection(alias: &str, columns: &[PageColumn]) -> String {
    columns
        .iter()
        .map(|c| format!("{alias}.{}", c.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}
