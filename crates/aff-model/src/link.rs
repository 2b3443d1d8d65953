//! Decoded legacy links.
//!
//! A legacy link is split into its scheme, host, tool selector and target,
//! plus a payload that is either positional path fields (bookmark links) or
//! a multi-valued query mapping (servlet and document links).

use std::fmt;

/// The legacy sub-tool named by the second path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// `bkmk`: path-only links with well-defined positional fields.
    Bookmark,
    /// `servlet`: query-bearing links handled by a named servlet.
    Servlet,
    /// `faces`: query-bearing document links.
    Faces,
}

impl Tool {
    /// Parses a tool selector segment.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "bkmk" => Some(Self::Bookmark),
            "servlet" => Some(Self::Servlet),
            "faces" => Some(Self::Faces),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bookmark => "bkmk",
            Self::Servlet => "servlet",
            Self::Faces => "faces",
        }
    }

    /// Whether links of this tool carry their data in the query string.
    pub const fn is_query_bearing(self) -> bool {
        !matches!(self, Self::Bookmark)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legacy servlets that render a single data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableServlet {
    /// Detailed tables.
    Detailed,
    /// Quick tables.
    Quick,
    /// Geographic comparison tables.
    GeographicComparison,
    /// Iterated (population group) profiles.
    Iterated,
    /// Subject tables.
    Subject,
}

impl TableServlet {
    pub fn from_endpoint(endpoint: &str) -> Option<Self> {
        match endpoint {
            "DTTable" => Some(Self::Detailed),
            "QTTable" => Some(Self::Quick),
            "GCTTable" => Some(Self::GeographicComparison),
            "IPTable" => Some(Self::Iterated),
            "STTable" => Some(Self::Subject),
            _ => None,
        }
    }

    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Detailed => "DTTable",
            Self::Quick => "QTTable",
            Self::GeographicComparison => "GCTTable",
            Self::Iterated => "IPTable",
            Self::Subject => "STTable",
        }
    }
}

/// Which special-case handler a decoded link is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `bkmk/table`: positional table link.
    Table,
    /// `bkmk/cf`: community facts link.
    CommunityFacts,
    /// `servlet/*Facts`-style fact sheet link.
    FactsServlet,
    /// `servlet/*Table` link with a packed compound table name.
    TableServlet(TableServlet),
    /// `faces/.../productview.xhtml` link.
    ProductView,
}

/// Positional path fields zipped against a fixed name tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalFields {
    names: &'static [&'static str],
    values: Vec<String>,
}

impl PositionalFields {
    /// Zips values against names; surplus values are dropped and missing
    /// trailing fields stay absent.
    pub fn zip(names: &'static [&'static str], values: Vec<String>) -> Self {
        let mut values = values;
        values.truncate(names.len());
        Self { names, values }
    }

    /// Returns the value of a named field, if the link carried it.
    pub fn get(&self, name: &str) -> Option<&str> {
        let index = self.names.iter().position(|candidate| *candidate == name)?;
        self.values.get(index).map(String::as_str)
    }

    /// Returns the value of a named field when present and non-empty.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Insertion-ordered multi-valued query mapping.
///
/// Empty values are retained so callers can tell a parameter that is present
/// but blank from one that is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Returns the first value recorded for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the first value for `key` when it is non-empty.
    pub fn first_non_empty(&self, key: &str) -> Option<&str> {
        self.first(key).filter(|value| !value.is_empty())
    }

    /// Returns every non-empty value recorded for `key`, in order.
    pub fn all_non_empty<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(candidate, value)| candidate == key && !value.is_empty())
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// Data carried by a legacy link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkPayload {
    Positional(PositionalFields),
    Query(QueryParams),
}

/// A legacy link decomposed into its routing parts and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyLink {
    /// Scheme including its colon (`https:`), possibly empty.
    pub scheme: String,
    pub host: String,
    pub tool: Tool,
    /// Bookmark target or final path segment of a query-bearing link.
    pub target: String,
    pub route: Route,
    pub payload: LinkPayload,
}

impl LegacyLink {
    /// Positional fields, if this is a bookmark link.
    pub fn positional(&self) -> Option<&PositionalFields> {
        match &self.payload {
            LinkPayload::Positional(fields) => Some(fields),
            LinkPayload::Query(_) => None,
        }
    }

    /// Query parameters, if this is a query-bearing link.
    pub fn query(&self) -> Option<&QueryParams> {
        match &self.payload {
            LinkPayload::Query(params) => Some(params),
            LinkPayload::Positional(_) => None,
        }
    }
}
