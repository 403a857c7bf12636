//! SQL dialects: keyword, operator and quoting tables consulted while rendering
//!
//! A [`Dialect`] is plain data. Every lookup falls back to a generic ANSI
//! spelling when the dialect has no override, so a dialect only needs to list
//! what it does differently. Dialects can be loaded from JSON, which is how
//! applications configure vendor syntax without code changes:
//!
//! ```
//! use sqlweave_core::{Dialect, Keyword};
//!
//! let dialect = Dialect::from_json(r#"{
//!     "name": "reporting",
//!     "keywords": { "then_by": "," },
//!     "placeholders": { "style": "numbered", "prefix": "$", "start": 1 }
//! }"#).unwrap();
//!
//! assert_eq!(dialect.placeholder(0), "$1");
//! assert_eq!(dialect.keyword(Keyword::Select), "SELECT");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::builder::common::JoinKind;
use crate::{Comparison, Identifier, Result};

/// Clause keywords and fixed fragments a dialect may respell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    Select,
    Distinct,
    From,
    Where,
    OrderBy,
    /// Separator between ORDER BY entries after the first
    ThenBy,
    Asc,
    Desc,
    On,
    InsertInto,
    Values,
    Update,
    Set,
    DeleteFrom,
    Null,
    Not,
    Is,
    Between,
    /// Word between the bounds of BETWEEN; independent of group operators
    And,
    In,
    Like,
    Limit,
    Offset,
    Rows,
    FetchNext,
    Only,
    /// Token selecting every column
    AllColumns,
    /// Word placed between a table and its alias; empty means a bare space
    TableAlias,
}

impl Keyword {
    /// Generic spelling used when a dialect has no override
    pub fn default_text(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::Distinct => "DISTINCT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::OrderBy => "ORDER BY",
            Keyword::ThenBy => ",",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::On => "ON",
            Keyword::InsertInto => "INSERT INTO",
            Keyword::Values => "VALUES",
            Keyword::Update => "UPDATE",
            Keyword::Set => "SET",
            Keyword::DeleteFrom => "DELETE FROM",
            Keyword::Null => "NULL",
            Keyword::Not => "NOT",
            Keyword::Is => "IS",
            Keyword::Between => "BETWEEN",
            Keyword::And => "AND",
            Keyword::In => "IN",
            Keyword::Like => "LIKE",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::Rows => "ROWS",
            Keyword::FetchNext => "FETCH NEXT",
            Keyword::Only => "ONLY",
            Keyword::AllColumns => "*",
            Keyword::TableAlias => "",
        }
    }
}

/// How schema, table, alias and column names are quoted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierQuoting {
    pub prefix: String,
    pub suffix: String,
    /// Placed between qualifier and name, e.g. `schema.table`
    pub separator: String,
    /// Schema applied to unaliased tables that do not name one
    pub default_schema: Option<String>,
}

impl Default for IdentifierQuoting {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            separator: ".".to_string(),
            default_schema: None,
        }
    }
}

impl IdentifierQuoting {
    fn quoted(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            ..Self::default()
        }
    }

    /// Quote one name, doubling any embedded closing quote
    pub fn quote(&self, name: &str) -> String {
        if self.suffix.is_empty() {
            return format!("{}{}", self.prefix, name);
        }
        let escaped = name.replace(&self.suffix, &self.suffix.repeat(2));
        format!("{}{}{}", self.prefix, escaped, self.suffix)
    }
}

/// How parameter placeholders are spelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// `<prefix><name><suffix>`, e.g. `@p0` or `:p0`
    Named { prefix: String, suffix: String },
    /// `<prefix><start + index>`, e.g. `$1`
    Numbered { prefix: String, start: usize },
    /// The same marker for every parameter, e.g. `?`
    Anonymous { marker: String },
}

impl Default for PlaceholderStyle {
    fn default() -> Self {
        PlaceholderStyle::Named {
            prefix: "@".to_string(),
            suffix: String::new(),
        }
    }
}

impl PlaceholderStyle {
    /// Placeholder for the parameter registered at `index`
    pub fn render(&self, index: usize) -> String {
        match self {
            PlaceholderStyle::Named { prefix, suffix } => {
                format!("{}{}{}", prefix, crate::Parameter::name_for(index), suffix)
            }
            PlaceholderStyle::Numbered { prefix, start } => format!("{}{}", prefix, start + index),
            PlaceholderStyle::Anonymous { marker } => marker.clone(),
        }
    }
}

/// How LIMIT / OFFSET are spelled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PagingStyle {
    /// `LIMIT n OFFSET m`
    LimitOffset,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    #[default]
    OffsetFetch,
}

/// A vendor's SQL spelling, consulted by every builder at render time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    pub name: String,
    pub keywords: BTreeMap<Keyword, String>,
    /// Generic comparison symbol to vendor symbol, e.g. `!=` to `<>`
    pub comparison_operators: BTreeMap<String, String>,
    /// Group operator (upper case) to vendor spelling
    pub logical_operators: BTreeMap<String, String>,
    pub join_kinds: BTreeMap<JoinKind, String>,
    pub identifiers: IdentifierQuoting,
    pub placeholders: PlaceholderStyle,
    pub paging: PagingStyle,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::ansi()
    }
}

impl Dialect {
    /// Generic dialect: unquoted names, `@p0` placeholders, OFFSET/FETCH paging
    pub fn ansi() -> Self {
        Self {
            name: "ansi".to_string(),
            keywords: BTreeMap::new(),
            comparison_operators: BTreeMap::new(),
            logical_operators: BTreeMap::new(),
            join_kinds: BTreeMap::new(),
            identifiers: IdentifierQuoting::default(),
            placeholders: PlaceholderStyle::default(),
            paging: PagingStyle::OffsetFetch,
        }
    }

    /// SQL Server: `[bracketed]` names under `dbo`, `@p0` placeholders
    pub fn sql_server() -> Self {
        let mut dialect = Self::ansi();
        dialect.name = "sqlserver".to_string();
        dialect.identifiers = IdentifierQuoting {
            default_schema: Some("dbo".to_string()),
            ..IdentifierQuoting::quoted("[", "]")
        };
        dialect
            .comparison_operators
            .insert("!=".to_string(), "<>".to_string());
        dialect
            .join_kinds
            .insert(JoinKind::Full, "FULL OUTER JOIN".to_string());
        dialect
    }

    /// PostgreSQL: `"quoted"` names, `$1` placeholders, LIMIT/OFFSET paging
    pub fn postgres() -> Self {
        let mut dialect = Self::ansi();
        dialect.name = "postgres".to_string();
        dialect.identifiers = IdentifierQuoting::quoted("\"", "\"");
        dialect.placeholders = PlaceholderStyle::Numbered {
            prefix: "$".to_string(),
            start: 1,
        };
        dialect.paging = PagingStyle::LimitOffset;
        dialect
    }

    /// MySQL: `` `backtick` `` names, `?` placeholders, LIMIT/OFFSET paging
    pub fn mysql() -> Self {
        let mut dialect = Self::ansi();
        dialect.name = "mysql".to_string();
        dialect.identifiers = IdentifierQuoting::quoted("`", "`");
        dialect.placeholders = PlaceholderStyle::Anonymous {
            marker: "?".to_string(),
        };
        dialect.paging = PagingStyle::LimitOffset;
        dialect
    }

    /// SQLite: `"quoted"` names, `?1` placeholders, LIMIT/OFFSET paging
    pub fn sqlite() -> Self {
        let mut dialect = Self::ansi();
        dialect.name = "sqlite".to_string();
        dialect.identifiers = IdentifierQuoting::quoted("\"", "\"");
        dialect.placeholders = PlaceholderStyle::Numbered {
            prefix: "?".to_string(),
            start: 1,
        };
        dialect.paging = PagingStyle::LimitOffset;
        dialect
    }

    /// Load a dialect table from JSON; absent keys keep their ANSI defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Override one keyword
    pub fn with_keyword(mut self, keyword: Keyword, text: impl Into<String>) -> Self {
        self.keywords.insert(keyword, text.into());
        self
    }

    pub fn keyword(&self, keyword: Keyword) -> &str {
        self.keywords
            .get(&keyword)
            .map(String::as_str)
            .unwrap_or_else(|| keyword.default_text())
    }

    pub fn comparison<'a>(&'a self, symbol: &Comparison) -> &'a str {
        self.comparison_operators
            .get(symbol.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| symbol.as_str())
    }

    /// Vendor spelling of a group operator; unknown operators pass through
    pub fn logical_operator<'a>(&'a self, operator: &'a str) -> &'a str {
        self.logical_operators
            .get(&operator.to_ascii_uppercase())
            .map(String::as_str)
            .unwrap_or(operator)
    }

    /// Join keyword, defaulting to `<KIND> JOIN`
    pub fn join_kind(&self, kind: JoinKind) -> String {
        match self.join_kinds.get(&kind) {
            Some(text) => text.clone(),
            None => format!("{} JOIN", kind.name().to_ascii_uppercase()),
        }
    }

    pub fn quote_identifier(&self, identifier: &Identifier) -> String {
        self.identifiers.quote(identifier.as_str())
    }

    pub fn default_schema(&self) -> Option<&str> {
        self.identifiers.default_schema.as_deref()
    }

    pub fn placeholder(&self, index: usize) -> String {
        self.placeholders.render(index)
    }

    /// Separator placed between ORDER BY entries after the first
    pub(crate) fn then_by_separator(&self) -> String {
        let separator = self.keyword(Keyword::ThenBy).trim();
        if separator.is_empty() || separator == "," {
            ", ".to_string()
        } else {
            format!(" {} ", separator)
        }
    }
}
