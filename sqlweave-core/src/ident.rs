//! Table and column identifiers
//!
//! Identifiers are normalized at construction: every component is trimmed and
//! a component that is blank after trimming is treated as absent.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single trimmed, non-empty SQL name (schema, table, alias or column)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl TryFrom<String> for Identifier {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw).ok_or(Error::BlankIdentifier)
    }
}

impl From<Identifier> for String {
    fn from(identifier: Identifier) -> Self {
        identifier.0
    }
}

impl Identifier {
    /// Normalize a raw name; blank input yields `None`
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Identifier(trimmed.to_string()))
        }
    }

    /// Normalize an optional raw name
    pub fn parse_opt(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A table reference, optionally schema-qualified and aliased
///
/// A `TableId` used as a statement source always carries a table name. The
/// only way to get one without a table name is [`TableId::from_alias`], which
/// refers back to an alias declared elsewhere in the statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTableId")]
pub struct TableId {
    schema: Option<Identifier>,
    table: Option<Identifier>,
    alias: Option<Identifier>,
}

impl TableId {
    /// Parse `table` or `schema.table`
    ///
    /// # Examples
    /// ```
    /// use sqlweave_core::TableId;
    ///
    /// let users = TableId::new("dbo.Users").unwrap();
    /// assert_eq!(users.schema().map(|s| s.as_str()), Some("dbo"));
    /// assert_eq!(users.table().map(|t| t.as_str()), Some("Users"));
    /// ```
    pub fn new(identifier: &str) -> Result<Self> {
        Self::parse(identifier, None)
    }

    /// Parse `table` or `schema.table` and attach an alias
    pub fn aliased(identifier: &str, alias: &str) -> Result<Self> {
        Self::parse(identifier, Some(alias))
    }

    fn parse(identifier: &str, alias: Option<&str>) -> Result<Self> {
        let parts: Vec<&str> = identifier.split('.').collect();
        match parts.as_slice() {
            [table] => Self::qualified(None, table, alias),
            [schema, table] => Self::qualified(Some(schema), table, alias),
            _ => Err(Error::MalformedIdentifier {
                identifier: identifier.to_string(),
                parts: parts.len(),
            }),
        }
    }

    /// Build from separate schema, table and alias components
    pub fn qualified(schema: Option<&str>, table: &str, alias: Option<&str>) -> Result<Self> {
        let table = Identifier::parse(table).ok_or_else(|| Error::missing_table_name("table"))?;
        Ok(Self {
            schema: Identifier::parse_opt(schema),
            table: Some(table),
            alias: Identifier::parse_opt(alias),
        })
    }

    /// Reference a table purely by an alias introduced elsewhere
    pub fn from_alias(alias: &str) -> Result<Self> {
        let alias = Identifier::parse(alias).ok_or(Error::MissingAlias)?;
        Ok(Self {
            schema: None,
            table: None,
            alias: Some(alias),
        })
    }

    /// Return a copy carrying the given alias (blank removes it)
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Identifier::parse(alias);
        self
    }

    pub fn schema(&self) -> Option<&Identifier> {
        self.schema.as_ref()
    }

    pub fn table(&self) -> Option<&Identifier> {
        self.table.as_ref()
    }

    pub fn alias(&self) -> Option<&Identifier> {
        self.alias.as_ref()
    }

    /// Whether this reference only names an alias
    pub fn is_alias_reference(&self) -> bool {
        self.table.is_none()
    }

    /// Check that this table can be the source or target of a statement
    pub(crate) fn require_table(&self, argument: &str) -> Result<()> {
        if self.table.is_none() {
            return Err(Error::missing_table_name(argument));
        }
        Ok(())
    }

    /// Column of this table
    pub fn column(&self, name: &str) -> ColumnId {
        ColumnId::new(self, name)
    }

    /// Wildcard column of this table (`t.*`)
    pub fn all_columns(&self) -> ColumnId {
        ColumnId::all_of(self)
    }
}

impl Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(table) = &self.table {
            if let Some(schema) = &self.schema {
                write!(f, "{}.", schema)?;
            }
            write!(f, "{}", table)?;
            wrote = true;
        }
        if let Some(alias) = &self.alias {
            if wrote {
                f.write_str(" ")?;
            }
            write!(f, "{}", alias)?;
        }
        Ok(())
    }
}

/// A column reference; a missing name means every column (`*`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawColumnId")]
pub struct ColumnId {
    table: Option<TableId>,
    name: Option<Identifier>,
}

impl ColumnId {
    /// Column qualified by a table
    pub fn new(table: &TableId, name: &str) -> Self {
        Self {
            table: Some(table.clone()),
            name: Identifier::parse(name),
        }
    }

    /// Unqualified column
    pub fn named(name: &str) -> Self {
        Self {
            table: None,
            name: Identifier::parse(name),
        }
    }

    /// Unqualified wildcard (`*`)
    pub fn all() -> Self {
        Self {
            table: None,
            name: None,
        }
    }

    /// Wildcard qualified by a table (`t.*`)
    pub fn all_of(table: &TableId) -> Self {
        Self {
            table: Some(table.clone()),
            name: None,
        }
    }

    pub fn table(&self) -> Option<&TableId> {
        self.table.as_ref()
    }

    pub fn name(&self) -> Option<&Identifier> {
        self.name.as_ref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.name.is_none()
    }

    /// Check the column names a single column, as conditions require
    pub(crate) fn require_name(&self, argument: &str) -> Result<()> {
        if self.name.is_none() {
            return Err(Error::missing_column_name(argument));
        }
        Ok(())
    }

    /// Check the column is both named and table-qualified, as joins require
    pub(crate) fn require_qualified(&self, argument: &str) -> Result<()> {
        self.require_name(argument)?;
        if self.table.is_none() {
            return Err(Error::missing_column_table(argument));
        }
        Ok(())
    }
}

impl Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            match (table.alias(), table.table()) {
                (Some(alias), _) => write!(f, "{}.", alias)?,
                (None, Some(name)) => {
                    if let Some(schema) = table.schema() {
                        write!(f, "{}.", schema)?;
                    }
                    write!(f, "{}.", name)?;
                }
                (None, None) => {}
            }
        }
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => f.write_str("*"),
        }
    }
}

/// Serialized form of [`TableId`], normalized the same way as the constructors
#[derive(Deserialize)]
struct RawTableId {
    #[serde(default)]
    schema: Option<String>,
    #[serde(default)]
    table: Option<String>,
    #[serde(default)]
    alias: Option<String>,
}

impl TryFrom<RawTableId> for TableId {
    type Error = Error;

    fn try_from(raw: RawTableId) -> Result<Self> {
        match raw.table.as_deref() {
            Some(table) if !table.trim().is_empty() => Self::qualified(
                raw.schema.as_deref(),
                table,
                raw.alias.as_deref(),
            ),
            _ if raw.schema.as_deref().is_some_and(|s| !s.trim().is_empty()) => {
                Err(Error::missing_table_name("table"))
            }
            _ => Self::from_alias(raw.alias.as_deref().unwrap_or_default()),
        }
    }
}

/// Serialized form of [`ColumnId`]; a blank name means `*`
#[derive(Deserialize)]
struct RawColumnId {
    #[serde(default)]
    table: Option<TableId>,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<RawColumnId> for ColumnId {
    type Error = Error;

    fn try_from(raw: RawColumnId) -> Result<Self> {
        Ok(Self {
            table: raw.table,
            name: Identifier::parse_opt(raw.name.as_deref()),
        })
    }
}
