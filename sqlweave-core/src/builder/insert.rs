//! INSERT statement builder

use std::sync::Arc;

use super::common::{QueryBuilder, RenderContext, Statement};
use crate::dialect::Keyword;
use crate::{ColumnId, Dialect, Error, Result, TableId, Value};

/// INSERT statement builder for one target table
///
/// The target table is taken from the columns, which must all name the same
/// table. Rows are validated as they are added; `build` only checks that at
/// least one row exists.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: TableId,
    columns: Vec<ColumnId>,
    rows: Vec<Vec<Value>>,
    dialect: Arc<Dialect>,
}

impl InsertBuilder {
    /// Create an INSERT into the table shared by `columns`
    ///
    /// # Examples
    /// ```
    /// use sqlweave_core::{InsertBuilder, QueryBuilder, TableId, Value};
    ///
    /// let people = TableId::new("People").unwrap();
    /// let statement = InsertBuilder::new([people.column("Name"), people.column("Age")])
    ///     .unwrap()
    ///     .value(["Ana".into(), Value::from(30)])
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(statement.text(), "INSERT INTO People (Name, Age) VALUES (@p0, @p1)");
    /// ```
    pub fn new<I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = ColumnId>,
    {
        let columns: Vec<ColumnId> = columns.into_iter().collect();
        if columns.is_empty() {
            return Err(Error::EmptyColumnList);
        }

        let mut target: Option<&TableId> = None;
        for (index, column) in columns.iter().enumerate() {
            let argument = format!("columns[{}]", index);
            column.require_name(&argument)?;
            let table = column
                .table()
                .ok_or_else(|| Error::missing_column_table(argument.clone()))?;
            match target {
                None => {
                    table.require_table(&argument)?;
                    target = Some(table);
                }
                Some(expected)
                    if expected.schema() != table.schema() || expected.table() != table.table() =>
                {
                    return Err(Error::MultipleTargetTables {
                        index,
                        expected: expected.to_string(),
                        found: table.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        let table = match target {
            Some(table) => table.clone(),
            None => return Err(Error::EmptyColumnList),
        };

        Ok(Self {
            table,
            columns,
            rows: Vec::new(),
            dialect: Arc::new(Dialect::default()),
        })
    }

    /// Render with the given dialect instead of the ANSI default
    pub fn with_dialect(mut self, dialect: impl Into<Arc<Dialect>>) -> Self {
        self.dialect = dialect.into();
        self
    }

    /// Append one row of cells; `Value::Null` cells render as literal NULL
    pub fn value<I, V>(mut self, row: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let row_index = self.rows.len();
        let row: Vec<Value> = row.into_iter().map(Into::into).collect();
        if row.is_empty() {
            return Err(Error::EmptyRow { row: row_index });
        }
        if row.len() != self.columns.len() {
            return Err(Error::RowLengthMismatch {
                row: row_index,
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(self)
    }

    /// Append several rows, stopping at the first invalid one
    pub fn values<R, I, V>(self, rows: R) -> Result<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        rows.into_iter().try_fold(self, |builder, row| builder.value(row))
    }

    pub fn table(&self) -> &TableId {
        &self.table
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl QueryBuilder for InsertBuilder {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    fn build_with(&self, dialect: &Dialect) -> Result<Statement> {
        if self.rows.is_empty() {
            return Err(Error::NoRowsToInsert);
        }

        let mut ctx = RenderContext::new(dialect);

        let columns = self
            .columns
            .iter()
            .map(|column| ctx.column_name(column))
            .collect::<Vec<_>>()
            .join(", ");
        let head = format!(
            "{} {} ({})",
            dialect.keyword(Keyword::InsertInto),
            ctx.table_name(&self.table),
            columns
        );
        ctx.push(&head);
        ctx.push(dialect.keyword(Keyword::Values));

        let null = dialect.keyword(Keyword::Null);
        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| {
                    if cell.is_null() {
                        null.to_string()
                    } else {
                        ctx.param(cell.clone())
                    }
                })
                .collect();
            rows.push(format!("({})", cells.join(", ")));
        }
        ctx.push(&rows.join(", "));

        Ok(ctx.finish("insert"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn people() -> TableId {
        TableId::aliased("dbo.People", "p").unwrap()
    }

    #[test]
    fn test_insert_single_row() {
        let t = TableId::new("users").unwrap();
        let statement = InsertBuilder::new([t.column("name"), t.column("age")])
            .unwrap()
            .value([Value::from("John"), Value::from(30)])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(statement.text(), "INSERT INTO users (name, age) VALUES (@p0, @p1)");
        assert_eq!(statement.parameters(), &[Value::from("John"), Value::I32(30)]);
    }

    #[test]
    fn test_insert_many_with_null_cell() {
        let t = people();
        let statement = InsertBuilder::new([t.column("Name"), t.column("Age")])
            .unwrap()
            .value([Value::from("Ana"), Value::from(30)])
            .unwrap()
            .value([Value::from("Bo"), Value::Null])
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            statement.text(),
            "INSERT INTO dbo.People (Name, Age) VALUES (@p0, @p1), (@p2, NULL)"
        );
        assert_eq!(
            statement.parameters(),
            &[Value::from("Ana"), Value::I32(30), Value::from("Bo")]
        );
    }

    #[test]
    fn test_option_none_is_null() {
        let t = people();
        let nickname: Option<&str> = None;
        let statement = InsertBuilder::new([t.column("Nickname")])
            .unwrap()
            .value([Value::from(nickname)])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(statement.text(), "INSERT INTO dbo.People (Nickname) VALUES (NULL)");
        assert!(statement.parameters().is_empty());
    }

    #[test]
    fn test_values_appends_rows() {
        let t = people();
        let builder = InsertBuilder::new([t.column("Name")])
            .unwrap()
            .values([["a"], ["b"], ["c"]])
            .unwrap();
        assert_eq!(builder.row_count(), 3);
        assert_eq!(
            builder.to_sql().unwrap(),
            "INSERT INTO dbo.People (Name) VALUES (@p0), (@p1), (@p2)"
        );
    }

    #[test]
    fn test_no_rows_is_build_error() {
        let t = people();
        let builder = InsertBuilder::new([t.column("Name")]).unwrap();
        let err = builder.build().unwrap_err();
        assert!(matches!(err, Error::NoRowsToInsert));
        assert!(err.is_build_error());
    }

    #[test]
    fn test_empty_column_list() {
        let none: Vec<ColumnId> = Vec::new();
        assert!(matches!(InsertBuilder::new(none).unwrap_err(), Error::EmptyColumnList));
    }

    #[test]
    fn test_column_validation_reports_index() {
        let t = people();

        let err = InsertBuilder::new([t.column("Name"), ColumnId::all_of(&t)]).unwrap_err();
        assert!(matches!(err, Error::MissingColumnName { ref argument } if argument == "columns[1]"));

        let err = InsertBuilder::new([t.column("Name"), ColumnId::named("Age")]).unwrap_err();
        assert!(matches!(err, Error::MissingColumnTable { ref argument } if argument == "columns[1]"));
    }

    #[test]
    fn test_multiple_target_tables() {
        let a = TableId::new("A").unwrap();
        let b = TableId::new("B").unwrap();
        let err = InsertBuilder::new([a.column("X"), a.column("Y"), b.column("Z")]).unwrap_err();
        match err {
            Error::MultipleTargetTables {
                index,
                expected,
                found,
            } => {
                assert_eq!(index, 2);
                assert_eq!(expected, "A");
                assert_eq!(found, "B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_target_match_ignores_alias() {
        let plain = TableId::new("dbo.Users").unwrap();
        let aliased = plain.clone().with_alias("u");
        let sql = InsertBuilder::new([plain.column("Name"), aliased.column("Age")])
            .unwrap()
            .value([Value::from("Ana"), Value::from(30)])
            .unwrap()
            .to_sql()
            .unwrap();
        assert_eq!(sql, "INSERT INTO dbo.Users (Name, Age) VALUES (@p0, @p1)");

        let other_schema = TableId::new("sales.Users").unwrap();
        let err = InsertBuilder::new([plain.column("Name"), other_schema.column("Age")]).unwrap_err();
        assert!(matches!(err, Error::MultipleTargetTables { index: 1, .. }));
    }

    #[test]
    fn test_alias_only_target_rejected() {
        let alias = TableId::from_alias("p").unwrap();
        let err = InsertBuilder::new([alias.column("Name")]).unwrap_err();
        assert!(matches!(err, Error::MissingTableName { .. }));
    }

    #[test]
    fn test_row_validation() {
        let t = people();
        let builder = InsertBuilder::new([t.column("Name"), t.column("Age")])
            .unwrap()
            .value([Value::from("Ana"), Value::from(30)])
            .unwrap();

        let empty: Vec<Value> = Vec::new();
        let err = builder.clone().value(empty).unwrap_err();
        assert!(matches!(err, Error::EmptyRow { row: 1 }));

        let err = builder.value([Value::from("Bo")]).unwrap_err();
        assert!(matches!(
            err,
            Error::RowLengthMismatch {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_insert_with_postgres_dialect() {
        let t = people();
        let statement = InsertBuilder::new([t.column("Name"), t.column("Age")])
            .unwrap()
            .value([Value::from("Ana"), Value::from(30)])
            .unwrap()
            .with_dialect(Dialect::postgres())
            .build()
            .unwrap();
        assert_eq!(
            statement.text(),
            "INSERT INTO \"dbo\".\"People\" (\"Name\", \"Age\") VALUES ($1, $2)"
        );
    }
}
