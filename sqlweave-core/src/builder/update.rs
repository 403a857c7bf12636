//! UPDATE statement builder

use std::sync::Arc;

use super::common::{QueryBuilder, RenderContext, Statement};
use crate::dialect::Keyword;
use crate::{ColumnId, Comparison, Condition, ConditionGroup, Dialect, Error, Result, TableId, Value};

/// One `column = value` assignment in a SET clause
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnUpdate {
    column: ColumnId,
    value: Value,
}

impl ColumnUpdate {
    pub fn new(column: ColumnId, value: impl Into<Value>) -> Result<Self> {
        column.require_name("column")?;
        Ok(Self {
            column,
            value: value.into(),
        })
    }

    pub fn column(&self) -> &ColumnId {
        &self.column
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// UPDATE statement builder
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    source: TableId,
    updates: Vec<ColumnUpdate>,
    conditions: Vec<Condition>,
    dialect: Arc<Dialect>,
}

impl UpdateBuilder {
    /// Create an UPDATE of `source`, which must name a table
    pub fn new(source: TableId) -> Result<Self> {
        source.require_table("source")?;
        Ok(Self {
            source,
            updates: Vec::new(),
            conditions: Vec::new(),
            dialect: Arc::new(Dialect::default()),
        })
    }

    pub fn with_dialect(mut self, dialect: impl Into<Arc<Dialect>>) -> Self {
        self.dialect = dialect.into();
        self
    }

    /// Append SET assignments
    ///
    /// # Examples
    /// ```
    /// use sqlweave_core::{op, ColumnUpdate, Condition, QueryBuilder, TableId, UpdateBuilder};
    ///
    /// let users = TableId::new("users").unwrap();
    /// let sql = UpdateBuilder::new(users.clone())
    ///     .unwrap()
    ///     .set([ColumnUpdate::new(users.column("name"), "Jane").unwrap()])
    ///     .where_([Condition::on(users.column("id"), op::is_equal_to(1)).unwrap()])
    ///     .to_sql()
    ///     .unwrap();
    ///
    /// assert_eq!(sql, "UPDATE users SET name = @p0 WHERE users.id = @p1");
    /// ```
    pub fn set<I>(mut self, updates: I) -> Self
    where
        I: IntoIterator<Item = ColumnUpdate>,
    {
        self.updates.extend(updates);
        self
    }

    /// Append one assignment built from a column and a value
    pub fn set_value(self, column: ColumnId, value: impl Into<Value>) -> Result<Self> {
        let update = ColumnUpdate::new(column, value)?;
        Ok(self.set([update]))
    }

    pub fn where_<I, C>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        self.conditions.extend(conditions.into_iter().map(Into::into));
        self
    }

    pub fn where_and<I, C>(self, conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        let group = ConditionGroup::and(conditions)?;
        Ok(self.where_([group]))
    }

    pub fn where_or<I, C>(self, conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        let group = ConditionGroup::or(conditions)?;
        Ok(self.where_([group]))
    }

    pub fn source(&self) -> &TableId {
        &self.source
    }

    pub fn updates(&self) -> &[ColumnUpdate] {
        &self.updates
    }
}

impl QueryBuilder for UpdateBuilder {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    fn build_with(&self, dialect: &Dialect) -> Result<Statement> {
        if self.updates.is_empty() {
            return Err(Error::NoColumnsToUpdate);
        }

        let mut ctx = RenderContext::without_aliases(dialect);
        let head = format!(
            "{} {}",
            dialect.keyword(Keyword::Update),
            ctx.table_name(&self.source)
        );
        ctx.push(&head);
        ctx.push(dialect.keyword(Keyword::Set));

        let equals = dialect.comparison(&Comparison::EQ);
        let mut assignments = Vec::with_capacity(self.updates.len());
        for update in &self.updates {
            let column = ctx.column_name(update.column());
            let placeholder = ctx.param(update.value().clone());
            assignments.push(format!("{} {} {}", column, equals, placeholder));
        }
        ctx.push(&assignments.join(", "));

        ctx.where_clause(&self.conditions);

        Ok(ctx.finish("update"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op;
    use pretty_assertions::assert_eq;

    fn users() -> TableId {
        TableId::aliased("dbo.Users", "u").unwrap()
    }

    #[test]
    fn test_update_builder() {
        let u = users();
        let statement = UpdateBuilder::new(u.clone())
            .unwrap()
            .set([
                ColumnUpdate::new(u.column("Name"), "Jane").unwrap(),
                ColumnUpdate::new(u.column("Age"), 25).unwrap(),
            ])
            .where_([Condition::on(u.column("Id"), op::is_equal_to(1)).unwrap()])
            .build()
            .unwrap();

        assert_eq!(
            statement.text(),
            "UPDATE dbo.Users SET Name = @p0, Age = @p1 WHERE dbo.Users.Id = @p2"
        );
        assert_eq!(
            statement.parameters(),
            &[Value::from("Jane"), Value::I32(25), Value::I32(1)]
        );
    }

    #[test]
    fn test_update_without_where() {
        let u = users();
        let sql = UpdateBuilder::new(u.clone())
            .unwrap()
            .set_value(u.column("Active"), false)
            .unwrap()
            .to_sql()
            .unwrap();
        assert_eq!(sql, "UPDATE dbo.Users SET Active = @p0");
    }

    #[test]
    fn test_null_assignment_is_parameterized() {
        let u = users();
        let statement = UpdateBuilder::new(u.clone())
            .unwrap()
            .set_value(u.column("DeletedAt"), Value::Null)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(statement.text(), "UPDATE dbo.Users SET DeletedAt = @p0");
        assert_eq!(statement.parameters(), &[Value::Null]);
    }

    #[test]
    fn test_no_columns_is_build_error() {
        let err = UpdateBuilder::new(users()).unwrap().build().unwrap_err();
        assert!(matches!(err, Error::NoColumnsToUpdate));
    }

    #[test]
    fn test_set_requires_column_name() {
        let err = ColumnUpdate::new(ColumnId::all(), 1).unwrap_err();
        assert!(matches!(err, Error::MissingColumnName { .. }));
    }

    #[test]
    fn test_update_where_or() {
        let u = users();
        let sql = UpdateBuilder::new(u.clone())
            .unwrap()
            .set_value(u.column("Locked"), true)
            .unwrap()
            .where_or([
                Condition::on(u.column("Attempts"), op::is_greater_than(5)).unwrap(),
                Condition::on(u.column("Expired"), op::is_equal_to(true)).unwrap(),
            ])
            .unwrap()
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "UPDATE dbo.Users SET Locked = @p0 WHERE (dbo.Users.Attempts > @p1 OR dbo.Users.Expired = @p2)"
        );
    }

    #[test]
    fn test_update_sql_server() {
        let users = TableId::new("Users").unwrap();
        let sql = UpdateBuilder::new(users.clone())
            .unwrap()
            .set_value(users.column("Name"), "Jane")
            .unwrap()
            .with_dialect(Dialect::sql_server())
            .to_sql()
            .unwrap();
        assert_eq!(sql, "UPDATE [dbo].[Users] SET [Name] = @p0");
    }

    #[test]
    fn test_aliased_target_renders_without_alias() {
        let u = users();
        let sql = UpdateBuilder::new(u.clone())
            .unwrap()
            .set_value(u.column("Name"), "Jane")
            .unwrap()
            .where_([Condition::on(u.column("Id"), op::is_equal_to(1)).unwrap()])
            .with_dialect(Dialect::sql_server())
            .to_sql()
            .unwrap();
        assert_eq!(
            sql,
            "UPDATE [dbo].[Users] SET [Name] = @p0 WHERE [dbo].[Users].[Id] = @p1"
        );
    }
}
