//! DELETE statement builder

use std::sync::Arc;

use super::common::{QueryBuilder, RenderContext, Statement};
use crate::dialect::Keyword;
use crate::{Condition, ConditionGroup, Dialect, Result, TableId};

/// DELETE statement builder
///
/// Building without conditions is valid and targets every row of the table.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    source: TableId,
    conditions: Vec<Condition>,
    dialect: Arc<Dialect>,
}

impl DeleteBuilder {
    pub fn new(source: TableId) -> Result<Self> {
        source.require_table("source")?;
        Ok(Self {
            source,
            conditions: Vec::new(),
            dialect: Arc::new(Dialect::default()),
        })
    }

    pub fn with_dialect(mut self, dialect: impl Into<Arc<Dialect>>) -> Self {
        self.dialect = dialect.into();
        self
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
}

impl QueryBuilder for DeleteBuilder {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    fn build_with(&self, dialect: &Dialect) -> Result<Statement> {
        let mut ctx = RenderContext::without_aliases(dialect);
        let head = format!(
            "{} {}",
            dialect.keyword(Keyword::DeleteFrom),
            ctx.table_name(&self.source)
        );
        ctx.push(&head);

        if self.conditions.is_empty() {
            tracing::debug!(
                target: "sqlweave::build",
                table = %self.source,
                "DELETE without WHERE targets every row"
            );
        }
        ctx.where_clause(&self.conditions);

        Ok(ctx.finish("delete"))
    }
}
