//! SELECT statement builder

use std::sync::Arc;

use super::common::{Join, JoinKind, OrderBy, QueryBuilder, RenderContext, Statement};
use crate::dialect::{Keyword, PagingStyle};
use crate::{ColumnId, Condition, ConditionGroup, Dialect, Result, TableId};

/// SELECT statement builder
///
/// `select`, `join` and `where_` append to what earlier calls added, while
/// `order_by` replaces the previous sort list.
///
/// # Examples
/// ```
/// use sqlweave_core::{op, Condition, OrderBy, QueryBuilder, SelectBuilder, TableId};
///
/// let u = TableId::aliased("dbo.Users", "u").unwrap();
/// let statement = SelectBuilder::new(u.clone())
///     .unwrap()
///     .select([u.all_columns()])
///     .where_([Condition::on(u.column("Email"), op::is_equal_to("a@b.com")).unwrap()])
///     .order_by([OrderBy::asc(u.column("Name")).unwrap()])
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     statement.text(),
///     "SELECT u.* FROM dbo.Users u WHERE u.Email = @p0 ORDER BY u.Name ASC"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    source: TableId,
    selections: Vec<ColumnId>,
    joins: Vec<Join>,
    conditions: Vec<Condition>,
    order_by: Vec<OrderBy>,
    distinct: bool,
    limit_value: Option<u64>,
    offset_value: Option<u64>,
    dialect: Arc<Dialect>,
}

impl SelectBuilder {
    /// Create a SELECT over `source`, which must name a table
    pub fn new(source: TableId) -> Result<Self> {
        source.require_table("source")?;
        Ok(Self {
            source,
            selections: Vec::new(),
            joins: Vec::new(),
            conditions: Vec::new(),
            order_by: Vec::new(),
            distinct: false,
            limit_value: None,
            offset_value: None,
            dialect: Arc::new(Dialect::default()),
        })
    }

    /// Render with the given dialect instead of the ANSI default
    pub fn with_dialect(mut self, dialect: impl Into<Arc<Dialect>>) -> Self {
        self.dialect = dialect.into();
        self
    }

    /// Append selected columns
    pub fn select<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = ColumnId>,
    {
        self.selections.extend(columns);
        self
    }

    /// Append joins, rendered in call order
    pub fn join<I>(mut self, joins: I) -> Self
    where
        I: IntoIterator<Item = Join>,
    {
        self.joins.extend(joins);
        self
    }

    /// Append an INNER JOIN of `right`'s table on `left = right`
    pub fn inner_join(self, left: ColumnId, right: ColumnId) -> Result<Self> {
        self.join_kind(JoinKind::Inner, left, right)
    }

    /// Append a LEFT JOIN of `right`'s table on `left = right`
    pub fn left_join(self, left: ColumnId, right: ColumnId) -> Result<Self> {
        self.join_kind(JoinKind::Left, left, right)
    }

    /// Append a RIGHT JOIN of `right`'s table on `left = right`
    pub fn right_join(self, left: ColumnId, right: ColumnId) -> Result<Self> {
        self.join_kind(JoinKind::Right, left, right)
    }

    /// Append a FULL JOIN of `right`'s table on `left = right`
    pub fn full_join(self, left: ColumnId, right: ColumnId) -> Result<Self> {
        self.join_kind(JoinKind::Full, left, right)
    }

    fn join_kind(self, kind: JoinKind, left: ColumnId, right: ColumnId) -> Result<Self> {
        let join = Join::with_kind(kind, left, right)?;
        Ok(self.join([join]))
    }

    /// Append conditions; everything passed to `where_` is AND-ed together
    pub fn where_<I, C>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        self.conditions.extend(conditions.into_iter().map(Into::into));
        self
    }

    /// Append one parenthesized AND group
    pub fn where_and<I, C>(self, conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        let group = ConditionGroup::and(conditions)?;
        Ok(self.where_([group]))
    }

    /// Append one parenthesized OR group
    pub fn where_or<I, C>(self, conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        let group = ConditionGroup::or(conditions)?;
        Ok(self.where_([group]))
    }

    /// Replace the sort list
    pub fn order_by<I>(mut self, order_by: I) -> Self
    where
        I: IntoIterator<Item = OrderBy>,
    {
        self.order_by.clear();
        self.order_by.extend(order_by);
        self
    }

    /// Mark the query as DISTINCT
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the maximum number of rows
    pub fn limit(mut self, count: u64) -> Self {
        self.limit_value = Some(count);
        self
    }

    /// Set the number of rows to skip
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset_value = Some(offset);
        self
    }

    pub fn source(&self) -> &TableId {
        &self.source
    }

    fn select_clause(&self, ctx: &mut RenderContext<'_>) {
        let mut head = ctx.keyword(Keyword::Select).to_string();
        if self.distinct {
            head.push(' ');
            head.push_str(ctx.keyword(Keyword::Distinct));
        }
        ctx.push(&head);

        let columns = if self.selections.is_empty() {
            ctx.keyword(Keyword::AllColumns).to_string()
        } else {
            self.selections
                .iter()
                .map(|column| ctx.column(column))
                .collect::<Vec<_>>()
                .join(", ")
        };
        ctx.push(&columns);
    }

    fn join_clauses(&self, ctx: &mut RenderContext<'_>) {
        let dialect = ctx.dialect();
        for join in &self.joins {
            let mut clause = format!(
                "{} {} {} {} {} {}",
                dialect.join_kind(join.kind()),
                ctx.table_full(join.table()),
                dialect.keyword(Keyword::On),
                ctx.column(join.left_column()),
                dialect.comparison(&crate::Comparison::EQ),
                ctx.column(join.right_column()),
            );
            if let Some(condition) = join.condition() {
                let extra = ctx.condition(condition);
                clause.push(' ');
                clause.push_str(dialect.logical_operator(crate::logical::AND));
                clause.push(' ');
                clause.push_str(&extra);
            }
            ctx.push(&clause);
        }
    }

    fn order_by_clause(&self, ctx: &mut RenderContext<'_>) {
        if self.order_by.is_empty() {
            return;
        }
        let dialect = ctx.dialect();
        let entries: Vec<String> = self
            .order_by
            .iter()
            .map(|entry| {
                let direction = if entry.is_descending() {
                    Keyword::Desc
                } else {
                    Keyword::Asc
                };
                format!("{} {}", ctx.column(entry.column()), dialect.keyword(direction))
            })
            .collect();
        ctx.push(dialect.keyword(Keyword::OrderBy));
        ctx.push(&entries.join(dialect.then_by_separator().as_str()));
    }

    fn paging_clause(&self, ctx: &mut RenderContext<'_>) {
        if self.limit_value.is_none() && self.offset_value.is_none() {
            return;
        }
        let dialect = ctx.dialect();
        match dialect.paging {
            PagingStyle::LimitOffset => {
                if let Some(limit) = self.limit_value {
                    ctx.push(&format!("{} {}", dialect.keyword(Keyword::Limit), limit));
                }
                if let Some(offset) = self.offset_value {
                    ctx.push(&format!("{} {}", dialect.keyword(Keyword::Offset), offset));
                }
            }
            PagingStyle::OffsetFetch => {
                let rows = dialect.keyword(Keyword::Rows);
                ctx.push(&format!(
                    "{} {} {}",
                    dialect.keyword(Keyword::Offset),
                    self.offset_value.unwrap_or(0),
                    rows
                ));
                if let Some(limit) = self.limit_value {
                    ctx.push(&format!(
                        "{} {} {} {}",
                        dialect.keyword(Keyword::FetchNext),
                        limit,
                        rows,
                        dialect.keyword(Keyword::Only)
                    ));
                }
            }
        }
    }
}

impl QueryBuilder for SelectBuilder {
    fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    fn build_with(&self, dialect: &Dialect) -> Result<Statement> {
        let mut ctx = RenderContext::new(dialect);

        self.select_clause(&mut ctx);

        let from = format!(
            "{} {}",
            dialect.keyword(Keyword::From),
            ctx.table_full(&self.source)
        );
        ctx.push(&from);

        self.join_clauses(&mut ctx);
        ctx.where_clause(&self.conditions);
        self.order_by_clause(&mut ctx);
        self.paging_clause(&mut ctx);

        Ok(ctx.finish("select"))
    }
}
