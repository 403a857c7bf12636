//! Common types and traits shared across all statement builders

use serde::{Deserialize, Serialize};

use crate::dialect::Keyword;
use crate::{
    ColumnId, Condition, ConditionalOperator, Dialect, OperatorCondition, Parameter,
    ParameterList, Result, TableId, Value,
};

/// Core trait for all statement builders
pub trait QueryBuilder {
    /// Dialect this builder renders with by default
    fn dialect(&self) -> &Dialect;

    /// Compile the accumulated state with an explicit dialect
    fn build_with(&self, dialect: &Dialect) -> Result<Statement>;

    /// Compile the accumulated state into statement text and parameters
    ///
    /// Parameters are numbered from zero on every call, so building twice
    /// yields identical statements.
    fn build(&self) -> Result<Statement> {
        self.build_with(self.dialect())
    }

    /// Compile and keep only the SQL text
    fn to_sql(&self) -> Result<String> {
        self.build().map(Statement::into_text)
    }
}

/// A compiled statement: SQL text plus parameter values in placeholder order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    text: String,
    parameters: Vec<Value>,
}

impl Statement {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &[Value] {
        &self.parameters
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.text, self.parameters)
    }

    /// Parameters paired with the names they were registered under
    pub fn named_parameters(&self) -> Vec<Parameter> {
        self.parameters
            .iter()
            .enumerate()
            .map(|(index, value)| Parameter::new(index, value.clone()))
            .collect()
    }
}

/// JOIN kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn name(&self) -> &'static str {
        match self {
            JoinKind::Inner => "Inner",
            JoinKind::Left => "Left",
            JoinKind::Right => "Right",
            JoinKind::Full => "Full",
        }
    }
}

impl std::fmt::Display for JoinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A join of the right column's table onto the statement
///
/// Renders as `<KIND> JOIN <right table> ON <left> = <right> [AND <condition>]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    kind: JoinKind,
    table: TableId,
    left: ColumnId,
    right: ColumnId,
    condition: Option<Condition>,
}

impl Join {
    /// INNER JOIN between two table-qualified columns
    pub fn new(left: ColumnId, right: ColumnId) -> Result<Self> {
        Self::with_kind(JoinKind::default(), left, right)
    }

    pub fn with_kind(kind: JoinKind, left: ColumnId, right: ColumnId) -> Result<Self> {
        left.require_qualified("left")?;
        right.require_qualified("right")?;
        let table = right
            .table()
            .cloned()
            .ok_or_else(|| crate::Error::missing_column_table("right"))?;
        Ok(Self {
            kind,
            table,
            left,
            right,
            condition: None,
        })
    }

    pub fn inner(left: ColumnId, right: ColumnId) -> Result<Self> {
        Self::with_kind(JoinKind::Inner, left, right)
    }

    pub fn left(left: ColumnId, right: ColumnId) -> Result<Self> {
        Self::with_kind(JoinKind::Left, left, right)
    }

    pub fn right(left: ColumnId, right: ColumnId) -> Result<Self> {
        Self::with_kind(JoinKind::Right, left, right)
    }

    pub fn full(left: ColumnId, right: ColumnId) -> Result<Self> {
        Self::with_kind(JoinKind::Full, left, right)
    }

    /// Extra predicate AND-ed onto the ON clause
    pub fn on(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    /// The table being joined (the right column's table)
    pub fn table(&self) -> &TableId {
        &self.table
    }

    pub fn left_column(&self) -> &ColumnId {
        &self.left
    }

    pub fn right_column(&self) -> &ColumnId {
        &self.right
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

/// Sort direction for ORDER BY clauses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// An ORDER BY entry
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    column: ColumnId,
    direction: SortDirection,
}

impl OrderBy {
    pub fn new(column: ColumnId, direction: SortDirection) -> Result<Self> {
        column.require_name("order by column")?;
        Ok(Self { column, direction })
    }

    pub fn asc(column: ColumnId) -> Result<Self> {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: ColumnId) -> Result<Self> {
        Self::new(column, SortDirection::Desc)
    }

    pub fn column(&self) -> &ColumnId {
        &self.column
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Desc
    }
}

/// Per-build rendering state: the output text and the parameters registered
/// so far, in the order their placeholders were emitted.
pub(crate) struct RenderContext<'d> {
    dialect: &'d Dialect,
    sql: String,
    params: ParameterList,
    aliases: bool,
}

impl<'d> RenderContext<'d> {
    pub(crate) fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            params: ParameterList::new(),
            aliases: true,
        }
    }

    /// Context for statements that cannot declare a table alias (UPDATE,
    /// DELETE): tables render as `schema.table` everywhere
    pub(crate) fn without_aliases(dialect: &'d Dialect) -> Self {
        Self {
            aliases: false,
            ..Self::new(dialect)
        }
    }

    pub(crate) fn dialect(&self) -> &'d Dialect {
        self.dialect
    }

    pub(crate) fn keyword(&self, keyword: Keyword) -> &'d str {
        self.dialect.keyword(keyword)
    }

    /// Append a fragment, separated from the previous one by a space
    pub(crate) fn push(&mut self, fragment: &str) {
        if fragment.is_empty() {
            return;
        }
        if !self.sql.is_empty() {
            self.sql.push(' ');
        }
        self.sql.push_str(fragment);
    }

    /// Register a value and return its placeholder
    pub(crate) fn param(&mut self, value: Value) -> String {
        let index = self.params.push(value);
        self.dialect.placeholder(index)
    }

    pub(crate) fn parameter_count(&self) -> usize {
        self.params.len()
    }

    /// `schema.table` with the dialect default schema when none is given
    pub(crate) fn table_name(&self, table: &TableId) -> String {
        let dialect = self.dialect;
        let Some(name) = table.table() else {
            return table
                .alias()
                .map(|alias| dialect.quote_identifier(alias))
                .unwrap_or_default();
        };
        let schema = table
            .schema()
            .map(|schema| dialect.quote_identifier(schema))
            .or_else(|| dialect.default_schema().map(|s| dialect.identifiers.quote(s)));
        match schema {
            Some(schema) => format!(
                "{}{}{}",
                schema,
                dialect.identifiers.separator,
                dialect.quote_identifier(name)
            ),
            None => dialect.quote_identifier(name),
        }
    }

    /// Declaring form: `schema.table alias`
    pub(crate) fn table_full(&self, table: &TableId) -> String {
        let name = self.table_name(table);
        if !self.aliases {
            return name;
        }
        match (table.table(), table.alias()) {
            (Some(_), Some(alias)) => {
                let alias = self.dialect.quote_identifier(alias);
                match self.keyword(Keyword::TableAlias).trim() {
                    "" => format!("{} {}", name, alias),
                    keyword => format!("{} {} {}", name, keyword, alias),
                }
            }
            _ => name,
        }
    }

    /// Referencing form: the alias when there is one, else `schema.table`
    pub(crate) fn table_short(&self, table: &TableId) -> String {
        match table.alias() {
            Some(alias) if self.aliases || table.table().is_none() => {
                self.dialect.quote_identifier(alias)
            }
            _ => self.table_name(table),
        }
    }

    /// Column qualified by its table's short form; wildcards stay unquoted
    pub(crate) fn column(&self, column: &ColumnId) -> String {
        let name = self.column_name(column);
        match column.table() {
            Some(table) => format!(
                "{}{}{}",
                self.table_short(table),
                self.dialect.identifiers.separator,
                name
            ),
            None => name,
        }
    }

    /// Bare column name without any qualifier
    pub(crate) fn column_name(&self, column: &ColumnId) -> String {
        match column.name() {
            Some(name) => self.dialect.quote_identifier(name),
            None => self.keyword(Keyword::AllColumns).to_string(),
        }
    }

    /// Top-level conditions, always AND-ed and never parenthesized
    pub(crate) fn conditions(&mut self, conditions: &[Condition]) -> String {
        let separator = format!(" {} ", self.dialect.logical_operator(crate::logical::AND));
        conditions
            .iter()
            .map(|condition| self.condition(condition))
            .collect::<Vec<_>>()
            .join(separator.as_str())
    }

    /// Render a condition depth-first, registering parameters as met
    pub(crate) fn condition(&mut self, condition: &Condition) -> String {
        match condition {
            Condition::Operator(leaf) => self.operator_condition(leaf),
            Condition::Group(group) => {
                let separator =
                    format!(" {} ", self.dialect.logical_operator(group.logical_operator()));
                let children: Vec<String> = group
                    .conditions()
                    .iter()
                    .map(|child| self.condition(child))
                    .collect();
                format!("({})", children.join(separator.as_str()))
            }
        }
    }

    fn operator_condition(&mut self, leaf: &OperatorCondition) -> String {
        let dialect = self.dialect;
        let column = self.column(leaf.column());
        let not = |negated: bool| {
            if negated {
                format!("{} ", dialect.keyword(Keyword::Not))
            } else {
                String::new()
            }
        };

        match leaf.operator() {
            ConditionalOperator::Comparison { symbol, value } => {
                let placeholder = self.param(value.clone());
                format!("{} {} {}", column, dialect.comparison(symbol), placeholder)
            }
            ConditionalOperator::Between { min, max, negated } => {
                let min = self.param(min.clone());
                let max = self.param(max.clone());
                format!(
                    "{} {}{} {} {} {}",
                    column,
                    not(*negated),
                    dialect.keyword(Keyword::Between),
                    min,
                    dialect.keyword(Keyword::And),
                    max
                )
            }
            ConditionalOperator::In { values, negated } => {
                let placeholders: Vec<String> =
                    values.iter().map(|value| self.param(value.clone())).collect();
                format!(
                    "{} {}{} ({})",
                    column,
                    not(*negated),
                    dialect.keyword(Keyword::In),
                    placeholders.join(", ")
                )
            }
            ConditionalOperator::Like { pattern, negated } => {
                let placeholder = self.param(pattern.clone());
                format!(
                    "{} {}{} {}",
                    column,
                    not(*negated),
                    dialect.keyword(Keyword::Like),
                    placeholder
                )
            }
            ConditionalOperator::Null { negated } => format!(
                "{} {} {}{}",
                column,
                dialect.keyword(Keyword::Is),
                not(*negated),
                dialect.keyword(Keyword::Null)
            ),
        }
    }

    /// Emit `WHERE ...` when there is anything to filter on
    pub(crate) fn where_clause(&mut self, conditions: &[Condition]) {
        if conditions.is_empty() {
            return;
        }
        let rendered = self.conditions(conditions);
        let keyword = self.keyword(Keyword::Where);
        self.push(keyword);
        self.push(&rendered);
    }

    /// Finish the build, logging the compiled statement
    pub(crate) fn finish(self, statement: &'static str) -> Statement {
        let text = self.sql.trim().to_string();
        tracing::debug!(
            target: "sqlweave::build",
            statement,
            dialect = %self.dialect.name,
            parameters = self.parameter_count(),
            sql = %text,
            "built statement"
        );
        Statement {
            text,
            parameters: self.params.into_values(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{op, ConditionGroup, Error};

    fn users() -> TableId {
        TableId::aliased("dbo.Users", "u").unwrap()
    }

    #[test]
    fn test_join_requires_qualified_columns() {
        let roles = TableId::new("Roles").unwrap();
        let err = Join::new(ColumnId::named("RoleId"), roles.column("Id")).unwrap_err();
        assert!(matches!(err, Error::MissingColumnTable { ref argument } if argument == "left"));

        let err = Join::new(users().column("RoleId"), ColumnId::all_of(&roles)).unwrap_err();
        assert!(matches!(err, Error::MissingColumnName { ref argument } if argument == "right"));
    }

    #[test]
    fn test_join_defaults_to_inner() {
        let roles = TableId::new("Roles").unwrap();
        let join = Join::new(users().column("RoleId"), roles.column("Id")).unwrap();
        assert_eq!(join.kind(), JoinKind::Inner);
        assert_eq!(join.table(), &roles);
        assert!(join.condition().is_none());
    }

    #[test]
    fn test_order_by_rejects_wildcard() {
        assert!(OrderBy::asc(ColumnId::all_of(&users())).is_err());
        assert!(OrderBy::desc(users().column("Name")).unwrap().is_descending());
    }

    #[test]
    fn test_table_forms() {
        let dialect = Dialect::ansi();
        let ctx = RenderContext::new(&dialect);
        let u = users();
        assert_eq!(ctx.table_full(&u), "dbo.Users u");
        assert_eq!(ctx.table_short(&u), "u");

        let plain = TableId::new("Roles").unwrap();
        assert_eq!(ctx.table_full(&plain), "Roles");
        assert_eq!(ctx.table_short(&plain), "Roles");
    }

    #[test]
    fn test_table_forms_with_quoting_and_default_schema() {
        let dialect = Dialect::sql_server();
        let ctx = RenderContext::new(&dialect);
        let roles = TableId::new("Roles").unwrap();
        assert_eq!(ctx.table_full(&roles), "[dbo].[Roles]");
        assert_eq!(ctx.column(&roles.column("Id")), "[dbo].[Roles].[Id]");
        assert_eq!(ctx.column(&ColumnId::all_of(&users())), "[u].*");
    }

    #[test]
    fn test_alias_keyword() {
        let dialect = Dialect::ansi().with_keyword(Keyword::TableAlias, "AS");
        let ctx = RenderContext::new(&dialect);
        assert_eq!(ctx.table_full(&users()), "dbo.Users AS u");
    }

    #[test]
    fn test_condition_registers_in_traversal_order() {
        let dialect = Dialect::ansi();
        let mut ctx = RenderContext::new(&dialect);
        let u = users();
        let group = ConditionGroup::or([
            Condition::on(u.column("Age"), op::is_between(18, 65)).unwrap(),
            Condition::on(u.column("Role"), op::is_in(["admin", "owner"])).unwrap(),
        ])
        .unwrap();

        let sql = ctx.condition(&group.into());
        assert_eq!(
            sql,
            "(u.Age BETWEEN @p0 AND @p1 OR u.Role IN (@p2, @p3))"
        );
        assert_eq!(ctx.parameter_count(), 4);
    }

    #[test]
    fn test_null_operators() {
        let dialect = Dialect::ansi();
        let mut ctx = RenderContext::new(&dialect);
        let u = users();
        let is_null = Condition::on(u.column("DeletedAt"), op::is_null()).unwrap();
        let not_null = Condition::on(u.column("DeletedAt"), op::is_not_null()).unwrap();
        assert_eq!(ctx.condition(&is_null), "u.DeletedAt IS NULL");
        assert_eq!(ctx.condition(&not_null), "u.DeletedAt IS NOT NULL");
        assert_eq!(ctx.parameter_count(), 0);
    }

    #[test]
    fn test_statement_named_parameters() {
        let dialect = Dialect::ansi();
        let mut ctx = RenderContext::new(&dialect);
        ctx.push("SELECT");
        let placeholder = ctx.param("x".into());
        ctx.push(&placeholder);
        let statement = ctx.finish("select");

        assert_eq!(statement.text(), "SELECT @p0");
        let named = statement.named_parameters();
        assert_eq!(named[0].name, "p0");
        assert_eq!(named[0].value, Value::from("x"));
    }

    #[test]
    fn test_table_forms_without_aliases() {
        let dialect = Dialect::sql_server();
        let ctx = RenderContext::without_aliases(&dialect);
        let u = users();
        assert_eq!(ctx.table_full(&u), "[dbo].[Users]");
        assert_eq!(ctx.table_short(&u), "[dbo].[Users]");
        assert_eq!(ctx.column(&u.column("Id")), "[dbo].[Users].[Id]");

        let alias_only = TableId::from_alias("x").unwrap();
        assert_eq!(ctx.table_short(&alias_only), "[x]");
    }

    #[test]
    fn test_between_ignores_group_operator_remap() {
        let mut dialect = Dialect::ansi();
        dialect
            .logical_operators
            .insert("AND".to_string(), "&&".to_string());
        let mut ctx = RenderContext::new(&dialect);
        let u = users();
        let group = ConditionGroup::and([
            Condition::on(u.column("Age"), op::is_between(18, 65)).unwrap(),
            Condition::on(u.column("Active"), op::is_equal_to(true)).unwrap(),
        ])
        .unwrap();

        assert_eq!(
            ctx.condition(&group.into()),
            "(u.Age BETWEEN @p0 AND @p1 && u.Active = @p2)"
        );
    }

    #[test]
    fn test_between_uses_and_keyword() {
        let dialect = Dialect::ansi().with_keyword(Keyword::And, "and");
        let mut ctx = RenderContext::new(&dialect);
        let between = Condition::on(users().column("Age"), op::is_not_between(1, 9)).unwrap();
        assert_eq!(ctx.condition(&between), "u.Age NOT BETWEEN @p0 and @p1");
    }
}
