//! Condition tree for WHERE and JOIN ... ON predicates
//!
//! Leaves pair a column with a [`ConditionalOperator`]; groups combine one or
//! more children under a single logical operator and always render
//! parenthesized.

use crate::{ColumnId, ConditionalOperator, Error, Result};

/// Conventional logical operator spellings for [`ConditionGroup`]
pub mod logical {
    pub const AND: &str = "AND";
    pub const OR: &str = "OR";
}

/// A predicate: either a single column test or a group of predicates
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Operator(OperatorCondition),
    Group(ConditionGroup),
}

impl Condition {
    /// Shorthand for `OperatorCondition::new(column, operator)?.into()`
    pub fn on(column: ColumnId, operator: ConditionalOperator) -> Result<Self> {
        OperatorCondition::new(column, operator).map(Condition::Operator)
    }

    /// Nesting depth of groups: a leaf is 0, a group of leaves is 1
    pub fn depth(&self) -> usize {
        match self {
            Condition::Operator(_) => 0,
            Condition::Group(group) => {
                1 + group
                    .conditions()
                    .iter()
                    .map(Condition::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Total number of parameters this condition registers when rendered
    pub fn parameter_count(&self) -> usize {
        match self {
            Condition::Operator(leaf) => leaf.operator().parameter_count(),
            Condition::Group(group) => group
                .conditions()
                .iter()
                .map(Condition::parameter_count)
                .sum(),
        }
    }
}

impl From<OperatorCondition> for Condition {
    fn from(condition: OperatorCondition) -> Self {
        Condition::Operator(condition)
    }
}

impl From<ConditionGroup> for Condition {
    fn from(group: ConditionGroup) -> Self {
        Condition::Group(group)
    }
}

/// A single column tested by an operator
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorCondition {
    column: ColumnId,
    operator: ConditionalOperator,
}

impl OperatorCondition {
    /// Pair a named column with an operator
    ///
    /// Fails with `MissingColumnName` for wildcard columns and with
    /// `EmptyValueList` for an IN / NOT IN without values.
    pub fn new(column: ColumnId, operator: ConditionalOperator) -> Result<Self> {
        column.require_name("column")?;
        if let ConditionalOperator::In { values, negated } = &operator {
            if values.is_empty() {
                let argument = if *negated { "NOT IN" } else { "IN" };
                return Err(Error::empty_value_list(argument));
            }
        }
        Ok(Self { column, operator })
    }

    pub fn column(&self) -> &ColumnId {
        &self.column
    }

    pub fn operator(&self) -> &ConditionalOperator {
        &self.operator
    }
}

/// Children combined with one logical operator, e.g. `(a OR b OR c)`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup {
    conditions: Vec<Condition>,
    logical_operator: String,
}

impl ConditionGroup {
    /// Group conditions under any logical operator
    ///
    /// The operator text is kept verbatim (trimmed) and only mapped through
    /// the dialect when rendered.
    pub fn new<I, C>(conditions: I, logical_operator: &str) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        let conditions: Vec<Condition> = conditions.into_iter().map(Into::into).collect();
        if conditions.is_empty() {
            return Err(Error::EmptyConditionGroup);
        }
        let logical_operator = logical_operator.trim();
        if logical_operator.is_empty() {
            return Err(Error::MissingOperator);
        }
        Ok(Self {
            conditions,
            logical_operator: logical_operator.to_string(),
        })
    }

    /// `(c1 AND c2 ...)`
    pub fn and<I, C>(conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        Self::new(conditions, logical::AND)
    }

    /// `(c1 OR c2 ...)`
    pub fn or<I, C>(conditions: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        Self::new(conditions, logical::OR)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn logical_operator(&self) -> &str {
        &self.logical_operator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{op, TableId};

    fn users() -> TableId {
        TableId::aliased("dbo.Users", "u").unwrap()
    }

    #[test]
    fn test_operator_condition_requires_name() {
        let err = OperatorCondition::new(ColumnId::all_of(&users()), op::is_null()).unwrap_err();
        assert!(matches!(err, Error::MissingColumnName { .. }));
        assert_eq!(err.to_string(), "Missing column name for column");
    }

    #[test]
    fn test_empty_in_list_rejected() {
        let empty: Vec<i32> = Vec::new();
        let err = OperatorCondition::new(users().column("Id"), op::is_not_in(empty)).unwrap_err();
        assert!(matches!(err, Error::EmptyValueList { .. }));
        assert_eq!(err.to_string(), "NOT IN requires at least one value");
    }

    #[test]
    fn test_group_requires_children() {
        let empty: Vec<Condition> = Vec::new();
        assert!(matches!(
            ConditionGroup::or(empty).unwrap_err(),
            Error::EmptyConditionGroup
        ));
    }

    #[test]
    fn test_group_requires_operator() {
        let leaf = Condition::on(users().column("Id"), op::is_equal_to(1)).unwrap();
        assert!(matches!(
            ConditionGroup::new([leaf], "   ").unwrap_err(),
            Error::MissingOperator
        ));
    }

    #[test]
    fn test_group_keeps_operator_text() {
        let leaf = Condition::on(users().column("Id"), op::is_equal_to(1)).unwrap();
        let group = ConditionGroup::new([leaf], " xor ").unwrap();
        assert_eq!(group.logical_operator(), "xor");
        assert_eq!(group.conditions().len(), 1);
    }

    #[test]
    fn test_depth_and_parameter_count() {
        let u = users();
        let a = Condition::on(u.column("A"), op::is_between(1, 2)).unwrap();
        let b = Condition::on(u.column("B"), op::is_null()).unwrap();
        let c = Condition::on(u.column("C"), op::is_in([1, 2, 3])).unwrap();

        assert_eq!(a.depth(), 0);
        let inner: Condition = ConditionGroup::and([a, b]).unwrap().into();
        assert_eq!(inner.depth(), 1);
        let outer: Condition = ConditionGroup::or([inner, c]).unwrap().into();
        assert_eq!(outer.depth(), 2);
        assert_eq!(outer.parameter_count(), 5);
    }
}
