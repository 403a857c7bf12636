//! SQL operator types and the `op` factory

use std::fmt::{self, Display};

use crate::Value;

/// Comparison symbol used by [`ConditionalOperator::Comparison`]
///
/// The symbol is the generic spelling; dialects may remap it at render time
/// (for example `!=` to `<>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Comparison(&'static str);

impl Comparison {
    pub const EQ: Self = Comparison("=");
    pub const NEQ: Self = Comparison("!=");
    pub const GT: Self = Comparison(">");
    pub const GTE: Self = Comparison(">=");
    pub const LT: Self = Comparison("<");
    pub const LTE: Self = Comparison("<=");

    /// Create a custom comparison for database-specific operations
    ///
    /// # Examples
    /// ```
    /// use sqlweave_core::Comparison;
    ///
    /// // PostgreSQL full-text search
    /// let fts = Comparison::custom("@@");
    /// assert_eq!(fts.as_str(), "@@");
    /// ```
    pub const fn custom(symbol: &'static str) -> Self {
        Comparison(symbol)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Types that can be used as a comparison symbol
pub trait IntoComparison {
    fn into_comparison(self) -> Comparison;
}

impl IntoComparison for Comparison {
    fn into_comparison(self) -> Comparison {
        self
    }
}

/// Well-known spellings map onto the constants; anything else is custom
impl IntoComparison for &'static str {
    fn into_comparison(self) -> Comparison {
        match self {
            "=" | "==" => Comparison::EQ,
            "!=" | "<>" => Comparison::NEQ,
            ">" => Comparison::GT,
            ">=" => Comparison::GTE,
            "<" => Comparison::LT,
            "<=" => Comparison::LTE,
            other => Comparison::custom(other),
        }
    }
}

/// The predicate applied to a column in an [`OperatorCondition`](crate::OperatorCondition)
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionalOperator {
    /// `col <symbol> value`
    Comparison { symbol: Comparison, value: Value },
    /// `col [NOT] BETWEEN min AND max`
    Between { min: Value, max: Value, negated: bool },
    /// `col [NOT] IN (v1, v2, ...)`; must hold at least one value
    In { values: Vec<Value>, negated: bool },
    /// `col [NOT] LIKE pattern`
    Like { pattern: Value, negated: bool },
    /// `col IS [NOT] NULL`
    Null { negated: bool },
}

impl ConditionalOperator {
    pub fn is_negated(&self) -> bool {
        match self {
            ConditionalOperator::Comparison { .. } => false,
            ConditionalOperator::Between { negated, .. }
            | ConditionalOperator::In { negated, .. }
            | ConditionalOperator::Like { negated, .. }
            | ConditionalOperator::Null { negated } => *negated,
        }
    }

    /// Number of parameters this operator registers when rendered
    pub fn parameter_count(&self) -> usize {
        match self {
            ConditionalOperator::Comparison { .. } | ConditionalOperator::Like { .. } => 1,
            ConditionalOperator::Between { .. } => 2,
            ConditionalOperator::In { values, .. } => values.len(),
            ConditionalOperator::Null { .. } => 0,
        }
    }
}

/// Factory functions for [`ConditionalOperator`]
///
/// ```
/// use sqlweave_core::op;
///
/// let adult = op::is_greater_than_or_equal_to(18);
/// let staff = op::is_in(["admin", "editor"]);
/// let unset = op::is_null();
/// # let _ = (adult, staff, unset);
/// ```
pub mod op {
    use super::{Comparison, ConditionalOperator, IntoComparison};
    use crate::Value;

    /// Comparison with an arbitrary symbol
    pub fn compare(symbol: impl IntoComparison, value: impl Into<Value>) -> ConditionalOperator {
        ConditionalOperator::Comparison {
            symbol: symbol.into_comparison(),
            value: value.into(),
        }
    }

    pub fn is_equal_to(value: impl Into<Value>) -> ConditionalOperator {
        compare(Comparison::EQ, value)
    }

    pub fn is_not_equal_to(value: impl Into<Value>) -> ConditionalOperator {
        compare(Comparison::NEQ, value)
    }

    pub fn is_greater_than(value: impl Into<Value>) -> ConditionalOperator {
        compare(Comparison::GT, value)
    }

    pub fn is_greater_than_or_equal_to(value: impl Into<Value>) -> ConditionalOperator {
        compare(Comparison::GTE, value)
    }

    pub fn is_less_than(value: impl Into<Value>) -> ConditionalOperator {
        compare(Comparison::LT, value)
    }

    pub fn is_less_than_or_equal_to(value: impl Into<Value>) -> ConditionalOperator {
        compare(Comparison::LTE, value)
    }

    pub fn is_between(min: impl Into<Value>, max: impl Into<Value>) -> ConditionalOperator {
        ConditionalOperator::Between {
            min: min.into(),
            max: max.into(),
            negated: false,
        }
    }

    pub fn is_not_between(min: impl Into<Value>, max: impl Into<Value>) -> ConditionalOperator {
        ConditionalOperator::Between {
            min: min.into(),
            max: max.into(),
            negated: true,
        }
    }

    pub fn is_in<I, T>(values: I) -> ConditionalOperator
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        ConditionalOperator::In {
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    pub fn is_not_in<I, T>(values: I) -> ConditionalOperator
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        ConditionalOperator::In {
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    pub fn is_like(pattern: impl Into<Value>) -> ConditionalOperator {
        ConditionalOperator::Like {
            pattern: pattern.into(),
            negated: false,
        }
    }

    pub fn is_not_like(pattern: impl Into<Value>) -> ConditionalOperator {
        ConditionalOperator::Like {
            pattern: pattern.into(),
            negated: true,
        }
    }

    pub fn is_null() -> ConditionalOperator {
        ConditionalOperator::Null { negated: false }
    }

    pub fn is_not_null() -> ConditionalOperator {
        ConditionalOperator::Null { negated: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_constants() {
        assert_eq!(Comparison::GT.as_str(), ">");
        assert_eq!(Comparison::LT.as_str(), "<");
        assert_eq!(Comparison::EQ.as_str(), "=");
        assert_eq!(Comparison::NEQ.as_str(), "!=");
    }

    #[test]
    fn test_custom_comparison() {
        let custom = Comparison::custom("@@");
        assert_eq!(custom.as_str(), "@@");
        assert_eq!(format!("{}", custom), "@@");
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(">".into_comparison(), Comparison::GT);
        assert_eq!("<>".into_comparison(), Comparison::NEQ);
        assert_eq!(">=".into_comparison(), Comparison::GTE);
        assert_eq!("~*".into_comparison(), Comparison::custom("~*"));
    }

    #[test]
    fn test_factory_variants() {
        assert_eq!(
            op::is_equal_to("a@b.com"),
            ConditionalOperator::Comparison {
                symbol: Comparison::EQ,
                value: Value::from("a@b.com"),
            }
        );
        assert_eq!(
            op::is_not_between(1, 10),
            ConditionalOperator::Between {
                min: Value::I32(1),
                max: Value::I32(10),
                negated: true,
            }
        );
        assert_eq!(op::is_not_null(), ConditionalOperator::Null { negated: true });
    }

    #[test]
    fn test_negation_flags() {
        assert!(!op::is_equal_to(1).is_negated());
        assert!(!op::is_between(1, 2).is_negated());
        assert!(op::is_not_between(1, 2).is_negated());
        assert!(op::is_not_in([1]).is_negated());
        assert!(op::is_not_like("%a").is_negated());
        assert!(!op::is_null().is_negated());
    }

    #[test]
    fn test_parameter_count() {
        assert_eq!(op::is_less_than(5).parameter_count(), 1);
        assert_eq!(op::is_between(1, 10).parameter_count(), 2);
        assert_eq!(op::is_in([1, 2, 3]).parameter_count(), 3);
        assert_eq!(op::is_like("a%").parameter_count(), 1);
        assert_eq!(op::is_not_null().parameter_count(), 0);
    }
}
