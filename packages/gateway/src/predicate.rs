//! Structured query predicates.
//!
//! The original maps built `where` clauses by string concatenation,
//! which is both injection-prone and untestable. Predicates are built
//! as equality/membership/conjunction nodes and rendered to the
//! service's SQL-ish filter syntax only at the gateway boundary.

/// A filter predicate over feature attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every record (`1=1`).
    All,
    /// Field equals a string value.
    Eq {
        /// Attribute field name.
        field: String,
        /// Value to match.
        value: String,
    },
    /// Field is one of a set of string values.
    In {
        /// Attribute field name.
        field: String,
        /// Values to match.
        values: Vec<String>,
    },
    /// Both sides must match.
    And(Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// Equality predicate.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Membership predicate. An empty value set matches nothing, which
    /// renders as `1=0`.
    #[must_use]
    pub fn is_in(field: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        Self::In {
            field: field.into(),
            values: values.into_iter().collect(),
        }
    }

    /// Conjunction of this predicate with another.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    /// Renders the predicate as a feature-service `where` clause.
    #[must_use]
    pub fn to_where_clause(&self) -> String {
        match self {
            Self::All => "1=1".to_string(),
            Self::Eq { field, value } => {
                format!("{field} = '{}'", escape(value))
            }
            Self::In { field, values } => {
                if values.is_empty() {
                    return "1=0".to_string();
                }
                let quoted: Vec<String> =
                    values.iter().map(|v| format!("'{}'", escape(v))).collect();
                format!("{field} IN ({})", quoted.join(","))
            }
            Self::And(left, right) => {
                format!(
                    "{} AND {}",
                    left.to_where_clause(),
                    right.to_where_clause()
                )
            }
        }
    }
}

/// Doubles single quotes, the only metacharacter inside a quoted
/// string literal in the service's filter syntax.
fn escape(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all() {
        assert_eq!(Predicate::All.to_where_clause(), "1=1");
    }

    #[test]
    fn renders_equality() {
        let p = Predicate::eq("Origin_ID_Text", "150700001");
        assert_eq!(p.to_where_clause(), "Origin_ID_Text = '150700001'");
    }

    #[test]
    fn renders_membership() {
        let p = Predicate::is_in(
            "GEOID",
            ["150700001".to_string(), "150700002".to_string()],
        );
        assert_eq!(p.to_where_clause(), "GEOID IN ('150700001','150700002')");
    }

    #[test]
    fn empty_membership_matches_nothing() {
        let p = Predicate::is_in("GEOID", []);
        assert_eq!(p.to_where_clause(), "1=0");
    }

    #[test]
    fn renders_conjunction() {
        let p = Predicate::eq("Origin_ID_Text", "150700001")
            .and(Predicate::eq("Day_Part", "01: 6am (6am-7am)"));
        assert_eq!(
            p.to_where_clause(),
            "Origin_ID_Text = '150700001' AND Day_Part = '01: 6am (6am-7am)'"
        );
    }

    #[test]
    fn escapes_single_quotes() {
        let p = Predicate::eq("Municipality", "O'Hara");
        assert_eq!(p.to_where_clause(), "Municipality = 'O''Hara'");
    }
}
