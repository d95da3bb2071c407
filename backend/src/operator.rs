//! Comparison operators accepted in `field.operator.value` filters

use std::fmt;

/// The fixed operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Equals
    Eq,
}

impl Operator {
    /// Parse a short operator token; anything outside the table is `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "lt" => Some(Operator::Lt),
            "le" => Some(Operator::Le),
            "gt" => Some(Operator::Gt),
            "ge" => Some(Operator::Ge),
            "eq" => Some(Operator::Eq),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Eq => "eq",
        }
    }

    /// Comparison symbol emitted into the predicate fragment
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Eq => "==",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
