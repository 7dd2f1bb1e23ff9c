//! Document filters shared by every storage backend

use serde_json::Value;

use super::entity::DocumentId;

/// Selection criteria for documents in a collection
///
/// Field conditions compare top-level fields of the serialized document body
/// against a JSON value, so the same filter can be evaluated in memory or
/// compiled to a JSONB predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,
    /// Matches the document with this identifier
    Id(DocumentId),
    /// Field equals value (a `null` value also matches a missing field)
    Eq { field: &'static str, value: Value },
    /// Every inner filter matches (empty matches everything)
    And(Vec<Filter>),
    /// At least one inner filter matches (empty matches nothing)
    Or(Vec<Filter>),
}

impl Default for Filter {
    fn default() -> Self {
        Self::All
    }
}

impl Filter {
    pub fn all() -> Self {
        Self::All
    }

    pub fn id(id: DocumentId) -> Self {
        Self::Id(id)
    }

    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    pub fn any_of(filters: Vec<Filter>) -> Self {
        Self::Or(filters)
    }

    /// Combines two filters with logical AND, collapsing `All` operands
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Self::All, f) | (f, Self::All) => f,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), f) => {
                left.push(f);
                Self::And(left)
            }
            (f, Self::And(mut right)) => {
                right.insert(0, f);
                Self::And(right)
            }
            (left, right) => Self::And(vec![left, right]),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Evaluates the filter against a document body
    pub fn matches(&self, id: &DocumentId, document: &Value) -> bool {
        match self {
            Self::All => true,
            Self::Id(expected) => expected == id,
            Self::Eq { field, value } => {
                document.get(*field).unwrap_or(&Value::Null) == value
            }
            Self::And(filters) => filters.iter().all(|f| f.matches(id, document)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(id, document)),
        }
    }
}
