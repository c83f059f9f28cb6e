//! Backend boolean filter produced by the translator.
//!
//! A [`Filter`] holds three ordered clause groups. `must` conditions are
//! AND-ed, at least one `should` condition has to hold, and `must_not`
//! conditions are AND-NOT-ed. A [`Condition`] is either a keyed field match or
//! range, or a whole nested filter.
//!
//! Serializes to the Qdrant-style JSON shape:
//!
//! ```text
//! {"must": [{"key": "age", "range": {"gt": 18.0}},
//!           {"should": [{"key": "status", "match": {"value": "active"}}, ...]}]}
//! ```

use serde::{Serialize, Serializer, ser::SerializeMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Condition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Condition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Condition>,
}

/// One of the three clause groups of a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Must,
    Should,
    MustNot,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: Group, condition: Condition) {
        match group {
            Group::Must => self.must.push(condition),
            Group::Should => self.should.push(condition),
            Group::MustNot => self.must_not.push(condition),
        }
    }

    pub fn group(&self, group: Group) -> &[Condition] {
        match group {
            Group::Must => &self.must,
            Group::Should => &self.should,
            Group::MustNot => &self.must_not,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Condition {
    Field(FieldCondition),
    Filter(NestedFilter),
}

impl Condition {
    pub fn field(&self) -> Option<&FieldCondition> {
        match self {
            Condition::Field(field) => Some(field),
            Condition::Filter(_) => None,
        }
    }

    pub fn filter(&self) -> Option<&Filter> {
        match self {
            Condition::Field(_) => None,
            Condition::Filter(nested) => Some(&nested.filter),
        }
    }

    pub fn matching(key: impl Into<String>, m: Match) -> Self {
        Condition::Field(FieldCondition {
            key: key.into(),
            payload: FieldPayload::Match(m),
        })
    }

    pub fn range(key: impl Into<String>, range: Range) -> Self {
        Condition::Field(FieldCondition {
            key: key.into(),
            payload: FieldPayload::Range(range),
        })
    }

    pub fn nested(filter: Filter) -> Self {
        Condition::Filter(NestedFilter { filter })
    }
}

/// A condition on the payload field at a dotted path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCondition {
    pub key: String,
    #[serde(flatten)]
    pub payload: FieldPayload,
}

impl FieldCondition {
    pub fn as_match(&self) -> Option<&Match> {
        match &self.payload {
            FieldPayload::Match(m) => Some(m),
            FieldPayload::Range(_) => None,
        }
    }

    pub fn as_range(&self) -> Option<&Range> {
        match &self.payload {
            FieldPayload::Range(r) => Some(r),
            FieldPayload::Match(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPayload {
    Match(Match),
    Range(Range),
}

/// Exact, set or full-text match on a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Match {
    Keyword(String),
    Integer(i64),
    Boolean(bool),
    Keywords(Vec<String>),
    Integers(Vec<i64>),
    Text(String),
}

impl Serialize for Match {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Match::Keyword(s) => map.serialize_entry("value", s)?,
            Match::Integer(n) => map.serialize_entry("value", n)?,
            Match::Boolean(b) => map.serialize_entry("value", b)?,
            Match::Keywords(values) => map.serialize_entry("any", values)?,
            Match::Integers(values) => map.serialize_entry("any", values)?,
            Match::Text(pattern) => map.serialize_entry("text", pattern)?,
        }
        map.end()
    }
}

/// Numeric range; unset bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Range {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
}

/// A sub-filter used as a single condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NestedFilter {
    pub filter: Filter,
}
