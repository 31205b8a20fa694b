// ********* Input data structures ***********

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// A scalar value, as stored in a record or returned by the key function
/// of a dimension.
///
/// Values are totally ordered: `Undefined` sorts first, then numbers, then text.
#[derive(Debug, Clone)]
pub enum Value {
    /// A missing field, or a key that does not match the kind of the dimension.
    Undefined,
    Number(f64),
    Text(String),
}

/// The kind of the keys of a dimension. It is fixed by the first defined key.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ValueKind {
    Number,
    Text,
}

impl Value {
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Undefined => None,
            Value::Number(_) => Some(ValueKind::Number),
            Value::Text(_) => Some(ValueKind::Text),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Undefined => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            // Integers print without a fraction while they are exact in an f64.
            Value::Number(x) if x.fract() == 0.0 && x.abs() < MAX_EXACT_INTEGER => {
                write!(f, "{}", *x as i64)
            }
            Value::Number(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

/// One survey response or one activity entry.
///
/// A record is a flat mapping from field names to values. It is never
/// modified once it has been handed to a collection.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Record {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// The value of a field. Missing fields are undefined.
    pub fn get(&self, field: &str) -> Value {
        self.fields.get(field).cloned().unwrap_or(Value::Undefined)
    }

    pub fn field(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

// ********* Handles **********

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CollectionId(pub(crate) usize);

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct DimensionId {
    pub(crate) collection: CollectionId,
    pub(crate) slot: usize,
}

impl DimensionId {
    pub fn collection(&self) -> CollectionId {
        self.collection
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct GroupId {
    pub(crate) collection: CollectionId,
    pub(crate) dimension: usize,
    pub(crate) slot: usize,
}

impl GroupId {
    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    pub fn dimension(&self) -> DimensionId {
        DimensionId {
            collection: self.collection,
            slot: self.dimension,
        }
    }
}

/// The predicate attached to a dimension.
///
/// Only exact matches are supported.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub enum Filter {
    #[default]
    Unrestricted,
    Exact(Value),
}

impl From<Option<Value>> for Filter {
    fn from(v: Option<Value>) -> Self {
        match v {
            Some(x) => Filter::Exact(x),
            None => Filter::Unrestricted,
        }
    }
}

/// Errors returned by the dataset index.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum IndexError {
    /// A collection was created without any record.
    EmptyDataset,
    UnknownCollection(CollectionId),
    UnknownDimension(DimensionId),
    UnknownGroup(GroupId),
    /// The filter bitmask of a collection holds at most 64 dimensions.
    TooManyDimensions(CollectionId),
    /// A chart cannot be bound to the given source.
    InvalidBinding(String),
}

impl Error for IndexError {}

impl Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::EmptyDataset => write!(f, "the dataset does not contain any record"),
            IndexError::UnknownCollection(c) => write!(f, "unknown collection {:?}", c),
            IndexError::UnknownDimension(d) => write!(f, "unknown dimension {:?}", d),
            IndexError::UnknownGroup(g) => write!(f, "unknown group {:?}", g),
            IndexError::TooManyDimensions(c) => write!(
                f,
                "collection {:?} cannot hold more than {} dimensions",
                c,
                crate::MAX_DIMENSIONS
            ),
            IndexError::InvalidBinding(anchor) => {
                write!(f, "chart {} cannot be bound to this source", anchor)
            }
        }
    }
}

// ********* Display policy **********

/// A count as it may be shown to the user.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DisplayCount {
    Exact(u64),
    /// The count is at or below the anonymity floor. The true value is not kept.
    Censored { threshold: u64 },
}

impl DisplayCount {
    pub fn exact(&self) -> Option<u64> {
        match self {
            DisplayCount::Exact(n) => Some(*n),
            DisplayCount::Censored { .. } => None,
        }
    }
}

impl Display for DisplayCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayCount::Exact(n) => write!(f, "{}", n),
            DisplayCount::Censored { threshold } => write!(f, "< {}*", threshold),
        }
    }
}

/// The anonymity floor applied to every count before it is displayed.
///
/// ```
/// use survey_filter::CountFormat;
///
/// let fmt = CountFormat::DEFAULT;
/// assert_eq!(fmt.format(21), "21");
/// assert_eq!(fmt.format(20), "< 20*");
/// ```
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CountFormat {
    pub censor_below: u64,
}

impl CountFormat {
    pub const DEFAULT_THRESHOLD: u64 = 20;

    pub const DEFAULT: CountFormat = CountFormat {
        censor_below: CountFormat::DEFAULT_THRESHOLD,
    };

    pub fn new(censor_below: u64) -> CountFormat {
        CountFormat { censor_below }
    }

    pub fn display(&self, count: u64) -> DisplayCount {
        if count > self.censor_below {
            DisplayCount::Exact(count)
        } else {
            DisplayCount::Censored {
                threshold: self.censor_below,
            }
        }
    }

    pub fn format(&self, count: u64) -> String {
        self.display(count).to_string()
    }
}

impl Default for CountFormat {
    fn default() -> Self {
        CountFormat::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_as_text() {
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(-12_i64).to_string(), "-12");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::from("August").to_string(), "August");
    }

    #[test]
    fn large_integers_stay_distinct() {
        let a = Value::from(1e19).to_string();
        let b = Value::from(2e19).to_string();
        assert_ne!(a, b);
        assert_eq!(a, "10000000000000000000");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "inf");
    }
}
