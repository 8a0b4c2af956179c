use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// A key every point record must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredField {
    Id,
    X,
    Y,
    Z,
    C,
}

impl RequiredField {
    pub const ALL: [RequiredField; 5] = [Self::Id, Self::X, Self::Y, Self::Z, Self::C];
    pub const COORDINATES: [RequiredField; 3] = [Self::X, Self::Y, Self::Z];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::C => "c",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Equality key for a record's `id` value.
///
/// Numbers are normalised so that `1` and `1.0` collide, while booleans
/// stay distinct from numbers. Arrays and objects compare by their JSON text
/// (object keys are sorted by `serde_json::Map`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdKey {
    Null,
    Bool(bool),
    Integer(i128),
    Float(u64),
    Text(String),
    Composite(String),
}

// 2^127: every integral f64 below this converts to i128 exactly.
const EXACT_INTEGRAL_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

fn number_key(number: &Number) -> IdKey {
    if let Some(n) = number.as_i64() {
        return IdKey::Integer(n as i128);
    }
    if let Some(n) = number.as_u64() {
        return IdKey::Integer(n as i128);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < EXACT_INTEGRAL_LIMIT => IdKey::Integer(f as i128),
        Some(f) => IdKey::Float(f.to_bits()),
        None => IdKey::Composite(number.to_string()),
    }
}

impl From<&Value> for IdKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => IdKey::Null,
            Value::Bool(b) => IdKey::Bool(*b),
            Value::Number(n) => number_key(n),
            Value::String(s) => IdKey::Text(s.clone()),
            other => IdKey::Composite(other.to_string()),
        }
    }
}

/// Human-readable rendering of an id: strings bare, everything else as JSON.
pub fn display_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    MissingField { field: RequiredField },
    DuplicateId { id: Value },
    NonNumericCoordinate { field: RequiredField },
    NotAnObject,
}

impl IssueKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::NonNumericCoordinate { .. } => "non_numeric_coordinate",
            Self::NotAnObject => "not_an_object",
        }
    }

    pub fn field(&self) -> Option<RequiredField> {
        match self {
            Self::MissingField { field } | Self::NonNumericCoordinate { field } => Some(*field),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<&Value> {
        match self {
            Self::DuplicateId { id } => Some(id),
            _ => None,
        }
    }
}

/// A recoverable finding against the record at `index`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub index: usize,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl Issue {
    pub fn new(index: usize, kind: IssueKind) -> Self {
        Self { index, kind }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::MissingField { field } => {
                write!(f, "index {}: missing field '{}'", self.index, field)
            }
            IssueKind::DuplicateId { id } => {
                write!(f, "index {}: duplicate id {}", self.index, display_id(id))
            }
            IssueKind::NonNumericCoordinate { field } => {
                write!(f, "index {}: '{}' must be a number", self.index, field)
            }
            IssueKind::NotAnObject => write!(f, "index {}: record is not an object", self.index),
        }
    }
}

/// Axis-aligned extent of the points with numeric coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Bounds {
    pub fn from_point(point: [f64; 3]) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn include(&mut self, point: [f64; 3]) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(point[axis]);
            self.max[axis] = self.max[axis].max(point[axis]);
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x [{}, {}], y [{}, {}], z [{}, {}]",
            self.min[0], self.max[0], self.min[1], self.max[1], self.min[2], self.max[2]
        )
    }
}

/// Returns `[x, y, z]` when all three coordinates are present and numeric.
pub fn coordinates(record: &Map<String, Value>) -> Option<[f64; 3]> {
    let mut point = [0.0; 3];
    for (axis, field) in RequiredField::COORDINATES.iter().enumerate() {
        point[axis] = record.get(field.as_str())?.as_f64()?;
    }
    Some(point)
}
