//! Path resolution against nested JSON values
//!
//! A path is a dotted sequence of segments (`"inherent_risk.impact_label"`). A segment
//! looks up an object key, or an element index when the current value is an array.
//! The `*` segment fans out over every element of an array (or every value of an
//! object) and collects what the rest of the path resolves to.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Wildcard,
}

/// A parsed lookup path
///
/// # Examples
///
/// ```
/// use vendorsync::core::schema::Path;
/// use serde_json::json;
///
/// let record = json!({"items": [{"uri": "/v1/third-parties/9"}]});
/// let path = Path::parse("items.0.uri");
/// assert_eq!(path.resolve(&record), Some(json!("/v1/third-parties/9")));
/// assert_eq!(Path::parse("items.3.uri").resolve(&record), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parse a dotted path; the empty string is the identity path
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::identity();
        }
        Self::from_segments(path.split('.'))
    }

    /// Build a path from already-split segments
    ///
    /// Segments are taken literally, so keys containing dots can be addressed.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .map(Into::into)
            .map(|s| {
                if s == "*" {
                    Segment::Wildcard
                } else {
                    Segment::Key(s)
                }
            })
            .collect();
        Self { segments }
    }

    /// The path that resolves to its input
    pub fn identity() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Whether any segment is blank
    pub fn has_empty_segment(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Key(k) if k.is_empty()))
    }

    /// Resolve the path, returning `None` when any step is missing
    ///
    /// A missing key, a `null` or scalar intermediate, and an out-of-range index all
    /// count as missing. A `null` at the end of the path is a present value.
    pub fn resolve(&self, target: &Value) -> Option<Value> {
        resolve_segments(target, &self.segments)
    }

    /// Resolve the path, falling back to `default` when it is missing
    pub fn resolve_or(&self, target: &Value, default: Value) -> Value {
        self.resolve(target).unwrap_or(default)
    }
}

/// Resolve `path` against `record`, returning `default` when it is missing
pub fn resolve(record: &Value, path: &str, default: Value) -> Value {
    Path::parse(path).resolve_or(record, default)
}

fn resolve_segments(target: &Value, segments: &[Segment]) -> Option<Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(target.clone());
    };

    match head {
        Segment::Key(key) => step(target, key).and_then(|next| resolve_segments(next, rest)),
        Segment::Wildcard => {
            let children: Box<dyn Iterator<Item = &Value>> = match target {
                Value::Array(items) => Box::new(items.iter()),
                Value::Object(map) => Box::new(map.values()),
                _ => return None,
            };
            Some(Value::Array(
                children
                    .filter_map(|child| resolve_segments(child, rest))
                    .collect(),
            ))
        }
    }
}

fn step<'a>(target: &'a Value, key: &str) -> Option<&'a Value> {
    match target {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<&str> = self
            .segments
            .iter()
            .map(|s| match s {
                Segment::Key(k) => k.as_str(),
                Segment::Wildcard => "*",
            })
            .collect();
        write!(f, "{}", rendered.join("."))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}
