//! Parsed property paths.
//!
//! A path string is split on `.`; every piece is one [`PathSegment`]. A piece
//! ending in `[]` marks an array step: the value found under its key is a
//! sequence and the rest of the path applies to each element.
//!
//! ```text
//! "a.b[].c"  ->  [ a ] [ b, array ] [ c ]
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

const ARRAY_MARKER: &str = "[]";

/// One dot-delimited component of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    key: String,
    is_array_step: bool,
}

impl PathSegment {
    /// Parses one raw component, stripping a trailing `[]` marker.
    ///
    /// Only the last marker is stripped, so `"grid[][]"` is an array step
    /// with key `"grid[]"`. Empty components are kept as empty keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use propflow::path::PathSegment;
    ///
    /// let segment = PathSegment::parse("items[]");
    /// assert_eq!(segment.key(), "items");
    /// assert!(segment.is_array_step());
    ///
    /// let segment = PathSegment::parse("name");
    /// assert_eq!(segment.key(), "name");
    /// assert!(!segment.is_array_step());
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.strip_suffix(ARRAY_MARKER) {
            Some(key) => Self::array(key),
            None => Self::field(raw),
        }
    }

    /// Creates a plain record step.
    #[must_use]
    pub fn field(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_array_step: false,
        }
    }

    /// Creates an array step.
    #[must_use]
    pub fn array(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_array_step: true,
        }
    }

    /// The key with any array marker removed.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the value under [`key`](Self::key) is traversed element-wise.
    #[must_use]
    pub const fn is_array_step(&self) -> bool {
        self.is_array_step
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array_step {
            write!(formatter, "{}{ARRAY_MARKER}", self.key)
        } else {
            formatter.write_str(&self.key)
        }
    }
}

/// An ordered, immutable sequence of [`PathSegment`]s.
///
/// A `Path` always holds at least one segment: the empty string parses to a
/// single segment with an empty key.
///
/// # Examples
///
/// ```
/// use propflow::path::Path;
///
/// let path: Path = "orders[].lines[].price".parse().unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.to_string(), "orders[].lines[].price");
///
/// let keys: Vec<&str> = path.iter().map(|segment| segment.key()).collect();
/// assert_eq!(keys, ["orders", "lines", "price"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub struct Path {
    segments: SmallVec<[PathSegment; 4]>,
}

impl Path {
    /// Parses a dotted path string.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        source.split('.').map(PathSegment::parse).collect()
    }

    /// The parsed segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns an iterator over the segments, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    ///
    /// Parsed paths are never empty; this only holds for a `Path` collected
    /// from an empty iterator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of array steps in the path.
    #[must_use]
    pub fn array_depth(&self) -> usize {
        self.iter().filter(|segment| segment.is_array_step()).count()
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(source))
    }
}

impl From<&str> for Path {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for Path {
    fn from(source: String) -> Self {
        Self::parse(&source)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                formatter.write_str(".")?;
            }
            write!(formatter, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a", &[("a", false)])]
    #[case("a.b[].c", &[("a", false), ("b", true), ("c", false)])]
    #[case("rows[]", &[("rows", true)])]
    #[case("grid[][]", &[("grid[]", true)])]
    #[case("a[]b", &[("a[]b", false)])]
    fn parse_classifies_segments(#[case] source: &str, #[case] expected: &[(&str, bool)]) {
        let path = Path::parse(source);
        let actual: Vec<(&str, bool)> = path
            .iter()
            .map(|segment| (segment.key(), segment.is_array_step()))
            .collect();
        assert_eq!(actual, expected);
    }

    #[rstest]
    #[case("", 1)]
    #[case(".a", 2)]
    #[case("a.", 2)]
    #[case("a..b", 3)]
    fn empty_components_become_empty_keys(#[case] source: &str, #[case] length: usize) {
        let path = Path::parse(source);
        assert_eq!(path.len(), length);
        assert!(path.iter().any(|segment| segment.key().is_empty()));
    }

    #[rstest]
    #[case("a.b[].c")]
    #[case("orders[].lines[].price")]
    #[case(".leading")]
    #[case("")]
    fn display_round_trips_source(#[case] source: &str) {
        assert_eq!(Path::parse(source).to_string(), source);
    }

    #[rstest]
    fn array_depth_counts_array_steps() {
        assert_eq!(Path::parse("a.b[].c[].d").array_depth(), 2);
        assert_eq!(Path::parse("a.b").array_depth(), 0);
    }

    #[rstest]
    fn from_str_never_fails() {
        let path: Path = "x[].y".parse().unwrap();
        assert_eq!(path.segments()[0], PathSegment::array("x"));
        assert_eq!(path.segments()[1], PathSegment::field("y"));
    }
}
