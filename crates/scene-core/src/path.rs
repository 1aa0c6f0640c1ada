//! Slash-delimited node paths in the viewer's namespace

use std::fmt;

/// Root segment every viewer path lives under
pub const ROOT_SEGMENT: &str = "meshcat";

/// Path of a scene node, relative to the viewer root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ScenePath {
    segments: Vec<String>,
}

impl ScenePath {
    /// The viewer root
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a name such as `robot/visuals/base`; empty segments are dropped
    pub fn parse(name: &str) -> Self {
        Self::root().join(name)
    }

    /// Append the segments of `name`
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(
            name.split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, if any
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent path; the root is its own parent
    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// True if `self` equals `other` or lies below it
    pub fn starts_with(&self, other: &ScenePath) -> bool {
        self.segments.starts_with(&other.segments)
    }

    /// Absolute path as sent on the wire, e.g. `/meshcat/robot/base`
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScenePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", ROOT_SEGMENT)?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl From<&str> for ScenePath {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}
