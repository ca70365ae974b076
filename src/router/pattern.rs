//! Path patterns and segment matching.
//!
//! A pattern is an ordered list of segment matchers compiled from a path
//! string: `/user/:id/posts/...` matches `user`, captures the second
//! segment as `id`, requires `posts`, then swallows any tail.

#[derive(Debug, PartialEq, Eq)]
pub enum RouteCompileError {
    /// `...` may only appear as the final segment.
    GlobNotTrailing(String),
    /// A `:` segment needs a name after the colon.
    EmptyCaptureName(String),
}

impl std::fmt::Display for RouteCompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteCompileError::GlobNotTrailing(pattern) => {
                write!(f, "glob must be the final segment in {:?}", pattern)
            }
            RouteCompileError::EmptyCaptureName(pattern) => {
                write!(f, "capture segment without a name in {:?}", pattern)
            }
        }
    }
}

impl std::error::Error for RouteCompileError {}

/// One `/`-delimited, non-empty path component matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentMatcher {
    /// Exact string equality at this position.
    Literal(String),
    /// Always matches, binding the observed segment to the name.
    Capture(String),
}

/// Splits a path into its non-empty segments: `/a//b/` becomes
/// `["a", "b"]`.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Captured parameters from a successful match.
///
/// Stored in capture order; duplicate names resolve to the deepest
/// segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    fn bind(&mut self, name: String, value: String) {
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rfind(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Prefix captures first, then the nested ones. Used when a mounted
    /// sub-table reports its match back through the parent.
    pub(crate) fn merged(mut self, nested: Params) -> Params {
        self.0.extend(nested.0);
        self
    }
}

/// A compiled path pattern: ordered matchers plus an optional trailing
/// glob consuming any remaining segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    matchers: Vec<SegmentMatcher>,
    glob: bool,
}

impl Pattern {
    /// Compiles a pattern string. `:name` segments become captures, a
    /// final `...` makes the pattern a glob, and the placeholder `*`
    /// matches every path unconditionally.
    pub fn compile(pattern: &str) -> Result<Self, RouteCompileError> {
        if pattern == "*" {
            return Ok(Self {
                matchers: Vec::new(),
                glob: true,
            });
        }

        let mut matchers = Vec::new();
        let mut glob = false;

        for segment in split_segments(pattern) {
            if glob {
                return Err(RouteCompileError::GlobNotTrailing(pattern.to_string()));
            }

            if segment == "..." {
                glob = true;
            } else if let Some(name) = segment.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouteCompileError::EmptyCaptureName(pattern.to_string()));
                }
                matchers.push(SegmentMatcher::Capture(name.to_string()));
            } else {
                matchers.push(SegmentMatcher::Literal(segment.to_string()));
            }
        }

        Ok(Self { matchers, glob })
    }

    /// Turns the pattern into a prefix match; used for mounts.
    pub(crate) fn with_glob(mut self) -> Self {
        self.glob = true;
        self
    }

    /// Number of explicit (non-glob) matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn is_glob(&self) -> bool {
        self.glob
    }

    /// Structurally matches the segments, binding captures. Lengths must
    /// agree exactly unless the pattern ends in a glob, which permits
    /// equal-or-longer.
    pub fn matches(&self, segments: &[&str]) -> Option<Params> {
        if self.glob {
            if segments.len() < self.matchers.len() {
                return None;
            }
        } else if segments.len() != self.matchers.len() {
            return None;
        }

        let mut params = Params::new();
        for (matcher, segment) in self.matchers.iter().zip(segments) {
            match matcher {
                SegmentMatcher::Literal(literal) => {
                    if literal.as_str() != *segment {
                        return None;
                    }
                }
                SegmentMatcher::Capture(name) => {
                    params.bind(name.clone(), (*segment).to_string());
                }
            }
        }

        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_segments_are_stripped() {
        let pattern = Pattern::compile("/a//b/").unwrap();

        assert_eq!(pattern.len(), 2);
        assert!(pattern.matches(&["a", "b"]).is_some());
        assert!(pattern.matches(&["a"]).is_none());
    }

    #[test]
    fn glob_consumes_any_tail() {
        let pattern = Pattern::compile("/static/...").unwrap();

        assert!(pattern.matches(&["static"]).is_some());
        assert!(pattern.matches(&["static", "a"]).is_some());
        assert!(pattern.matches(&["static", "a", "b"]).is_some());
        assert!(pattern.matches(&["other"]).is_none());
    }

    #[test]
    fn capture_binds_the_observed_segment() {
        let pattern = Pattern::compile("/user/:id").unwrap();

        let params = pattern.matches(&["user", "42"]).unwrap();
        assert_eq!(params.get("id"), Some("42"));
    }
}
