/// Position in the schema graph: the root entity type followed by the link
/// names descended through, joined with `_` (e.g. `Person_employer`).
///
/// The joined form doubles as the SQL table alias and as the key for limit
/// lookups. Ancestry is decided on the segments, never on the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    alias: String,
    segments: Vec<String>,
}

impl Path {
    pub fn root(entity_type: impl Into<String>) -> Self {
        let root = entity_type.into();
        Self {
            alias: root.clone(),
            segments: vec![root],
        }
    }

    pub fn child(&self, link: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(link.to_string());
        Self {
            alias: format!("{}_{}", self.alias, link),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.alias
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of links descended from the root
    pub fn depth(&self) -> usize {
        self.segments.len() - 1
    }

    /// Returns `true` if `other` lies strictly below `self`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        other.segments.len() > self.segments.len() && other.segments.starts_with(&self.segments)
    }
}

impl core::fmt::Display for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.alias)
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut iter = iter.into_iter();
        let root = iter.next().expect("path needs a root segment");
        let mut path = Path::root(root);
        for link in iter {
            path = path.child(&link.into());
        }
        path
    }
}
