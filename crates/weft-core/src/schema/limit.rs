use indexmap::IndexMap;

/// Whether, and how deep, a link may be followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    /// Always follow (still bounded by the traversal ceiling)
    Unlimited,

    /// Never follow
    Never,

    /// Follow while the current recursion depth is below the given value
    Depth(u32),
}

impl Limit {
    pub fn allows(self, depth: usize) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Never => false,
            Limit::Depth(max) => depth < max as usize,
        }
    }
}

impl From<bool> for Limit {
    fn from(value: bool) -> Self {
        if value {
            Limit::Unlimited
        } else {
            Limit::Never
        }
    }
}

impl From<u32> for Limit {
    fn from(value: u32) -> Self {
        Limit::Depth(value)
    }
}

/// Per-query limit overrides, keyed by traversal path (e.g. `Person_employer`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitOverrides {
    limits: IndexMap<String, Limit>,
}

impl LimitOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: impl Into<String>, limit: impl Into<Limit>) -> &mut Self {
        self.limits.insert(path.into(), limit.into());
        self
    }

    pub fn with(mut self, path: impl Into<String>, limit: impl Into<Limit>) -> Self {
        self.set(path, limit);
        self
    }

    pub fn get(&self, path: &str) -> Option<Limit> {
        self.limits.get(path).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Limit)> + '_ {
        self.limits.iter().map(|(path, limit)| (path.as_str(), *limit))
    }
}

impl<P: Into<String>, L: Into<Limit>> FromIterator<(P, L)> for LimitOverrides {
    fn from_iter<T: IntoIterator<Item = (P, L)>>(iter: T) -> Self {
        let mut overrides = LimitOverrides::new();
        for (path, limit) in iter {
            overrides.set(path, limit);
        }
        overrides
    }
}
