use super::{Limit, LimitOverrides, Link, Model, ModelId, Path, Schema};

/// Ceiling applied to every descent when the caller does not pick one.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// The limit policy of one query.
///
/// The clause compiler, the row materializer and the skip walker all ask the
/// same `Traversal` which links to follow, in the same order, so the columns
/// one emits are exactly the columns the others consume.
#[derive(Debug, Clone, Copy)]
pub struct Traversal<'a> {
    pub schema: &'a Schema,

    /// Per-query limit overrides
    overrides: Option<&'a LimitOverrides>,

    /// When set, only this path (and what is needed to reach it) is followed
    forced: Option<&'a Path>,

    /// Hard ceiling on recursion depth
    max_depth: usize,

    /// Whether default-allow may enter a model already on the descent
    reentry: bool,
}

/// State of one recursion frame.
#[derive(Debug, Clone)]
pub struct Descent {
    pub model: ModelId,

    pub path: Path,

    pub depth: usize,

    /// Set once any join between the root and this frame is an outer join
    pub null_tainted: bool,

    /// Models entered between the root and this frame, root first
    history: Vec<ModelId>,
}

/// Outcome of asking a [`Traversal`] about one link.
#[derive(Debug)]
pub enum Visit {
    /// Do not follow: no join, no columns
    Skip,

    /// Join through this link to reach the forced path, without selecting
    /// its columns
    Route(Descent),

    /// Join and select
    Enter(Descent),
}

impl<'a> Traversal<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            overrides: None,
            forced: None,
            max_depth: DEFAULT_MAX_DEPTH,
            reentry: false,
        }
    }

    pub fn overrides(mut self, overrides: Option<&'a LimitOverrides>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn forced(mut self, forced: Option<&'a Path>) -> Self {
        self.forced = forced;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Let default-allow follow links back into a model already entered on
    /// the current descent. Cycles are then bounded by `max_depth` alone.
    pub fn reentry(mut self, reentry: bool) -> Self {
        self.reentry = reentry;
        self
    }

    pub fn forced_path(&self) -> Option<&'a Path> {
        self.forced
    }

    pub fn root(&self, model: &Model) -> Descent {
        Descent {
            model: model.id,
            path: model.path(),
            depth: 0,
            null_tainted: false,
            history: vec![model.id],
        }
    }

    /// The root's own columns are selected unless a forced path is set; the
    /// caller already holds the root in that case.
    pub fn root_selects_columns(&self) -> bool {
        self.forced.is_none()
    }

    pub fn visit(&self, parent: &Descent, link: &Link) -> Visit {
        if parent.depth >= self.max_depth {
            return Visit::Skip;
        }

        let path = parent.path.child(&link.name);

        if let Some(forced) = self.forced {
            if path == *forced {
                return Visit::Enter(parent.child(link, path));
            }

            if path.is_ancestor_of(forced) {
                return Visit::Route(parent.child(link, path));
            }

            if !forced.is_ancestor_of(&path) {
                return Visit::Skip;
            }
        }

        if self.allows(parent, link, &path) {
            Visit::Enter(parent.child(link, path))
        } else {
            Visit::Skip
        }
    }

    fn allows(&self, parent: &Descent, link: &Link, path: &Path) -> bool {
        if let Some(limit) = self.overrides.and_then(|o| o.get(path.as_str())) {
            return limit.allows(parent.depth);
        }

        if let Some(limit) = link.limits.get(path.as_str()) {
            return limit.allows(parent.depth);
        }

        if let Some(depth) = link.depth {
            return Limit::Depth(depth).allows(parent.depth);
        }

        // Default allow. Unless re-entry is enabled, a model already on this
        // descent needs an explicit limit.
        self.reentry || !parent.history.contains(&link.target)
    }
}

impl Descent {
    fn child(&self, link: &Link, path: Path) -> Descent {
        let mut history = self.history.clone();
        history.push(link.target);

        Descent {
            model: link.target,
            path,
            depth: self.depth + 1,
            null_tainted: self.null_tainted || link.nullable,
            history,
        }
    }

    pub fn history(&self) -> &[ModelId] {
        &self.history
    }
}
