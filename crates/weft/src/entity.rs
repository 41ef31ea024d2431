mod slot;
pub use slot::Slot;

use weft_core::{
    schema::{Model, ModelId},
    stmt::{Key, Value},
};

use indexmap::{IndexMap, IndexSet};

/// One entity in a materialized tree.
///
/// Scalar fields are keyed by field name and links by link name; both live in
/// the same slot map, so a link and a field can never share a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    model: ModelId,

    state: NodeState,

    slots: IndexMap<String, Slot>,

    /// Fields set since the node was loaded or last saved
    dirty: IndexSet<String>,

    /// Key the row had when it was read, used to address updates
    loaded_key: Option<Key>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Created in memory, never saved
    New,

    /// Read from a row or saved, unchanged since
    Loaded,

    /// Loaded, then had a field set
    Modified,
}

impl Node {
    /// A new, unsaved entity.
    pub fn new(model: &Model) -> Node {
        Node::with_state(model.id, NodeState::New)
    }

    pub(crate) fn loaded(model: ModelId) -> Node {
        Node::with_state(model, NodeState::Loaded)
    }

    fn with_state(model: ModelId, state: NodeState) -> Node {
        Node {
            model,
            state,
            slots: IndexMap::new(),
            dirty: IndexSet::new(),
            loaded_key: None,
        }
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &Slot)> + '_ {
        self.slots.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Value of a scalar field, if it has been set or loaded
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.slots.get(field).and_then(Slot::as_scalar)
    }

    /// Set a scalar field, marking a loaded node modified.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let field = field.into();
        self.slots.insert(field.clone(), Slot::Scalar(value.into()));
        if self.state != NodeState::New {
            self.state = NodeState::Modified;
        }
        self.dirty.insert(field);
        self
    }

    /// The one-to-one child attached under `link`
    pub fn one(&self, link: &str) -> Option<&Node> {
        self.slots.get(link).and_then(Slot::as_one)
    }

    /// The one-to-many children attached under `link`, in row arrival order
    pub fn many(&self, link: &str) -> Option<&IndexMap<Key, Node>> {
        self.slots.get(link).and_then(Slot::as_many)
    }

    /// Returns `true` once `link` holds a child or a collection.
    pub fn is_fetched(&self, link: &str) -> bool {
        matches!(self.slots.get(link), Some(Slot::One(_) | Slot::Many(_)))
    }

    /// The key built from the node's key fields. Unset fields read as null.
    pub fn key(&self, model: &Model) -> Key {
        Key::new(
            model
                .key_columns()
                .map(|column| self.get(&column.field).cloned().unwrap_or_default())
                .collect(),
        )
    }

    pub fn dirty(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.dirty.iter().map(String::as_str)
    }

    pub fn is_dirty(&self, field: &str) -> bool {
        self.dirty.contains(field)
    }

    pub(crate) fn loaded_key(&self) -> Option<&Key> {
        self.loaded_key.as_ref()
    }

    /// Store a value read from a row. Does not touch the dirty set.
    pub(crate) fn load(&mut self, field: &str, value: Value) {
        self.slots.insert(field.to_string(), Slot::Scalar(value));
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut Slot> {
        self.slots.get_mut(name)
    }

    pub(crate) fn attach(&mut self, name: &str, slot: Slot) -> &mut Slot {
        self.slots.entry(name.to_string()).or_insert(slot)
    }

    /// Record the node as matching the stored row with the given key.
    pub(crate) fn mark_saved(&mut self, key: Key) {
        self.state = NodeState::Loaded;
        self.dirty.clear();
        self.loaded_key = Some(key);
    }

    pub(crate) fn mark_deleted(&mut self) {
        self.state = NodeState::New;
        self.loaded_key = None;
        self.dirty = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.is_scalar())
            .map(|(name, _)| name.clone())
            .collect();
    }
}
