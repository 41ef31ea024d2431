use super::Value;

/// The primary key of one entity: its key column values, in key-column order.
///
/// Keys compare component-wise, so two keys are equal exactly when every
/// component is equal. The serialized form (components joined with
/// [`Key::SEPARATOR`]) is only used for display and for callers that want a
/// string handle; it is never used to decide identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    components: Vec<Value>,
}

impl Key {
    /// Joins components in the serialized form.
    pub const SEPARATOR: char = '|';

    /// Serialized form of a key whose components are all null.
    pub const NULL_SENTINEL: &'static str = "NULL";

    pub fn new(components: Vec<Value>) -> Self {
        Self { components }
    }

    pub fn single(value: impl Into<Value>) -> Self {
        Self {
            components: vec![value.into()],
        }
    }

    pub fn components(&self) -> &[Value] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns `true` when every component is null.
    ///
    /// A null key marks an outer-joined row with no match on this side.
    pub fn is_null(&self) -> bool {
        self.components.iter().all(Value::is_null)
    }

    pub fn serialize(&self) -> String {
        self.to_string()
    }

    pub fn into_components(self) -> Vec<Value> {
        self.components
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_null() {
            return f.write_str(Self::NULL_SENTINEL);
        }

        let mut sep = "";
        for component in &self.components {
            f.write_str(sep)?;
            match component {
                // Distinguish a null component from an empty string
                Value::Null => f.write_str("\\N")?,
                other => core::fmt::Display::fmt(other, f)?,
            }
            sep = "|";
        }
        Ok(())
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Self::new(vec![value])
    }
}

impl From<Vec<Value>> for Key {
    fn from(components: Vec<Value>) -> Self {
        Self::new(components)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::single(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::single(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::single(value)
    }
}

impl<A, B> From<(A, B)> for Key
where
    Value: From<A> + From<B>,
{
    fn from((a, b): (A, B)) -> Self {
        Self::new(vec![Value::from(a), Value::from(b)])
    }
}

impl<A, B, C> From<(A, B, C)> for Key
where
    Value: From<A> + From<B> + From<C>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::new(vec![Value::from(a), Value::from(b), Value::from(c)])
    }
}
