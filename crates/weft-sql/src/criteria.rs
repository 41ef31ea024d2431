//! Caller supplied filters for criteria queries.
//!
//! Each criterion is a SQL fragment using `?` placeholders plus the values
//! bound to them. Fragments are ANDed in insertion order.

use crate::stmt::{placeholder_offsets, Filter};

use weft_core::{stmt::Value, Error, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// A fragment with bound values, e.g. `Person.age > ?`
    Fragment { sql: String, param: Param },

    /// A fragment with no placeholders
    Raw(String),
}

/// Value bound to a criterion fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Fills a single placeholder
    Scalar(Value),

    /// Fills consecutive placeholders, e.g. `BETWEEN ? AND ?`
    List(Vec<Value>),
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, sql: impl Into<String>, param: impl Into<Param>) -> Self {
        self.push(Criterion::Fragment {
            sql: sql.into(),
            param: param.into(),
        });
        self
    }

    pub fn raw(mut self, sql: impl Into<String>) -> Self {
        self.push(Criterion::Raw(sql.into()));
        self
    }

    pub fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> + '_ {
        self.criteria.iter()
    }

    /// Checks every fragment has as many placeholders as it has values.
    pub fn validate(&self) -> Result<()> {
        for criterion in &self.criteria {
            let (sql, expected) = match criterion {
                Criterion::Fragment { sql, param } => (sql, param.len()),
                Criterion::Raw(sql) => (sql, 0),
            };

            if sql.trim().is_empty() {
                return Err(Error::bad_criteria("empty fragment"));
            }

            let actual = placeholder_offsets(sql).len();
            if actual != expected {
                return Err(Error::bad_criteria(format!(
                    "`{sql}` has {actual} placeholder(s) but {expected} value(s)"
                )));
            }
        }

        Ok(())
    }

    /// The fragments in order. Values are not part of the shape, so two
    /// criteria differing only in values compile to the same SQL.
    pub fn shape(&self) -> Vec<String> {
        self.criteria
            .iter()
            .map(|criterion| match criterion {
                Criterion::Fragment { sql, .. } | Criterion::Raw(sql) => sql.clone(),
            })
            .collect()
    }

    pub fn filters(&self) -> Vec<Filter> {
        self.shape().into_iter().map(Filter::Raw).collect()
    }

    /// Bound values, flattened in placeholder order
    pub fn params(&self) -> Vec<Value> {
        let mut params = vec![];
        for criterion in &self.criteria {
            match criterion {
                Criterion::Fragment {
                    param: Param::Scalar(value),
                    ..
                } => params.push(value.clone()),
                Criterion::Fragment {
                    param: Param::List(values),
                    ..
                } => params.extend(values.iter().cloned()),
                Criterion::Raw(_) => {}
            }
        }
        params
    }

    /// Build criteria from JSON.
    ///
    /// An object maps fragments to values. An array lists criteria
    /// positionally; each element is either a raw fragment string or a
    /// single-entry object. Values may be scalars, `null`, or arrays of
    /// scalars.
    pub fn from_json(json: &serde_json::Value) -> Result<Criteria> {
        let mut criteria = Criteria::new();

        match json {
            serde_json::Value::Object(entries) => {
                for (sql, value) in entries {
                    criteria = criteria.and(sql, Param::from_json(value)?);
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    match item {
                        serde_json::Value::String(sql) => criteria = criteria.raw(sql),
                        serde_json::Value::Object(entries) if entries.len() == 1 => {
                            for (sql, value) in entries {
                                criteria = criteria.and(sql, Param::from_json(value)?);
                            }
                        }
                        other => {
                            return Err(Error::bad_criteria(format!(
                                "expected a fragment or a single-entry object, got `{other}`"
                            )))
                        }
                    }
                }
            }
            other => {
                return Err(Error::bad_criteria(format!(
                    "expected an object or array, got `{other}`"
                )))
            }
        }

        criteria.validate()?;
        Ok(criteria)
    }
}

impl Param {
    /// Number of placeholders this value fills
    pub fn len(&self) -> usize {
        match self {
            Param::Scalar(_) => 1,
            Param::List(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn from_json(json: &serde_json::Value) -> Result<Param> {
        match json {
            serde_json::Value::Array(items) => items
                .iter()
                .map(scalar_from_json)
                .collect::<Result<_>>()
                .map(Param::List),
            other => scalar_from_json(other).map(Param::Scalar),
        }
    }
}

fn scalar_from_json(json: &serde_json::Value) -> Result<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(value) => Value::Bool(*value),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(value) => Value::I64(value),
            None => match number.as_f64() {
                Some(value) => Value::F64(value),
                None => return Err(Error::bad_parameter(format!("unsupported number {number}"))),
            },
        },
        serde_json::Value::String(value) => Value::String(value.clone()),
        other => {
            return Err(Error::bad_parameter(format!(
                "expected a scalar or a list of scalars, got `{other}`"
            )))
        }
    })
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Param::Scalar(value)
    }
}

impl From<Vec<Value>> for Param {
    fn from(values: Vec<Value>) -> Self {
        Param::List(values)
    }
}

macro_rules! impl_scalar_param {
    ( $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Param::Scalar(value.into())
                }
            }
        )*
    };
}

impl_scalar_param!(bool, i32, i64, f64, String, &str);

impl<T: Into<Value>, const N: usize> From<[T; N]> for Param {
    fn from(values: [T; N]) -> Self {
        Param::List(values.into_iter().map(Into::into).collect())
    }
}
