//! Field projection over serialized entities.

use serde::Serialize;

/// A JSON object produced by projecting an entity.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Which top-level keys of a serialized entity to keep.
///
/// The identifier key is always kept. Projection only shapes output: it runs
/// after selection and never influences which entities are returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: Option<Vec<String>>,
}

impl Projection {
    pub const ID_FIELD: &'static str = "id";

    /// Keep every field.
    pub fn all() -> Self {
        Self { fields: None }
    }

    /// Keep the identifier plus `fields`.
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: Some(fields.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_all(&self) -> bool {
        self.fields.is_none()
    }

    pub fn keeps(&self, key: &str) -> bool {
        match &self.fields {
            None => true,
            Some(fields) => key == Self::ID_FIELD || fields.iter().any(|f| f == key),
        }
    }

    pub fn apply<T: Serialize>(&self, entity: &T) -> Result<Record, serde_json::Error> {
        match serde_json::to_value(entity)? {
            serde_json::Value::Object(mut record) => {
                record.retain(|key, _| self.keeps(key));
                Ok(record)
            }
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "cannot project non-object value: {other}"
            ))),
        }
    }
}
