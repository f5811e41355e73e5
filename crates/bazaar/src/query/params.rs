//! The raw parameter bag a request arrives with.

use super::InvalidParameter;

/// Query-string pairs in arrival order. Names may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one `name=value` pair.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Every value given for `name`, in order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The single value given for `name`, trimmed.
    ///
    /// Giving the same parameter twice is an error: there is no sensible way
    /// to pick one.
    pub fn single(&self, name: &'static str) -> Result<Option<&str>, InvalidParameter> {
        let mut values = self.all(name);
        let first = values.next();
        if let Some(second) = values.next() {
            return Err(InvalidParameter::new(
                name,
                second.trim(),
                "parameter given more than once",
            ));
        }
        Ok(first.map(str::trim))
    }

    /// Comma-separated members across every occurrence of `name`, trimmed,
    /// with empty members dropped.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.all(name)
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|member| !member.is_empty())
            .map(String::from)
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
