//! Query string construction.
//!
//! Lists are sent as repeated parameters (`tag=a&tag=b`), which is what the
//! gateway's list binding expects.

use url::form_urlencoded;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::One(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::One(value.to_string())
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::One(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::One(value.to_string())
    }
}

impl From<Uuid> for QueryValue {
    fn from(value: Uuid) -> Self {
        QueryValue::One(value.to_string())
    }
}

macro_rules! query_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    QueryValue::One(value.to_string())
                }
            }
        )*
    };
}

query_value_from_number!(i32, i64, u32, u64, usize, f64);

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Many(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for QueryValue {
    fn from(values: &[String]) -> Self {
        QueryValue::Many(values.to_vec())
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        QueryValue::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn with_opt<V: Into<QueryValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            match value {
                QueryValue::One(v) => {
                    serializer.append_pair(key, v);
                }
                QueryValue::Many(values) => {
                    for v in values {
                        serializer.append_pair(key, v);
                    }
                }
            }
        }
        serializer.finish()
    }

    /// `path` with this query appended, as used for both the URL and the cache key.
    pub fn apply_to(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrays_repeat_the_parameter() {
        let query = QueryParams::new().with("equipments", vec!["a", "b"]);

        assert_eq!(query.to_query_string(), "equipments=a&equipments=b");
    }

    #[test]
    fn test_insertion_order_and_encoding() {
        let query = QueryParams::new()
            .with("search", "flat white & more")
            .with("page", 2u32)
            .with("open", true);

        assert_eq!(
            query.to_query_string(),
            "search=flat+white+%26+more&page=2&open=true"
        );
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let query = QueryParams::new()
            .with_opt("search", None::<String>)
            .with_opt("page", Some(1u32));

        assert_eq!(query.to_query_string(), "page=1");
    }

    #[test]
    fn test_apply_to_path() {
        assert_eq!(QueryParams::new().apply_to("/api/shops"), "/api/shops");
        assert_eq!(
            QueryParams::new().with("x", 1u32).apply_to("/api/shops"),
            "/api/shops?x=1"
        );
        assert_eq!(
            QueryParams::new().with("y", 2u32).apply_to("/api/shops?x=1"),
            "/api/shops?x=1&y=2"
        );
    }

    #[test]
    fn test_empty_list_adds_nothing() {
        let query = QueryParams::new().with("equipments", Vec::<String>::new());

        assert!(query.to_query_string().is_empty());
    }
}
