//! Runtime values and their SQL literal text.
//!
//! [`Value::to_sql`] is the single place where a runtime value becomes SQL
//! text. The escaping contract is explicit: text (and JSON-encoded
//! structured values) is wrapped in single quotes with embedded single
//! quotes doubled. Nothing else is escaped. [`RawSql`] bypasses quoting
//! entirely and is emitted verbatim.

use std::fmt;
use std::sync::Arc;

/// A deferred producer of raw SQL text.
///
/// The producer is invoked every time the value is rendered and its output
/// is emitted unquoted, e.g. `DEFAULT gen_random_uuid()`.
#[derive(Clone)]
pub struct RawSql(Arc<dyn Fn() -> String + Send + Sync>);

impl RawSql {
    /// Wraps a producer closure.
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self(Arc::new(producer))
    }

    /// Wraps a fixed piece of SQL text.
    pub fn literal(sql: impl Into<String>) -> Self {
        let sql = sql.into();
        Self::new(move || sql.clone())
    }

    /// Invokes the producer.
    #[must_use]
    pub fn render(&self) -> String {
        (self.0)()
    }
}

impl fmt::Debug for RawSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawSql").field(&self.render()).finish()
    }
}

impl PartialEq for RawSql {
    fn eq(&self, other: &Self) -> bool {
        self.render() == other.render()
    }
}

/// A value that can be rendered as a SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Floating point literal.
    Float(f64),
    /// Text, rendered single-quoted.
    Text(String),
    /// Structured value, rendered as single-quoted JSON.
    Json(serde_json::Value),
    /// Raw SQL, rendered verbatim.
    Raw(RawSql),
}

impl Value {
    /// Creates a raw SQL value from a producer closure.
    pub fn raw<F>(producer: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Raw(RawSql::new(producer))
    }

    /// Creates a raw SQL value from fixed text.
    pub fn raw_sql(sql: impl Into<String>) -> Self {
        Self::Raw(RawSql::literal(sql))
    }

    /// Serializes any `serde` value into a structured [`Value::Json`].
    ///
    /// # Errors
    ///
    /// Returns the serializer error when `value` cannot be represented as JSON.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Json)
    }

    /// Returns the SQL literal text for this value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Int(n) => n.to_string(),
            Self::Float(f) if f.is_finite() => f.to_string(),
            Self::Float(_) => String::from("NULL"),
            Self::Text(s) => quote_literal(s),
            Self::Json(json) => quote_literal(&json.to_string()),
            Self::Raw(raw) => raw.render(),
        }
    }
}

/// Renders `value` as SQL literal text. See [`Value::to_sql`].
#[must_use]
pub fn normalize(value: &Value) -> String {
    value.to_sql()
}

/// Wraps text in single quotes, doubling embedded single quotes.
#[must_use]
pub fn quote_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Integers wider than `i64` fall back to their decimal text, unquoted.
macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    i64::try_from(value).map_or_else(
                        |_| Self::Raw(RawSql::literal(value.to_string())),
                        Self::Int,
                    )
                }
            }
        )*
    };
}

impl_from_wide_int!(isize, usize, u64, i128, u128);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<RawSql> for Value {
    fn from(value: RawSql) -> Self {
        Self::Raw(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Scalars map onto their scalar variants; arrays and objects stay structured.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::Text(s),
            other @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Json(other)
            }
        }
    }
}
