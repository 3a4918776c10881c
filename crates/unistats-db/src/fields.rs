use sqlx::Any;
use sqlx::any::AnyArguments;
use sqlx::query::QueryAs;

/// A typed column value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Null,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Ordered `column = value` pairs
///
/// Used as an equality filter when matching rows (`Null` matches with
/// `IS NULL`) and as the row to write when inserting (`Null` columns are
/// left to their default).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    pairs: Vec<(&'static str, Value)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair, replacing any earlier value for the same column
    pub fn with(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.pairs.iter_mut().find(|(c, _)| *c == column) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((column, value)),
        }
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, Value)> {
        self.pairs.iter()
    }

    /// ` WHERE a = $1 AND b IS NULL`, or an empty string when unconstrained
    pub(crate) fn where_clause(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }

        let mut bound = 0;
        let predicates: Vec<String> = self
            .pairs
            .iter()
            .map(|(column, value)| match value {
                Value::Null => format!("{} IS NULL", column),
                _ => {
                    bound += 1;
                    format!("{} = ${}", column, bound)
                }
            })
            .collect();

        format!(" WHERE {}", predicates.join(" AND "))
    }

    /// Values that take a placeholder in [`Self::where_clause`]
    pub(crate) fn filter_values(&self) -> impl Iterator<Item = &Value> {
        self.pairs
            .iter()
            .map(|(_, v)| v)
            .filter(|v| !matches!(v, Value::Null))
    }

    /// `INSERT INTO table (...) VALUES (...)` body for the non-null pairs
    pub(crate) fn insert_clause(&self, table: &str) -> String {
        let columns: Vec<&str> = self
            .pairs
            .iter()
            .filter(|(_, v)| !matches!(v, Value::Null))
            .map(|(c, _)| *c)
            .collect();

        if columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", table);
        }

        let placeholders: Vec<String> = (1..=columns.len())
            .map(|n| format!("${}", n))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders.join(", ")
        )
    }
}

/// Bind each value in order
pub(crate) fn bind_values<'q, 'v, O>(
    mut query: QueryAs<'q, Any, O, AnyArguments<'q>>,
    values: impl IntoIterator<Item = &'v Value>,
) -> QueryAs<'q, Any, O, AnyArguments<'q>> {
    for value in values {
        query = match value {
            Value::Text(text) => query.bind(text.clone()),
            Value::Int(int) => query.bind(*int),
            Value::Float(float) => query.bind(*float),
            Value::Null => query.bind(Option::<String>::None),
        };
    }
    query
}
