//! Data structures produced by the parsers and consumed by the builder.
//!
//! A migration is described by two independent inputs: a [`MigrationIntent`]
//! derived from the migration name, and a [`Schema`] derived from the column
//! shorthand.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The normalized migration verb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Add,
    Remove,
    /// A verb with no known synonym, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl Action {
    /// Normalize a raw verb through the synonym table.
    pub fn from_verb(verb: &str) -> Self {
        match verb {
            "create" | "make" => Action::Create,
            "remove" | "delete" | "destroy" | "drop" => Action::Remove,
            "add" | "append" | "update" | "insert" => Action::Add,
            other => Action::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "create"),
            Action::Add => write!(f, "add"),
            Action::Remove => write!(f, "remove"),
            Action::Other(verb) => write!(f, "{}", verb),
        }
    }
}

/// What the user wants to do, and to which table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationIntent {
    pub action: Action,
    pub table: String,
}

impl MigrationIntent {
    pub fn new(action: Action, table: impl Into<String>) -> Self {
        Self {
            action,
            table: table.into(),
        }
    }
}

/// Value of a chained column modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Bare modifier such as `nullable`, rendered as `->nullable()`.
    Flag,
    /// Raw argument text such as `21` or `'cascade'`, inserted verbatim.
    Literal(String),
}

impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionValue::Flag => serializer.serialize_bool(true),
            OptionValue::Literal(s) => serializer.serialize_str(s),
        }
    }
}

/// Column modifiers in the order they were written.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(Vec<(String, OptionValue)>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a modifier.
    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Remove a modifier, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, OptionValue)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

impl Serialize for Options {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One user-specified (or synthesized) column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub arguments: Vec<String>,
    pub options: Options,
}

impl ColumnSpec {
    /// A column with no arguments and no modifiers.
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            arguments: vec![],
            options: Options::new(),
        }
    }

    pub fn with_arguments(mut self, arguments: &[&str]) -> Self {
        self.arguments = arguments.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_flag(mut self, key: &str) -> Self {
        self.options.insert(key, OptionValue::Flag);
        self
    }

    pub fn with_option(mut self, key: &str, value: impl Into<String>) -> Self {
        self.options.insert(key, OptionValue::Literal(value.into()));
        self
    }
}

/// An entry of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    Field(ColumnSpec),
    /// The `created_at`/`updated_at` pair, emitted as a single `timestamps()` call.
    Timestamps,
}

impl Column {
    /// Column name, `None` for the timestamps marker.
    pub fn name(&self) -> Option<&str> {
        match self {
            Column::Field(spec) => Some(&spec.name),
            Column::Timestamps => None,
        }
    }

    pub fn column_type(&self) -> &str {
        match self {
            Column::Field(spec) => &spec.column_type,
            Column::Timestamps => "timestamps",
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Column::Field(spec) => spec.serialize(serializer),
            Column::Timestamps => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("name", "")?;
                map.serialize_entry("type", "timestamps")?;
                map.serialize_entry("arguments", &[] as &[String])?;
                map.serialize_entry("options", &Options::new())?;
                map.end()
            }
        }
    }
}

impl From<ColumnSpec> for Column {
    fn from(spec: ColumnSpec) -> Self {
        Column::Field(spec)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Timestamps => write!(f, ":timestamps"),
            Column::Field(spec) => {
                write!(f, "{}:{}", spec.name, spec.column_type)?;
                if !spec.arguments.is_empty() {
                    write!(f, "({})", spec.arguments.join(","))?;
                }
                for (key, value) in spec.options.iter() {
                    match value {
                        OptionValue::Flag => write!(f, ":{}", key)?,
                        OptionValue::Literal(v) => write!(f, ":{}({})", key, v)?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Ordered column sequence. Order dictates emission order.
pub type Schema = Vec<Column>;

/// Rendered `up` and `down` code blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeFragments {
    pub up: String,
    pub down: String,
}
