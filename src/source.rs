//! The layered value source the read-back walk pulls from.
//!
//! [`Layers`] stacks sparse TOML tables, deep-merged key-by-key: when both
//! sides hold a table for the same key the merge recurses, otherwise the
//! later layer wins. Stack order, bottom to top: registered defaults, a
//! config file, environment variables, explicitly-passed CLI values. Every
//! layer only carries the keys it wants to override.
//!
//! Lookups use dotted keys (`database.url`) and are deliberately forgiving:
//! a missing key yields the zero value of the requested kind, and values of
//! a near-miss type are coerced (a string `"8080"` satisfies `get_i64`, an
//! integer satisfies `get_str`). The binder re-populates whole structs from
//! here, and a missing layer should read as "defaults", never as an error.

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use toml::{Table, Value};

use crate::convert;
use crate::error::BindError;

/// A deep-merged stack of configuration layers.
#[derive(Debug, Default, Clone)]
pub struct Layers {
    table: Table,
}

impl Layers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay an already-built table as the next layer.
    pub fn with_table(mut self, layer: Table) -> Self {
        overlay(&mut self.table, layer);
        self
    }

    /// Overlay a TOML file. Read and parse failures carry the path; a file
    /// you list is expected to exist — use
    /// [`with_file_if_present`](Self::with_file_if_present) for optional ones.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, BindError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BindError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let layer: Table = toml::from_str(&content).map_err(|source| BindError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        overlay(&mut self.table, layer);
        Ok(self)
    }

    /// Overlay a TOML file, silently skipping it when missing.
    pub fn with_file_if_present(self, path: impl AsRef<Path>) -> Result<Self, BindError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Overlay environment variables matching `{PREFIX}__*`.
    ///
    /// Double underscore separates nesting levels (`APP__DATABASE__URL` →
    /// `database.url`); a single `_` is part of the segment. Segments are
    /// lowercased. Values are typed heuristically: bool, then integer, then
    /// float, then string.
    pub fn with_env(self, prefix: &str) -> Self {
        self.with_env_from(prefix, std::env::vars())
    }

    /// Like [`with_env`](Self::with_env) but from explicit pairs, so tests
    /// can pass synthetic data.
    pub fn with_env_from(
        mut self,
        prefix: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let marker = format!("{prefix}__");
        let mut layer = Table::new();
        for (key, value) in vars {
            let Some(rest) = key.strip_prefix(&marker) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            let dotted = rest
                .split("__")
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join(".");
            set_dotted(&mut layer, &dotted, guess_value(&value));
        }
        overlay(&mut self.table, layer);
        self
    }

    /// Overlay parsed CLI matches.
    ///
    /// Values the user passed explicitly land on top of everything layered
    /// so far; the parser's built-in defaults slide underneath it, so a
    /// config file or env var still beats a default the user never typed.
    #[cfg(feature = "clap")]
    pub fn with_matches(mut self, matches: &clap::ArgMatches) -> Self {
        use clap::parser::ValueSource;

        let mut defaults = Table::new();
        let mut explicit = Table::new();
        for id in matches.ids() {
            let name = id.as_str();
            let Some(raw) = matches.get_raw(name) else {
                continue;
            };
            let values: Vec<String> = raw.map(|v| v.to_string_lossy().into_owned()).collect();
            let value = match values.as_slice() {
                [single] => guess_value(single),
                many => Value::Array(many.iter().map(|v| guess_value(v)).collect()),
            };
            match matches.value_source(name) {
                Some(ValueSource::CommandLine | ValueSource::EnvVariable) => {
                    set_dotted(&mut explicit, name, value);
                }
                _ => {
                    set_dotted(&mut defaults, name, value);
                }
            }
        }

        let merged_so_far = std::mem::take(&mut self.table);
        self.table = defaults;
        overlay(&mut self.table, merged_so_far);
        overlay(&mut self.table, explicit);
        self
    }

    /// The fully merged view.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Deserialize the merged view into a typed struct — the whole-struct
    /// alternative to walking field by field.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, BindError> {
        Value::Table(self.table.clone())
            .try_into()
            .map_err(|e: toml::de::Error| BindError::InvalidValue {
                key: "<merged>".into(),
                reason: e.to_string(),
            })
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        lookup_dotted(&self.table, key)
    }

    pub fn get_str(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Integer(n)) => n.to_string(),
            Some(Value::Float(f)) => f.to_string(),
            Some(Value::Boolean(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn get_bool(&self, key: &str) -> bool {
        match self.lookup(key) {
            Some(Value::Boolean(b)) => *b,
            Some(Value::String(s)) => convert::to_bool(s),
            Some(Value::Integer(n)) => *n != 0,
            _ => false,
        }
    }

    pub fn get_i64(&self, key: &str) -> i64 {
        match self.lookup(key) {
            Some(Value::Integer(n)) => *n,
            Some(Value::String(s)) => convert::to_i64(s),
            Some(Value::Float(f)) => *f as i64,
            Some(Value::Boolean(b)) => i64::from(*b),
            _ => 0,
        }
    }

    pub fn get_i32(&self, key: &str) -> i32 {
        self.get_i64(key) as i32
    }

    pub fn get_f64(&self, key: &str) -> f64 {
        match self.lookup(key) {
            Some(Value::Float(f)) => *f,
            Some(Value::Integer(n)) => *n as f64,
            Some(Value::String(s)) => convert::to_f64(s),
            _ => 0.0,
        }
    }

    pub fn get_f32(&self, key: &str) -> f32 {
        self.get_f64(key) as f32
    }

    /// Durations stored as strings use the `ms`/`s`/`m`/`h` suffix grammar;
    /// integers are nanoseconds.
    pub fn get_duration(&self, key: &str) -> Duration {
        match self.lookup(key) {
            Some(Value::String(s)) => convert::to_duration(s),
            Some(Value::Integer(n)) => Duration::from_nanos((*n).max(0) as u64),
            _ => Duration::ZERO,
        }
    }

    pub fn get_str_seq(&self, key: &str) -> Vec<String> {
        match self.lookup(key) {
            Some(Value::Array(items)) => items.iter().map(value_to_string).collect(),
            Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    pub fn get_int_seq(&self, key: &str) -> Vec<i64> {
        match self.lookup(key) {
            Some(Value::Array(items)) => items.iter().map(value_to_i64).collect(),
            Some(Value::Integer(n)) => vec![*n],
            _ => Vec::new(),
        }
    }
}

/// Merge `layer` onto `base` in place: tables recurse, everything else is
/// replaced by the incoming value.
fn overlay(base: &mut Table, layer: Table) {
    for (key, incoming) in layer {
        match (base.get_mut(&key), incoming) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                overlay(existing, incoming);
            }
            (_, incoming) => {
                base.insert(key, incoming);
            }
        }
    }
}

/// Insert a value under a dotted key, creating intermediate tables. An
/// intermediate that already holds a scalar is replaced by a table: the
/// later write wins, matching layer semantics.
fn set_dotted(table: &mut Table, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            table.insert(key.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = table
                .entry(head)
                .or_insert_with(|| Value::Table(Table::new()));
            if let Value::Table(sub) = entry {
                set_dotted(sub, rest, value);
            } else {
                let mut sub = Table::new();
                set_dotted(&mut sub, rest, value);
                *entry = Value::Table(sub);
            }
        }
    }
}

fn lookup_dotted<'t>(table: &'t Table, key: &str) -> Option<&'t Value> {
    match key.split_once('.') {
        None => table.get(key),
        Some((head, rest)) => match table.get(head)? {
            Value::Table(sub) => lookup_dotted(sub, rest),
            _ => None,
        },
    }
}

/// Type an untyped textual value: bool, then integer, then float (only when
/// a dot is present, so `"NaN"` and `"inf"` stay strings), then string.
fn guess_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Integer(n);
    }
    if s.contains('.')
        && let Ok(f) = s.parse::<f64>()
    {
        return Value::Float(f);
    }
    Value::String(s.to_string())
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn value_to_i64(value: &Value) -> i64 {
    match value {
        Value::Integer(n) => *n,
        Value::String(s) => convert::to_i64(s),
        Value::Float(f) => *f as i64,
        _ => 0,
    }
}
