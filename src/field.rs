//! The descriptor model: how a config struct exposes its shape to the walker.
//!
//! Rust has no runtime reflection, so a struct describes itself instead: the
//! [`Flags`] trait yields one [`Field`] per configuration field, carrying a
//! stable identifier, the field's tag(s), and a kind-tagged mutable accessor
//! ([`FieldValue`]). The walker never sees the concrete struct type — only
//! this closed set of kinds.
//!
//! ```ignore
//! impl Flags for ServerConfig {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("host", FieldValue::Str(&mut self.host)).flag("host,default:localhost"),
//!             Field::new("port", FieldValue::I64(&mut self.port)).flag("port,short:P,default:8080"),
//!             Field::new("database", FieldValue::Nested(&mut self.database)).flag("db"),
//!         ]
//!     }
//! }
//! ```

use std::time::Duration;

use crate::tag::DEFAULT_TAG_KEY;

/// A struct whose fields can be bound to CLI flags.
///
/// Implementations list their fields in declaration order; the walker visits
/// them exactly in that order, with no reordering.
pub trait Flags {
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// One field of a [`Flags`] struct: identifier, tags, and typed access.
pub struct Field<'a> {
    /// The field's identifier, used as the fallback flag name (lower-cased)
    /// and in error messages.
    pub ident: &'static str,
    /// Kind-tagged mutable access to the field's storage.
    pub value: FieldValue<'a>,
    tags: Vec<(&'static str, &'static str)>,
}

impl<'a> Field<'a> {
    /// An untagged field. Under the default options it still becomes a flag
    /// named after its identifier; with `ignore_untagged` it is skipped.
    pub fn new(ident: &'static str, value: FieldValue<'a>) -> Self {
        Self {
            ident,
            value,
            tags: Vec::new(),
        }
    }

    /// Attach a tag under the default `"flag"` key.
    pub fn flag(self, raw: &'static str) -> Self {
        self.tag(DEFAULT_TAG_KEY, raw)
    }

    /// Attach a tag under an explicit key. A field may carry several named
    /// tags; [`Options::tag_key`](crate::Options::tag_key) selects which one
    /// a walk reads.
    pub fn tag(mut self, key: &'static str, raw: &'static str) -> Self {
        self.tags.push((key, raw));
        self
    }

    /// The raw tag value stored under `key`, if any.
    pub fn tag_value(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, raw)| *raw)
    }
}

/// The closed set of field kinds the binder understands.
///
/// Anything else goes through [`Unsupported`](FieldValue::Unsupported),
/// which aborts a walk with a typed error naming the field.
pub enum FieldValue<'a> {
    Str(&'a mut String),
    Bool(&'a mut bool),
    I32(&'a mut i32),
    I64(&'a mut i64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    /// A duration, bound as a parsed duration string (`"500ms"`, `"1s"`,
    /// `"2m"`, `"1h"`) rather than a decimal integer.
    Duration(&'a mut Duration),
    StrSeq(&'a mut Vec<String>),
    IntSeq(&'a mut Vec<i64>),
    /// A nested struct; the walker recurses into it, namespacing its flags
    /// unless squashed.
    Nested(&'a mut dyn Flags),
    /// An optionally-present nested struct (e.g. `Option<Box<T>>`). Walking
    /// a `None` fails: the binder needs storage to bind into.
    OptionalNested(Option<&'a mut dyn Flags>),
    /// A field with no flag representation. Walking it is a hard error
    /// unless the field's tag skips it.
    Unsupported { type_name: &'static str },
}
