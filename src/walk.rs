//! The field walker: one traversal, two uses.
//!
//! [`walk`] iterates a [`Flags`] struct's fields in declaration order,
//! resolves each field's tag into a [`FlagSpec`], and hands every scalar
//! field to a [`FieldVisitor`]. Binding flags at startup and reading values
//! back after parsing are the same traversal with different visitors — the
//! tree logic is written once.
//!
//! Nested fields recurse. Whether a nested field namespaces its children is
//! the squash rule: the field's own `squash` label OR'd with the global
//! [`Options::squash`] setting. A non-squashed nested field pushes its
//! origin name onto the path context before descending and pops it when the
//! subtree finishes, on success and error alike; leaf names are prefixed
//! with `join(path, ".") + "."` while the context is non-empty.
//!
//! Two fields resolving to the same final flag name is a caller error. The
//! walker does not deduplicate: what happens next is up to the visitor
//! (clap panics on duplicate ids, a layered source last-write-wins).
//!
//! A walk is synchronous and bounded by the struct's static shape. Each
//! top-level call owns its own path context, so concurrent walks over
//! different targets are independent.

use std::time::Duration;

use crate::error::BindError;
use crate::field::{Field, FieldValue, Flags};
use crate::tag::{self, DEFAULT_SEP, DEFAULT_TAG_KEY, FlagSpec};

/// Per-walk configuration. Immutable for the duration of a walk.
#[derive(Debug, Clone)]
pub struct Options {
    pub(crate) tag_key: &'static str,
    pub(crate) sep: char,
    pub(crate) squash: bool,
    pub(crate) ignore_untagged: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY,
            sep: DEFAULT_SEP,
            squash: true,
            ignore_untagged: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Which tag key a walk reads (default `"flag"`). Lets one struct carry
    /// tags for several consumers.
    pub fn tag_key(mut self, key: &'static str) -> Self {
        self.tag_key = key;
        self
    }

    /// Token separator within a tag (default `,`).
    pub fn separator(mut self, sep: char) -> Self {
        self.sep = sep;
        self
    }

    /// Flatten nested structs into the parent namespace (default `true`).
    /// When disabled, nested flags are prefixed: `database.url`.
    pub fn squash(mut self, squash: bool) -> Self {
        self.squash = squash;
        self
    }

    /// Skip fields that carry no tag under the active key (default `false`:
    /// untagged fields become flags named after their identifier).
    pub fn ignore_untagged(mut self, ignore: bool) -> Self {
        self.ignore_untagged = ignore;
        self
    }
}

/// Live stack of ancestor name segments during nested traversal.
#[derive(Debug, Default)]
pub(crate) struct PathContext {
    segments: Vec<String>,
}

impl PathContext {
    fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Run `f` with `segment` (if any) pushed. The pop is tied to this call
    /// returning, not to `f` succeeding.
    fn scoped<R>(
        &mut self,
        segment: Option<String>,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let pushed = segment.is_some();
        if let Some(seg) = segment {
            self.segments.push(seg);
        }
        let out = f(self);
        if pushed {
            self.segments.pop();
        }
        out
    }
}

/// Per-kind scalar actions. Bind and read each implement this once; the
/// walker supplies the traversal.
pub trait FieldVisitor {
    fn visit_str(&mut self, spec: &FlagSpec, dest: &mut String) -> Result<(), BindError>;
    fn visit_bool(&mut self, spec: &FlagSpec, dest: &mut bool) -> Result<(), BindError>;
    fn visit_i32(&mut self, spec: &FlagSpec, dest: &mut i32) -> Result<(), BindError>;
    fn visit_i64(&mut self, spec: &FlagSpec, dest: &mut i64) -> Result<(), BindError>;
    fn visit_f32(&mut self, spec: &FlagSpec, dest: &mut f32) -> Result<(), BindError>;
    fn visit_f64(&mut self, spec: &FlagSpec, dest: &mut f64) -> Result<(), BindError>;
    fn visit_duration(&mut self, spec: &FlagSpec, dest: &mut Duration) -> Result<(), BindError>;
    fn visit_str_seq(&mut self, spec: &FlagSpec, dest: &mut Vec<String>) -> Result<(), BindError>;
    fn visit_int_seq(&mut self, spec: &FlagSpec, dest: &mut Vec<i64>) -> Result<(), BindError>;
}

/// Walk `target`'s fields, dispatching every scalar to `visitor`.
///
/// The first error aborts the walk and propagates; fields already visited
/// keep whatever the visitor did to them — there is no rollback.
pub fn walk(
    target: &mut dyn Flags,
    opts: &Options,
    visitor: &mut dyn FieldVisitor,
) -> Result<(), BindError> {
    let mut path = PathContext::default();
    walk_fields(target, opts, &mut path, visitor)
}

pub(crate) fn walk_fields(
    target: &mut dyn Flags,
    opts: &Options,
    path: &mut PathContext,
    visitor: &mut dyn FieldVisitor,
) -> Result<(), BindError> {
    for field in target.fields() {
        let Some(mut spec) = resolve_spec(&field, opts) else {
            continue;
        };
        if !opts.squash {
            spec.apply_prefix(path.segments());
        }

        let ident = field.ident;
        match field.value {
            FieldValue::Str(dest) => visitor.visit_str(&spec, dest)?,
            FieldValue::Bool(dest) => visitor.visit_bool(&spec, dest)?,
            FieldValue::I32(dest) => visitor.visit_i32(&spec, dest)?,
            FieldValue::I64(dest) => visitor.visit_i64(&spec, dest)?,
            FieldValue::F32(dest) => visitor.visit_f32(&spec, dest)?,
            FieldValue::F64(dest) => visitor.visit_f64(&spec, dest)?,
            FieldValue::Duration(dest) => visitor.visit_duration(&spec, dest)?,
            FieldValue::StrSeq(dest) => visitor.visit_str_seq(&spec, dest)?,
            FieldValue::IntSeq(dest) => visitor.visit_int_seq(&spec, dest)?,
            FieldValue::Nested(inner) => {
                path.scoped(namespace_segment(&spec, opts), |path| {
                    walk_fields(inner, opts, path, visitor)
                })?;
            }
            FieldValue::OptionalNested(inner) => {
                let inner = inner.ok_or(BindError::NilField { field: ident })?;
                path.scoped(namespace_segment(&spec, opts), |path| {
                    walk_fields(inner, opts, path, visitor)
                })?;
            }
            FieldValue::Unsupported { type_name } => {
                return Err(BindError::UnsupportedType {
                    field: ident,
                    type_name,
                });
            }
        }
    }
    Ok(())
}

/// Resolve a field's tag under the active key. `None` means the field is
/// skipped outright: either it carries the skip sentinel, or it is untagged
/// and the walk ignores untagged fields.
fn resolve_spec(field: &Field<'_>, opts: &Options) -> Option<FlagSpec> {
    let raw = match field.tag_value(opts.tag_key) {
        Some(raw) => raw,
        None if opts.ignore_untagged => return None,
        None => "",
    };
    tag::parse(field.ident, raw, opts.sep)
}

/// The namespace segment a nested field contributes, or `None` when its
/// contents are squashed into the parent.
fn namespace_segment(spec: &FlagSpec, opts: &Options) -> Option<String> {
    if opts.squash || spec.squash {
        None
    } else {
        Some(spec.origin.clone())
    }
}
