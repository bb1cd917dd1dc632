//! The read-back half of the walk: re-populate a bound struct from a
//! [`Layers`] source after parsing.
//!
//! Every scalar is fetched by its resolved flag name and written
//! unconditionally — a key absent from every layer writes the zero value of
//! its kind. Read-back is a full overwrite, not a sparse patch.

use std::time::Duration;

use crate::error::BindError;
use crate::field::Flags;
use crate::source::Layers;
use crate::tag::FlagSpec;
use crate::walk::{self, FieldVisitor, Options};

/// Visitor that copies values out of a [`Layers`] source.
pub struct Reader<'s> {
    layers: &'s Layers,
}

impl<'s> Reader<'s> {
    pub fn new(layers: &'s Layers) -> Self {
        Self { layers }
    }
}

impl FieldVisitor for Reader<'_> {
    fn visit_str(&mut self, spec: &FlagSpec, dest: &mut String) -> Result<(), BindError> {
        *dest = self.layers.get_str(&spec.name);
        Ok(())
    }

    fn visit_bool(&mut self, spec: &FlagSpec, dest: &mut bool) -> Result<(), BindError> {
        *dest = self.layers.get_bool(&spec.name);
        Ok(())
    }

    fn visit_i32(&mut self, spec: &FlagSpec, dest: &mut i32) -> Result<(), BindError> {
        *dest = self.layers.get_i32(&spec.name);
        Ok(())
    }

    fn visit_i64(&mut self, spec: &FlagSpec, dest: &mut i64) -> Result<(), BindError> {
        *dest = self.layers.get_i64(&spec.name);
        Ok(())
    }

    fn visit_f32(&mut self, spec: &FlagSpec, dest: &mut f32) -> Result<(), BindError> {
        *dest = self.layers.get_f32(&spec.name);
        Ok(())
    }

    fn visit_f64(&mut self, spec: &FlagSpec, dest: &mut f64) -> Result<(), BindError> {
        *dest = self.layers.get_f64(&spec.name);
        Ok(())
    }

    fn visit_duration(&mut self, spec: &FlagSpec, dest: &mut Duration) -> Result<(), BindError> {
        *dest = self.layers.get_duration(&spec.name);
        Ok(())
    }

    fn visit_str_seq(&mut self, spec: &FlagSpec, dest: &mut Vec<String>) -> Result<(), BindError> {
        *dest = self.layers.get_str_seq(&spec.name);
        Ok(())
    }

    fn visit_int_seq(&mut self, spec: &FlagSpec, dest: &mut Vec<i64>) -> Result<(), BindError> {
        *dest = self.layers.get_int_seq(&spec.name);
        Ok(())
    }
}

/// Walk `target` and fill every flag-mapped field from `layers`.
pub fn read_flags(
    target: &mut dyn Flags,
    layers: &Layers,
    opts: &Options,
) -> Result<(), BindError> {
    walk::walk(target, opts, &mut Reader::new(layers))
}
