//! The bind half of the walk: register one `clap` argument per scalar field.
//!
//! This is the only module that touches clap (behind the default-on `clap`
//! Cargo feature); the walker and the tag grammar are framework-free.
//!
//! Binding does two things per field: it pushes a typed [`clap::Arg`] built
//! from the field's [`FlagSpec`] (long name, optional one-character short,
//! help text, default), and it seeds the field itself with the parsed
//! default, so the struct is usable before any parse happens. Malformed
//! default text is not an error: numbers fall back to zero, booleans to
//! false, durations to zero — defaults are normalized before clap ever sees
//! them, so a typo in a tag cannot fail the parse.

use std::time::Duration;

use clap::{Arg, ArgAction, Command};

use crate::convert;
use crate::error::BindError;
use crate::field::Flags;
use crate::tag::FlagSpec;
use crate::walk::{self, FieldVisitor, Options};

/// Visitor that accumulates `clap` args for every scalar field.
pub struct Binder {
    args: Vec<Arg>,
}

impl Binder {
    fn new() -> Self {
        Self { args: Vec::new() }
    }

    fn base_arg(spec: &FlagSpec) -> Arg {
        let mut arg = Arg::new(spec.name.clone()).long(spec.name.clone());
        if let Some(short) = spec.short.as_ref().and_then(|s| s.chars().next()) {
            arg = arg.short(short);
        }
        if let Some(desc) = &spec.description {
            arg = arg.help(desc.clone());
        }
        arg
    }
}

impl FieldVisitor for Binder {
    fn visit_str(&mut self, spec: &FlagSpec, dest: &mut String) -> Result<(), BindError> {
        let mut arg = Self::base_arg(spec).value_parser(clap::value_parser!(String));
        if let Some(default) = &spec.default {
            dest.clone_from(default);
            arg = arg.default_value(default.clone());
        } else {
            dest.clear();
        }
        self.args.push(arg);
        Ok(())
    }

    fn visit_bool(&mut self, spec: &FlagSpec, dest: &mut bool) -> Result<(), BindError> {
        let default = spec.default.as_deref().map(convert::to_bool).unwrap_or(false);
        *dest = default;
        self.args.push(
            Self::base_arg(spec)
                .value_parser(clap::value_parser!(bool))
                .num_args(0..=1)
                .default_missing_value("true")
                .default_value(if default { "true" } else { "false" }),
        );
        Ok(())
    }

    fn visit_i32(&mut self, spec: &FlagSpec, dest: &mut i32) -> Result<(), BindError> {
        let default = spec.default.as_deref().map(convert::to_i64).unwrap_or(0) as i32;
        *dest = default;
        let mut arg = Self::base_arg(spec).value_parser(clap::value_parser!(i32));
        if spec.default.is_some() {
            arg = arg.default_value(default.to_string());
        }
        self.args.push(arg);
        Ok(())
    }

    fn visit_i64(&mut self, spec: &FlagSpec, dest: &mut i64) -> Result<(), BindError> {
        let default = spec.default.as_deref().map(convert::to_i64).unwrap_or(0);
        *dest = default;
        let mut arg = Self::base_arg(spec).value_parser(clap::value_parser!(i64));
        if spec.default.is_some() {
            arg = arg.default_value(default.to_string());
        }
        self.args.push(arg);
        Ok(())
    }

    fn visit_f32(&mut self, spec: &FlagSpec, dest: &mut f32) -> Result<(), BindError> {
        let default = spec.default.as_deref().map(convert::to_f64).unwrap_or(0.0) as f32;
        *dest = default;
        let mut arg = Self::base_arg(spec).value_parser(clap::value_parser!(f32));
        if spec.default.is_some() {
            arg = arg.default_value(default.to_string());
        }
        self.args.push(arg);
        Ok(())
    }

    fn visit_f64(&mut self, spec: &FlagSpec, dest: &mut f64) -> Result<(), BindError> {
        let default = spec.default.as_deref().map(convert::to_f64).unwrap_or(0.0);
        *dest = default;
        let mut arg = Self::base_arg(spec).value_parser(clap::value_parser!(f64));
        if spec.default.is_some() {
            arg = arg.default_value(default.to_string());
        }
        self.args.push(arg);
        Ok(())
    }

    fn visit_duration(&mut self, spec: &FlagSpec, dest: &mut Duration) -> Result<(), BindError> {
        // Durations travel as strings ("500ms", "2m") and are parsed at
        // read time; the raw default is kept so help output shows it.
        *dest = spec
            .default
            .as_deref()
            .map(convert::to_duration)
            .unwrap_or(Duration::ZERO);
        let mut arg = Self::base_arg(spec).value_parser(clap::value_parser!(String));
        if let Some(default) = &spec.default {
            arg = arg.default_value(default.clone());
        }
        self.args.push(arg);
        Ok(())
    }

    fn visit_str_seq(&mut self, spec: &FlagSpec, dest: &mut Vec<String>) -> Result<(), BindError> {
        let defaults = spec
            .default
            .as_deref()
            .map(convert::split_list)
            .unwrap_or_default();
        dest.clone_from(&defaults);
        let mut arg = Self::base_arg(spec)
            .value_parser(clap::value_parser!(String))
            .action(ArgAction::Append)
            .value_delimiter(',');
        if !defaults.is_empty() {
            arg = arg.default_values(defaults);
        }
        self.args.push(arg);
        Ok(())
    }

    fn visit_int_seq(&mut self, spec: &FlagSpec, dest: &mut Vec<i64>) -> Result<(), BindError> {
        let defaults = spec
            .default
            .as_deref()
            .map(convert::to_i64_list)
            .unwrap_or_default();
        dest.clone_from(&defaults);
        let mut arg = Self::base_arg(spec)
            .value_parser(clap::value_parser!(i64))
            .action(ArgAction::Append)
            .value_delimiter(',');
        if !defaults.is_empty() {
            arg = arg.default_values(defaults.iter().map(ToString::to_string));
        }
        self.args.push(arg);
        Ok(())
    }
}

/// Walk `target` and register one flag per scalar field on `cmd`.
///
/// Also seeds every field with its parsed default. Flag name collisions are
/// not checked here; clap panics on duplicate argument ids, and two fields
/// resolving to the same name is a caller error.
pub fn bind_flags(
    cmd: Command,
    target: &mut dyn Flags,
    opts: &Options,
) -> Result<Command, BindError> {
    let mut binder = Binder::new();
    walk::walk(target, opts, &mut binder)?;
    Ok(cmd.args(binder.args))
}
