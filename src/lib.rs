//! Tag-driven CLI flag binding. Declare your flags once, as struct fields,
//! and let the walker do the wiring.
//!
//! Tagbind turns a configuration struct into a set of CLI flags and back. A
//! field's tag carries everything a flag needs — name, short alias, help
//! text, default — and the same declaration drives both directions:
//!
//! ```ignore
//! struct ServerConfig {
//!     host: String,       // "host,desc:listen address,default:localhost"
//!     port: i64,          // "port,short:P,desc:listen port,default:8080"
//!     database: DbConfig, // nested struct, its own tagged fields
//! }
//!
//! let cmd = tagbind::bind_flags(Command::new("server"), &mut config, &opts)?;
//! let matches = cmd.get_matches();
//! let layers = Layers::new()
//!     .with_file_if_present("server.toml")?
//!     .with_env("SERVER")
//!     .with_matches(&matches);
//! tagbind::read_flags(&mut config, &layers, &opts)?;
//! ```
//!
//! After that, `config` holds the resolved value of every flag: explicit CLI
//! values beat environment variables, which beat the config file, which
//! beats the tag defaults.
//!
//! # The tag grammar
//!
//! A tag is a comma-separated token list. The first token is the flag name;
//! the rest are labels:
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `"port"` | flag `--port` |
//! | `""` | flag named after the field identifier, lower-cased |
//! | `"port,short:P"` | adds `-P` |
//! | `"port,desc:listen port"` | help text |
//! | `"port,default:8080"` | default value, in raw text form |
//! | `"-"` | skip this field entirely |
//! | `",squash"` | flatten a nested struct into the parent namespace |
//! | `desc:on\,off` | `\` escapes a separator inside a value |
//!
//! Unknown labels are ignored, and malformed default text degrades to the
//! kind's zero value rather than erroring — a typo in a tag never takes the
//! application down.
//!
//! # Describing a struct
//!
//! There is no reflection, so a struct describes itself: implement
//! [`Flags`] and list each field with its tag and a kind-tagged accessor.
//! See [`FieldValue`] for the supported kinds — strings, booleans, integer
//! and float widths, durations, string/integer sequences, and nested
//! structs (including optional ones).
//!
//! # Nesting and squash
//!
//! Nested structs either flatten into the parent's namespace (squash, the
//! default) or contribute a namespace segment, producing dotted flags like
//! `--database.url`. The global [`Options::squash`] setting picks the
//! default; a per-field `squash` label flattens one field when the global
//! setting is off.
//!
//! # Walk modes
//!
//! Binding and read-back are the same traversal with different visitors:
//! [`bind_flags`] registers clap arguments (and seeds every field with its
//! parsed default), [`read_flags`] re-populates the struct from a
//! [`Layers`] source. The traversal itself — [`walk`] plus the
//! [`FieldVisitor`] trait — is public, so other visitors (documentation
//! generators, validators) can reuse it.
//!
//! # The core is clap-free
//!
//! Only the `bind` adapter and [`Layers::with_matches`] touch clap, behind
//! the `clap` Cargo feature (on by default). With
//! `default-features = false` you keep the tag parser, the walker, and the
//! layered source, and can bind against any other flag library by
//! implementing [`FieldVisitor`] yourself.
//!
//! # Hazards
//!
//! Two fields that resolve to the same flag name are a caller error. The
//! walker does not deduplicate: clap panics on duplicate argument ids, and
//! the layered source last-write-wins. Walks are visitation-order
//! deterministic (struct declaration order), so the collision is at least
//! reproducible.

pub mod error;
pub mod source;
pub mod tag;

#[cfg(feature = "clap")]
mod bind;
mod convert;
mod field;
mod read;
mod walk;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use bind::bind_flags;
pub use error::BindError;
pub use field::{Field, FieldValue, Flags};
pub use read::{Reader, read_flags};
pub use source::Layers;
pub use tag::FlagSpec;
pub use walk::{FieldVisitor, Options, walk};
