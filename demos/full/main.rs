//! Kitchen-sink tagbind demo: every kind, nesting, squash control, layered
//! read-back, JSON output.
//!
//! ```sh
//! cargo run --example full -- --help
//! cargo run --example full -- --port 9000 --debug=false
//! cargo run --example full -- --store.path /tmp/data --keep 5m
//! FULL_DEMO__PORT=7000 cargo run --example full
//! ```
//!
//! Flags for nested structs are dotted because this demo turns squash off:
//! `--store.path`, `--cache.size`. The `metrics` struct opts back into
//! flattening with a `squash` label, so its fields stay top-level.
//!
//! Resolution order, lowest to highest: tag defaults → `full-demo.toml` in
//! the working directory (if present) → `FULL_DEMO__*` environment
//! variables → explicit flags.

use std::time::Duration;

use clap::Command;
use serde::Serialize;

use tagbind::{Field, FieldValue, Flags, Layers, Options, bind_flags, read_flags};

#[derive(Debug, Default, Serialize)]
struct FullConfig {
    dburl: String,
    logfile: String,
    debug: bool,
    name: String,
    port: i64,
    rate: f64,
    keep: Duration,
    tags: Vec<String>,
    weights: Vec<i64>,
    store: StoreConfig,
    metrics: MetricsConfig,
    cache: Option<Box<CacheConfig>>,
    scratch: String,
}

#[derive(Debug, Default, Serialize)]
struct StoreConfig {
    path: String,
    fsync: bool,
}

#[derive(Debug, Default, Serialize)]
struct MetricsConfig {
    interval: Duration,
    enabled: bool,
}

#[derive(Debug, Default, Serialize)]
struct CacheConfig {
    size: i64,
}

impl Flags for FullConfig {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("dburl", FieldValue::Str(&mut self.dburl))
                .flag("dburl,desc:database address,default::27071"),
            Field::new("logfile", FieldValue::Str(&mut self.logfile))
                .flag("logfile,default:stdout,desc:udp|udp:Addr|FilePath|redirect:x"),
            Field::new("debug", FieldValue::Bool(&mut self.debug))
                .flag(r"debug,default:true,desc:enable debug mode\, false to disable"),
            Field::new("name", FieldValue::Str(&mut self.name)).flag(",desc:name,default:test"),
            Field::new("port", FieldValue::I64(&mut self.port))
                .flag("port,short:P,desc:listen port,default:20001"),
            Field::new("rate", FieldValue::F64(&mut self.rate))
                .flag("rate,desc:sample rate,default:0.5"),
            Field::new("keep", FieldValue::Duration(&mut self.keep))
                .flag("keep,desc:retention window,default:1s"),
            Field::new("tags", FieldValue::StrSeq(&mut self.tags))
                .flag(r"tags,desc:instance tags,default:blue\,canary"),
            Field::new("weights", FieldValue::IntSeq(&mut self.weights))
                .flag(r"weights,desc:shard weights,default:1\,2\,3"),
            Field::new("store", FieldValue::Nested(&mut self.store)).flag("store"),
            Field::new("metrics", FieldValue::Nested(&mut self.metrics)).flag(",squash"),
            Field::new(
                "cache",
                FieldValue::OptionalNested(self.cache.as_deref_mut().map(|c| c as &mut dyn Flags)),
            )
            .flag("cache"),
            Field::new("scratch", FieldValue::Str(&mut self.scratch)).flag("-"),
        ]
    }
}

impl Flags for StoreConfig {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("path", FieldValue::Str(&mut self.path))
                .flag("path,desc:data directory,default:/var/lib/full-demo"),
            Field::new("fsync", FieldValue::Bool(&mut self.fsync)).flag("fsync,default:true"),
        ]
    }
}

impl Flags for MetricsConfig {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("interval", FieldValue::Duration(&mut self.interval))
                .flag("interval,desc:metrics flush interval,default:10s"),
            Field::new("enabled", FieldValue::Bool(&mut self.enabled)).flag("enabled"),
        ]
    }
}

impl Flags for CacheConfig {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("size", FieldValue::I64(&mut self.size))
                .flag("size,desc:cache entries,default:1024"),
        ]
    }
}

fn main() {
    let mut cfg = FullConfig {
        cache: Some(Box::default()),
        ..Default::default()
    };
    let opts = Options::new().squash(false);

    let cmd = bind_flags(Command::new("full-demo"), &mut cfg, &opts)
        .unwrap_or_else(|e| panic!("bind failed: {e}"));
    let matches = cmd.get_matches();

    let layers = Layers::new()
        .with_file_if_present("full-demo.toml")
        .unwrap_or_else(|e| panic!("config file: {e}"))
        .with_env("FULL_DEMO")
        .with_matches(&matches);
    read_flags(&mut cfg, &layers, &opts).unwrap_or_else(|e| panic!("read failed: {e}"));

    let json = serde_json::to_string_pretty(&cfg).expect("config serializes");
    println!("{json}");
}
