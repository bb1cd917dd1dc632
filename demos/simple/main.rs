//! Minimal tagbind usage: two flags, bind, parse, read back.
//!
//! ```sh
//! cargo run --example simple -- --help
//! cargo run --example simple -- --age 133
//! cargo run --example simple -- -N "someone else"
//! ```

use clap::Command;

use tagbind::{Field, FieldValue, Flags, Layers, Options, bind_flags, read_flags};

#[derive(Debug, Default)]
struct Config {
    name: String,
    age: i64,
}

impl Flags for Config {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("name", FieldValue::Str(&mut self.name))
                .flag("name,short:N,default:default name,desc:your name"),
            Field::new("age", FieldValue::I64(&mut self.age))
                .flag("age,short:A,default:18,desc:your age"),
        ]
    }
}

fn main() {
    let mut cfg = Config::default();
    let opts = Options::default();

    let cmd = bind_flags(Command::new("simple"), &mut cfg, &opts)
        .unwrap_or_else(|e| panic!("bind failed: {e}"));
    let matches = cmd.get_matches();

    let layers = Layers::new().with_matches(&matches);
    read_flags(&mut cfg, &layers, &opts).unwrap_or_else(|e| panic!("read failed: {e}"));

    println!("{cfg:#?}");
}
