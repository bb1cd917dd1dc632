#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use crate::field::{Field, FieldValue, Flags};

    /// Kitchen-sink config exercising every scalar kind, sequences, an
    /// escaped separator, a skip marker, and a nested struct.
    #[derive(Debug, Default, PartialEq)]
    pub struct AppConfig {
        pub name: String,
        pub age: i64,
        pub debug: bool,
        pub rate: f64,
        pub keep: Duration,
        pub tags: Vec<String>,
        pub ports: Vec<i64>,
        pub database: DbConfig,
        pub scratch: String,
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct DbConfig {
        pub url: String,
        pub pool: i32,
    }

    impl Flags for AppConfig {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new("name", FieldValue::Str(&mut self.name))
                    .flag("name,desc:name,default:test"),
                Field::new("age", FieldValue::I64(&mut self.age))
                    .flag("age,short:a,desc:age,default:18"),
                Field::new("debug", FieldValue::Bool(&mut self.debug))
                    .flag(r"debug,default:true,desc:enable\,disable"),
                Field::new("rate", FieldValue::F64(&mut self.rate)).flag("rate,default:1.5"),
                Field::new("keep", FieldValue::Duration(&mut self.keep)).flag("keep,default:1s"),
                Field::new("tags", FieldValue::StrSeq(&mut self.tags)).flag(r"tags,default:x\,y"),
                Field::new("ports", FieldValue::IntSeq(&mut self.ports))
                    .flag(r"ports,default:1\,2"),
                Field::new("database", FieldValue::Nested(&mut self.database)).flag("db"),
                Field::new("scratch", FieldValue::Str(&mut self.scratch)).flag("-"),
            ]
        }
    }

    impl Flags for DbConfig {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::new("url", FieldValue::Str(&mut self.url)).flag("url,desc:connection url"),
                Field::new("pool", FieldValue::I32(&mut self.pool)).flag("pool,default:5"),
            ]
        }
    }
}
