#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::Placeholder;
use params::RawSql;

// Fragment serializers
mod statement;

use crate::stmt::Statement;

use weft_core::driver::Dialect;

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Number of placeholders written so far
    params: usize,
}

impl Serializer {
    pub fn for_dialect(dialect: Dialect) -> Serializer {
        match dialect {
            Dialect::Sqlite => Self::sqlite(),
            Dialect::Postgresql => Self::postgresql(),
            Dialect::Mysql => Self::mysql(),
        }
    }

    /// Serialize a statement. Placeholders are numbered in the order they
    /// appear, which is the order parameters must be bound in.
    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params: 0,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    fn is_mysql(&self) -> bool {
        matches!(self.flavor, Flavor::Mysql)
    }
}
