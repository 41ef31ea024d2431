use super::{Flavor, Formatter, ToSql};
use crate::stmt::placeholder_offsets;

/// The next positional parameter
pub struct Placeholder;

impl ToSql for Placeholder {
    fn to_sql(self, f: &mut Formatter<'_>) {
        use std::fmt::Write;

        f.params += 1;

        match f.serializer.flavor {
            Flavor::Mysql => f.dst.push('?'),
            Flavor::Postgresql => write!(f.dst, "${}", f.params).unwrap(),
            Flavor::Sqlite => write!(f.dst, "?{}", f.params).unwrap(),
        }
    }
}

/// Caller supplied SQL with `?` markers, each rewritten to the next
/// placeholder. Markers inside quotes are left alone.
pub(super) struct RawSql<'a>(pub(super) &'a str);

impl ToSql for RawSql<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let mut start = 0;
        for offset in placeholder_offsets(self.0) {
            f.dst.push_str(&self.0[start..offset]);
            Placeholder.to_sql(f);
            start = offset + 1;
        }
        f.dst.push_str(&self.0[start..]);
    }
}
