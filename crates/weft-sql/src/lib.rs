pub mod cache;
pub use cache::{CacheKey, CompiledQuery, StatementCache};

pub mod compile;
pub use compile::{compile, Clauses};

pub mod criteria;
pub use criteria::{Criteria, Criterion, Param};

pub mod serializer;
pub use serializer::Serializer;

pub mod stmt;
pub use stmt::Statement;
