//! Values exchanged with the database and the keys built from them.

mod key;
pub use key::Key;

mod value;
pub use value::Value;
