/// SQL dialect spoken by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgresql,
    Mysql,
}

#[derive(Debug)]
pub struct Capability {
    pub dialect: Dialect,

    /// Supports `REPLACE INTO`
    pub replace: bool,
}

impl Capability {
    pub const SQLITE: Self = Self {
        dialect: Dialect::Sqlite,
        replace: true,
    };

    pub const POSTGRESQL: Self = Self {
        dialect: Dialect::Postgresql,
        replace: false,
    };

    pub const MYSQL: Self = Self {
        dialect: Dialect::Mysql,
        replace: true,
    };
}
