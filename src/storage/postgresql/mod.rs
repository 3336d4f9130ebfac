pub mod postgresql;

pub use postgresql::PostgresStorage;
