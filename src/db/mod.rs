pub mod connection;
pub mod migrations;
pub mod seed;

pub use connection::*;
pub use migrations::MigrationManager;
