//! One handler module per subcommand.

pub mod ask;
pub mod chat;
pub mod config;
