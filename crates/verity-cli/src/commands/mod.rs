//! Command handlers, one module per subcommand.

pub mod codes;
pub mod completions;
pub mod config;
pub mod kinds;
pub mod validate;
