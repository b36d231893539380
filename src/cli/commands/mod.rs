//! One module per subcommand, each exposing `execute`.

pub mod list;
pub mod register;
pub mod retrieve;
pub mod store;
