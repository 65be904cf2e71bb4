//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod decrypt;
pub mod encrypt;
pub mod get;
pub mod init;
pub mod list;
pub mod remove;
pub mod shell;
