//! Command trait for the tinct CLI.
//!
//! Every subcommand is a handler built from its arguments and executed
//! once.

use crate::error::Result;

/// Standard command trait that all tinct commands implement.
pub trait Command {
    /// The arguments type for this command.
    type Args;

    /// What the command produces besides its printed output.
    type Output;

    fn new(args: Self::Args) -> Self;

    fn execute(&self) -> Result<Self::Output>;

    /// The subcommand name, used in log events.
    fn name() -> &'static str;
}
