//! # CLI Completions Command
//!
//! Shell completions generation for the Loantrack CLI.

use std::io::Write;

use clap::Command;
use clap_complete::Shell;
use error::Result;

/// Writes completions for `shell` to `out`.
///
/// # Arguments
///
/// * `shell` - The shell to generate completions for
/// * `cmd` - The CLI command to generate completions for
/// * `out` - Destination, usually stdout
pub fn completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) -> Result<()> {
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, bin_name, out);
    Ok(())
}
