//! Shell completion generation via `clap_complete`.

use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Shell as CompletionShell};
use std::io;

/// Map the CLI shell token to the clap_complete shell type.
#[must_use]
pub fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Write a completion script for `cmd` to stdout.
pub fn generate_completions(shell: CompletionShell, cmd: &mut Command) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, &mut io::stdout());
}
