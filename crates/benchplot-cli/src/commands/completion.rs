// Dweve benchplot - Benchmark throughput charts
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! `benchplot completion`: completion scripts for bash, zsh and fish.

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Writes a completion script for `cmd` to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::shells::Bash;
/// use benchplot_cli::commands::generate_completion_for_command;
///
/// # fn main() -> Result<(), benchplot_cli::error::CliError> {
/// let mut cmd = Command::new("benchplot");
/// generate_completion_for_command(Bash, &mut cmd)?;
/// # Ok(())
/// # }
/// ```
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
    Ok(())
}

/// Shells with completion support and where each loads scripts from.
pub const SUPPORTED_SHELLS: &[(&str, &str)] = &[
    ("bash", "~/.local/share/bash-completion/completions/benchplot"),
    ("zsh", "~/.zfunc/_benchplot"),
    ("fish", "~/.config/fish/completions/benchplot.fish"),
];

/// Command that installs the completion script for `shell`.
///
/// Shell names are case-insensitive.
///
/// # Examples
///
/// ```
/// use benchplot_cli::commands::print_installation_instructions;
///
/// assert!(print_installation_instructions("bash").contains("completion bash"));
/// assert!(print_installation_instructions("ZSH").contains("_benchplot"));
/// assert_eq!(print_installation_instructions("tcsh"), "Unsupported shell");
/// ```
pub fn print_installation_instructions(shell: &str) -> String {
    let shell = shell.to_lowercase();
    match SUPPORTED_SHELLS.iter().find(|(name, _)| *name == shell) {
        Some((name, target)) if *name == "zsh" => format!(
            "benchplot completion {name} > {target}\n# ~/.zfunc must be on $fpath before compinit runs\n"
        ),
        Some((name, target)) => format!("benchplot completion {name} > {target}\n"),
        None => "Unsupported shell".to_string(),
    }
}
