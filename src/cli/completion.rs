//! Shell completion generation for firestore-backup

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::cli::CliArgs;

/// Generate a shell completion script
///
/// # Arguments
/// * `shell` - Target shell
/// * `out` - Where the script is written
pub fn generate_completion<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buffer = Vec::new();
        generate_completion(shell, &mut buffer);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_bash_completion_mentions_flags() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("firestore-backup"));
        assert!(bash.contains("--collections"));
        assert!(bash.contains("--path"));
    }

    #[test]
    fn test_other_shells_generate() {
        for shell in [Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            assert!(!script(shell).is_empty());
        }
    }
}
