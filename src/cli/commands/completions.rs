//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::BigTimerError;

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns `InvalidArgument` if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, BigTimerError> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, name, &mut buf);
    String::from_utf8(buf).map_err(|e| BigTimerError::InvalidArgument(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("bigtimer"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_generate_zsh_completions() {
        let script = generate_completions(Shell::Zsh).unwrap();
        assert!(script.contains("bigtimer"));
        assert!(script.contains("submit"));
    }

    #[test]
    fn test_generate_fish_completions() {
        let script = generate_completions(Shell::Fish).unwrap();
        assert!(script.contains("calendar"));
    }
}
