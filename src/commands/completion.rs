//! Completion command - Print the shell snippet enabling dynamic completion

use anyhow::Result;
use clap_complete::Shell;

const BIN: &str = env!("CARGO_PKG_NAME");

fn setup_snippet(shell: Shell) -> Result<String> {
    let snippet = match shell {
        Shell::Bash => format!(
            "# {BIN} shell completion setup for Bash\n\
             # Add this to your ~/.bashrc:\n\
             source <(COMPLETE=bash {BIN})\n"
        ),
        Shell::Zsh => format!(
            "# {BIN} shell completion setup for Zsh\n\
             # Add this to your ~/.zshrc:\n\
             source <(COMPLETE=zsh {BIN})\n"
        ),
        Shell::Fish => format!(
            "# {BIN} shell completion setup for Fish\n\
             # Add this to your ~/.config/fish/config.fish:\n\
             source (COMPLETE=fish {BIN} | psub)\n"
        ),
        other => anyhow::bail!("Unsupported shell: {other}"),
    };
    Ok(snippet)
}

/// Print completion setup instructions for `shell`
///
/// # Errors
/// Returns an error if the shell is unknown or unsupported
pub fn cmd_completion(shell: &str) -> Result<()> {
    let shell = shell.parse::<Shell>().map_err(|_| {
        anyhow::anyhow!("Invalid shell: {shell}. Supported shells: bash, zsh, fish")
    })?;
    print!("{}", setup_snippet(shell)?);
    Ok(())
}
