use tracing::debug;

use crate::{Error, Result};

/// Executables every run depends on besides the script shell.
pub const PREREQUISITES: &[&str] = &["git", "vim"];

/// Everything that must be on `PATH` when fragment scripts run under `shell`.
pub fn required(shell: &str) -> Vec<&str> {
    let mut tools: Vec<&str> = PREREQUISITES.to_vec();
    if !tools.contains(&shell) {
        tools.insert(1, shell);
    }
    tools
}

/// Fail with the full list of executables missing from `PATH`.
pub fn check(required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| {
            let found = which::which(name);
            debug!(name, found = ?found.as_ref().ok(), "checking prerequisite");
            found.is_err()
        })
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingPrerequisites(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executables_are_all_reported() {
        let result = check(&["vimpm-no-such-tool-1", "vimpm-no-such-tool-2"]);
        match result {
            Err(Error::MissingPrerequisites(missing)) => {
                assert_eq!(missing, vec!["vimpm-no-such-tool-1", "vimpm-no-such-tool-2"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_configured_shell_is_required() {
        assert_eq!(required("bash"), vec!["git", "bash", "vim"]);
        assert_eq!(required("zsh"), vec!["git", "zsh", "vim"]);
        assert_eq!(required("/bin/sh"), vec!["git", "/bin/sh", "vim"]);
    }

    #[test]
    fn test_missing_shell_is_reported() {
        match check(&required("vimpm-no-such-shell")) {
            Err(Error::MissingPrerequisites(missing)) => {
                assert!(missing.contains(&"vimpm-no-such-shell".to_string()));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_requirements() {
        assert!(check(&[]).is_ok());
    }
}
