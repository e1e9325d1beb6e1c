use crate::config::StateStore;
use crate::console;
use crate::installer::{InstallOutcome, PluginInstaller, Vcs};
use crate::setup::Diagnostic;

/// Install each reference; a failure is reported and the rest still run.
pub fn run<V: Vcs>(
    installer: &PluginInstaller<'_, V>,
    state: &mut StateStore,
    references: &[String],
    diagnostics: &mut Vec<Diagnostic>,
) {
    for reference in references {
        match installer.install(reference, state) {
            Ok((plugin, InstallOutcome::Cloned)) => {
                console::success(&format!("plugin \"{}\" has been installed", plugin.name))
            }
            Ok((plugin, InstallOutcome::Updated)) => {
                console::success(&format!("plugin \"{}\" has been updated", plugin.name))
            }
            Ok((plugin, InstallOutcome::AlreadyInstalled)) => console::info(&format!(
                "plugin \"{}\" is already installed (use --force to update)",
                plugin.name
            )),
            Err(e) => {
                console::error(&format!("failed to install \"{}\": {}", reference, e));
                diagnostics.push(Diagnostic::new(reference.as_str(), e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Context;
    use crate::installer::{offline_resolver, RecordingVcs};

    #[test]
    fn test_failures_do_not_stop_later_installs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(temp_dir.path().join("vim"), temp_dir.path().join("vimrc"));
        ctx.layout.ensure_dirs().unwrap();
        let resolver = offline_resolver();
        let vcs = RecordingVcs::default();
        let installer = PluginInstaller::new(&ctx, &resolver, &vcs);
        let mut state = StateStore::default();
        state.set("already", true);
        let mut diagnostics = Vec::new();

        let references = vec![
            // Keyword lookup against an unreachable endpoint fails
            "nerdtree".to_string(),
            "github.com/x/y".to_string(),
            "github.com/x/already".to_string(),
        ];
        run(&installer, &mut state, &references, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].subject, "nerdtree");
        assert_eq!(*vcs.calls.borrow(), vec!["clone https://github.com/x/y"]);
        assert!(state.get_bool("y"));
    }
}
