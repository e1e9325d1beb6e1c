mod bootstrap;
mod git;
mod plugin;
mod script;

pub use bootstrap::ensure_downloaded;
pub use git::{is_working_copy, GitCli, Vcs};
pub use plugin::{InstallOutcome, PluginInstaller};
pub use script::run_script;

#[cfg(test)]
pub(crate) use git::tests::setup_test_repo;
#[cfg(test)]
pub(crate) use plugin::tests::{offline_resolver, RecordingVcs};
