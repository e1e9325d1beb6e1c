use tracing::{debug, instrument};

use super::git::{is_working_copy, Vcs};
use crate::config::{Context, StateStore};
use crate::resolver::{is_plugin_name, PluginRef, Resolver};
use crate::{Error, Result};

/// What an install call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Cloned,
    Updated,
    /// The state store already flags the plugin; nothing was run.
    AlreadyInstalled,
}

/// Installs plugins into the bundle directory.
pub struct PluginInstaller<'a, V: Vcs> {
    ctx: &'a Context,
    resolver: &'a Resolver,
    vcs: V,
}

impl<'a, V: Vcs> PluginInstaller<'a, V> {
    pub fn new(ctx: &'a Context, resolver: &'a Resolver, vcs: V) -> Self {
        Self { ctx, resolver, vcs }
    }

    /// Resolve `reference` and install it.
    pub fn install(
        &self,
        reference: &str,
        state: &mut StateStore,
    ) -> Result<(PluginRef, InstallOutcome)> {
        let plugin = self.resolver.resolve(reference)?;
        let outcome = self.install_ref(&plugin, state)?;
        Ok((plugin, outcome))
    }

    /// Clone or update `plugin` and flag it installed.
    ///
    /// A plugin the state store already flags is left alone, without
    /// touching its directory, unless the context forces updates.
    #[instrument(skip(self, state), fields(name = %plugin.name))]
    pub fn install_ref(&self, plugin: &PluginRef, state: &mut StateStore) -> Result<InstallOutcome> {
        // The name becomes a directory that may be deleted below
        if !is_plugin_name(&plugin.name) {
            return Err(Error::NameResolution {
                reference: plugin.url.clone(),
                reason: format!("\"{}\" is not a usable plugin name", plugin.name),
            });
        }

        if state.get_bool(&plugin.name) && !self.ctx.force {
            debug!("already installed, skipping");
            return Ok(InstallOutcome::AlreadyInstalled);
        }

        let dest = self.ctx.layout.plugin_dir(&plugin.name);
        let outcome = if is_working_copy(&dest) {
            debug!(path = %dest.display(), "working copy exists, pulling");
            self.vcs.pull(&dest)?;
            InstallOutcome::Updated
        } else {
            if dest.exists() {
                debug!(path = %dest.display(), "removing stale non-git directory");
                std::fs::remove_dir_all(&dest).map_err(|e| Error::FileWrite {
                    path: dest.clone(),
                    source: e,
                })?;
            }
            debug!(url = %plugin.url, path = %dest.display(), "cloning");
            self.vcs.clone_repo(&plugin.url, &dest)?;
            InstallOutcome::Cloned
        };

        if dest.join(".gitmodules").exists() {
            debug!("updating submodules");
            self.vcs.update_submodules(&dest)?;
        }

        state.set(plugin.name.clone(), true);
        Ok(outcome)
    }
}
