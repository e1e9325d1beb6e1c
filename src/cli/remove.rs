use crate::config::{Context, StateStore};
use crate::resolver::is_plugin_name;
use crate::setup::Diagnostic;
use crate::{console, Error, Result};

/// Remove plugin directories and forget their install state.
pub fn run(ctx: &Context, state: &mut StateStore, names: &[String], diagnostics: &mut Vec<Diagnostic>) {
    let mut removed_any = false;
    for name in names {
        match remove_plugin(ctx, state, name) {
            Ok(true) => {
                removed_any = true;
                console::success(&format!("removed {}", name));
            }
            Ok(false) => console::warn(&format!("{} is not installed", name)),
            Err(e) => {
                console::error(&format!("failed to remove {}: {}", name, e));
                diagnostics.push(Diagnostic::new(name.as_str(), e));
            }
        }
    }
    if removed_any {
        console::item("Fragments that still require a removed plugin reinstall it on the next run.");
    }
}

/// Delete `<bundle>/<name>` and its state entry. Returns whether anything was there.
pub fn remove_plugin(ctx: &Context, state: &mut StateStore, name: &str) -> Result<bool> {
    if !is_plugin_name(name) {
        return Err(Error::NameResolution {
            reference: name.to_string(),
            reason: "not a plugin name".to_string(),
        });
    }

    let dir = ctx.layout.plugin_dir(name);
    let existed = dir.exists();
    if existed {
        std::fs::remove_dir_all(&dir).map_err(|e| Error::FileWrite {
            path: dir.clone(),
            source: e,
        })?;
    }
    let tracked = state.remove(name).is_some();
    Ok(existed || tracked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup() -> (tempfile::TempDir, Context) {
        let temp_dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(temp_dir.path().join("vim"), temp_dir.path().join("vimrc"));
        ctx.layout.ensure_dirs().unwrap();
        (temp_dir, ctx)
    }

    #[test]
    fn test_remove_installed_plugin() {
        let (_temp_dir, ctx) = setup();
        let dir = ctx.layout.plugin_dir("nerdtree");
        fs::create_dir_all(dir.join("plugin")).unwrap();
        let mut state = StateStore::default();
        state.set("nerdtree", true);

        assert!(remove_plugin(&ctx, &mut state, "nerdtree").unwrap());
        assert!(!dir.exists());
        assert!(state.get("nerdtree").is_none());
    }

    #[test]
    fn test_remove_unknown_plugin() {
        let (_temp_dir, ctx) = setup();
        let mut state = StateStore::default();

        assert!(!remove_plugin(&ctx, &mut state, "nerdtree").unwrap());
    }

    #[test]
    fn test_remove_rejects_paths() {
        let (_temp_dir, ctx) = setup();
        let mut state = StateStore::default();

        for name in ["..", "../configs", "", "a/b"] {
            assert!(remove_plugin(&ctx, &mut state, name).is_err(), "{name}");
        }
        assert!(ctx.layout.configs_dir().exists());
    }

    #[test]
    fn test_run_collects_failures() {
        let (_temp_dir, ctx) = setup();
        let mut state = StateStore::default();
        state.set("y", true);
        fs::create_dir_all(ctx.layout.plugin_dir("y")).unwrap();
        let mut diagnostics = Vec::new();

        run(
            &ctx,
            &mut state,
            &["..".to_string(), "y".to_string()],
            &mut diagnostics,
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].subject, "..");
        assert!(!ctx.layout.plugin_dir("y").exists());
    }
}
