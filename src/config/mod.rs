mod context;
mod settings;
mod state;

pub use context::{Context, DEFAULT_SEARCH_URL, PATHOGEN_VIM_URL};
pub use settings::{expand_tilde, Settings, SETTINGS_FILENAME};
pub use state::{StateStore, StateValue};
