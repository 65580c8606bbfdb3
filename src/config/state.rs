// Application state module
// Immutable state shared by every connection

use super::types::Config;
use crate::wiki::{PageStore, Templates, Wiki};

/// Application state
pub struct AppState {
    pub config: Config,
    pub wiki: Wiki,
}

impl AppState {
    /// Build state from configuration, parsing templates once
    pub fn new(config: &Config) -> Result<Self, tera::Error> {
        let templates = Templates::load(config.wiki.templates_dir.as_deref())?;
        let store = PageStore::new(&config.wiki.pages_dir);

        Ok(Self {
            config: config.clone(),
            wiki: Wiki::new(store, templates),
        })
    }
}
