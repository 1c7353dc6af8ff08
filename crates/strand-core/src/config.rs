//! Shell configuration

use serde::{Deserialize, Serialize};

use strand_gesture::GestureConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin of the hosting environment. Icon sources on it are loaded
    /// directly; everything else goes through the fetch client.
    pub base_origin: String,
    /// Address the new-tab action opens.
    pub homepage: String,
    /// Tabs opened at startup, in strip order.
    pub initial_tabs: Vec<String>,
    /// Drag-reorder tuning.
    pub gesture: GestureConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_origin: "http://localhost".to_string(),
            homepage: "about:newtab".to_string(),
            initial_tabs: vec!["about:home".to_string()],
            gesture: GestureConfig::default(),
        }
    }
}
