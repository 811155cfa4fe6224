//! Application-level UI state passed explicitly between the service and its callers.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Home,
    Map,
    Teams,
    Matches,
    Stats,
    Assistant,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Home,
        Tab::Map,
        Tab::Teams,
        Tab::Matches,
        Tab::Stats,
        Tab::Assistant,
    ];
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub selected_tab: Tab,
}

impl AppState {
    pub fn select(self, tab: Tab) -> Self {
        Self { selected_tab: tab }
    }
}
