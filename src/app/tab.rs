// SPDX-License-Identifier: MPL-2.0
//! Tabs of the lower panel.

/// Tabs the user can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Examples,
    Info,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Examples, Tab::Info];

    /// Key of the tab label.
    pub fn i18n_key(self) -> &'static str {
        match self {
            Tab::Examples => "tabs.examples",
            Tab::Info => "tabs.info",
        }
    }
}
