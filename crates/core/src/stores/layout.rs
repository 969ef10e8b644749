//! Layout store: sidebar and device state, local only

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    pub opened: bool,
    pub without_animation: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self { opened: true, without_animation: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LayoutState {
    pub sidebar: Sidebar,
    pub device: Device,
}

#[derive(Debug, Default)]
pub struct LayoutStore {
    state: RwLock<LayoutState>,
}

impl LayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_sidebar(&self) {
        let mut state = self.state.write();
        state.sidebar.opened = !state.sidebar.opened;
        state.sidebar.without_animation = false;
    }

    pub fn close_sidebar(&self, without_animation: bool) {
        let mut state = self.state.write();
        state.sidebar.opened = false;
        state.sidebar.without_animation = without_animation;
    }

    /// Switch to `device`. Moving to mobile closes the sidebar without animation.
    pub fn toggle_device(&self, device: Device) {
        let mut state = self.state.write();
        state.device = device;
        if device == Device::Mobile {
            state.sidebar = Sidebar { opened: false, without_animation: true };
        }
    }

    pub fn snapshot(&self) -> LayoutState {
        *self.state.read()
    }

    pub fn reset(&self) {
        *self.state.write() = LayoutState::default();
    }
}
