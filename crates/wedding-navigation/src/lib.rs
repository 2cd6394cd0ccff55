//! Role-keyed navigation tile tables for the wedding home page.

mod tab_table;

pub use tab_table::{ADMIN_TABS, COMMON_TABS};

use serde::Serialize;
use wedding_access::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Compile-time declaration of one navigation tile.
pub struct NavTabSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub page: &'static str,
    pub badge: Option<&'static str>,
}

impl NavTabSpec {
    pub fn to_nav_tab(&self) -> NavTab {
        NavTab {
            id: self.id.to_string(),
            title: self.title.to_string(),
            icon: self.icon.to_string(),
            description: self.description.to_string(),
            page: self.page.to_string(),
            badge: self.badge.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Owned navigation tile handed to the renderer.
pub struct NavTab {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub description: String,
    pub page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Returns the tiles for `role`.
///
/// Admins get the admin table in place of the common one (it repeats the
/// shared entries it wants to keep). Every call returns a fresh copy.
pub fn select_tabs(role: Role) -> Vec<NavTab> {
    let table = match role {
        Role::Admin => ADMIN_TABS,
        Role::Guest => COMMON_TABS,
    };
    let tabs = table.iter().map(NavTabSpec::to_nav_tab).collect::<Vec<_>>();
    tracing::debug!(role = role.as_str(), tab_count = tabs.len(), "navigation tabs selected");
    tabs
}
