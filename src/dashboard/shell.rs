//! Dashboard shell: sidebar navigation and the injected UI context.
//!
//! Theme and sidebar state are passed in explicitly rather than read from
//! any global; the service default comes from config and callers may
//! override it per request.

use serde::{Deserialize, Serialize};

/// Sidebar width in pixels when expanded.
pub const SIDEBAR_EXPANDED_WIDTH: u16 = 256;
/// Sidebar width in pixels when collapsed to icons.
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the client's OS preference.
    #[default]
    System,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// UI state a dashboard page is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiContext {
    pub theme: Theme,
    pub sidebar_collapsed: bool,
}

impl UiContext {
    pub fn sidebar_width(&self) -> u16 {
        if self.sidebar_collapsed {
            SIDEBAR_COLLAPSED_WIDTH
        } else {
            SIDEBAR_EXPANDED_WIDTH
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
    /// Only meaningful for items with children.
    pub expanded: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

impl NavItem {
    fn link(label: &'static str, href: &'static str) -> Self {
        Self {
            label,
            href,
            active: false,
            expanded: false,
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    /// `None` for the untitled top section.
    pub title: Option<&'static str>,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardShell {
    pub ui: UiContext,
    pub sidebar_width: u16,
    pub sections: Vec<NavSection>,
}

impl DashboardShell {
    /// Build the shell for `current_path`, marking the active item and
    /// expanding any parent of the active child.
    pub fn build(ui: UiContext, current_path: &str) -> Self {
        let mut sections = menu();
        for item in sections.iter_mut().flat_map(|s| s.items.iter_mut()) {
            item.active = if item.children.is_empty() {
                item.href == current_path
            } else {
                is_active(item.href, current_path)
            };
            for child in &mut item.children {
                child.active = child.href == current_path;
            }
            item.expanded = item.children.iter().any(|c| c.active);
        }
        Self {
            ui,
            sidebar_width: ui.sidebar_width(),
            sections,
        }
    }
}

/// A parent item is active on its own path and anything beneath it.
fn is_active(href: &str, current_path: &str) -> bool {
    current_path == href
        || current_path
            .strip_prefix(href)
            .is_some_and(|rest| rest.starts_with('/'))
}

fn menu() -> Vec<NavSection> {
    let links = |items: &[(&'static str, &'static str)]| -> Vec<NavItem> {
        items
            .iter()
            .map(|&(label, href)| NavItem::link(label, href))
            .collect()
    };

    let mut applications = vec![NavItem::link("Logistics", "/dashboard/logistics").with_children(
        links(&[
            ("Analytics", "/dashboard/logistics/analytics"),
            ("Tracking", "/dashboard/logistics/tracking"),
            ("Data", "/dashboard/logistics/data"),
        ]),
    )];
    applications.extend(links(&[
        ("Education", "/dashboard/education"),
        ("Cryptocurrency", "/dashboard/cryptocurrency"),
        ("Invoicing", "/dashboard/invoicing"),
        ("Restaurant", "/dashboard/restaurant"),
        ("Banking", "/dashboard/banking"),
        ("HR Management", "/dashboard/hr"),
        ("Ticketing", "/dashboard/ticketing"),
        ("Point of Sales", "/dashboard/pos"),
        ("Hospital Management", "/dashboard/hospital"),
        ("Kanban", "/dashboard/kanban"),
        ("File Manager", "/dashboard/files"),
        ("Contacts", "/dashboard/contacts"),
        ("E-mail", "/dashboard/email"),
        ("Messaging", "/dashboard/messaging"),
        ("E-commerce", "/dashboard/ecommerce"),
        ("Calendar", "/dashboard/calendar"),
    ]));

    vec![
        NavSection {
            title: None,
            items: links(&[("Dashboard", "/dashboard"), ("Your Account", "/account")]),
        },
        NavSection {
            title: Some("APPLICATIONS"),
            items: applications,
        },
        NavSection {
            title: Some("COMPONENTS"),
            items: links(&[
                ("Cards", "/components/cards"),
                ("Forms", "/components/forms"),
                ("Tables", "/components/tables"),
                ("Icons", "/components/icons"),
                ("Charts", "/components/charts"),
                ("Authentications", "/components/auth"),
            ]),
        },
        NavSection {
            title: Some("SETTINGS"),
            items: links(&[
                ("Settings", "/settings"),
                ("Roles & Permissions", "/settings/roles"),
                ("Payments", "/settings/payments"),
                ("Users", "/settings/users"),
            ]),
        },
    ]
}
