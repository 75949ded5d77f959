/// Render view projection
/// Read-only view of the stored list as a CSS grid of links: container
/// template plus one positioned, styled item per placed entry.

use serde::Serialize;

use crate::layout::{OccupancyGrid, MAX_COLS, MIN_COLS};
use crate::model::{BorderSide, IconPosition, LayoutItem, MenuEntry};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationLayout {
    pub cols: u32,
    pub gap: u32,
    pub template_columns: String,
    /// One quoted line per row, newline separated
    pub template_areas: String,
    /// Inline style for the grid container
    pub container_style: String,
    pub items: Vec<NavItem>,
}

/// Direction rendered when an entry carries none
pub const DEFAULT_DIRECTION: &str = "vertical";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub menu_id: String,
    pub label: String,
    /// Passed through to the page as `data-direction`
    pub direction: String,
    /// `None` renders the label as plain text
    pub href: Option<String>,
    pub target: &'static str,
    pub icon: Option<NavIcon>,
    pub style: String,
    pub sub_items: Vec<NavSubItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSubItem {
    pub menu_id: String,
    pub label: String,
    pub href: String,
    pub target: &'static str,
    pub icon: Option<NavIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavIcon {
    pub class_name: String,
    pub left: bool,
    pub right: bool,
}

impl NavigationLayout {
    /// Project the stored list. Columns and gap come from the first entry's
    /// placement; only entries with a placement are laid out.
    pub fn project(entries: &[MenuEntry], default_cols: u32) -> Self {
        let first = entries.first().and_then(|e| e.grid.as_ref());
        let cols = first
            .map(|g| g.cols)
            .filter(|c| *c > 0)
            .unwrap_or(default_cols)
            .clamp(MIN_COLS, MAX_COLS);
        let gap = first.map(|g| g.gap).unwrap_or(0);

        let grid = OccupancyGrid::build(&LayoutItem::from_entries(entries), cols);
        let template_columns = format!("repeat({}, 1fr)", cols);
        let template_areas = grid.template_areas();

        let container_style = format!(
            "display: grid; grid-template-columns: {}; grid-template-areas: {}; gap: {}rem; padding: {}rem",
            template_columns,
            template_areas.replace('\n', " "),
            gap,
            gap
        );

        let items = entries
            .iter()
            .filter(|e| e.grid.is_some())
            .map(NavItem::from_entry)
            .collect();

        Self {
            cols,
            gap,
            template_columns,
            template_areas,
            container_style,
            items,
        }
    }
}

impl NavItem {
    fn from_entry(entry: &MenuEntry) -> Self {
        let position = entry.icon_position.unwrap_or(IconPosition::Right);

        let sub_items = entry
            .sub_menu
            .iter()
            .map(|sub| NavSubItem {
                menu_id: sub.menu_id.clone(),
                label: sub.menu_name.clone(),
                href: sub.href.clone(),
                target: link_target(sub.target),
                icon: nav_icon(
                    sub.icon_name.as_deref(),
                    effective_position(sub.icon_position, position),
                ),
            })
            .collect();

        Self {
            menu_id: entry.menu_id.clone(),
            label: entry.menu_name.clone(),
            direction: entry
                .direction
                .clone()
                .unwrap_or_else(|| DEFAULT_DIRECTION.to_string()),
            href: Some(entry.href.clone()).filter(|h| !h.is_empty()),
            target: link_target(entry.target),
            icon: nav_icon(entry.icon_name.as_deref(), position),
            style: item_style(entry),
            sub_items,
        }
    }
}

fn item_style(entry: &MenuEntry) -> String {
    let mut rules = vec![format!("grid-area: {}", entry.menu_id)];

    if let Some(grid) = &entry.grid {
        if let Some(width) = grid.grid_width.as_deref().and_then(size_css) {
            rules.push(format!("width: {}", width));
        }
        if let Some(height) = grid.grid_height.as_deref().and_then(size_css) {
            rules.push(format!("height: {}", height));
        }
        for side in BorderSide::ALL {
            if let Some(border) = grid.border(side).filter(|b| !b.trim().is_empty()) {
                rules.push(format!("{}: {}", side.css_property(), border));
            }
        }
    }

    rules.join("; ")
}

/// Bare numbers are pixels; anything else ("100%", "auto") is used as is.
fn size_css(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else if value.parse::<f64>().is_ok() {
        Some(format!("{}px", value))
    } else {
        Some(value.to_string())
    }
}

fn link_target(new_window: bool) -> &'static str {
    if new_window {
        "_blank"
    } else {
        "_self"
    }
}

/// Sub-items use their own side when it names one, the parent's otherwise.
fn effective_position(own: Option<IconPosition>, fallback: IconPosition) -> IconPosition {
    match own {
        Some(position) if position.is_set() => position,
        _ => fallback,
    }
}

fn nav_icon(class_name: Option<&str>, position: IconPosition) -> Option<NavIcon> {
    if !position.is_set() {
        return None;
    }
    let class_name = class_name.filter(|c| !c.trim().is_empty())?;
    Some(NavIcon {
        class_name: class_name.to_string(),
        left: position == IconPosition::Left,
        right: position == IconPosition::Right,
    })
}
