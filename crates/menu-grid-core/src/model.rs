// ============================================================================
// Menu Grid Core - Menu Entry Entity
// File: crates/menu-grid-core/src/model.rs
// Description: Navigation entries, sub-entries and their grid placement
// ============================================================================

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Resize handles every placement carries (the drag grid reads them back).
pub const DEFAULT_RESIZE_HANDLES: [&str; 8] = ["s", "w", "e", "n", "sw", "nw", "se", "ne"];

pub const DEFAULT_COLS: u32 = 6;

/// One navigation item, optionally positioned on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub menu_id: String,

    #[serde(default)]
    pub menu_name: String,

    /// Secondary label shown on the editor tabs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_name: Option<String>,

    #[serde(default)]
    pub href: String,

    /// Open in a new window
    #[serde(default)]
    pub target: bool,

    #[serde(default)]
    pub ga: GaTag,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,

    /// `None` when the field is absent; the renderer then picks its default.
    /// An explicit blank reads as `Some(Unset)` and hides the icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_position: Option<IconPosition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    #[serde(default)]
    pub sub_menu: Vec<MenuEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridPlacement>,

    /// Editor-only marker, accepted on input but never written back
    #[serde(default, skip_serializing)]
    pub is_deleted: bool,

    /// Fields this model does not know about, kept so a save does not drop them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MenuEntry {
    /// Bare entry with every optional field empty.
    pub fn new(menu_id: impl Into<String>) -> Self {
        Self {
            menu_id: menu_id.into(),
            menu_name: String::new(),
            grid_name: None,
            href: String::new(),
            target: false,
            ga: GaTag::default(),
            icon_name: None,
            icon_position: None,
            direction: None,
            sub_menu: Vec::new(),
            grid: None,
            is_deleted: false,
            extra: Map::new(),
        }
    }

    /// Fresh top-level entry as the editor's "add menu" creates it: placed
    /// in the first column of row `existing`, ordered after every other tab.
    pub fn new_top_level(now_millis: u64, existing: usize, cols: u32, gap: u32) -> Self {
        let menu_id = format!("menu_{}", now_millis);
        let mut grid = GridPlacement::default_for(&menu_id, existing as u32, cols, gap);
        grid.tab_order = Some(existing as i64 + 1);

        let mut entry = Self::new(menu_id);
        entry.grid_name = Some(String::new());
        entry.direction = Some(String::new());
        entry.grid = Some(grid);
        entry
    }

    pub fn new_sub_menu(now_millis: u64) -> Self {
        Self::new(format!("submenu_{}", now_millis))
    }

    /// Label used on editor tabs: grid name when set, menu id otherwise.
    pub fn tab_label(&self) -> &str {
        match self.grid_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.menu_id,
        }
    }

    pub fn tab_order(&self) -> i64 {
        self.grid.as_ref().and_then(|g| g.tab_order).unwrap_or(0)
    }
}

/// Analytics tagging triple, passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaTag {
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub page: String,
}

/// Icon side next to a label. `Unset` shows no icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IconPosition {
    Left,
    Right,
    #[default]
    Unset,
}

impl IconPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconPosition::Left => "left",
            IconPosition::Right => "right",
            IconPosition::Unset => "",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != IconPosition::Unset
    }
}

impl FromStr for IconPosition {
    type Err = std::convert::Infallible;

    // Anything other than left/right reads as unset, the way the select box treats it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "left" => IconPosition::Left,
            "right" => IconPosition::Right,
            _ => IconPosition::Unset,
        })
    }
}

impl fmt::Display for IconPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IconPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IconPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .map(|s| s.parse().unwrap_or_default())
            .unwrap_or_default())
    }
}

/// One entry's position and appearance in the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPlacement {
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    #[serde(default = "one")]
    pub w: u32,
    #[serde(default = "one")]
    pub h: u32,

    /// Placement id, mirrors `menuId`
    #[serde(default)]
    pub i: String,

    #[serde(default = "default_resize_handles")]
    pub resize_handles: Vec<String>,

    #[serde(default = "default_cols")]
    pub cols: u32,

    /// Spacing unit in rem
    #[serde(default)]
    pub gap: u32,

    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub grid_width: Option<String>,

    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub grid_height: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_border_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_border_right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_border_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_border_left: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_order: Option<i64>,
}

impl GridPlacement {
    /// 1x1 placement in the first column of `row`.
    pub fn default_for(menu_id: &str, row: u32, cols: u32, gap: u32) -> Self {
        Self {
            x: 0,
            y: row,
            w: 1,
            h: 1,
            i: menu_id.to_string(),
            resize_handles: default_resize_handles(),
            cols,
            gap,
            grid_width: None,
            grid_height: None,
            grid_border_top: None,
            grid_border_right: None,
            grid_border_bottom: None,
            grid_border_left: None,
            tab_order: None,
        }
    }

    pub fn border(&self, side: BorderSide) -> Option<&str> {
        match side {
            BorderSide::Top => self.grid_border_top.as_deref(),
            BorderSide::Right => self.grid_border_right.as_deref(),
            BorderSide::Bottom => self.grid_border_bottom.as_deref(),
            BorderSide::Left => self.grid_border_left.as_deref(),
        }
    }

    pub fn set_border(&mut self, side: BorderSide, value: String) {
        let slot = match side {
            BorderSide::Top => &mut self.grid_border_top,
            BorderSide::Right => &mut self.grid_border_right,
            BorderSide::Bottom => &mut self.grid_border_bottom,
            BorderSide::Left => &mut self.grid_border_left,
        };
        *slot = Some(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl BorderSide {
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Top,
        BorderSide::Right,
        BorderSide::Bottom,
        BorderSide::Left,
    ];

    /// CSS property the side renders to.
    pub fn css_property(&self) -> &'static str {
        match self {
            BorderSide::Top => "border-top",
            BorderSide::Right => "border-right",
            BorderSide::Bottom => "border-bottom",
            BorderSide::Left => "border-left",
        }
    }
}

/// Rectangle the drag/resize grid reports for one placed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub i: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl LayoutItem {
    pub fn new(i: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { i: i.into(), x, y, w, h }
    }

    pub fn from_entry(entry: &MenuEntry) -> Option<Self> {
        entry.grid.as_ref().map(|g| Self {
            i: entry.menu_id.clone(),
            x: g.x,
            y: g.y,
            w: g.w,
            h: g.h,
        })
    }

    /// Layout of every entry that has a placement, in list order.
    pub fn from_entries(entries: &[MenuEntry]) -> Vec<Self> {
        entries.iter().filter_map(Self::from_entry).collect()
    }
}

fn one() -> u32 {
    1
}

fn default_cols() -> u32 {
    DEFAULT_COLS
}

pub fn default_resize_handles() -> Vec<String> {
    DEFAULT_RESIZE_HANDLES.iter().map(|h| h.to_string()).collect()
}

// Size overrides come from number inputs, so older documents hold either form.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
