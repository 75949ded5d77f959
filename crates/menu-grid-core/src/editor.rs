//! ============================================================================
//! MENU EDITOR VIEW MODEL
//! ============================================================================
//!
//! Local state behind the grid editor: the entry list being edited, the
//! layout the drag/resize grid reports, grid settings, the open tab, pending
//! tab orders and the transient colour inputs.
//!
//! Nothing here touches the store. Save, delete and confirm produce a
//! `MenuCommand`; the caller sends it and feeds the resulting list back
//! through `apply_saved`. Closing the editor before that loses the edits.

use std::collections::HashMap;

use tracing::debug;

use crate::border::{normalize_color_input, BorderParts, BorderStyle};
use crate::clock::{Clock, SystemClock};
use crate::command::MenuCommand;
use crate::layout::OccupancyGrid;
use crate::model::{
    default_resize_handles, BorderSide, GridPlacement, IconPosition, LayoutItem, MenuEntry,
    DEFAULT_COLS,
};
use crate::ordering::sort_for_layout;

pub use crate::layout::{MAX_COLS, MIN_COLS};

/// Delay between a colour-picker change and its commit to the entry
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Column count and gap (rem) shared by every placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSettings {
    pub cols: u32,
    pub gap: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            gap: 0,
        }
    }
}

/// Single-field edit on a top-level entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryField {
    MenuName(String),
    GridName(String),
    MenuId(String),
    Href(String),
    Target(bool),
    IconName(String),
    IconPosition(IconPosition),
    /// Pixel width override, blank clears it
    GridWidth(String),
    /// Pixel height override, blank clears it
    GridHeight(String),
}

/// Single-field edit on a sub-menu entry
#[derive(Debug, Clone, PartialEq)]
pub enum SubMenuField {
    MenuName(String),
    MenuId(String),
    Href(String),
    IconName(String),
    IconPosition(IconPosition),
    Target(bool),
}

/// Colour input state for one border side: what the user sees now, and the
/// picker value waiting to be committed.
#[derive(Debug, Clone, Default)]
struct ColorDraft {
    input: String,
    pending: Option<PendingColor>,
}

#[derive(Debug, Clone)]
struct PendingColor {
    color: String,
    due_at_ms: u64,
}

type DraftKey = (String, BorderSide);

pub struct MenuEditor<C: Clock = SystemClock> {
    items: Vec<MenuEntry>,
    layout: Vec<LayoutItem>,
    settings: GridSettings,
    active_tab: Option<String>,
    tab_orders: HashMap<String, Option<i64>>,
    color_drafts: HashMap<DraftKey, ColorDraft>,
    debounce_ms: u64,
    clock: C,
}

impl MenuEditor<SystemClock> {
    pub fn new(settings: GridSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> MenuEditor<C> {
    pub fn with_clock(settings: GridSettings, clock: C) -> Self {
        Self {
            items: Vec::new(),
            layout: Vec::new(),
            settings,
            active_tab: None,
            tab_orders: HashMap::new(),
            color_drafts: HashMap::new(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            clock,
        }
    }

    pub fn with_debounce(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    // ========================================================================
    // READ ACCESS
    // ========================================================================

    pub fn items(&self) -> &[MenuEntry] {
        &self.items
    }

    pub fn layout(&self) -> &[LayoutItem] {
        &self.layout
    }

    pub fn settings(&self) -> GridSettings {
        self.settings
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    pub fn active_entry(&self) -> Option<&MenuEntry> {
        self.active_tab.as_deref().and_then(|id| self.entry(id))
    }

    pub fn entry(&self, menu_id: &str) -> Option<&MenuEntry> {
        self.items.iter().find(|e| e.menu_id == menu_id)
    }

    /// Tab order typed for an entry, `None` when unset
    pub fn tab_order(&self, menu_id: &str) -> Option<i64> {
        self.tab_orders.get(menu_id).copied().flatten()
    }

    /// Occupancy matrix of the current (possibly unconfirmed) layout
    pub fn occupancy(&self) -> OccupancyGrid {
        OccupancyGrid::build(&self.layout, self.settings.cols)
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Initial load: take the stored list and close any open tab.
    pub fn load(&mut self, entries: Vec<MenuEntry>) {
        self.active_tab = None;
        self.color_drafts.clear();
        self.replace_items(entries);
    }

    /// Result of a successful write. The open tab stays open if its entry
    /// still exists.
    pub fn apply_saved(&mut self, entries: Vec<MenuEntry>) {
        self.replace_items(entries);
        if let Some(id) = &self.active_tab {
            if self.entry(id).is_none() {
                self.active_tab = None;
            }
        }
        let items = &self.items;
        self.color_drafts
            .retain(|(id, _), _| items.iter().any(|e| &e.menu_id == id));
    }

    fn replace_items(&mut self, entries: Vec<MenuEntry>) {
        self.tab_orders = entries
            .iter()
            .map(|e| (e.menu_id.clone(), e.grid.as_ref().and_then(|g| g.tab_order)))
            .collect();
        self.items = entries;
        self.regenerate_layout();
    }

    fn regenerate_layout(&mut self) {
        self.layout = LayoutItem::from_entries(&self.items);
    }

    // ========================================================================
    // GRID SETTINGS & LAYOUT
    // ========================================================================

    /// Drag/resize result from the grid widget
    pub fn layout_changed(&mut self, layout: Vec<LayoutItem>) {
        debug!("Layout changed ({} items)", layout.len());
        self.layout = layout;
    }

    /// Accepts 1..=12 columns, ignores anything else.
    pub fn set_cols(&mut self, cols: u32) -> bool {
        if !(MIN_COLS..=MAX_COLS).contains(&cols) {
            return false;
        }
        self.settings.cols = cols;
        true
    }

    pub fn set_gap(&mut self, gap: u32) {
        self.settings.gap = gap;
    }

    // ========================================================================
    // TABS
    // ========================================================================

    /// Open the entry's editor, or close it if it is already open.
    pub fn toggle_tab(&mut self, menu_id: &str) {
        if self.active_tab.as_deref() == Some(menu_id) {
            self.active_tab = None;
        } else {
            self.active_tab = Some(menu_id.to_string());
        }
    }

    /// Tab order input; anything that is not an integer clears it.
    pub fn set_tab_order(&mut self, menu_id: &str, text: &str) {
        let order = text.trim().parse::<i64>().ok();
        self.tab_orders.insert(menu_id.to_string(), order);
    }

    // ========================================================================
    // ENTRY EDITS
    // ========================================================================

    /// Append a blank entry below the others and open it.
    pub fn add_menu(&mut self) -> String {
        let entry = MenuEntry::new_top_level(
            self.clock.now_millis(),
            self.items.len(),
            self.settings.cols,
            self.settings.gap,
        );
        let menu_id = entry.menu_id.clone();

        self.tab_orders.insert(menu_id.clone(), entry.grid.as_ref().and_then(|g| g.tab_order));
        self.items.push(entry);
        self.regenerate_layout();
        self.active_tab = Some(menu_id.clone());

        debug!("Added menu {}", menu_id);
        menu_id
    }

    /// Returns false when no entry has `menu_id`.
    pub fn update(&mut self, menu_id: &str, field: EntryField) -> bool {
        let row = self.items.len() as u32;
        let settings = self.settings;
        let Some(entry) = self.items.iter_mut().find(|e| e.menu_id == menu_id) else {
            return false;
        };

        match field {
            EntryField::MenuName(v) => entry.menu_name = v,
            EntryField::GridName(v) => entry.grid_name = Some(v),
            EntryField::Href(v) => entry.href = v,
            EntryField::Target(v) => entry.target = v,
            EntryField::IconName(v) => entry.icon_name = Some(v),
            EntryField::IconPosition(v) => entry.icon_position = Some(v),
            EntryField::GridWidth(v) => {
                grid_or_default(entry, row, settings).grid_width = non_blank(v);
            }
            EntryField::GridHeight(v) => {
                grid_or_default(entry, row, settings).grid_height = non_blank(v);
            }
            EntryField::MenuId(new_id) => {
                entry.menu_id = new_id.clone();
                if let Some(grid) = entry.grid.as_mut() {
                    grid.i = new_id.clone();
                }
                self.rename_references(menu_id, &new_id);
            }
        }
        true
    }

    // Keys that follow an entry's id through an id edit.
    fn rename_references(&mut self, old_id: &str, new_id: &str) {
        for item in self.layout.iter_mut().filter(|l| l.i == old_id) {
            item.i = new_id.to_string();
        }
        if let Some(order) = self.tab_orders.remove(old_id) {
            self.tab_orders.insert(new_id.to_string(), order);
        }
        if self.active_tab.as_deref() == Some(old_id) {
            self.active_tab = Some(new_id.to_string());
        }
        let moved: Vec<DraftKey> = self
            .color_drafts
            .keys()
            .filter(|(id, _)| id == old_id)
            .cloned()
            .collect();
        for key in moved {
            if let Some(draft) = self.color_drafts.remove(&key) {
                self.color_drafts.insert((new_id.to_string(), key.1), draft);
            }
        }
    }

    // ========================================================================
    // SUB-MENUS
    // ========================================================================

    pub fn add_sub_menu(&mut self, menu_id: &str) -> Option<String> {
        let now = self.clock.now_millis();
        let entry = self.items.iter_mut().find(|e| e.menu_id == menu_id)?;
        let sub = MenuEntry::new_sub_menu(now);
        let sub_id = sub.menu_id.clone();
        entry.sub_menu.push(sub);
        Some(sub_id)
    }

    pub fn remove_sub_menu(&mut self, menu_id: &str, index: usize) -> bool {
        match self.items.iter_mut().find(|e| e.menu_id == menu_id) {
            Some(entry) if index < entry.sub_menu.len() => {
                entry.sub_menu.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn update_sub_menu(&mut self, menu_id: &str, index: usize, field: SubMenuField) -> bool {
        let Some(sub) = self
            .items
            .iter_mut()
            .find(|e| e.menu_id == menu_id)
            .and_then(|e| e.sub_menu.get_mut(index))
        else {
            return false;
        };

        match field {
            SubMenuField::MenuName(v) => sub.menu_name = v,
            SubMenuField::MenuId(v) => sub.menu_id = v,
            SubMenuField::Href(v) => sub.href = v,
            SubMenuField::IconName(v) => sub.icon_name = Some(v),
            SubMenuField::IconPosition(v) => sub.icon_position = Some(v),
            SubMenuField::Target(v) => sub.target = v,
        }
        true
    }

    // ========================================================================
    // BORDERS
    // ========================================================================

    pub fn border_parts(&self, menu_id: &str, side: BorderSide) -> BorderParts {
        let current = self
            .entry(menu_id)
            .and_then(|e| e.grid.as_ref())
            .and_then(|g| g.border(side))
            .unwrap_or("");
        BorderParts::decode(current)
    }

    pub fn set_border_width(&mut self, menu_id: &str, side: BorderSide, width: Option<u32>) -> bool {
        let border = self.border_parts(menu_id, side).with_width(width).encode();
        self.write_border(menu_id, side, border)
    }

    pub fn set_border_style(
        &mut self,
        menu_id: &str,
        side: BorderSide,
        style: Option<BorderStyle>,
    ) -> bool {
        let border = self.border_parts(menu_id, side).with_style(style).encode();
        self.write_border(menu_id, side, border)
    }

    /// Colour picker change: shown at once, committed after the debounce
    /// delay by `tick`. A newer pick restarts the delay.
    pub fn pick_border_color(&mut self, menu_id: &str, side: BorderSide, color: &str) {
        let due_at_ms = self.clock.now_millis() + self.debounce_ms;
        let draft = self
            .color_drafts
            .entry((menu_id.to_string(), side))
            .or_default();
        draft.input = color.to_string();
        draft.pending = Some(PendingColor {
            color: color.to_string(),
            due_at_ms,
        });
    }

    /// Free-text colour entry. The text is always kept as the visible input;
    /// it is committed only when it normalizes to `#RRGGBB`.
    pub fn type_border_color(&mut self, menu_id: &str, side: BorderSide, text: &str) -> bool {
        let draft = self
            .color_drafts
            .entry((menu_id.to_string(), side))
            .or_default();
        draft.input = text.to_string();

        let Some(color) = normalize_color_input(text) else {
            return false;
        };
        draft.pending = None;
        self.commit_color(menu_id, side, &color)
    }

    /// Colour shown in the text field
    pub fn color_input(&self, menu_id: &str, side: BorderSide) -> String {
        match self.color_drafts.get(&(menu_id.to_string(), side)) {
            Some(draft) => draft.input.clone(),
            None => self.border_parts(menu_id, side).color().to_string(),
        }
    }

    /// Commit every picker change whose delay has passed. Returns how many
    /// borders changed.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now_millis();
        let due: Vec<(DraftKey, String)> = self
            .color_drafts
            .iter_mut()
            .filter(|(_, d)| d.pending.as_ref().is_some_and(|p| p.due_at_ms <= now))
            .filter_map(|(key, d)| d.pending.take().map(|p| (key.clone(), p.color)))
            .collect();

        due.into_iter()
            .filter(|((menu_id, side), color)| self.commit_color(menu_id, *side, color))
            .count()
    }

    fn commit_color(&mut self, menu_id: &str, side: BorderSide, color: &str) -> bool {
        let border = self.border_parts(menu_id, side).encode_color_only(color);
        self.write_border(menu_id, side, border)
    }

    fn write_border(&mut self, menu_id: &str, side: BorderSide, border: String) -> bool {
        let row = self.items.len() as u32;
        let settings = self.settings;
        match self.items.iter_mut().find(|e| e.menu_id == menu_id) {
            Some(entry) => {
                grid_or_default(entry, row, settings).set_border(side, border);
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // PERSISTENCE REQUESTS
    // ========================================================================

    /// Full list with the entry saved into it.
    pub fn save_request(&self, menu_id: &str) -> Option<MenuCommand> {
        self.entry(menu_id)
            .cloned()
            .map(|entry| self.save_entry_request(entry))
    }

    /// Full list with `entry` replacing its namesake, or appended when new.
    /// An entry without a placement gets a 1x1 one below the others.
    pub fn save_entry_request(&self, mut entry: MenuEntry) -> MenuCommand {
        if entry.grid.is_none() {
            entry.grid = Some(GridPlacement::default_for(
                &entry.menu_id,
                self.items.len() as u32,
                self.settings.cols,
                self.settings.gap,
            ));
        }

        let mut found = false;
        let mut entries: Vec<MenuEntry> = self
            .items
            .iter()
            .map(|item| {
                if item.menu_id == entry.menu_id {
                    found = true;
                    entry.clone()
                } else {
                    item.clone()
                }
            })
            .collect();
        if !found {
            entries.push(entry);
        }

        MenuCommand::Replace(entries)
    }

    pub fn delete_request(&self, menu_id: &str) -> Option<MenuCommand> {
        self.entry(menu_id)
            .map(|e| MenuCommand::Delete(e.menu_id.clone()))
    }

    /// Local removal after a confirmed delete.
    pub fn mark_deleted(&mut self, menu_id: &str) {
        if let Some(entry) = self.items.iter_mut().find(|e| e.menu_id == menu_id) {
            entry.is_deleted = true;
        }
        self.items.retain(|e| !e.is_deleted);
        self.tab_orders.remove(menu_id);
        self.color_drafts.retain(|(id, _), _| id != menu_id);
        self.active_tab = None;
        self.regenerate_layout();
    }

    /// Order entries by tab order then grid position, and stamp every entry
    /// with its current rectangle, the shared cols/gap and its tab order.
    pub fn confirm_layout_request(&self) -> MenuCommand {
        let grid = self.occupancy();
        let mut entries = self.items.clone();
        sort_for_layout(&mut entries, &grid, |e| self.tab_order(&e.menu_id).unwrap_or(0));

        for entry in entries.iter_mut() {
            let rect = self.layout.iter().find(|l| l.i == entry.menu_id);
            let mut placement = entry.grid.take().unwrap_or_else(|| {
                GridPlacement::default_for(&entry.menu_id, 0, self.settings.cols, self.settings.gap)
            });

            placement.x = rect.map_or(0, |r| r.x);
            placement.y = rect.map_or(0, |r| r.y);
            placement.w = rect.map_or(1, |r| r.w);
            placement.h = rect.map_or(1, |r| r.h);
            placement.i = entry.menu_id.clone();
            placement.resize_handles = default_resize_handles();
            placement.cols = self.settings.cols;
            placement.gap = self.settings.gap;
            placement.tab_order = Some(self.tab_order(&entry.menu_id).unwrap_or(0));

            entry.grid = Some(placement);
        }

        MenuCommand::Replace(entries)
    }
}

fn grid_or_default(entry: &mut MenuEntry, row: u32, settings: GridSettings) -> &mut GridPlacement {
    let menu_id = entry.menu_id.clone();
    entry
        .grid
        .get_or_insert_with(|| GridPlacement::default_for(&menu_id, row, settings.cols, settings.gap))
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
