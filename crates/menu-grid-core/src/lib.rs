//! # Menu Grid Core
//!
//! Domain model, grid layout engine, border codec, editor view-model and
//! render projection for the navigation menu grid. No I/O lives here; the
//! store is reached through the `MenuRepository` port.

pub mod border;
pub mod clock;
pub mod command;
pub mod editor;
pub mod error;
pub mod layout;
pub mod model;
pub mod ordering;
pub mod render;
pub mod repository;

pub use border::{BorderParts, BorderStyle};
pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{MenuCommand, SaveBody};
pub use editor::{EntryField, GridSettings, MenuEditor, SubMenuField};
pub use error::DomainError;
pub use layout::OccupancyGrid;
pub use model::*;
pub use render::NavigationLayout;
pub use repository::MenuRepository;
