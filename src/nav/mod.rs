//! Navigation state machine, filter engine, and view selection

mod filter;
mod state;
mod view;

pub use filter::{FilterState, Query, visible_notes};
pub use state::{Action, DetailOrigin, Drill, NavError, NavigationState, Navigator, UserMode, View};
pub use view::{APP_TITLE, Screen, ScreenTag, select_screen};
