//! Terminal application shell: the state the event loop drives.

mod state;

pub use state::{App, DeckPane, Focus, Screen, SidebarEntry};
