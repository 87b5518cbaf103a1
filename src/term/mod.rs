//! Terminal backend capability.
//!
//! This module isolates everything that touches a real terminal:
//!
//! - **backend**: `Screen` / `Surface` traits and `Rect` geometry
//! - **crossterm**: production implementation on crossterm
//! - **mock**: in-memory implementation for tests and headless embedding
//! - **input**: key decoding and the `getch` token mapping

pub mod backend;
pub mod crossterm;
pub mod input;
pub mod mock;

pub use self::backend::{Rect, Screen, Surface};
pub use self::crossterm::CrosstermScreen;
pub use self::input::Key;
pub use self::mock::MockScreen;
