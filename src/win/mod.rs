//! Window registry and command dispatch core.
//!
//! This module turns terminal windows into first-class script commands:
//!
//! - **handle**: process-unique handle identifier allocation
//! - **registry**: handle identifier -> owned surface mapping with teardown
//! - **dispatch**: per-handle method routing and extension delegation
//! - **session**: raw-mode lifecycle bound to the root handle
//! - **commands**: the static `curses.*` package surface
//!
//! # Module Hierarchy
//!
//! ```text
//! win/
//! ├── mod.rs       - Module exports
//! ├── handle.rs    - HandleAllocator and the handle namespace
//! ├── registry.rs  - WindowRegistry (resource ownership)
//! ├── dispatch.rs  - WindowCommand method routing
//! ├── session.rs   - Session lifecycle manager
//! └── commands.rs  - Static package commands
//! ```

pub mod commands;
pub mod dispatch;
pub mod handle;
pub mod registry;
pub mod session;

pub use commands::register_package;
pub use dispatch::WindowCommand;
pub use handle::{HandleAllocator, EXTENSION_PREFIX, HANDLE_PREFIX, ROOT_HANDLE};
pub use registry::WindowRegistry;
pub use session::Session;
