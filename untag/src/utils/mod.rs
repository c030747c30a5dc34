//! Small I/O helpers shared by the commands.

pub mod clipboard;
pub mod input;
