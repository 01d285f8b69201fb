//! Shared test doubles

#![allow(dead_code)]

pub mod tabs;
pub mod toasts;

pub use tabs::{ScriptedTabs, TabStep};
pub use toasts::{create_test_catalog, create_test_toasts, filter};
