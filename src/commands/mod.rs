//! CLI commands

pub mod css;
pub mod edit;
pub mod list;
pub mod new;
pub mod render;
pub mod show;
pub mod view;
