//! Text helpers shared by the renderer and the CLI

mod html;

pub use html::*;
