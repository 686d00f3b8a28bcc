mod config;
mod flatten;
mod node;
mod ops;
mod path;
mod projection;
mod reorder;
mod rows;
mod state;

pub mod demo;

pub use crate::config::*;
pub use crate::flatten::*;
pub use crate::node::*;
pub use crate::ops::*;
pub use crate::path::*;
pub use crate::projection::*;
pub use crate::reorder::*;
pub use crate::rows::*;
pub use crate::state::*;
