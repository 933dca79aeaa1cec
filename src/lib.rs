//! touchy: per-frame AABB contact tracking (enter/stay/exit), detection only

pub mod types;
pub mod error;
pub mod api;
pub mod body;
pub mod narrowphase;
pub mod engine;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::error::ConfigError;
pub use crate::body::Body;
pub use crate::engine::CollisionEngine;
