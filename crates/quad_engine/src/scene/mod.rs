//! Scene layer
//!
//! Bridges gameplay entities and the collision registry:
//!
//! ```text
//! World (entities)
//!      ↓
//! SceneNode (QuadProvider)  ──→  CollisionRegistry
//!      ↑
//! CommandQueue (deferred add/remove, flushed after the step)
//! ```

mod deferred;
mod node;

pub use deferred::{CommandQueue, DeferredCall, SceneCommand};
pub use node::{QuadProvider, SceneNode, Transform2D};
