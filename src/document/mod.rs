//! Workflow document model.
//!
//! Documents are parsed with serde_yaml and converted into a small tagged
//! tree ([`Node`]) whose accessors answer "absent or wrong shape" with `None`
//! instead of failing. Typed views ([`Workflow`], [`Job`], [`Step`],
//! [`Matrix`]) sit on top of the tree and borrow from it.

mod loader;
mod node;
mod workflow;


pub use loader::{Loaded, load, parse};
pub use node::{Node, Scalar};
pub use workflow::{Job, Matrix, Step, Workflow};
