//! # Easel Model
//!
//! Data model of the document tree edited by the builder.
//!
//! A document is a list holding a single `__body` container. Every node has a
//! stable id, a user label, a [`NodeKind`] tag, base (desktop) styles, optional
//! per-breakpoint style deltas, and content that is either children or a leaf
//! record.
//!
//! ```rust
//! use easel_model::{Device, Node, NodeKind};
//!
//! let body = Node::body().with_child(
//!     Node::new("t1", NodeKind::Text)
//!         .with_style("fontSize", 12)
//!         .with_responsive_style(Device::Mobile, "fontSize", 10)
//!         .with_field("innerText", "Hello"),
//! );
//! assert!(body.contains("t1"));
//! ```

pub mod breakpoint;
pub mod error;
pub mod id_generator;
pub mod node;
pub mod serializer;
pub mod tree;
pub mod validation;
pub mod visitor;

pub use breakpoint::Device;
pub use error::{ModelError, ModelResult};
pub use id_generator::IdGenerator;
pub use node::{
    Content, FieldMap, LeafContent, Node, NodeKind, ResponsiveMap, StyleMap, BODY_ID,
};
pub use serde_json::Value;
pub use validation::{diagnose, validate, Diagnostic, DiagnosticLevel};
