//! Host DOM tree
//!
//! An arena-backed document tree that stands in for a live browser DOM:
//! built by hand through the builder API, or parsed from a CDP
//! `DOM.getDocument` snapshot.
//!
//! ```text
//! CDP JSON ─┐
//!           ├→ DomArena (owned) → NodeId (u32) → facade / traversal
//! builder ──┘
//! ```

pub mod arena;
pub mod error;
pub mod service;
pub mod types;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use service::{DomService, DomServiceConfig};
pub use types::*;
