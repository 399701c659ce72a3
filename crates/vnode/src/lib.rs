//! DOM → VNode reconstruction
//!
//! Rebuilds the snabbdom-style virtual tree for a subtree that is already
//! on screen (server-rendered markup, or DOM produced by a previous
//! session), so the diff/patch engine can take it over without re-creating
//! it.
//!
//! ```text
//! live tree ──TreeFacade──→ Reconstructor ──→ VNode<Handle> ──→ engine
//!  (DomArena | web_sys::Node | your own)          └─ elm = live handle
//! ```
//!
//! The reserved attribute [`KEY_ATTRIBUTE`] (`data-dumdom-key`) carries the
//! list-reconciliation key through server rendering; it ends up in
//! `VNode::key` instead of the generic attributes.
//!
//! ```
//! use dom::DomArena;
//!
//! let mut arena = DomArena::new();
//! let div = arena.create_element("DIV");
//! arena.set_attribute(div, "id", "x").unwrap();
//! let span = arena.create_element("span");
//! let hi = arena.create_text("hi");
//! arena.append_child(div, span).unwrap();
//! arena.append_child(span, hi).unwrap();
//!
//! let tree = vnode::to_vnode(&arena, div).unwrap();
//! assert_eq!(tree.sel.as_deref(), Some("div#x"));
//! assert_eq!(tree.child_nodes()[0].child_nodes()[0].text.as_deref(), Some("hi"));
//! ```

pub mod facade;
pub mod reconstruct;
pub mod selector;
pub mod serializer;
pub mod types;

#[cfg(feature = "web")]
pub mod web;

pub use facade::TreeFacade;
pub use reconstruct::{to_vnode, ReconstructConfig, Reconstructor, KEY_ATTRIBUTE};
pub use selector::ClassSplit;
pub use serializer::{to_json, to_json_value, SerializerConfig, VNodeSerializer};
pub use types::{vnode, Attrs, VNode, VNodeData};
