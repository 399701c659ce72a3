//! Virtual node data model
//!
//! Mirrors the shape the snabbdom engine expects: `sel`, `data`,
//! `children`, `text`, `elm` and a `key` lifted out of `data`.
//! The live handle (`elm`) is generic so any host tree can back a node.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::selector;

/// Attribute name → value, in the order the host enumerated them
pub type Attrs = IndexMap<String, String>;

/// The `data` object of a virtual node
///
/// Elements always carry `attrs` (possibly empty). Comments and
/// unrecognized nodes get an empty `data` with no `attrs` at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VNodeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

impl VNodeData {
    /// Element data: empty attribute map, no key
    pub fn element() -> Self {
        Self {
            key: None,
            attrs: Some(Attrs::new()),
        }
    }
}

/// One virtual node
///
/// Which fields are populated depends on the kind:
///
/// | kind     | `sel`          | `data`          | `children` | `text` |
/// |----------|----------------|-----------------|------------|--------|
/// | element  | `tag#id.class` | `{attrs, key?}` | `[...]`    | -      |
/// | text     | -              | -               | -          | yes    |
/// | comment  | `!`            | `{}`            | `[]`       | yes    |
/// | other    | `""`           | `{}`            | `[]`       | -      |
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = ""))]
pub struct VNode<H> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<VNodeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<VNode<H>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Non-owning link back to the live node
    #[serde(skip)]
    pub elm: Option<H>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Build a virtual node the way the engine's own constructor does
///
/// Argument order is `(sel, data, children, text, elm)`; `key` is taken
/// from `data.key`.
pub fn vnode<H>(
    sel: Option<String>,
    data: Option<VNodeData>,
    children: Option<Vec<VNode<H>>>,
    text: Option<String>,
    elm: Option<H>,
) -> VNode<H> {
    let key = data.as_ref().and_then(|d| d.key.clone());
    VNode {
        sel,
        data,
        children,
        text,
        elm,
        key,
    }
}

impl<H> VNode<H> {
    pub fn is_element(&self) -> bool {
        matches!(self.sel.as_deref(), Some(sel) if !sel.is_empty() && sel != selector::COMMENT)
    }

    pub fn is_text(&self) -> bool {
        self.sel.is_none() && self.text.is_some()
    }

    pub fn is_comment(&self) -> bool {
        self.sel.as_deref() == Some(selector::COMMENT)
    }

    /// Tag part of the selector, for elements only
    pub fn tag(&self) -> Option<&str> {
        self.element_sel().map(|sel| selector::parse(sel).tag)
    }

    /// Id part of the selector, for elements only
    pub fn id(&self) -> Option<&str> {
        self.element_sel().and_then(|sel| selector::parse(sel).id)
    }

    /// Class tokens folded into the selector
    pub fn classes(&self) -> Vec<&str> {
        self.element_sel()
            .map(|sel| selector::parse(sel).classes)
            .unwrap_or_default()
    }

    fn element_sel(&self) -> Option<&str> {
        if self.is_element() {
            self.sel.as_deref()
        } else {
            None
        }
    }

    /// Generic attribute (never `id`, `class` or the key attribute)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.data
            .as_ref()?
            .attrs
            .as_ref()?
            .get(name)
            .map(String::as_str)
    }

    /// Children as a slice; empty for text nodes
    pub fn child_nodes(&self) -> &[VNode<H>] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.child_nodes());
        }
        count
    }
}

// Tear down deep trees without recursing once per level.
impl<H> Drop for VNode<H> {
    fn drop(&mut self) {
        let Some(mut stack) = self.children.take() else {
            return;
        };
        while let Some(mut node) = stack.pop() {
            if let Some(children) = node.children.take() {
                stack.extend(children);
            }
        }
    }
}
