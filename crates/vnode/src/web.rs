//! Browser DOM facade (feature `web`)
//!
//! [`HtmlDomApi`] reads a real `web_sys::Node` tree. It is the standard
//! facade when running inside a page; [`to_vnode_html`] uses it directly.

use std::borrow::Cow;
use std::convert::Infallible;

use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

use crate::facade::{AttrPairs, Children, TreeFacade};
use crate::reconstruct::to_vnode;
use crate::types::VNode;

/// Facade over the browser's own DOM
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlDomApi;

impl TreeFacade for HtmlDomApi {
    type Handle = Node;
    type Error = Infallible;

    fn is_element(&self, node: &Node) -> Result<bool, Infallible> {
        Ok(node.node_type() == Node::ELEMENT_NODE)
    }

    fn is_text(&self, node: &Node) -> Result<bool, Infallible> {
        Ok(node.node_type() == Node::TEXT_NODE)
    }

    fn is_comment(&self, node: &Node) -> Result<bool, Infallible> {
        Ok(node.node_type() == Node::COMMENT_NODE)
    }

    fn tag_name<'a>(&'a self, node: &Node) -> Result<Cow<'a, str>, Infallible> {
        Ok(Cow::Owned(
            node.dyn_ref::<Element>()
                .map(Element::tag_name)
                .unwrap_or_default(),
        ))
    }

    fn text_content<'a>(&'a self, node: &Node) -> Result<Cow<'a, str>, Infallible> {
        Ok(Cow::Owned(node.text_content().unwrap_or_default()))
    }

    fn attributes<'a>(&'a self, node: &Node) -> Result<AttrPairs<'a>, Infallible> {
        let Some(element) = node.dyn_ref::<Element>() else {
            return Ok(Vec::new());
        };
        let map = element.attributes();
        Ok((0..map.length())
            .filter_map(|i| map.item(i))
            .map(|attr| (Cow::Owned(attr.name()), Cow::Owned(attr.value())))
            .collect())
    }

    fn child_nodes(&self, node: &Node) -> Result<Children<Node>, Infallible> {
        let list = node.child_nodes();
        Ok((0..list.length()).filter_map(|i| list.item(i)).collect())
    }

    fn attribute<'a>(&'a self, node: &Node, name: &str) -> Result<Option<Cow<'a, str>>, Infallible> {
        Ok(node
            .dyn_ref::<Element>()
            .and_then(|element| element.get_attribute(name))
            .map(Cow::Owned))
    }
}

/// Rebuild the virtual tree for a live browser node
pub fn to_vnode_html(node: &Node) -> VNode<Node> {
    match to_vnode(&HtmlDomApi, node.clone()) {
        Ok(vnode) => vnode,
        Err(never) => match never {},
    }
}
