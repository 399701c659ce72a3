//! Tree reconstruction: live node → virtual node
//!
//! Walks a live subtree through a [`TreeFacade`] and rebuilds the virtual
//! tree the diff/patch engine would have produced for it:
//!
//! - element → `sel` from tag, id and class; generic attributes in `attrs`;
//!   the key attribute moved to `data.key`; children in document order
//! - text → `text` only
//! - comment → `sel = "!"`, empty `data` and `children`, `text`
//! - anything else → `sel = ""`, empty `data` and `children`
//!
//! The walk uses an explicit work stack, so tree depth is bounded by heap,
//! not by the call stack.

use crate::facade::TreeFacade;
use crate::selector::{self, ClassSplit};
use crate::types::{vnode, Attrs, VNode, VNodeData};

/// Attribute whose value becomes the node key instead of a plain attribute
pub const KEY_ATTRIBUTE: &str = "data-dumdom-key";

/// Reconstruction settings
#[derive(Debug, Clone)]
pub struct ReconstructConfig {
    /// Exact, case-sensitive attribute name lifted into `data.key`
    pub key_attribute: String,
    pub class_split: ClassSplit,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            key_attribute: KEY_ATTRIBUTE.to_string(),
            class_split: ClassSplit::SingleSpace,
        }
    }
}

enum Step<H> {
    Visit(H),
    /// All `child_count` children are on the output stack
    Finish {
        sel: String,
        data: VNodeData,
        elm: H,
        child_count: usize,
    },
}

/// DOM → VNode reconstructor
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    config: ReconstructConfig,
}

impl Reconstructor {
    pub fn new() -> Self {
        Self::with_config(ReconstructConfig::default())
    }

    pub fn with_config(config: ReconstructConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReconstructConfig {
        &self.config
    }

    /// Rebuild the virtual tree rooted at `node`
    ///
    /// Total over node kinds; the only failures are the facade's own.
    pub fn to_vnode<F: TreeFacade>(
        &self,
        facade: &F,
        node: F::Handle,
    ) -> Result<VNode<F::Handle>, F::Error> {
        let mut work = Vec::new();
        let mut built: Vec<VNode<F::Handle>> = Vec::new();
        let mut visited = 0usize;

        // The root is the first node to complete once nothing else is queued
        let mut step = Step::Visit(node);
        loop {
            let finished = match step {
                Step::Visit(handle) => {
                    visited += 1;
                    if facade.is_element(&handle)? {
                        let (sel, data) = self.element_parts(facade, &handle)?;
                        let children = facade.child_nodes(&handle)?;
                        tracing::trace!(sel = %sel, children = children.len(), "Visiting element");

                        let finish = Step::Finish {
                            sel,
                            data,
                            elm: handle,
                            child_count: children.len(),
                        };
                        let mut children = children.into_iter();
                        step = match children.next() {
                            None => finish,
                            Some(first) => {
                                work.push(finish);
                                // Reverse so the second child is popped next
                                work.extend(children.rev().map(Step::Visit));
                                Step::Visit(first)
                            }
                        };
                        continue;
                    }
                    self.leaf(facade, handle)?
                }
                Step::Finish {
                    sel,
                    data,
                    elm,
                    child_count,
                } => {
                    let children = built.split_off(built.len() - child_count);
                    vnode(Some(sel), Some(data), Some(children), None, Some(elm))
                }
            };

            // Whatever completes with nothing left to do is the root
            step = match work.pop() {
                Some(next) => next,
                None => {
                    tracing::debug!(nodes = visited, "Reconstructed virtual tree");
                    return Ok(finished);
                }
            };
            built.push(finished);
        }
    }

    fn element_parts<F: TreeFacade>(
        &self,
        facade: &F,
        handle: &F::Handle,
    ) -> Result<(String, VNodeData), F::Error> {
        let tag = facade.tag_name(handle)?;
        let id = facade.attribute(handle, "id")?;
        let class = facade.attribute(handle, "class")?;
        let sel = selector::build(
            &tag,
            id.as_deref(),
            class.as_deref(),
            self.config.class_split,
        );

        let mut key = None;
        let mut attrs = Attrs::new();
        for (name, value) in facade.attributes(handle)? {
            if name == self.config.key_attribute.as_str() {
                key = Some(value.into_owned());
            } else if name != "id" && name != "class" {
                attrs.insert(name.into_owned(), value.into_owned());
            }
        }

        Ok((
            sel,
            VNodeData {
                key,
                attrs: Some(attrs),
            },
        ))
    }

    fn leaf<F: TreeFacade>(
        &self,
        facade: &F,
        handle: F::Handle,
    ) -> Result<VNode<F::Handle>, F::Error> {
        if facade.is_text(&handle)? {
            let text = facade.text_content(&handle)?.into_owned();
            Ok(vnode(None, None, None, Some(text), Some(handle)))
        } else if facade.is_comment(&handle)? {
            let text = facade.text_content(&handle)?.into_owned();
            Ok(vnode(
                Some(selector::COMMENT.to_string()),
                Some(VNodeData::default()),
                Some(Vec::new()),
                Some(text),
                Some(handle),
            ))
        } else {
            Ok(vnode(
                Some(String::new()),
                Some(VNodeData::default()),
                Some(Vec::new()),
                None,
                Some(handle),
            ))
        }
    }
}

/// Rebuild the virtual tree rooted at `node` with the default settings
pub fn to_vnode<F: TreeFacade>(facade: &F, node: F::Handle) -> Result<VNode<F::Handle>, F::Error> {
    Reconstructor::new().to_vnode(facade, node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::{DomArena, DomError, DomService, NodeId};

    fn element(arena: &mut DomArena, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = arena.create_element(tag);
        for (name, value) in attrs {
            arena.set_attribute(id, name, value).unwrap();
        }
        id
    }

    #[test]
    fn test_bare_element() {
        let mut arena = DomArena::new();
        let el = element(&mut arena, "DIV", &[]);

        let node = to_vnode(&arena, el).unwrap();
        assert_eq!(node.sel.as_deref(), Some("div"));
        assert_eq!(node.data, Some(VNodeData::element()));
        assert_eq!(node.children, Some(Vec::new()));
        assert_eq!(node.text, None);
        assert_eq!(node.elm, Some(el));
        assert_eq!(node.key, None);
    }

    #[test]
    fn test_id_and_class_fold_into_selector() {
        let mut arena = DomArena::new();
        let el = element(
            &mut arena,
            "section",
            &[("class", "a b c"), ("id", "foo"), ("title", "t")],
        );

        let node = to_vnode(&arena, el).unwrap();
        let sel = node.sel.as_deref().unwrap();
        assert_eq!(sel, "section#foo.a.b.c");
        assert_eq!(sel.matches("#foo").count(), 1);
        assert!(sel.ends_with(".a.b.c"));

        let attrs = node.data.as_ref().and_then(|d| d.attrs.as_ref()).unwrap();
        assert_eq!(attrs.len(), 1);
        assert_eq!(node.attr("title"), Some("t"));
        assert_eq!(node.attr("id"), None);
        assert_eq!(node.attr("class"), None);
    }

    #[test]
    fn test_empty_id_and_class_are_ignored() {
        let mut arena = DomArena::new();
        let el = element(&mut arena, "p", &[("id", ""), ("class", "")]);

        let node = to_vnode(&arena, el).unwrap();
        assert_eq!(node.sel.as_deref(), Some("p"));
        assert_eq!(node.data, Some(VNodeData::element()));
    }

    #[test]
    fn test_key_attribute_becomes_key() {
        let mut arena = DomArena::new();
        let el = element(
            &mut arena,
            "li",
            &[("data-dumdom-key", "k1"), ("data-x", "1")],
        );

        let node = to_vnode(&arena, el).unwrap();
        assert_eq!(node.key.as_deref(), Some("k1"));
        assert_eq!(node.data.as_ref().unwrap().key.as_deref(), Some("k1"));
        assert_eq!(node.attr("data-dumdom-key"), None);
        assert_eq!(node.attr("data-x"), Some("1"));
    }

    #[test]
    fn test_key_attribute_is_case_sensitive() {
        let mut arena = DomArena::new();
        let el = element(&mut arena, "li", &[("DATA-DUMDOM-KEY", "k1")]);

        let node = to_vnode(&arena, el).unwrap();
        assert_eq!(node.key, None);
        assert_eq!(node.attr("DATA-DUMDOM-KEY"), Some("k1"));
    }

    #[test]
    fn test_attribute_order_follows_host() {
        let mut arena = DomArena::new();
        let el = element(
            &mut arena,
            "input",
            &[("type", "text"), ("name", "q"), ("id", "i"), ("autocomplete", "off")],
        );

        let node = to_vnode(&arena, el).unwrap();
        let names: Vec<_> = node.data.as_ref().unwrap().attrs.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["type", "name", "autocomplete"]);
    }

    #[test]
    fn test_text_node() {
        let mut arena = DomArena::new();
        let text = arena.create_text("hello");

        let node = to_vnode(&arena, text).unwrap();
        assert_eq!(node.sel, None);
        assert_eq!(node.data, None);
        assert_eq!(node.children, None);
        assert_eq!(node.text.as_deref(), Some("hello"));
        assert_eq!(node.elm, Some(text));
    }

    #[test]
    fn test_comment_node() {
        let mut arena = DomArena::new();
        let comment = arena.create_comment("note");

        let node = to_vnode(&arena, comment).unwrap();
        assert_eq!(node.sel.as_deref(), Some("!"));
        assert_eq!(node.data, Some(VNodeData::default()));
        assert_eq!(node.children, Some(Vec::new()));
        assert_eq!(node.text.as_deref(), Some("note"));
        assert!(node.is_comment());
    }

    #[test]
    fn test_unrecognized_node_falls_back() {
        let mut arena = DomArena::new();
        let doc = arena.create_document();
        let body = arena.create_element("body");
        arena.append_child(doc, body).unwrap();

        // Documents are not elements: their children are not walked
        let node = to_vnode(&arena, doc).unwrap();
        assert_eq!(node.sel.as_deref(), Some(""));
        assert_eq!(node.data, Some(VNodeData::default()));
        assert_eq!(node.children, Some(Vec::new()));
        assert_eq!(node.text, None);
    }

    #[test]
    fn test_nested_tree() {
        let mut arena = DomArena::new();
        let div = element(&mut arena, "div", &[("id", "x")]);
        let span = element(&mut arena, "span", &[]);
        let hi = arena.create_text("hi");
        arena.append_child(div, span).unwrap();
        arena.append_child(span, hi).unwrap();

        let root = arena.find_by_id("x").unwrap();
        assert_eq!(root, div);

        let node = to_vnode(&arena, root).unwrap();
        assert_eq!(node.sel.as_deref(), Some("div#x"));
        assert_eq!(node.child_nodes().len(), 1);

        let span_node = &node.child_nodes()[0];
        assert_eq!(span_node.sel.as_deref(), Some("span"));
        assert_eq!(span_node.elm, Some(span));
        assert_eq!(span_node.child_nodes().len(), 1);
        assert_eq!(span_node.child_nodes()[0].text.as_deref(), Some("hi"));
        assert_eq!(span_node.child_nodes()[0].elm, Some(hi));
    }

    #[test]
    fn test_children_keep_document_order() {
        let mut arena = DomArena::new();
        let ul = element(&mut arena, "ul", &[]);
        for (i, kind) in ["li", "#comment", "li", "#text"].iter().enumerate() {
            let child = match *kind {
                "#comment" => arena.create_comment(&i.to_string()),
                "#text" => arena.create_text(&i.to_string()),
                tag => element(&mut arena, tag, &[("data-dumdom-key", &i.to_string())]),
            };
            arena.append_child(ul, child).unwrap();
        }

        let node = to_vnode(&arena, ul).unwrap();
        let children = node.child_nodes();
        assert_eq!(children.len(), 4);
        assert_eq!(children[0].key.as_deref(), Some("0"));
        assert_eq!(children[1].text.as_deref(), Some("1"));
        assert!(children[1].is_comment());
        assert_eq!(children[2].key.as_deref(), Some("2"));
        assert!(children[3].is_text());
    }

    #[test]
    fn test_childless_elements_between_siblings() {
        let mut arena = DomArena::new();
        let div = element(&mut arena, "div", &[]);
        let br = element(&mut arena, "br", &[]);
        let p = element(&mut arena, "p", &[("data-dumdom-key", "p1")]);
        let tail = arena.create_text("tail");
        for child in [br, p, tail] {
            arena.append_child(div, child).unwrap();
        }

        let node = to_vnode(&arena, div).unwrap();
        let children = node.child_nodes();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].sel.as_deref(), Some("br"));
        assert_eq!(children[0].children, Some(Vec::new()));
        assert_eq!(children[1].key.as_deref(), Some("p1"));
        assert_eq!(children[1].elm, Some(p));
        assert_eq!(children[2].text.as_deref(), Some("tail"));
        assert_eq!(node.node_count(), 4);
    }

    #[test]
    fn test_structure_is_stable_across_calls() {
        let mut service = DomService::new();
        service
            .parse_cdp_dom_tree(&serde_json::json!({
                "root": {
                    "nodeId": 1, "backendNodeId": 1, "nodeType": 1, "nodeName": "DIV",
                    "attributes": ["class", "card  wide", "data-dumdom-key", "c1", "role", "note"],
                    "children": [
                        { "nodeId": 2, "backendNodeId": 2, "nodeType": 3, "nodeName": "#text", "nodeValue": "a" },
                        { "nodeId": 3, "backendNodeId": 3, "nodeType": 8, "nodeName": "#comment", "nodeValue": "b" }
                    ]
                }
            }))
            .unwrap();
        let arena = service.arena();
        let root = arena.root_id().unwrap();

        let first = to_vnode(arena, root).unwrap();
        let second = to_vnode(arena, root).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.sel.as_deref(), Some("div.card..wide"));
        assert_eq!(first.key.as_deref(), Some("c1"));
    }

    #[test]
    fn test_custom_config() {
        let mut arena = DomArena::new();
        let el = element(
            &mut arena,
            "div",
            &[("class", "  a   b "), ("data-key", "k"), ("data-dumdom-key", "old")],
        );

        let reconstructor = Reconstructor::with_config(ReconstructConfig {
            key_attribute: "data-key".to_string(),
            class_split: ClassSplit::Whitespace,
        });
        let node = reconstructor.to_vnode(&arena, el).unwrap();
        assert_eq!(node.sel.as_deref(), Some("div.a.b"));
        assert_eq!(node.key.as_deref(), Some("k"));
        assert_eq!(node.attr("data-dumdom-key"), Some("old"));
    }

    #[test]
    fn test_facade_errors_propagate() {
        let mut arena = DomArena::new();
        let el = element(&mut arena, "div", &[]);
        // Dangling child id: the host tree is malformed
        arena.get_mut(el).unwrap().children_ids.push(404);

        assert!(matches!(to_vnode(&arena, el), Err(DomError::NodeNotFound(404))));
        assert!(matches!(to_vnode(&arena, 9), Err(DomError::NodeNotFound(9))));
    }

    #[test]
    fn test_deep_tree_does_not_recurse() {
        const DEPTH: usize = 50_000;

        let mut arena = DomArena::with_capacity(DEPTH + 1);
        let ids: Vec<NodeId> = (0..DEPTH).map(|_| arena.create_element("div")).collect();
        let leaf = arena.create_text("bottom");
        arena.append_child(ids[DEPTH - 1], leaf).unwrap();
        // Attach bottom-up so every ancestor walk is one step long
        for pair in ids.windows(2).rev() {
            arena.append_child(pair[0], pair[1]).unwrap();
        }

        let node = to_vnode(&arena, ids[0]).unwrap();
        assert_eq!(node.node_count(), DEPTH + 1);

        let mut cursor = &node;
        while let Some(child) = cursor.child_nodes().first() {
            cursor = child;
        }
        assert_eq!(cursor.text.as_deref(), Some("bottom"));
    }
}
