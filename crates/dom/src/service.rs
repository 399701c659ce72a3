//! DOM Service - builds the host tree from CDP snapshots
//!
//! Takes the JSON returned by CDP's `DOM.getDocument` (with `depth: -1`)
//! and turns it into a [`DomArena`]. Attributes arrive as a flat
//! `[name, value, name, value, ...]` array and are stored in that order.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::*;
use serde_json::Value;
use smallvec::SmallVec;

/// Configuration for DOM service
#[derive(Debug, Clone)]
pub struct DomServiceConfig {
    /// Parse `shadowRoots` and link them to their host
    pub pierce_shadow_roots: bool,
    /// Parse iframe `contentDocument` and link it to the frame element
    pub include_content_documents: bool,
    /// Deepest nesting accepted before giving up
    pub max_depth: usize,
}

impl Default for DomServiceConfig {
    fn default() -> Self {
        Self {
            pierce_shadow_roots: true,
            include_content_documents: true,
            max_depth: 512,
        }
    }
}

/// Main DOM service
pub struct DomService {
    config: DomServiceConfig,
    arena: DomArena,
}

impl DomService {
    /// Create new DOM service with default config
    pub fn new() -> Self {
        Self::with_config(DomServiceConfig::default())
    }

    /// Create DOM service with custom config
    pub fn with_config(config: DomServiceConfig) -> Self {
        Self {
            config,
            arena: DomArena::new(),
        }
    }

    /// Get reference to internal arena
    pub fn arena(&self) -> &DomArena {
        &self.arena
    }

    /// Get mutable reference to internal arena
    pub fn arena_mut(&mut self) -> &mut DomArena {
        &mut self.arena
    }

    /// Consume the service, keeping the parsed tree
    pub fn into_arena(self) -> DomArena {
        self.arena
    }

    /// Parse CDP DOM tree response and build arena
    ///
    /// Input format matches CDP's DOM.getDocument response:
    /// ```json
    /// {
    ///   "root": {
    ///     "nodeId": 1,
    ///     "backendNodeId": 1,
    ///     "nodeType": 9,
    ///     "nodeName": "#document",
    ///     "children": [...]
    ///   }
    /// }
    /// ```
    pub fn parse_cdp_dom_tree(&mut self, cdp_response: &Value) -> Result<NodeId> {
        let root = cdp_response
            .get("root")
            .ok_or_else(|| DomError::CdpError("Missing 'root' in CDP response".to_string()))?;

        // Build aside so a failed parse leaves the previous tree in place
        let mut arena = DomArena::new();
        let root_id = self.parse_node(&mut arena, root, None, 0)?;
        arena.set_root(root_id)?;
        self.arena = arena;

        tracing::debug!("Parsed CDP DOM tree: {} nodes", self.arena.len());
        Ok(root_id)
    }

    /// Parse a CDP DOM.getDocument response given as a JSON string
    pub fn parse_cdp_dom_str(&mut self, json: &str) -> Result<NodeId> {
        let value: Value = serde_json::from_str(json)?;
        self.parse_cdp_dom_tree(&value)
    }

    /// Recursively parse a CDP node
    fn parse_node(
        &self,
        arena: &mut DomArena,
        cdp_node: &Value,
        parent_id: Option<NodeId>,
        depth: usize,
    ) -> Result<NodeId> {
        if depth > self.config.max_depth {
            return Err(DomError::MaxDepthExceeded {
                current: depth,
                max: self.config.max_depth,
            });
        }

        let backend_raw = cdp_node["backendNodeId"]
            .as_u64()
            .ok_or_else(|| DomError::CdpError("Missing backendNodeId".to_string()))?;
        let backend_node_id = u32::try_from(backend_raw)
            .map_err(|_| DomError::CdpError(format!("backendNodeId out of range: {}", backend_raw)))?;

        let node_type_raw = cdp_node["nodeType"]
            .as_u64()
            .ok_or_else(|| DomError::CdpError("Missing nodeType".to_string()))?;

        let node_type = u8::try_from(node_type_raw)
            .ok()
            .and_then(NodeType::from_u8)
            .ok_or_else(|| DomError::InvalidNodeType {
                expected: "valid NodeType".to_string(),
                actual: format!("{}", node_type_raw),
            })?;

        let node_name = cdp_node["nodeName"].as_str().unwrap_or("").to_string();
        let node_value = cdp_node["nodeValue"].as_str().unwrap_or("").to_string();

        let mut attributes = Attributes::new();
        if let Some(attrs) = cdp_node["attributes"].as_array() {
            for pair in attrs.chunks_exact(2) {
                if let (Some(key), Some(value)) = (pair[0].as_str(), pair[1].as_str()) {
                    attributes.insert(key.to_string(), value.to_string());
                }
            }
        }

        let mut node = DomNode::new(0, backend_node_id, node_type, node_name);
        node.node_value = node_value;
        node.attributes = attributes;
        node.parent_id = parent_id;

        if let Some(shadow_type) = cdp_node.get("shadowRootType").and_then(|v| v.as_str()) {
            node.shadow_root_type = match shadow_type {
                "user-agent" => Some(ShadowRootType::UserAgent),
                "open" => Some(ShadowRootType::Open),
                "closed" => Some(ShadowRootType::Closed),
                _ => None,
            };
        }

        let current_node_id = arena.add_node(node);
        tracing::trace!(node_id = current_node_id, depth, "Parsed CDP node");

        if let Some(children) = cdp_node["children"].as_array() {
            let mut child_ids = SmallVec::new();
            for child in children {
                child_ids.push(self.parse_node(arena, child, Some(current_node_id), depth + 1)?);
            }
            arena.get_mut(current_node_id)?.children_ids = child_ids;
        }

        if self.config.include_content_documents {
            if let Some(content_doc) = cdp_node.get("contentDocument") {
                let doc_id = self.parse_node(arena, content_doc, Some(current_node_id), depth + 1)?;
                arena.get_mut(current_node_id)?.content_document_id = Some(doc_id);
            }
        }

        if self.config.pierce_shadow_roots {
            if let Some(shadow_roots) = cdp_node["shadowRoots"].as_array() {
                let mut shadow_ids = SmallVec::new();
                for shadow in shadow_roots {
                    shadow_ids.push(self.parse_node(arena, shadow, Some(current_node_id), depth + 1)?);
                }
                arena.get_mut(current_node_id)?.shadow_root_ids = Some(shadow_ids);
            }
        }

        Ok(current_node_id)
    }
}

impl Default for DomService {
    fn default() -> Self {
        Self::new()
    }
}
