//! VNode Serializer - render a virtual tree for people and for the engine
//!
//! Two outputs:
//! - an indented outline for logs, snapshots and debugging
//! - snabbdom-shaped JSON for handing the tree across to the JS engine

use crate::types::VNode;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Print generic attributes after the selector
    pub include_attrs: bool,
    /// Skip text nodes that are only whitespace
    pub skip_blank_text: bool,
    /// Longer text and comment payloads are cut and suffixed with `...`
    pub max_text_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            include_attrs: true,
            skip_blank_text: true,
            max_text_length: 200,
        }
    }
}

/// Outline serializer
pub struct VNodeSerializer {
    config: SerializerConfig,
}

impl VNodeSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Serialize a tree as an indented outline, one node per line:
    ///
    /// ```text
    /// ul#list [key=k] role="list"
    ///   li
    ///     "first"
    ///   <!-- note -->
    /// ```
    pub fn serialize<H>(&self, root: &VNode<H>) -> String {
        let mut output = String::with_capacity(4096);
        let mut stack = vec![(root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            self.serialize_line(node, depth, &mut output);

            // Push children in reverse order (so they're written left-to-right)
            for child in node.child_nodes().iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        output
    }

    fn serialize_line<H>(&self, node: &VNode<H>, depth: usize, output: &mut String) {
        let indent = "  ".repeat(depth);

        if node.is_text() {
            let text = node.text.as_deref().unwrap_or("");
            if self.config.skip_blank_text && text.trim().is_empty() {
                return;
            }
            output.push_str(&indent);
            output.push('"');
            output.push_str(&self.cap(text.trim()));
            output.push_str("\"\n");
        } else if node.is_comment() {
            output.push_str(&indent);
            output.push_str("<!-- ");
            output.push_str(&self.cap(node.text.as_deref().unwrap_or("")));
            output.push_str(" -->\n");
        } else if node.is_element() {
            output.push_str(&indent);
            output.push_str(node.sel.as_deref().unwrap_or(""));

            if let Some(key) = &node.key {
                output.push_str(&format!(" [key={}]", key));
            }

            if self.config.include_attrs {
                let attrs = node.data.as_ref().and_then(|d| d.attrs.as_ref());
                for (name, value) in attrs.into_iter().flatten() {
                    output.push_str(&format!(" {}=\"{}\"", name, value));
                }
            }
            output.push('\n');
        } else {
            output.push_str(&indent);
            output.push_str("<?>\n");
        }
    }

    /// Cap text length, counting characters rather than bytes
    fn cap(&self, text: &str) -> String {
        match text.char_indices().nth(self.config.max_text_length) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        }
    }
}

impl Default for VNodeSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Snabbdom-shaped JSON value; live handles are left out
pub fn to_json_value<H>(node: &VNode<H>) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(node)
}

/// Snabbdom-shaped JSON string; live handles are left out
pub fn to_json<H>(node: &VNode<H>) -> serde_json::Result<String> {
    serde_json::to_string(node)
}
