//! DOM access facade
//!
//! The reconstructor never touches a concrete tree. It asks a
//! [`TreeFacade`] for node kinds, tag names, attributes, children and
//! character data, so the same walk works on a browser DOM, a parsed
//! snapshot or a test double.
//!
//! Every query is fallible. Errors are the host's own and reach the caller
//! untouched.

use std::borrow::Cow;

use dom::{DomArena, DomError, NodeId};
use smallvec::SmallVec;

/// Child handles of one node, in document order
pub type Children<H> = SmallVec<[H; 4]>;

/// Attribute `(name, value)` pairs in the host's native order
pub type AttrPairs<'a> = Vec<(Cow<'a, str>, Cow<'a, str>)>;

/// Read-only view of a live tree
pub trait TreeFacade {
    /// Reference to one live node
    type Handle: Clone;
    /// Failure raised by the host while being queried
    type Error;

    fn is_element(&self, node: &Self::Handle) -> Result<bool, Self::Error>;

    fn is_text(&self, node: &Self::Handle) -> Result<bool, Self::Error>;

    fn is_comment(&self, node: &Self::Handle) -> Result<bool, Self::Error>;

    /// Element tag in whatever case the host reports
    fn tag_name<'a>(&'a self, node: &Self::Handle) -> Result<Cow<'a, str>, Self::Error>;

    /// Character data of a text or comment node
    fn text_content<'a>(&'a self, node: &Self::Handle) -> Result<Cow<'a, str>, Self::Error>;

    /// All attributes of an element, in native order
    fn attributes<'a>(&'a self, node: &Self::Handle) -> Result<AttrPairs<'a>, Self::Error>;

    /// Direct children in document order
    fn child_nodes(&self, node: &Self::Handle) -> Result<Children<Self::Handle>, Self::Error>;

    /// Single attribute lookup
    ///
    /// The default scans [`attributes`](Self::attributes); hosts with an
    /// indexed lookup should override it.
    fn attribute<'a>(
        &'a self,
        node: &Self::Handle,
        name: &str,
    ) -> Result<Option<Cow<'a, str>>, Self::Error> {
        Ok(self
            .attributes(node)?
            .into_iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value))
    }
}

impl TreeFacade for DomArena {
    type Handle = NodeId;
    type Error = DomError;

    fn is_element(&self, node: &NodeId) -> Result<bool, DomError> {
        Ok(self.get(*node)?.is_element())
    }

    fn is_text(&self, node: &NodeId) -> Result<bool, DomError> {
        Ok(self.get(*node)?.is_text())
    }

    fn is_comment(&self, node: &NodeId) -> Result<bool, DomError> {
        Ok(self.get(*node)?.is_comment())
    }

    fn tag_name<'a>(&'a self, node: &NodeId) -> Result<Cow<'a, str>, DomError> {
        Ok(Cow::Borrowed(self.get(*node)?.node_name.as_str()))
    }

    fn text_content<'a>(&'a self, node: &NodeId) -> Result<Cow<'a, str>, DomError> {
        Ok(Cow::Borrowed(self.get(*node)?.node_value.as_str()))
    }

    fn attributes<'a>(&'a self, node: &NodeId) -> Result<AttrPairs<'a>, DomError> {
        Ok(self
            .get(*node)?
            .attributes
            .iter()
            .map(|(name, value)| (Cow::Borrowed(name.as_str()), Cow::Borrowed(value.as_str())))
            .collect())
    }

    fn child_nodes(&self, node: &NodeId) -> Result<Children<NodeId>, DomError> {
        Ok(self.get(*node)?.children_ids.clone())
    }

    fn attribute<'a>(&'a self, node: &NodeId, name: &str) -> Result<Option<Cow<'a, str>>, DomError> {
        Ok(self.get(*node)?.attr(name).map(Cow::Borrowed))
    }
}
