//! Origin tracking for datasets and derived dataset views.

use crate::dataset::SemanticDataset;
use crate::store::QuadStore;
use oxigraph::model::{BlankNode, NamedNode, NamedNodeRef, NamedOrBlankNode};

/// Where a dataset comes from.
///
/// - `focus` is the node the dataset describes; accessors default their subject to it.
/// - `document` is the network resource the data was loaded from.
/// - `thing` is the node from which a derived dataset was reached, for back-navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    pub focus: Option<NamedOrBlankNode>,
    pub document: Option<NamedNode>,
    pub thing: Option<NamedOrBlankNode>,
}

impl Origin {
    pub fn new(focus: impl Into<NamedOrBlankNode>) -> Self {
        Origin {
            focus: Some(focus.into()),
            document: None,
            thing: None,
        }
    }

    /// An origin for a dataset loaded from `document`; the document is also the focus.
    pub fn document(document: NamedNode) -> Self {
        Origin {
            focus: Some(document.clone().into()),
            document: Some(document),
            thing: None,
        }
    }

    pub fn with_document(mut self, document: Option<NamedNode>) -> Self {
        self.document = document;
        self
    }

    pub fn with_thing(mut self, thing: Option<NamedOrBlankNode>) -> Self {
        self.thing = thing;
        self
    }

    pub fn is_set(&self) -> bool {
        self.focus.is_some()
    }
}

/// A node given either directly or through the focus of a dataset's origin.
#[derive(Debug, Clone)]
pub enum NodeRef<'a> {
    Term(NamedOrBlankNode),
    Origin(&'a Origin),
}

impl NodeRef<'_> {
    /// Resolves the reference once; an origin without a focus yields `None`.
    pub fn resolve(&self) -> Option<NamedOrBlankNode> {
        match self {
            NodeRef::Term(term) => Some(term.clone()),
            NodeRef::Origin(origin) => origin.focus.clone(),
        }
    }
}

impl From<NamedNode> for NodeRef<'_> {
    fn from(node: NamedNode) -> Self {
        NodeRef::Term(node.into())
    }
}

impl From<BlankNode> for NodeRef<'_> {
    fn from(node: BlankNode) -> Self {
        NodeRef::Term(node.into())
    }
}

impl From<NamedOrBlankNode> for NodeRef<'_> {
    fn from(node: NamedOrBlankNode) -> Self {
        NodeRef::Term(node)
    }
}

impl<'a> From<NamedNodeRef<'a>> for NodeRef<'_> {
    fn from(node: NamedNodeRef<'a>) -> Self {
        NodeRef::Term(node.into_owned().into())
    }
}

impl<'a, S: QuadStore> From<&'a SemanticDataset<S>> for NodeRef<'a> {
    fn from(dataset: &'a SemanticDataset<S>) -> Self {
        NodeRef::Origin(dataset.origin())
    }
}

/// A resource to load: a URI (possibly relative to the dataset's document), a node, or
/// the focus of another dataset's origin.
#[derive(Debug, Clone)]
pub enum Resource<'a> {
    Uri(&'a str),
    Node(NamedOrBlankNode),
    Origin(&'a Origin),
}

impl<'a> From<&'a str> for Resource<'a> {
    fn from(uri: &'a str) -> Self {
        Resource::Uri(uri)
    }
}

impl From<NamedNode> for Resource<'_> {
    fn from(node: NamedNode) -> Self {
        Resource::Node(node.into())
    }
}

impl<'a, S: QuadStore> From<&'a SemanticDataset<S>> for Resource<'a> {
    fn from(dataset: &'a SemanticDataset<S>) -> Self {
        Resource::Origin(dataset.origin())
    }
}
