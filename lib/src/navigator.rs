//! Graph navigation: extracting the sub-dataset reachable from a node, and splitting a
//! dataset into its default and named graphs.
//!
//! A "linked object" is everything locally known about a node: its own statements plus,
//! transitively, the statements of every blank or named node appearing in object
//! position. Datasets produced here are untracked `SemanticDataset<MemoryStore>`s that
//! own their quads, so a derived entity stays usable after its parent is dropped.

use crate::consts::LDP_CONTAINS;
use crate::dataset::SemanticDataset;
use crate::errors::{Result, SemantizerError};
use crate::origin::{NodeRef, Origin};
use crate::store::{MemoryStore, QuadPattern, QuadStore};
use log::{debug, warn};
use oxigraph::model::{
    GraphName, GraphNameRef, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, Term,
};
use std::collections::{HashSet, VecDeque};

fn as_node(term: &Term) -> Option<NamedOrBlankNode> {
    match term {
        Term::NamedNode(node) => Some(node.clone().into()),
        Term::BlankNode(node) => Some(node.clone().into()),
        _ => None,
    }
}

impl<S: QuadStore> SemanticDataset<S> {
    /// Collects the quads matching `pattern` and every quad reachable from their objects
    /// through blank or named nodes, in any graph.
    ///
    /// Each node is expanded at most once, so cyclic data terminates and the work is
    /// linear in the number of reachable edges. The result has no origin.
    pub fn closure_of(&self, pattern: &QuadPattern) -> SemanticDataset<MemoryStore> {
        let mut result = self.derive();
        let mut visited: HashSet<NamedOrBlankNode> = HashSet::new();
        let mut queue: VecDeque<NamedOrBlankNode> = VecDeque::new();
        if let Some(subject) = &pattern.subject {
            visited.insert(subject.clone());
        }

        let mut visit = |quad: &Quad,
                         result: &mut SemanticDataset<MemoryStore>,
                         queue: &mut VecDeque<NamedOrBlankNode>| {
            result.add(quad.clone());
            if let Some(node) = as_node(&quad.object) {
                if visited.insert(node.clone()) {
                    queue.push_back(node);
                }
            }
        };

        for quad in self.matching(pattern) {
            visit(quad, &mut result, &mut queue);
        }
        while let Some(node) = queue.pop_front() {
            for quad in self.matching(&QuadPattern::new().subject(node)) {
                visit(quad, &mut result, &mut queue);
            }
        }
        debug!("Closure of {:?} holds {} quads", pattern, result.count());
        result
    }

    /// The closure of everything `node` states, in any graph.
    pub fn closure_of_node<'a>(
        &self,
        node: impl Into<NamedOrBlankNodeRef<'a>>,
    ) -> SemanticDataset<MemoryStore> {
        let node = NamedOrBlankNode::from(node.into());
        self.closure_of(&QuadPattern::new().subject(node))
    }

    /// Resolves the subject of a navigation call: an explicit node, another dataset's
    /// focus, or this dataset's focus when nothing is given.
    fn subject_of(&self, thing: Option<NodeRef<'_>>) -> Option<NamedOrBlankNode> {
        match thing {
            Some(thing) => thing.resolve(),
            None => self.origin().focus.clone(),
        }
    }

    fn linked_pattern(
        &self,
        predicate: NamedNodeRef<'_>,
        thing: Option<NodeRef<'_>>,
        graph: Option<GraphNameRef<'_>>,
    ) -> QuadPattern {
        let mut pattern = QuadPattern::new()
            .predicate(predicate)
            .maybe_graph(graph.map(GraphName::from));
        pattern.subject = self.subject_of(thing);
        pattern
    }

    /// The closure of `quad`'s object, or `None` for a literal object.
    fn linked_dataset(&self, quad: &Quad) -> Option<SemanticDataset<MemoryStore>> {
        let object = as_node(&quad.object)?;
        Some(self.closure_of_node(object.as_ref()).with_origin(
            Origin::new(object)
                .with_document(self.origin().document.clone())
                .with_thing(Some(quad.subject.clone())),
        ))
    }

    /// One derived dataset per `(subject, predicate, object, graph)` match whose object is
    /// a node, holding the closure of that object. Each result's origin focuses on the
    /// object, inherits this dataset's document and remembers the matched subject as the
    /// thing it was reached from. Literal objects are skipped.
    ///
    /// Without `thing` the subject defaults to this dataset's focus; if there is none, any
    /// subject matches.
    pub fn get_linked_object_all(
        &self,
        predicate: NamedNodeRef<'_>,
        thing: Option<NodeRef<'_>>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Vec<SemanticDataset<MemoryStore>> {
        let pattern = self.linked_pattern(predicate, thing, graph);
        self.matching(&pattern)
            .filter_map(|quad| self.linked_dataset(quad))
            .collect()
    }

    /// The first of [`get_linked_object_all`](Self::get_linked_object_all); only that
    /// object's closure is computed.
    pub fn get_linked_object(
        &self,
        predicate: NamedNodeRef<'_>,
        thing: Option<NodeRef<'_>>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Option<SemanticDataset<MemoryStore>> {
        let pattern = self.linked_pattern(predicate, thing, graph);
        self.matching(&pattern)
            .find_map(|quad| self.linked_dataset(quad))
    }

    /// The resources a container lists with `ldp:contains`.
    pub fn get_contained_resources(&self) -> Vec<SemanticDataset<MemoryStore>> {
        self.get_linked_object_all(LDP_CONTAINS, None, None)
    }

    /// The closure of the quads in graph `name`, focused on `name`, or `None` when the
    /// graph holds nothing.
    pub fn get_named_graph<'a>(
        &self,
        name: impl Into<NamedOrBlankNodeRef<'a>>,
    ) -> Option<SemanticDataset<MemoryStore>> {
        let name = NamedOrBlankNode::from(name.into());
        let graph = match &name {
            NamedOrBlankNode::NamedNode(n) => GraphName::NamedNode(n.clone()),
            NamedOrBlankNode::BlankNode(b) => GraphName::BlankNode(b.clone()),
        };
        let dataset = self.closure_of(&QuadPattern::new().graph(graph));
        if dataset.is_empty() {
            return None;
        }
        Some(dataset.with_origin(Origin::new(name).with_document(self.origin().document.clone())))
    }

    /// One dataset per named graph, in order of first appearance.
    pub fn get_named_graph_all(&self) -> Vec<SemanticDataset<MemoryStore>> {
        self.named_graphs()
            .into_iter()
            .filter_map(|name| self.get_named_graph(name.as_ref()))
            .collect()
    }

    /// The closure of the default graph, focused on this dataset's document.
    ///
    /// Without a document the result has no focus; this is logged and not an error.
    pub fn get_default_graph(&self) -> SemanticDataset<MemoryStore> {
        let dataset = self.closure_of(&QuadPattern::new().graph(GraphName::DefaultGraph));
        match &self.origin().document {
            Some(document) => dataset.with_origin(Origin::document(document.clone())),
            None => {
                warn!("Can't set the document origin of the default graph.");
                dataset
            }
        }
    }

    /// The statements of `subject` alone (no closure) in `graph`, the default graph when
    /// `None`. The result has no origin.
    pub fn get_sub_graph<'a>(
        &self,
        subject: impl Into<NamedOrBlankNodeRef<'a>>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<SemanticDataset<MemoryStore>> {
        let subject = NamedOrBlankNode::from(subject.into());
        let graph = graph.map(GraphName::from).unwrap_or(GraphName::DefaultGraph);
        let pattern = QuadPattern::new().subject(subject.clone()).graph(graph);
        let mut dataset = self.derive();
        dataset.add_all(self.matching(&pattern).cloned());
        if dataset.is_empty() {
            return Err(SemantizerError::NotFound(format!(
                "no statements about {}",
                subject
            )));
        }
        Ok(dataset)
    }

    /// One sub-graph per distinct subject of `graph` (default graph when `None`).
    pub fn get_sub_graph_all(
        &self,
        graph: Option<GraphNameRef<'_>>,
    ) -> Vec<SemanticDataset<MemoryStore>> {
        let graph_name = graph.map(GraphName::from).unwrap_or(GraphName::DefaultGraph);
        let mut seen = HashSet::new();
        let mut sub_graphs = Vec::new();
        for quad in self.matching(&QuadPattern::new().graph(graph_name)) {
            if seen.insert(quad.subject.clone()) {
                // the subject has at least this quad, so the lookup cannot be empty
                if let Ok(sub_graph) = self.get_sub_graph(quad.subject.as_ref(), graph) {
                    sub_graphs.push(sub_graph);
                }
            }
        }
        sub_graphs
    }

    /// Calls `callback` with the linked object of every distinct named-node subject,
    /// restricted to `graph` when given, together with its position.
    pub fn for_each_sub_graph<F>(
        &self,
        graph: Option<GraphNameRef<'_>>,
        mut callback: F,
    ) -> Result<()>
    where
        F: FnMut(SemanticDataset<MemoryStore>, usize) -> Result<()>,
    {
        let pattern = QuadPattern::new().maybe_graph(graph.map(GraphName::from));
        let mut seen = HashSet::new();
        let mut index = 0;
        for quad in self.matching(&pattern) {
            let NamedOrBlankNode::NamedNode(subject) = &quad.subject else {
                continue;
            };
            if !seen.insert(subject.clone()) {
                continue;
            }
            let thing = self.closure_of_node(subject.as_ref()).with_origin(
                Origin::new(subject.clone()).with_document(self.origin().document.clone()),
            );
            callback(thing, index)?;
            index += 1;
        }
        Ok(())
    }

    /// Names of the graphs other than the default graph, in order of first appearance.
    pub fn named_graphs(&self) -> Vec<NamedOrBlankNode> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for quad in self.quads() {
            let name: NamedOrBlankNode = match &quad.graph_name {
                GraphName::NamedNode(n) => n.clone().into(),
                GraphName::BlankNode(b) => b.clone().into(),
                GraphName::DefaultGraph => continue,
            };
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
        names
    }

    pub fn has_named_graph(&self) -> bool {
        self.quads().any(|quad| !quad.graph_name.is_default_graph())
    }

    pub fn count_named_graph(&self) -> usize {
        self.named_graphs().len()
    }

    pub fn is_default_graph_empty(&self) -> bool {
        self.matching(&QuadPattern::new().graph(GraphName::DefaultGraph))
            .next()
            .is_none()
    }

    pub fn is_named_graph_empty(&self, name: NamedNodeRef<'_>) -> bool {
        self.matching(&QuadPattern::new().graph(name.into_owned()))
            .next()
            .is_none()
    }
}
