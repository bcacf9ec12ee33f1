//! `SemanticDataset` composes a quad store with an origin and an id generator. The typed
//! accessors come from the blanket [`TypedAccessors`](crate::accessors::TypedAccessors)
//! impl, the navigation operations live in [`crate::navigator`], and wrapping the store
//! in a [`ChangeLog`] turns on change tracking and patch output.

use crate::changelog::{ChangeLog, Changelog};
use crate::consts::TYPE;
use crate::errors::{Result, SemantizerError};
use crate::ids::{IdGenerator, RandomIdGenerator};
use crate::loader::{Loader, QuadStream, QuadStreamLoader};
use crate::origin::{Origin, Resource};
use crate::patch;
use crate::store::{MemoryStore, QuadIter, QuadPattern, QuadStore};
use crate::util;
use log::{debug, info};
use oxigraph::io::RdfFormat;
use oxigraph::model::{
    BlankNode, GraphName, NamedNode, NamedNodeRef, NamedOrBlankNode, Quad, Term,
};
use std::fmt;
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

pub type LoggedDataset = SemanticDataset<ChangeLog<MemoryStore>>;

#[derive(Clone)]
pub struct SemanticDataset<S = MemoryStore> {
    store: S,
    origin: Origin,
    ids: Arc<dyn IdGenerator>,
}

impl<S: fmt::Debug> fmt::Debug for SemanticDataset<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticDataset")
            .field("store", &self.store)
            .field("origin", &self.origin)
            .finish()
    }
}

impl SemanticDataset<MemoryStore> {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), Arc::new(RandomIdGenerator))
    }
}

impl Default for SemanticDataset<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggedDataset {
    /// An empty dataset that records its changes.
    pub fn logged() -> Self {
        Self::with_store(ChangeLog::new(MemoryStore::new()), Arc::new(RandomIdGenerator))
    }
}

impl FromIterator<Quad> for SemanticDataset<MemoryStore> {
    fn from_iter<I: IntoIterator<Item = Quad>>(iter: I) -> Self {
        Self::with_store(iter.into_iter().collect(), Arc::new(RandomIdGenerator))
    }
}

impl<S> SemanticDataset<S> {
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: QuadStore> SemanticDataset<S> {
    pub fn with_store(store: S, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            origin: Origin::default(),
            ids,
        }
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn set_origin(&mut self, focus: impl Into<NamedOrBlankNode>) {
        self.origin.focus = Some(focus.into());
    }

    pub fn set_origin_document(&mut self, document: NamedNode) {
        self.origin.document = Some(document);
    }

    pub fn set_origin_thing(&mut self, thing: impl Into<NamedOrBlankNode>) {
        self.origin.thing = Some(thing.into());
    }

    pub fn id_generator(&self) -> Arc<dyn IdGenerator> {
        Arc::clone(&self.ids)
    }

    /// A new, empty, untracked dataset sharing this dataset's id generator.
    pub(crate) fn derive(&self) -> SemanticDataset<MemoryStore> {
        SemanticDataset::with_store(MemoryStore::new(), self.id_generator())
    }

    pub fn create_blank_node(&self) -> BlankNode {
        // generated ids are alphanumeric, which is always a valid blank node id
        BlankNode::new_unchecked(self.ids.next_id())
    }

    /// Mints `{base}#{id}` (or `{base}{id}` when `base` already ends in `/` or `#`).
    pub fn create_named_node(&self, base: &str) -> Result<NamedNode> {
        let id = self.ids.next_id();
        let iri = if base.ends_with('/') || base.ends_with('#') {
            format!("{base}{id}")
        } else {
            format!("{base}#{id}")
        };
        NamedNode::new(iri.clone()).map_err(|e| SemantizerError::InvalidIri {
            iri,
            reason: e.to_string(),
        })
    }

    pub fn add(&mut self, quad: Quad) -> &mut Self {
        self.store.insert(quad);
        self
    }

    pub fn delete(&mut self, quad: &Quad) -> &mut Self {
        self.store.remove(quad);
        self
    }

    pub fn add_all(&mut self, quads: impl IntoIterator<Item = Quad>) -> &mut Self {
        for quad in quads {
            self.store.insert(quad);
        }
        self
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }

    pub fn quads(&self) -> QuadIter<'_> {
        self.store.iter()
    }

    pub fn matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        self.store.quads_matching(pattern)
    }

    /// Writes every quad in `format`; triple formats drop the graph names.
    pub fn serialize<W: Write>(&self, format: RdfFormat, writer: W) -> Result<W> {
        Ok(util::write_quads(self.quads(), format, writer)?)
    }

    /// The `rdf:type`s of the focus node in the default graph, or of the named graph
    /// `graph` inside that graph.
    pub fn get_rdf_type_all(&self, graph: Option<NamedNodeRef<'_>>) -> Vec<NamedNode> {
        let (subject, graph_name) = match graph {
            Some(g) => (
                Some(NamedOrBlankNode::from(g.into_owned())),
                GraphName::NamedNode(g.into_owned()),
            ),
            None => (self.origin.focus.clone(), GraphName::DefaultGraph),
        };
        let Some(subject) = subject else {
            return Vec::new();
        };
        let pattern = QuadPattern::new()
            .subject(subject)
            .predicate(TYPE)
            .graph(graph_name);
        self.store
            .quads_matching(&pattern)
            .filter_map(|quad| match &quad.object {
                Term::NamedNode(node) => Some(node.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether the focus node has every one of `types` in the default graph.
    pub fn is_default_graph_rdf_type_of(&self, types: &[NamedNodeRef<'_>]) -> bool {
        let own = self.get_rdf_type_all(None);
        types
            .iter()
            .all(|t| own.iter().any(|o| o.as_ref() == *t))
    }

    /// The URI to fetch for `resource`, or `None` when it is a blank node, which is
    /// always local.
    fn uri_of(&self, resource: &Resource<'_>) -> Result<Option<String>> {
        let node = match resource {
            Resource::Uri(uri) => {
                if util::is_url_absolute(uri) {
                    return Ok(Some(uri.to_string()));
                }
                let base = self
                    .origin
                    .document
                    .as_ref()
                    .map(|d| d.as_str().to_string())
                    .or_else(|| match &self.origin.focus {
                        Some(NamedOrBlankNode::NamedNode(n)) => Some(n.as_str().to_string()),
                        _ => None,
                    })
                    .ok_or(SemantizerError::ResourceOriginUndefined)?;
                let resolved =
                    util::resolve(&base, uri).map_err(|e| SemantizerError::InvalidIri {
                        iri: uri.to_string(),
                        reason: e.to_string(),
                    })?;
                return Ok(Some(resolved));
            }
            Resource::Node(node) => node.clone(),
            Resource::Origin(origin) => origin
                .focus
                .clone()
                .ok_or(SemantizerError::ResourceOriginUndefined)?,
        };
        match node {
            NamedOrBlankNode::NamedNode(n) => Ok(Some(n.into_string())),
            _ => Ok(None),
        }
    }

    /// Loads the focus of this dataset's own origin.
    pub fn load(&mut self, loader: &dyn Loader) -> Result<usize> {
        let origin = self.origin.clone();
        self.load_from(Resource::Origin(&origin), loader)
    }

    /// Fetches `resource` with `loader` and merges its quads. When this dataset has a
    /// focus other than the resource, the quads are moved into a graph named after the
    /// resource. Returns the number of quads received.
    pub fn load_from(&mut self, resource: Resource<'_>, loader: &dyn Loader) -> Result<usize> {
        let Some(uri) = self.uri_of(&resource)? else {
            debug!("Not loading a blank node resource, its quads are already local");
            return Ok(0);
        };
        let started = Instant::now();
        let loaded = loader.load(&uri).map_err(SemantizerError::from_loader)?;
        info!(
            "Loading of {} done in {:.3} sec",
            uri,
            started.elapsed().as_secs_f64()
        );

        let retag = match &self.origin.focus {
            Some(NamedOrBlankNode::NamedNode(focus)) => focus.as_str() != uri,
            Some(_) => true,
            None => false,
        };
        let graph = if retag {
            Some(GraphName::NamedNode(NamedNode::new(uri.as_str()).map_err(
                |e| SemantizerError::InvalidIri {
                    iri: uri.clone(),
                    reason: e.to_string(),
                },
            )?))
        } else {
            None
        };

        let count = loaded.len();
        for quad in loaded {
            let quad = match &graph {
                Some(g) => Quad::new(quad.subject, quad.predicate, quad.object, g.clone()),
                None => quad,
            };
            self.store.insert(quad);
        }
        info!(
            "Finished loading {} quads of {} in memory in {:.3} sec",
            count,
            uri,
            started.elapsed().as_secs_f64()
        );
        Ok(count)
    }

    /// Opens a quad stream on the focus of this dataset's own origin.
    pub fn load_quad_stream(&self, loader: &dyn QuadStreamLoader) -> Result<QuadStream> {
        self.load_quad_stream_from(Resource::Origin(&self.origin), loader)
    }

    /// Opens a quad stream on `resource` without merging anything into this dataset.
    pub fn load_quad_stream_from(
        &self,
        resource: Resource<'_>,
        loader: &dyn QuadStreamLoader,
    ) -> Result<QuadStream> {
        let uri = self
            .uri_of(&resource)?
            .ok_or_else(|| SemantizerError::NotFound("blank node resource".to_string()))?;
        loader.load_stream(&uri).map_err(SemantizerError::from_loader)
    }
}

impl<S: QuadStore + Changelog> SemanticDataset<S> {
    pub fn get_changelog_added_quads(&self) -> &[Quad] {
        self.store.changelog_added_quads()
    }

    pub fn get_changelog_deleted_quads(&self) -> &[Quad] {
        self.store.changelog_deleted_quads()
    }

    /// The Solid N3 patch for the changes recorded so far.
    pub fn get_solid_changelog_n3<F>(&self, render: F) -> String
    where
        F: Fn(&Quad) -> String,
    {
        patch::solid_patch_n3(&self.store, render)
    }
}

impl<S: Changelog> Changelog for SemanticDataset<S> {
    fn changelog_added_quads(&self) -> &[Quad] {
        self.store.changelog_added_quads()
    }

    fn changelog_deleted_quads(&self) -> &[Quad] {
        self.store.changelog_deleted_quads()
    }
}

impl<S: QuadStore> QuadStore for SemanticDataset<S> {
    fn insert(&mut self, quad: Quad) -> bool {
        self.store.insert(quad)
    }

    fn remove(&mut self, quad: &Quad) -> bool {
        self.store.remove(quad)
    }

    fn contains(&self, quad: &Quad) -> bool {
        self.store.contains(quad)
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn iter(&self) -> QuadIter<'_> {
        self.store.iter()
    }

    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        self.store.quads_matching(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessors::TypedAccessors;
    use crate::ids::SequentialIdGenerator;
    use crate::loader::StaticLoader;

    const DOC: &str = "http://example.org/doc";
    const ALICE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://example.org/doc#alice");
    const PERSON: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://example.org/Person");
    const AGENT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://example.org/Agent");
    const NAME: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://example.org/name");

    fn doc() -> NamedNode {
        NamedNode::new(DOC).unwrap()
    }

    fn name_quad(value: &str) -> Quad {
        Quad::new(
            ALICE.into_owned(),
            NAME.into_owned(),
            oxigraph::model::Literal::new_simple_literal(value),
            GraphName::DefaultGraph,
        )
    }

    #[test]
    fn test_logged_dataset_records_changes() {
        let mut dataset = SemanticDataset::logged();
        let q1 = name_quad("alice");
        let q2 = name_quad("bob");
        dataset.add(q1.clone()).delete(&q2).add(q1.clone());
        assert_eq!(dataset.get_changelog_added_quads(), &[q1.clone(), q1]);
        assert_eq!(dataset.get_changelog_deleted_quads(), &[q2]);
        assert_eq!(dataset.count(), 1);
    }

    #[test]
    fn test_typed_accessors_go_through_the_log() {
        let mut dataset = SemanticDataset::logged();
        dataset.add_object_decimal(ALICE, NAME, 2.5, None).unwrap();
        assert_eq!(dataset.get_changelog_added_quads().len(), 1);
        let patch = dataset.get_solid_changelog_n3(patch::ntriples);
        assert!(patch.contains(
            "solid:inserts { <http://example.org/doc#alice> <http://example.org/name> \
             \"2.5\"^^<http://www.w3.org/2001/XMLSchema#decimal> . }"
        ));
    }

    #[test]
    fn test_rdf_types_of_focus() {
        let mut dataset = SemanticDataset::new();
        assert!(dataset.get_rdf_type_all(None).is_empty());
        dataset.add_linked_object(ALICE, TYPE, PERSON, None);
        dataset.add_linked_object(ALICE, TYPE, AGENT, None);
        dataset.set_origin(ALICE.into_owned());
        assert_eq!(dataset.get_rdf_type_all(None).len(), 2);
        assert!(dataset.is_default_graph_rdf_type_of(&[PERSON]));
        assert!(dataset.is_default_graph_rdf_type_of(&[PERSON, AGENT]));
        assert!(!dataset.is_default_graph_rdf_type_of(&[PERSON, NAME]));
    }

    #[test]
    fn test_rdf_types_of_named_graph() {
        let mut dataset = SemanticDataset::new();
        let graph = doc();
        dataset.add_linked_object(
            graph.as_ref(),
            TYPE,
            PERSON,
            Some(graph.as_ref().into()),
        );
        assert_eq!(
            dataset.get_rdf_type_all(Some(graph.as_ref())),
            vec![PERSON.into_owned()]
        );
        assert!(dataset.get_rdf_type_all(None).is_empty());
    }

    #[test]
    fn test_fresh_nodes_use_injected_ids() {
        let dataset = SemanticDataset::with_store(
            MemoryStore::new(),
            Arc::new(SequentialIdGenerator::new("b")),
        );
        assert_eq!(dataset.create_blank_node().as_str(), "b0");
        assert_eq!(
            dataset.create_named_node(DOC).unwrap().as_str(),
            "http://example.org/doc#b1"
        );
        assert_eq!(
            dataset
                .create_named_node("http://example.org/items/")
                .unwrap()
                .as_str(),
            "http://example.org/items/b2"
        );
    }

    #[test]
    fn test_load_into_own_document_keeps_graph() {
        let loader = StaticLoader::new().with_resource(DOC, vec![name_quad("alice")]);
        let mut dataset = SemanticDataset::new().with_origin(Origin::document(doc()));
        assert_eq!(dataset.load(&loader).unwrap(), 1);
        assert!(dataset.contains(&name_quad("alice")));
    }

    #[test]
    fn test_load_of_other_resource_moves_into_named_graph() {
        let other = "http://example.org/other";
        let loader = StaticLoader::new().with_resource(other, vec![name_quad("alice")]);
        let mut dataset = SemanticDataset::new().with_origin(Origin::document(doc()));
        dataset.load_from(Resource::Uri(other), &loader).unwrap();
        let quad = dataset.quads().next().unwrap();
        assert_eq!(
            quad.graph_name,
            GraphName::NamedNode(NamedNode::new(other).unwrap())
        );
    }

    #[test]
    fn test_relative_load_resolves_against_document() {
        let loader = StaticLoader::new()
            .with_resource("http://example.org/items/1", vec![name_quad("alice")]);
        let mut dataset = SemanticDataset::new().with_origin(Origin::document(
            NamedNode::new("http://example.org/items/").unwrap(),
        ));
        assert_eq!(dataset.load_from(Resource::Uri("1"), &loader).unwrap(), 1);
    }

    #[test]
    fn test_load_without_origin() {
        let loader = StaticLoader::new();
        let mut dataset = SemanticDataset::new();
        assert!(matches!(
            dataset.load(&loader),
            Err(SemantizerError::ResourceOriginUndefined)
        ));
        assert!(matches!(
            dataset.load_from(Resource::Uri("relative"), &loader),
            Err(SemantizerError::ResourceOriginUndefined)
        ));
    }

    #[test]
    fn test_loader_errors_propagate() {
        let loader = StaticLoader::new();
        let mut dataset = SemanticDataset::new();
        let err = dataset
            .load_from(Resource::Uri("http://example.org/missing"), &loader)
            .unwrap_err();
        assert!(matches!(err, SemantizerError::Load(_)));
    }

    #[test]
    fn test_blank_node_origin_is_not_loaded() {
        let loader = StaticLoader::new();
        let mut dataset = SemanticDataset::new().with_origin(Origin::new(BlankNode::default()));
        assert_eq!(dataset.load(&loader).unwrap(), 0);
    }

    #[test]
    fn test_serialize_as_nquads() {
        let mut dataset = SemanticDataset::new();
        dataset.add(name_quad("alice"));
        let out = dataset.serialize(RdfFormat::NQuads, Vec::new()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<http://example.org/doc#alice> <http://example.org/name> \"alice\" .\n"
        );
    }

    #[test]
    fn test_quad_stream_is_not_merged() {
        let loader = StaticLoader::new().with_resource(DOC, vec![name_quad("alice")]);
        let dataset = SemanticDataset::new().with_origin(Origin::document(doc()));
        let streamed: Vec<Quad> = dataset
            .load_quad_stream(&loader)
            .unwrap()
            .collect::<anyhow::Result<_>>()
            .unwrap();
        assert_eq!(streamed.len(), 1);
        assert!(dataset.is_empty());
    }
}
