//! The quad storage seam. `QuadStore` is the narrow capability every higher layer
//! (typed accessors, change log, navigator) is written against, and `MemoryStore` is the
//! insertion-ordered in-memory implementation used by datasets.

use oxigraph::model::{GraphName, NamedNode, NamedOrBlankNode, Quad, Term};
use std::collections::HashMap;

/// A quad pattern; `None` in any position is a wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadPattern {
    pub subject: Option<NamedOrBlankNode>,
    pub predicate: Option<NamedNode>,
    pub object: Option<Term>,
    pub graph: Option<GraphName>,
}

impl QuadPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<NamedOrBlankNode>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn predicate(mut self, predicate: impl Into<NamedNode>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, object: impl Into<Term>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn graph(mut self, graph: impl Into<GraphName>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    /// Restricts the graph only when one is given.
    pub fn maybe_graph(mut self, graph: Option<GraphName>) -> Self {
        self.graph = graph;
        self
    }

    pub fn matches(&self, quad: &Quad) -> bool {
        self.subject.as_ref().map_or(true, |s| *s == quad.subject)
            && self.predicate.as_ref().map_or(true, |p| *p == quad.predicate)
            && self.object.as_ref().map_or(true, |o| *o == quad.object)
            && self.graph.as_ref().map_or(true, |g| *g == quad.graph_name)
    }
}

pub type QuadIter<'a> = Box<dyn Iterator<Item = &'a Quad> + 'a>;

pub trait QuadStore {
    /// Inserts a quad, returning `true` if it was not already present.
    fn insert(&mut self, quad: Quad) -> bool;

    /// Removes a quad, returning `true` if it was present.
    fn remove(&mut self, quad: &Quad) -> bool;

    fn contains(&self, quad: &Quad) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All quads in the store's iteration order.
    fn iter(&self) -> QuadIter<'_>;

    /// Quads matching `pattern`, in the store's iteration order.
    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a>;
}

/// In-memory quad set that iterates in insertion order.
///
/// Quads live in an append-only slot arena; removals leave a tombstone that is compacted
/// once tombstones outnumber live quads. A subject index keeps subject-bound matches
/// (the common case for accessors and closures) proportional to the subject's degree.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Vec<Option<Quad>>,
    positions: HashMap<Quad, usize>,
    by_subject: HashMap<NamedOrBlankNode, Vec<usize>>,
}

const COMPACT_THRESHOLD: usize = 64;

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tombstones(&self) -> usize {
        self.slots.len() - self.positions.len()
    }

    fn compact(&mut self) {
        let live: Vec<Quad> = self.slots.drain(..).flatten().collect();
        self.positions.clear();
        self.by_subject.clear();
        for quad in live {
            self.push(quad);
        }
    }

    fn push(&mut self, quad: Quad) {
        let slot = self.slots.len();
        self.by_subject
            .entry(quad.subject.clone())
            .or_default()
            .push(slot);
        self.positions.insert(quad.clone(), slot);
        self.slots.push(Some(quad));
    }
}

impl QuadStore for MemoryStore {
    fn insert(&mut self, quad: Quad) -> bool {
        if self.positions.contains_key(&quad) {
            return false;
        }
        self.push(quad);
        true
    }

    fn remove(&mut self, quad: &Quad) -> bool {
        let Some(slot) = self.positions.remove(quad) else {
            return false;
        };
        self.slots[slot] = None;
        if let Some(slots) = self.by_subject.get_mut(&quad.subject) {
            slots.retain(|s| *s != slot);
            if slots.is_empty() {
                self.by_subject.remove(&quad.subject);
            }
        }
        let tombstones = self.tombstones();
        if tombstones > COMPACT_THRESHOLD && tombstones > self.positions.len() {
            self.compact();
        }
        true
    }

    fn contains(&self, quad: &Quad) -> bool {
        self.positions.contains_key(quad)
    }

    fn len(&self) -> usize {
        self.positions.len()
    }

    fn iter(&self) -> QuadIter<'_> {
        Box::new(self.slots.iter().flatten())
    }

    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        let pattern = pattern.clone();
        match pattern.subject.clone() {
            Some(subject) => {
                let slots = self
                    .by_subject
                    .get(&subject)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                Box::new(
                    slots
                        .iter()
                        .filter_map(move |slot| self.slots[*slot].as_ref())
                        .filter(move |quad| pattern.matches(quad)),
                )
            }
            None => Box::new(self.iter().filter(move |quad| pattern.matches(quad))),
        }
    }
}

impl FromIterator<Quad> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Quad>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for quad in iter {
            store.insert(quad);
        }
        store
    }
}
