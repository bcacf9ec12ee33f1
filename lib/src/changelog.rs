//! Records every quad passed to a store's mutating primitives.

use crate::store::{MemoryStore, QuadIter, QuadPattern, QuadStore};
use oxigraph::model::Quad;

/// A `QuadStore` decorator that appends each inserted quad to an "added" log and each
/// removed quad to a "deleted" log before delegating to the wrapped store.
///
/// The logs are observational: calls that do not change the underlying set are still
/// recorded, entries are never deduplicated, and a delete never erases an earlier add.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog<S = MemoryStore> {
    inner: S,
    added: Vec<Quad>,
    deleted: Vec<Quad>,
}

impl<S: QuadStore> ChangeLog<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            added: Vec::new(),
            deleted: Vec::new(),
        }
    }

    pub fn added_quads(&self) -> &[Quad] {
        &self.added
    }

    pub fn deleted_quads(&self) -> &[Quad] {
        &self.deleted
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: QuadStore> QuadStore for ChangeLog<S> {
    fn insert(&mut self, quad: Quad) -> bool {
        self.added.push(quad.clone());
        self.inner.insert(quad)
    }

    fn remove(&mut self, quad: &Quad) -> bool {
        self.deleted.push(quad.clone());
        self.inner.remove(quad)
    }

    fn contains(&self, quad: &Quad) -> bool {
        self.inner.contains(quad)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn iter(&self) -> QuadIter<'_> {
        self.inner.iter()
    }

    fn quads_matching<'a>(&'a self, pattern: &QuadPattern) -> QuadIter<'a> {
        self.inner.quads_matching(pattern)
    }
}

/// Read access to the recorded changes, implemented by anything that wraps a
/// [`ChangeLog`].
pub trait Changelog {
    fn changelog_added_quads(&self) -> &[Quad];
    fn changelog_deleted_quads(&self) -> &[Quad];
}

impl<S: QuadStore> Changelog for ChangeLog<S> {
    fn changelog_added_quads(&self) -> &[Quad] {
        self.added_quads()
    }

    fn changelog_deleted_quads(&self) -> &[Quad] {
        self.deleted_quads()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{GraphName, NamedNode};

    fn quad(s: &str) -> Quad {
        Quad::new(
            NamedNode::new(format!("http://example.org/{s}")).unwrap(),
            NamedNode::new("http://example.org/p").unwrap(),
            NamedNode::new("http://example.org/o").unwrap(),
            GraphName::DefaultGraph,
        )
    }

    #[test]
    fn test_log_keeps_every_call_in_order() {
        let q1 = quad("a");
        let q2 = quad("b");
        let mut log = ChangeLog::new(MemoryStore::new());
        log.insert(q1.clone());
        log.remove(&q2);
        log.insert(q1.clone());

        assert_eq!(log.added_quads(), &[q1.clone(), q1.clone()]);
        assert_eq!(log.deleted_quads(), &[q2]);
        // the set itself only holds q1 once
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_delete_does_not_erase_add() {
        let q1 = quad("a");
        let mut log = ChangeLog::new(MemoryStore::new());
        log.insert(q1.clone());
        log.remove(&q1);
        assert!(log.is_empty());
        assert_eq!(log.changelog_added_quads(), &[q1.clone()]);
        assert_eq!(log.changelog_deleted_quads(), &[q1]);
    }
}
