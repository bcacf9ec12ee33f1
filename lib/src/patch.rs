//! Renders a change log as a Solid N3 `InsertDeletePatch` document.
//!
//! ```text
//! @prefix solid: <http://www.w3.org/ns/solid/terms#>.
//! _:patch a solid:InsertDeletePatch;
//! solid:inserts { <s> <p> <o> . }
//! .
//! ```
//!
//! The `inserts` clause is written only when quads were added. When quads were deleted,
//! a `deletes` clause and a `where` clause (the deleted triples as preconditions) follow,
//! separated by `;`.

use crate::changelog::Changelog;
use crate::consts::SOLID_NAMESPACE;
use oxigraph::model::Quad;

/// Renders a quad as an N-Triples statement (`s p o .`), ignoring its graph.
pub fn ntriples(quad: &Quad) -> String {
    format!("{} {} {} .", quad.subject, quad.predicate, quad.object)
}

fn clause<F>(name: &str, quads: &[Quad], render: &F) -> String
where
    F: Fn(&Quad) -> String,
{
    let mut out = format!("solid:{name} {{ ");
    for quad in quads {
        out.push_str(&render(quad));
        out.push(' ');
    }
    out.push('}');
    out
}

/// Builds the patch document for `log`, rendering each quad with `render`.
pub fn solid_patch_n3<L, F>(log: &L, render: F) -> String
where
    L: Changelog + ?Sized,
    F: Fn(&Quad) -> String,
{
    let mut patch = format!("@prefix solid: <{SOLID_NAMESPACE}>.\n");
    patch.push_str("_:patch a solid:InsertDeletePatch;\n");

    let mut clauses = Vec::new();
    let added = log.changelog_added_quads();
    if !added.is_empty() {
        clauses.push(clause("inserts", added, &render));
    }
    let deleted = log.changelog_deleted_quads();
    if !deleted.is_empty() {
        clauses.push(clause("deletes", deleted, &render));
        clauses.push(clause("where", deleted, &render));
    }
    if !clauses.is_empty() {
        patch.push_str(&clauses.join(";\n"));
        patch.push('\n');
    }
    patch.push('.');
    patch
}
