//! URL helpers for resolving load targets and shortening IRIs against a document, plus
//! serialization of quad collections.

use anyhow::{anyhow, Result};
use log::info;
use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::{Quad, Triple};
use std::io::Write;
use url::Url;

pub fn is_url_absolute(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Returns whether `url` is relative and resolvable against `base`. Fails if `base` is
/// not an absolute URL or `url` cannot be resolved against it.
pub fn is_url_relative(url: &str, base: &str) -> Result<bool> {
    let base = Url::parse(base)?;
    if Url::parse(url).is_ok() {
        return Ok(false);
    }
    base.join(url)?;
    Ok(true)
}

/// Resolves `candidate` against `base`; absolute candidates are returned unchanged.
pub fn resolve(base: &str, candidate: &str) -> Result<String> {
    if is_url_absolute(candidate) {
        return Ok(candidate.to_string());
    }
    let base = Url::parse(base).map_err(|e| anyhow!("Invalid base URL {}: {}", base, e))?;
    Ok(base.join(candidate)?.to_string())
}

/// Computes the shortest form of `url` relative to `base_url`.
///
/// - an already relative `url` is returned as-is
/// - the same URL yields `""`
/// - a fragment of the base document yields `#fragment`
/// - a URL on another origin is returned absolute
/// - otherwise a path using `../` segments, or `./` when nothing remains
pub fn relative_url(url: &str, base_url: &str) -> Result<String> {
    if is_url_relative(url, base_url)? {
        return Ok(url.to_string());
    }
    let absolute = Url::parse(url)?;
    let base = Url::parse(base_url)?;

    if absolute.as_str() == base.as_str() {
        return Ok(String::new());
    }
    if absolute.origin() != base.origin() {
        return Ok(absolute.to_string());
    }
    if absolute.path() == base.path() {
        if let Some(fragment) = absolute.fragment() {
            return Ok(format!("#{fragment}"));
        }
    }

    let absolute_segments: Vec<&str> = absolute
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let base_segments: Vec<&str> = base.path().split('/').filter(|s| !s.is_empty()).collect();
    let common = absolute_segments
        .iter()
        .zip(base_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    // the last base segment is the document itself, not a directory
    let backtracking = base_segments.len().saturating_sub(common + 1);
    let relative = format!(
        "{}{}",
        "../".repeat(backtracking),
        absolute_segments[common..].join("/")
    );
    if relative.is_empty() {
        Ok("./".to_string())
    } else {
        Ok(relative)
    }
}

/// Writes quads in the given format. Triple formats drop the graph component.
pub fn write_quads<'a, W: Write>(
    quads: impl IntoIterator<Item = &'a Quad>,
    format: RdfFormat,
    writer: W,
) -> Result<W> {
    let mut serializer = RdfSerializer::from_format(format).for_writer(writer);
    let mut count = 0usize;
    for quad in quads {
        if format.supports_datasets() {
            serializer.serialize_quad(quad)?;
        } else {
            serializer.serialize_triple(&Triple::new(
                quad.subject.clone(),
                quad.predicate.clone(),
                quad.object.clone(),
            ))?;
        }
        count += 1;
    }
    info!("Serialized {} quads as {}", count, format.name());
    Ok(serializer.finish()?)
}
