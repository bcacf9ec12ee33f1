//! Loaders turn a resource URI into quads. The dataset layer only sees the `Loader` and
//! `QuadStreamLoader` traits; the implementations here cover local files, HTTP(S) with
//! content negotiation, scheme dispatch between the two, and fixed in-memory fixtures.

use crate::config::Config;
use crate::errors::SemantizerError;
use anyhow::{anyhow, Result};
use log::debug;
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Quad;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

pub type QuadStream = Box<dyn Iterator<Item = Result<Quad>>>;

pub trait Loader {
    fn load(&self, uri: &str) -> Result<Vec<Quad>>;
}

pub trait QuadStreamLoader {
    fn load_stream(&self, uri: &str) -> Result<QuadStream>;
}

fn parser(format: RdfFormat, base_iri: &str) -> RdfParser {
    match RdfParser::from_format(format).with_base_iri(base_iri) {
        Ok(parser) => parser,
        Err(e) => {
            debug!("Not using {} as base IRI: {}", base_iri, e);
            RdfParser::from_format(format)
        }
    }
}

/// Attempts to infer an RDF format from the path extension.
fn detect_format_from_path(path: &Path) -> Option<RdfFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        // n3 files in the wild are almost always turtle
        Some("n3") => Some(RdfFormat::Turtle),
        Some("xml") | Some("owl") => Some(RdfFormat::RdfXml),
        Some(ext) => RdfFormat::from_extension(ext),
        None => None,
    }
}

/// Reads local files, given as paths or `file://` IRIs.
#[derive(Debug, Default, Clone)]
pub struct FileLoader;

impl FileLoader {
    fn path_of(uri: &str) -> Result<PathBuf> {
        if uri.starts_with("file:") {
            let url = url::Url::parse(uri)?;
            return url
                .to_file_path()
                .map_err(|_| anyhow!("Not a local file IRI: {}", uri));
        }
        Ok(PathBuf::from(uri))
    }

    fn base_iri(path: &Path, uri: &str) -> String {
        url::Url::from_file_path(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| uri.to_string())
    }
}

impl QuadStreamLoader for FileLoader {
    fn load_stream(&self, uri: &str) -> Result<QuadStream> {
        let path = Self::path_of(uri)?;
        debug!("Reading file: {}", path.display());
        let format = detect_format_from_path(&path).unwrap_or(RdfFormat::Turtle);
        let file = File::open(&path)?;
        let quads = parser(format, &Self::base_iri(&path, uri))
            .for_reader(BufReader::new(file))
            .map(|quad| quad.map_err(anyhow::Error::from));
        Ok(Box::new(quads))
    }
}

impl Loader for FileLoader {
    fn load(&self, uri: &str) -> Result<Vec<Quad>> {
        self.load_stream(uri)?.collect()
    }
}

/// Fetches resources over HTTP(S) with a blocking client.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    client: Client,
    accept: String,
    offline: bool,
}

impl HttpLoader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            accept: config.accept_header(),
            offline: config.offline,
        })
    }

    fn fetch(&self, uri: &str) -> Result<(Vec<u8>, RdfFormat)> {
        if self.offline {
            return Err(anyhow!(SemantizerError::Offline(uri.to_string())));
        }
        debug!("Reading url: {}", uri);
        let resp = self.client.get(uri).header(ACCEPT, &self.accept).send()?;
        if !resp.status().is_success() {
            return Err(anyhow!(
                "Failed to fetch {} (status {})",
                uri,
                resp.status()
            ));
        }
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_string());
        let format = content_type
            .as_deref()
            .and_then(RdfFormat::from_media_type)
            .or_else(|| {
                let path = uri.split(['#', '?']).next().unwrap_or(uri);
                detect_format_from_path(Path::new(path))
            })
            .unwrap_or_else(|| {
                debug!("Unknown content type {:?}, assuming turtle", content_type);
                RdfFormat::Turtle
            });
        Ok((resp.bytes()?.to_vec(), format))
    }
}

impl QuadStreamLoader for HttpLoader {
    fn load_stream(&self, uri: &str) -> Result<QuadStream> {
        let (bytes, format) = self.fetch(uri)?;
        let quads = parser(format, uri)
            .for_reader(Cursor::new(bytes))
            .map(|quad| quad.map_err(anyhow::Error::from));
        Ok(Box::new(quads))
    }
}

impl Loader for HttpLoader {
    fn load(&self, uri: &str) -> Result<Vec<Quad>> {
        self.load_stream(uri)?.collect()
    }
}

/// Dispatches `http(s)` URIs to an [`HttpLoader`] and everything else to a
/// [`FileLoader`].
#[derive(Debug, Clone)]
pub struct SchemeLoader {
    http: HttpLoader,
    file: FileLoader,
}

impl SchemeLoader {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: HttpLoader::new(config)?,
            file: FileLoader,
        })
    }

    fn is_http(uri: &str) -> bool {
        uri.starts_with("http://") || uri.starts_with("https://")
    }
}

impl QuadStreamLoader for SchemeLoader {
    fn load_stream(&self, uri: &str) -> Result<QuadStream> {
        if Self::is_http(uri) {
            self.http.load_stream(uri)
        } else {
            self.file.load_stream(uri)
        }
    }
}

impl Loader for SchemeLoader {
    fn load(&self, uri: &str) -> Result<Vec<Quad>> {
        if Self::is_http(uri) {
            self.http.load(uri)
        } else {
            self.file.load(uri)
        }
    }
}

/// Serves fixed quads per URI; unknown URIs are an error.
#[derive(Debug, Default, Clone)]
pub struct StaticLoader {
    resources: HashMap<String, Vec<Quad>>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(mut self, uri: impl Into<String>, quads: Vec<Quad>) -> Self {
        self.resources.insert(uri.into(), quads);
        self
    }
}

impl Loader for StaticLoader {
    fn load(&self, uri: &str) -> Result<Vec<Quad>> {
        self.resources
            .get(uri)
            .cloned()
            .ok_or_else(|| anyhow!("Failed to fetch {}: no such resource", uri))
    }
}

impl QuadStreamLoader for StaticLoader {
    fn load_stream(&self, uri: &str) -> Result<QuadStream> {
        let quads = self.load(uri)?;
        Ok(Box::new(quads.into_iter().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TURTLE: &str = r#"
@prefix ex: <http://example.org/> .
ex:a ex:p ex:b .
ex:b ex:q [ ex:r "leaf" ] .
<#local> ex:p "relative" .
"#;

    #[test]
    fn test_file_loader_reads_turtle_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.ttl");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(TURTLE.as_bytes())
            .unwrap();

        let quads = FileLoader.load(path.to_str().unwrap()).unwrap();
        assert_eq!(quads.len(), 4);

        // file:// IRIs work too and relative IRIs resolve against the file
        let iri = url::Url::from_file_path(&path).unwrap().to_string();
        let quads = FileLoader.load(&iri).unwrap();
        assert!(quads
            .iter()
            .any(|q| q.subject.to_string() == format!("<{}#local>", iri)));
    }

    #[test]
    fn test_file_loader_reads_ntriples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.nt");
        std::fs::write(
            &path,
            "<http://example.org/a> <http://example.org/p> \"x\" .\n",
        )
        .unwrap();
        let quads = FileLoader.load(path.to_str().unwrap()).unwrap();
        assert_eq!(quads.len(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(FileLoader.load("/definitely/not/here.ttl").is_err());
    }

    #[test]
    fn test_offline_http_loader_refuses() {
        let loader = HttpLoader::new(&Config::offline()).unwrap();
        let err = loader.load("http://example.org/data.ttl").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SemantizerError>(),
            Some(SemantizerError::Offline(_))
        ));
    }

    #[test]
    fn test_static_loader() {
        let loader = StaticLoader::new().with_resource("http://example.org/doc", vec![]);
        assert!(loader.load("http://example.org/doc").unwrap().is_empty());
        assert!(loader.load("http://example.org/other").is_err());
        assert_eq!(
            loader.load_stream("http://example.org/doc").unwrap().count(),
            0
        );
    }
}
