//! `Semantizer` is the entry point applications hold on to: it carries the configuration
//! and the id generator shared by every dataset it builds, and the loader used to fetch
//! documents.

use crate::changelog::ChangeLog;
use crate::config::Config;
use crate::dataset::{LoggedDataset, SemanticDataset};
use crate::errors::{Result, SemantizerError};
use crate::ids::{IdGenerator, RandomIdGenerator};
use crate::loader::{Loader, SchemeLoader};
use crate::origin::Origin;
use crate::store::MemoryStore;
use log::info;
use oxigraph::model::NamedNode;
use std::sync::Arc;

pub struct Semantizer {
    config: Config,
    ids: Arc<dyn IdGenerator>,
    loader: Box<dyn Loader>,
}

impl Semantizer {
    /// Builds a semantizer fetching `file:`/path resources from disk and `http(s)`
    /// resources over the network (unless the config is offline).
    pub fn new(config: Config) -> Result<Self> {
        let loader = SchemeLoader::new(&config).map_err(SemantizerError::from_loader)?;
        info!(
            "Semantizer ready (offline: {}, timeout: {}s)",
            config.offline, config.timeout_secs
        );
        Ok(Self {
            config,
            ids: Arc::new(RandomIdGenerator),
            loader: Box::new(loader),
        })
    }

    pub fn with_loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loader(&self) -> &dyn Loader {
        self.loader.as_ref()
    }

    pub fn build(&self) -> SemanticDataset {
        SemanticDataset::with_store(MemoryStore::new(), Arc::clone(&self.ids))
    }

    pub fn build_logged(&self) -> LoggedDataset {
        SemanticDataset::with_store(ChangeLog::new(MemoryStore::new()), Arc::clone(&self.ids))
    }

    /// Fetches `uri` into a fresh dataset whose origin is the document.
    pub fn load(&self, uri: &str) -> Result<SemanticDataset> {
        let document = NamedNode::new(uri).map_err(|e| SemantizerError::InvalidIri {
            iri: uri.to_string(),
            reason: e.to_string(),
        })?;
        let mut dataset = self.build().with_origin(Origin::document(document));
        dataset.load(self.loader())?;
        Ok(dataset)
    }
}
