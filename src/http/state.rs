use crate::patterns::PatternClassifier;
use crate::storage::StorageInstance;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct HttpServerState {
    pub name: Arc<String>,
    pub storage: Arc<dyn StorageInstance>,
    pub classifier: Arc<PatternClassifier>,
    /// Uploaded files are kept here when set.
    pub upload_directory: Option<PathBuf>,
    pub max_listed_patterns: usize,
}
