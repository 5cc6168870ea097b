use crate::catalog::Catalog;
use crate::error::CatalogUnavailable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Results coming back from the runtime to the UI thread.
#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded {
        generation: u64,
        category: String,
        result: Result<Catalog, CatalogUnavailable>,
    },
    AssistantReplied {
        request_id: RequestId,
        text: String,
    },
}
