use std::sync::Arc;

use service::store::EntityStore;

/// Shared application state: the one long-lived store handle, injected so
/// tests can swap in a fake store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
}
