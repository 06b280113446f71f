use std::sync::Arc;

use crate::lists::ListCache;
use crate::session::SessionGate;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub gate: Arc<SessionGate>,
    pub lists: Arc<ListCache>,
}
