use std::sync::Arc;

use sqlx::SqlitePool;

use crate::gemini::TextGenerator;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub generator: Arc<dyn TextGenerator>,
}
