//! Menu repository trait (port)

use async_trait::async_trait;

use crate::error::DomainError;
use crate::model::MenuEntry;

/// Whole-document store: every read returns the full ordered list and every
/// write replaces it.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<MenuEntry>, DomainError>;
    async fn save(&self, entries: &[MenuEntry]) -> Result<(), DomainError>;
}
