use shared::domain::Item;
use tokio::sync::RwLock;

/// Most recently fetched results, replaced wholesale on every commit.
#[derive(Default)]
pub struct ResultStore {
    items: RwLock<Vec<Item>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, items: Vec<Item>) {
        *self.items.write().await = items;
    }

    pub async fn get(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }
}
