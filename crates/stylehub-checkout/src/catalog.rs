//! Catalog listing state: fetched items, page window, hover tracking.

use std::collections::HashSet;

use stylehub_api::{CatalogKind, StorefrontApi};
use stylehub_core::{BuyAffordance, Item, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStatus {
    NotLoaded,
    Loaded,
    /// The last fetch failed; the catalog shows as empty.
    Failed,
}

/// Holds one catalog listing and its presentation state.
///
/// Items stay in memory once fetched; "show more" only widens the window.
#[derive(Debug)]
pub struct CatalogBrowser {
    kind: CatalogKind,
    page_size: usize,
    items: Vec<Item>,
    status: CatalogStatus,
    expanded: bool,
    hovered: HashSet<ItemId>,
}

impl CatalogBrowser {
    #[must_use]
    pub fn new(kind: CatalogKind, page_size: usize) -> Self {
        Self {
            kind,
            page_size,
            items: Vec::new(),
            status: CatalogStatus::NotLoaded,
            expanded: false,
            hovered: HashSet::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    /// Fetches the listing, replacing held items. A failed fetch is logged
    /// and leaves the catalog empty. Returns the number of items held.
    pub async fn load<A: StorefrontApi>(&mut self, api: &A) -> usize {
        match api.fetch_items(self.kind).await {
            Ok(items) => {
                tracing::debug!(kind = %self.kind, count = items.len(), "catalog loaded");
                self.replace_items(items);
            }
            Err(e) => {
                tracing::warn!(kind = %self.kind, error = %e, "catalog fetch failed");
                self.replace_items(Vec::new());
                self.status = CatalogStatus::Failed;
            }
        }
        self.items.len()
    }

    /// Replaces held items and resets window and hover state.
    pub fn replace_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.status = CatalogStatus::Loaded;
        self.expanded = false;
        self.hovered.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Items inside the current window.
    #[must_use]
    pub fn visible_items(&self) -> &[Item] {
        if self.expanded {
            &self.items
        } else {
            &self.items[..self.items.len().min(self.page_size)]
        }
    }

    /// `true` when items are held beyond the collapsed window.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.items.len() > self.page_size
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle_show_all(&mut self) {
        self.expanded = !self.expanded;
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn set_hovered(&mut self, id: ItemId, hovered: bool) {
        if hovered {
            self.hovered.insert(id);
        } else {
            self.hovered.remove(&id);
        }
    }

    #[must_use]
    pub fn is_hovered(&self, id: ItemId) -> bool {
        self.hovered.contains(&id)
    }

    /// Hover image while hovered, else the primary image.
    #[must_use]
    pub fn display_image<'a>(&self, item: &'a Item) -> &'a str {
        item.display_image(self.is_hovered(item.id))
    }

    #[must_use]
    pub fn affordance(&self, item: &Item) -> BuyAffordance {
        BuyAffordance::for_item(item)
    }
}
