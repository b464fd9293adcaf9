//! Product detail viewer: fetch state, gallery selection, and zoom focus.
//!
//! Independent of the purchase workflow. Opening or browsing details never
//! touches an [`stylehub_core::OrderDraft`].

use std::sync::Arc;

use stylehub_api::{ApiError, StorefrontApi};
use stylehub_core::{Item, ItemDetail, ItemId};

use crate::tracking::{EventSink, TrackedEvent, TrackingEvent, TracingSink};

pub const DETAIL_LOAD_FAILED_MESSAGE: &str = "Failed to load product details";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Idle,
    Loading { id: ItemId },
    Loaded(ItemDetail),
    Failed { id: ItemId, message: String },
}

/// Correlates a detail response with the open request that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: ItemId,
    seq: u64,
}

/// Bounding box of the rendered image, in the pointer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Pointer position over the image as percentages in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFocus {
    pub x: f64,
    pub y: f64,
}

impl ZoomFocus {
    /// Maps a pointer position inside `rect` to percentages, clamped to the
    /// image bounds. A degenerate rect yields the centre.
    #[must_use]
    pub fn from_pointer(rect: ImageRect, pointer_x: f64, pointer_y: f64) -> Self {
        fn axis(offset: f64, extent: f64) -> f64 {
            if extent <= 0.0 {
                return 50.0;
            }
            (offset / extent * 100.0).clamp(0.0, 100.0)
        }
        Self {
            x: axis(pointer_x - rect.left, rect.width),
            y: axis(pointer_y - rect.top, rect.height),
        }
    }

    /// CSS `background-position` value for the magnified image.
    #[must_use]
    pub fn background_position(&self) -> String {
        format!("{:.2}% {:.2}%", self.x, self.y)
    }
}

pub struct ProductDetailViewer {
    sink: Arc<dyn EventSink>,
    state: DetailState,
    seq: u64,
    pending: Option<DetailRequest>,
    initial_image: Option<String>,
    active_image: Option<String>,
    zoom: Option<ZoomFocus>,
}

impl Default for ProductDetailViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductDetailViewer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sink: Arc::new(TracingSink),
            state: DetailState::Idle,
            seq: 0,
            pending: None,
            initial_image: None,
            active_image: None,
            zoom: None,
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    #[must_use]
    pub fn detail(&self) -> Option<&ItemDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    /// Starts showing `id`. Any earlier request becomes stale.
    ///
    /// `initial_image` takes precedence over the gallery's primary image
    /// once the detail arrives.
    pub fn open(&mut self, id: ItemId, initial_image: Option<String>) -> DetailRequest {
        self.seq += 1;
        let request = DetailRequest { id, seq: self.seq };
        self.pending = Some(request);
        self.state = DetailState::Loading { id };
        self.initial_image = initial_image;
        self.active_image = None;
        self.zoom = None;
        request
    }

    /// Opens details for a catalog card and records a
    /// `view_product_details` event.
    pub fn open_item(&mut self, item: &Item, initial_image: Option<String>) -> DetailRequest {
        self.sink
            .record(&TrackedEvent::now(TrackingEvent::view_product_details(item)));
        self.open(item.id, initial_image)
    }

    /// Applies a detail response. Returns `false` for a stale request.
    pub fn apply(&mut self, request: DetailRequest, result: Result<ItemDetail, ApiError>) -> bool {
        if self.pending != Some(request) {
            tracing::debug!(item_id = %request.id, "discarding stale product detail");
            return false;
        }
        self.pending = None;
        match result {
            Ok(detail) => {
                self.active_image = self
                    .initial_image
                    .take()
                    .or_else(|| detail.primary_image().map(str::to_owned));
                self.state = DetailState::Loaded(detail);
            }
            Err(e) => {
                tracing::warn!(item_id = %request.id, error = %e, "product detail fetch failed");
                self.state = DetailState::Failed {
                    id: request.id,
                    message: DETAIL_LOAD_FAILED_MESSAGE.to_string(),
                };
            }
        }
        true
    }

    /// Opens `id` and waits for its detail.
    pub async fn load<A: StorefrontApi>(
        &mut self,
        api: &A,
        id: ItemId,
        initial_image: Option<String>,
    ) -> &DetailState {
        let request = self.open(id, initial_image);
        let result = api.fetch_item_detail(id).await;
        self.apply(request, result);
        &self.state
    }

    pub fn close(&mut self) {
        self.pending = None;
        self.state = DetailState::Idle;
        self.initial_image = None;
        self.active_image = None;
        self.zoom = None;
    }

    #[must_use]
    pub fn active_image(&self) -> Option<&str> {
        self.active_image.as_deref()
    }

    /// Switches the main image to a gallery entry. Unknown URLs are ignored.
    pub fn select_image(&mut self, url: &str) -> bool {
        let known = self
            .detail()
            .is_some_and(|d| d.images.iter().any(|img| img.url == url));
        if known {
            self.active_image = Some(url.to_string());
        }
        known
    }

    pub fn pointer_moved(&mut self, rect: ImageRect, pointer_x: f64, pointer_y: f64) -> ZoomFocus {
        let focus = ZoomFocus::from_pointer(rect, pointer_x, pointer_y);
        self.zoom = Some(focus);
        focus
    }

    pub fn pointer_left(&mut self) {
        self.zoom = None;
    }

    #[must_use]
    pub fn zoom(&self) -> Option<ZoomFocus> {
        self.zoom
    }
}
