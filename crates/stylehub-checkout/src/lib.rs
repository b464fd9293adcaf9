pub mod catalog;
pub mod controller;
pub mod detail;
pub mod site;
pub mod tracking;
pub mod workflow;

pub use catalog::{CatalogBrowser, CatalogStatus};
pub use controller::{Applied, CheckoutController, CheckoutEvent};
pub use detail::{
    DetailRequest, DetailState, ImageRect, ProductDetailViewer, ZoomFocus,
    DETAIL_LOAD_FAILED_MESSAGE,
};
pub use site::{load_faqs, load_settings};
pub use tracking::{EventSink, TrackedEvent, TrackingEvent, TracingSink};
pub use workflow::{
    CloseReason, CompletionOutcome, PendingOrder, PurchaseWorkflow, SessionId, SubmissionTicket,
    SubmitOutcome, WorkflowState, ORDER_SUCCESS_MESSAGE,
};
