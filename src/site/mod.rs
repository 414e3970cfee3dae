//! Service image wiring for the marketing pages.
//!
//! Known service photos (by filename) become buttons that either book the
//! service on `services.html` or open a WhatsApp quote chat. The page's own
//! booking modal is injected as a [`BookingModal`] and signals readiness
//! through [`readiness`].

pub mod actions;
pub mod autobook;
pub mod catalog;
pub mod dom;
pub mod filename;
pub mod page;
pub mod wiring;

pub use actions::{handle_click, BookingModal, ClickOutcome, Navigator};
pub use autobook::{auto_book, readiness, AutoBook, Readiness, ReadinessHandle};
pub use catalog::ServiceCatalog;
pub use dom::{Document, Element, NodeId};
pub use page::Page;
pub use wiring::{ImageWiring, WireReport};
