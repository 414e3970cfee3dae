use std::sync::Arc;

use super::actions::{handle_click, ClickOutcome, Navigator};
use super::autobook::{auto_book, AutoBook, Readiness};
use super::catalog::ServiceCatalog;
use super::dom::{Document, Element, NodeId, Trigger};
use super::wiring::{ImageWiring, WireReport};
use crate::models::ServiceDescriptor;

const NESTED_CONTROLS: [&str; 3] = ["button", "a", ".btn"];

/// A loaded page: its document, window and the host's booking readiness.
pub struct Page<N: Navigator> {
    document: Document,
    navigator: N,
    wiring: ImageWiring,
    readiness: Readiness,
}

impl<N: Navigator> Page<N> {
    pub fn new(
        document: Document,
        navigator: N,
        catalog: Arc<ServiceCatalog>,
        readiness: Readiness,
    ) -> Self {
        Self {
            document,
            navigator,
            wiring: ImageWiring::new(catalog),
            readiness,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Wires the page, then honours a `?book=<id>` request.
    pub async fn load(&mut self) -> AutoBook {
        self.wire();
        auto_book(&mut self.navigator, &mut self.readiness).await
    }

    pub fn wire(&mut self) -> WireReport {
        self.wiring.wire_up(&mut self.document)
    }

    /// Adds content after load; new images are wired immediately.
    pub fn insert(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.document.append(parent, element);
        self.wire();
        id
    }

    pub fn click(&mut self, target: NodeId) -> ClickOutcome {
        let Some((_, binding)) = self.document.dispatch(target, Trigger::Click) else {
            return ClickOutcome::Ignored;
        };
        if binding.skip_nested_controls
            && self.document.closest(target, &NESTED_CONTROLS).is_some()
        {
            return ClickOutcome::Ignored;
        }
        let service = binding.service.clone();
        self.activate(service)
    }

    pub fn press_key(&mut self, target: NodeId, key: &str) -> ClickOutcome {
        if key != "Enter" && key != " " {
            return ClickOutcome::Ignored;
        }
        let Some((_, binding)) = self.document.dispatch(target, Trigger::Activate) else {
            return ClickOutcome::Ignored;
        };
        let service = binding.service.clone();
        self.activate(service)
    }

    fn activate(&mut self, service: ServiceDescriptor) -> ClickOutcome {
        let modal = self.readiness.current();
        handle_click(&service, &mut self.navigator, modal.as_deref())
    }
}
