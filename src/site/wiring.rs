use std::sync::Arc;

use super::catalog::ServiceCatalog;
use super::dom::{Binding, Document, Element, NodeId, Trigger};
use super::filename::{filename_from_background, filename_from_src};
use crate::models::ServiceDescriptor;

pub const STYLE_ID: &str = "gg-clickable-styles";
pub const WRAPPER_CLASS: &str = "gg-clickable-img";
pub const BACKGROUND_CLASS: &str = "gg-clickable-bg";
pub const MARKER_ATTR: &str = "data-gg-clickable";
pub const BADGE_CLASS: &str = "gg-click-badge";

static CLICKABLE_CSS: &str = include_str!("../web/clickable.css");

const IMAGE_EXCLUDED: [&str; 5] = [
    ".nav-logo",
    ".navbar",
    "footer",
    ".whatsapp-float",
    ".hero-badge",
];
const BACKGROUND_EXCLUDED: [&str; 3] = [".navbar", "footer", ".whatsapp-float"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WireReport {
    pub images: usize,
    pub backgrounds: usize,
}

/// Turns known service images into booking/quote buttons.
pub struct ImageWiring {
    catalog: Arc<ServiceCatalog>,
}

impl ImageWiring {
    pub fn new(catalog: Arc<ServiceCatalog>) -> Self {
        Self { catalog }
    }

    /// Safe to call repeatedly: elements wired by an earlier pass are skipped.
    pub fn wire_up(&self, doc: &mut Document) -> WireReport {
        ensure_stylesheet(doc);

        // All images before any background container.
        let mut report = WireReport::default();
        for node in doc.elements() {
            if doc.get(node).tag == "img" && self.wire_image(doc, node) {
                report.images += 1;
            }
        }
        for node in doc.elements() {
            if is_background_candidate(doc.get(node)) && self.wire_background(doc, node) {
                report.backgrounds += 1;
            }
        }

        if report != WireReport::default() {
            tracing::debug!(
                images = report.images,
                backgrounds = report.backgrounds,
                "wired service images"
            );
        }
        report
    }

    fn wire_image(&self, doc: &mut Document, img: NodeId) -> bool {
        let Some(filename) = doc.get(img).attr("src").and_then(filename_from_src) else {
            return false;
        };
        let Some(service) = self.catalog.lookup(&filename) else {
            return false;
        };
        if doc.closest(img, &IMAGE_EXCLUDED).is_some() {
            return false;
        }
        let Some(parent) = doc.parent(img) else {
            return false;
        };
        if doc.get(parent).has_class(WRAPPER_CLASS) {
            return false;
        }

        let radius = doc
            .get(parent)
            .style
            .get("border-radius")
            .cloned()
            .unwrap_or_else(|| "0".to_string());
        let mut wrapper = Element::new("div")
            .with_class(WRAPPER_CLASS)
            .with_style("border-radius", &radius)
            .with_attr("role", "button")
            .with_attr("tabindex", "0")
            .with_attr("aria-label", &service.aria_label());
        if let Some(height) = doc.get(img).style.get("height") {
            wrapper = wrapper.with_style("height", height);
        }

        let wrapper = doc.create(wrapper);
        doc.insert_before(parent, wrapper, img);
        doc.append_existing(wrapper, img);
        append_overlay(doc, wrapper, service);

        for trigger in [Trigger::Click, Trigger::Activate] {
            doc.bind(
                wrapper,
                Binding {
                    trigger,
                    service: service.clone(),
                    skip_nested_controls: false,
                },
            );
        }
        true
    }

    fn wire_background(&self, doc: &mut Document, node: NodeId) -> bool {
        let el = doc.get(node);
        if el.attr(MARKER_ATTR).is_some() || el.attr("onclick").is_some_and(|v| !v.is_empty()) {
            return false;
        }
        if doc.has_descendant(node, &format!(".{BADGE_CLASS}")) {
            return false;
        }

        let css = el
            .computed_background
            .as_deref()
            .or_else(|| el.style.get("background-image").map(String::as_str));
        let Some(filename) = css.and_then(filename_from_background) else {
            return false;
        };
        let Some(service) = self.catalog.lookup(&filename) else {
            return false;
        };
        if doc.closest(node, &BACKGROUND_EXCLUDED).is_some() {
            return false;
        }

        let el = doc.get_mut(node);
        el.attributes.insert(MARKER_ATTR.to_string(), "1".to_string());
        el.add_class(BACKGROUND_CLASS);
        el.style.insert("cursor".to_string(), "pointer".to_string());

        append_overlay(doc, node, service);
        doc.bind(
            node,
            Binding {
                trigger: Trigger::Click,
                service: service.clone(),
                skip_nested_controls: true,
            },
        );
        true
    }
}

fn is_background_candidate(el: &Element) -> bool {
    (el.tag == "div" && el.style.contains_key("background-image"))
        || el.classes.iter().any(|c| c.contains("service-image"))
}

fn ensure_stylesheet(doc: &mut Document) {
    if doc.find_by_id(STYLE_ID).is_some() {
        return;
    }
    let head = doc.head();
    doc.append(
        head,
        Element::new("style").with_id(STYLE_ID).with_text(CLICKABLE_CSS),
    );
}

fn append_overlay(doc: &mut Document, host: NodeId, service: &ServiceDescriptor) {
    let overlay = doc.append(
        host,
        Element::new("div")
            .with_class("gg-click-overlay")
            .with_attr("aria-hidden", "true"),
    );
    let badge = doc.append(
        overlay,
        Element::new("div")
            .with_class(BADGE_CLASS)
            .with_text(service.badge_label()),
    );
    let icon = if service.is_hourly {
        Element::new("i").with_class("fa-whatsapp").with_class("fab")
    } else {
        Element::new("i").with_class("fa-calendar-check").with_class("fas")
    };
    doc.append(badge, icon);
}
