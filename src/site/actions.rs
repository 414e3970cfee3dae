use reqwest::Url;

use crate::models::{DomesticService, ServiceDescriptor};

pub const WHATSAPP_NUMBER: &str = "447827784204";
pub const BOOKING_PAGE: &str = "services.html";

/// Booking modal owned by the host page.
pub trait BookingModal: Send + Sync {
    fn find_service(&self, id: u32) -> Option<DomesticService>;
    fn open(&self, service: &DomesticService);
}

/// Browser window operations the wiring needs.
pub trait Navigator {
    fn location(&self) -> &Url;
    /// Opens `url` in a new browsing context.
    fn open_new_context(&mut self, url: &str);
    fn navigate(&mut self, url: &str);
    /// Rewrites the address bar without navigating.
    fn replace_url(&mut self, url: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    OpenedChat(String),
    OpenedModal(u32),
    Navigated(String),
    /// Already on the booking page but the modal does not know the service.
    UnknownService(u32),
    Ignored,
}

pub fn on_booking_page(location: &Url) -> bool {
    location.path().ends_with(BOOKING_PAGE)
}

pub fn whatsapp_url(title: &str) -> String {
    let message = format!(
        "Hello GreenGlo Cleaners, I'm interested in {title}. Please provide more information."
    );
    format!(
        "https://api.whatsapp.com/send?phone={WHATSAPP_NUMBER}&text={}",
        encode_uri_component(&message)
    )
}

pub fn booking_url(service_id: u32) -> String {
    format!("{BOOKING_PAGE}?book={service_id}")
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

pub fn handle_click(
    service: &ServiceDescriptor,
    navigator: &mut dyn Navigator,
    booking: Option<&dyn BookingModal>,
) -> ClickOutcome {
    let service_id = match service.service_id {
        Some(id) if !service.opens_chat() => id,
        _ => {
            let url = whatsapp_url(&service.title);
            navigator.open_new_context(&url);
            return ClickOutcome::OpenedChat(url);
        }
    };

    match booking {
        Some(modal) if on_booking_page(navigator.location()) => {
            match modal.find_service(service_id) {
                Some(svc) => {
                    modal.open(&svc);
                    ClickOutcome::OpenedModal(service_id)
                }
                None => {
                    tracing::debug!(service_id, "booking modal has no such service");
                    ClickOutcome::UnknownService(service_id)
                }
            }
        }
        _ => {
            let url = booking_url(service_id);
            navigator.navigate(&url);
            ClickOutcome::Navigated(url)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingModal, RecordingNavigator};
    use super::*;

    fn service(title: &str, id: Option<u32>, hourly: bool) -> ServiceDescriptor {
        ServiceDescriptor {
            title: title.to_string(),
            service_id: id,
            is_hourly: hourly,
        }
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("Patio & Decking"), "Patio%20%26%20Decking");
        assert_eq!(encode_uri_component("I'm (here)!"), "I'm%20(here)!");
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_hourly_opens_chat() {
        let mut nav = RecordingNavigator::at("https://greenglocleaners.co.uk/index.html");
        let outcome = handle_click(&service("Office Cleaning", Some(2), true), &mut nav, None);

        let url = &nav.opened[0];
        assert_eq!(outcome, ClickOutcome::OpenedChat(url.clone()));
        assert!(url.starts_with("https://api.whatsapp.com/send?phone=447827784204&text="));
        assert!(url.contains("Office%20Cleaning"));
        assert!(nav.navigated.is_empty());
    }

    #[test]
    fn test_null_id_opens_chat_even_on_booking_page() {
        let mut nav = RecordingNavigator::at("https://greenglocleaners.co.uk/services.html");
        let modal = RecordingModal::with_services(&[(8, "Regular Domestic Clean")]);
        let outcome = handle_click(
            &service("Emergency Cleaning", None, false),
            &mut nav,
            Some(&modal),
        );
        assert!(matches!(outcome, ClickOutcome::OpenedChat(_)));
        assert!(modal.opened().is_empty());
    }

    #[test]
    fn test_bookable_navigates_off_booking_page() {
        let mut nav = RecordingNavigator::at("https://greenglocleaners.co.uk/gallery.html");
        let modal = RecordingModal::with_services(&[(5, "Bathroom Deep Clean")]);
        let outcome = handle_click(
            &service("Bathroom Deep Clean", Some(5), false),
            &mut nav,
            Some(&modal),
        );
        assert_eq!(outcome, ClickOutcome::Navigated("services.html?book=5".to_string()));
        assert_eq!(nav.navigated, vec!["services.html?book=5"]);
        assert!(modal.opened().is_empty());
    }

    #[test]
    fn test_bookable_opens_modal_on_booking_page() {
        let mut nav = RecordingNavigator::at("https://greenglocleaners.co.uk/services.html");
        let modal = RecordingModal::with_services(&[(5, "Bathroom Deep Clean")]);
        let outcome = handle_click(
            &service("Bathroom Deep Clean", Some(5), false),
            &mut nav,
            Some(&modal),
        );
        assert_eq!(outcome, ClickOutcome::OpenedModal(5));
        assert_eq!(modal.opened(), vec![5]);
        assert!(nav.navigated.is_empty());
    }

    #[test]
    fn test_booking_page_without_modal_navigates() {
        let mut nav = RecordingNavigator::at("https://greenglocleaners.co.uk/services.html");
        let outcome = handle_click(&service("Carpet Cleaning", Some(7), false), &mut nav, None);
        assert_eq!(outcome, ClickOutcome::Navigated("services.html?book=7".to_string()));
    }

    #[test]
    fn test_unknown_service_on_booking_page_is_silent() {
        let mut nav = RecordingNavigator::at("https://greenglocleaners.co.uk/services.html");
        let modal = RecordingModal::with_services(&[]);
        let outcome = handle_click(
            &service("Window Cleaning", Some(10), false),
            &mut nav,
            Some(&modal),
        );
        assert_eq!(outcome, ClickOutcome::UnknownService(10));
        assert!(nav.navigated.is_empty());
        assert!(nav.opened.is_empty());
    }
}
