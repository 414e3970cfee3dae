use serde::{Deserialize, Serialize};

/// What an image asset books when clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub title: String,
    pub service_id: Option<u32>,
    #[serde(default)]
    pub is_hourly: bool,
}

impl ServiceDescriptor {
    /// Hourly and quote-only services go to chat instead of the booking modal.
    pub fn opens_chat(&self) -> bool {
        self.is_hourly || self.service_id.is_none()
    }

    pub fn badge_label(&self) -> &'static str {
        if self.is_hourly {
            "Get Quote"
        } else {
            "Book Now"
        }
    }

    pub fn aria_label(&self) -> String {
        if self.is_hourly {
            format!("Get a quote for {}", self.title)
        } else {
            format!("Book {}", self.title)
        }
    }
}

/// A service record owned by the booking page, handed to its modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticService {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub price: Option<f64>,
}
