pub mod checkout;
pub mod payment;
pub mod service;

pub use checkout::{CheckoutSessionCreated, SubscriptionRequest};
pub use payment::{
    BookingConfirmed, ConfirmBookingRequest, CreatePaymentIntentRequest, FieldValue,
    PaymentIntentCreated,
};
pub use service::{DomesticService, ServiceDescriptor};
