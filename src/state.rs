use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::payments::PaymentProcessor;
use crate::site::ServiceCatalog;

pub struct AppState {
    pub config: AppConfig,
    pub processor: Box<dyn PaymentProcessor>,
    pub catalog: Arc<ServiceCatalog>,
}
