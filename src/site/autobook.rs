use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio::sync::watch;

use super::actions::{on_booking_page, BookingModal, Navigator, BOOKING_PAGE};

type Slot = Option<Arc<dyn BookingModal>>;

/// How long a `?book=` request waits for the host before giving up.
pub const READY_TIMEOUT: Duration = Duration::from_millis(300 + 20 * 150);

/// Held by the host page; resolved once its booking modal is usable.
pub struct ReadinessHandle {
    tx: watch::Sender<Slot>,
}

/// Waits for the host page's booking modal.
#[derive(Clone)]
pub struct Readiness {
    rx: watch::Receiver<Slot>,
}

pub fn readiness() -> (ReadinessHandle, Readiness) {
    let (tx, rx) = watch::channel(None);
    (ReadinessHandle { tx }, Readiness { rx })
}

impl ReadinessHandle {
    pub fn resolve(&self, modal: Arc<dyn BookingModal>) {
        self.tx.send_replace(Some(modal));
    }
}

impl Readiness {
    /// The modal if the host has already resolved it.
    pub fn current(&self) -> Option<Arc<dyn BookingModal>> {
        (*self.rx.borrow()).clone()
    }

    /// Resolves to `None` when the host drops its handle without resolving.
    pub async fn ready(&mut self) -> Option<Arc<dyn BookingModal>> {
        match self.rx.wait_for(Option::is_some).await {
            Ok(slot) => (*slot).clone(),
            Err(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoBook {
    NotRequested,
    Opened(u32),
    UnknownService(u32),
    /// The host did not resolve its readiness signal in time.
    Abandoned(u32),
}

/// The `book` id requested on the booking page. Only the leading digits
/// count and zero means nothing was requested.
pub fn requested_booking(location: &Url) -> Option<u32> {
    if !on_booking_page(location) {
        return None;
    }
    let raw = location
        .query_pairs()
        .find(|(k, _)| k == "book")
        .map(|(_, v)| v.into_owned())?;
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().filter(|id| *id > 0)
}

/// Opens the modal requested through `?book=<id>` once the host is ready,
/// then drops the parameter from the address bar. Waits at most
/// [`READY_TIMEOUT`].
pub async fn auto_book(navigator: &mut dyn Navigator, readiness: &mut Readiness) -> AutoBook {
    let Some(book_id) = requested_booking(navigator.location()) else {
        return AutoBook::NotRequested;
    };

    let modal = match tokio::time::timeout(READY_TIMEOUT, readiness.ready()).await {
        Ok(Some(modal)) => modal,
        Ok(None) => {
            tracing::debug!(book_id, "booking page dropped its readiness signal");
            return AutoBook::Abandoned(book_id);
        }
        Err(_) => {
            tracing::debug!(book_id, "booking page not ready in time");
            return AutoBook::Abandoned(book_id);
        }
    };

    let outcome = match modal.find_service(book_id) {
        Some(svc) => {
            modal.open(&svc);
            AutoBook::Opened(book_id)
        }
        None => AutoBook::UnknownService(book_id),
    };
    navigator.replace_url(BOOKING_PAGE);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::actions::testing::{RecordingModal, RecordingNavigator};

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_requested_booking() {
        assert_eq!(
            requested_booking(&url("https://x.co.uk/services.html?book=8")),
            Some(8)
        );
        assert_eq!(
            requested_booking(&url("https://x.co.uk/services.html?book=12abc")),
            Some(12)
        );
        assert_eq!(requested_booking(&url("https://x.co.uk/services.html?book=0")), None);
        assert_eq!(requested_booking(&url("https://x.co.uk/services.html?book=-3")), None);
        assert_eq!(requested_booking(&url("https://x.co.uk/services.html")), None);
        assert_eq!(requested_booking(&url("https://x.co.uk/index.html?book=8")), None);
    }

    #[tokio::test]
    async fn test_opens_after_host_resolves() {
        let (handle, mut ready) = readiness();
        let modal = Arc::new(RecordingModal::with_services(&[(8, "Regular Domestic Clean")]));
        let mut nav = RecordingNavigator::at("https://x.co.uk/services.html?book=8");

        let host_modal: Arc<dyn BookingModal> = modal.clone();
        let host = tokio::spawn(async move {
            tokio::task::yield_now().await;
            handle.resolve(host_modal);
            handle
        });

        let outcome = auto_book(&mut nav, &mut ready).await;
        let _handle = host.await.unwrap();

        assert_eq!(outcome, AutoBook::Opened(8));
        assert_eq!(modal.opened(), vec![8]);
        assert_eq!(nav.replaced, vec!["services.html"]);
    }

    #[tokio::test]
    async fn test_unknown_service_still_cleans_url() {
        let (handle, mut ready) = readiness();
        handle.resolve(Arc::new(RecordingModal::with_services(&[])));
        let mut nav = RecordingNavigator::at("https://x.co.uk/services.html?book=99");

        assert_eq!(auto_book(&mut nav, &mut ready).await, AutoBook::UnknownService(99));
        assert_eq!(nav.replaced, vec!["services.html"]);
    }

    #[tokio::test]
    async fn test_dropped_handle_gives_up() {
        let (handle, mut ready) = readiness();
        drop(handle);
        let mut nav = RecordingNavigator::at("https://x.co.uk/services.html?book=4");

        assert_eq!(auto_book(&mut nav, &mut ready).await, AutoBook::Abandoned(4));
        assert!(nav.replaced.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresolved_host_times_out() {
        let (_handle, mut ready) = readiness();
        let mut nav = RecordingNavigator::at("https://x.co.uk/services.html?book=4");

        let started = tokio::time::Instant::now();
        assert_eq!(auto_book(&mut nav, &mut ready).await, AutoBook::Abandoned(4));
        assert!(started.elapsed() >= READY_TIMEOUT);
        assert!(nav.replaced.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_resolve_within_limit_opens() {
        let (handle, mut ready) = readiness();
        let modal = Arc::new(RecordingModal::with_services(&[(4, "Oven Deep Clean")]));
        let mut nav = RecordingNavigator::at("https://x.co.uk/services.html?book=4");

        let host_modal: Arc<dyn BookingModal> = modal.clone();
        let host = tokio::spawn(async move {
            tokio::time::sleep(READY_TIMEOUT - Duration::from_millis(100)).await;
            handle.resolve(host_modal);
            handle
        });

        assert_eq!(auto_book(&mut nav, &mut ready).await, AutoBook::Opened(4));
        let _handle = host.await.unwrap();
        assert_eq!(modal.opened(), vec![4]);
    }

    #[tokio::test]
    async fn test_no_request_does_not_wait() {
        let (_handle, mut ready) = readiness();
        let mut nav = RecordingNavigator::at("https://x.co.uk/services.html");
        assert_eq!(auto_book(&mut nav, &mut ready).await, AutoBook::NotRequested);
    }
}
