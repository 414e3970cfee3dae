use crate::errors::AppError;
use crate::models::CreatePaymentIntentRequest;
use crate::services::payments::PaymentIntentParams;

pub const CURRENCY: &str = "gbp";
/// Smallest deposit Stripe will charge in pence.
pub const MIN_DEPOSIT_MINOR_UNITS: i64 = 30;
const NOTES_LIMIT: usize = 500;

pub fn minor_units(amount: f64) -> Result<i64, AppError> {
    let minor = (amount * 100.0).round();
    if !minor.is_finite() || minor < MIN_DEPOSIT_MINOR_UNITS as f64 {
        return Err(AppError::BadRequest("Invalid deposit amount".to_string()));
    }
    Ok(minor as i64)
}

/// Keeps at most `limit` UTF-16 code units, the unit browsers count string
/// length in. A character that would be split in half is dropped.
fn truncate_utf16(text: &str, limit: usize) -> String {
    let mut units = 0;
    text.chars()
        .take_while(|c| {
            units += c.len_utf16();
            units <= limit
        })
        .collect()
}

/// Validates a deposit request and translates it into processor parameters.
pub fn intent_params(req: &CreatePaymentIntentRequest) -> Result<PaymentIntentParams, AppError> {
    let deposit = req.deposit_amount.as_ref().filter(|d| d.is_present());
    let title = req.service_title.as_deref().filter(|s| !s.is_empty());
    let booking_ref = req.booking_ref.as_deref().filter(|s| !s.is_empty());
    let (Some(deposit), Some(title), Some(booking_ref)) = (deposit, title, booking_ref) else {
        return Err(AppError::missing_fields());
    };

    let amount = minor_units(deposit.to_number())?;

    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let notes = truncate_utf16(req.notes.as_deref().unwrap_or(""), NOTES_LIMIT);

    let metadata = vec![
        ("booking_ref", booking_ref.to_string()),
        ("service", title.to_string()),
        (
            "full_price",
            req.service_price
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_default(),
        ),
        ("deposit", deposit.to_string()),
        ("customer_name", text(&req.customer_name)),
        ("booking_date", text(&req.booking_date)),
        ("time_slot", text(&req.time_slot)),
        (
            "bedrooms",
            req.bedrooms
                .as_ref()
                .filter(|b| b.is_present())
                .map(|b| b.to_string())
                .unwrap_or_default(),
        ),
        ("address", text(&req.address)),
        ("notes", notes),
    ];

    Ok(PaymentIntentParams {
        amount,
        currency: CURRENCY.to_string(),
        description: format!("{title} — 25% Deposit | Ref: {booking_ref}"),
        receipt_email: text(&req.customer_email),
        metadata: metadata
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn request(deposit: FieldValue) -> CreatePaymentIntentRequest {
        CreatePaymentIntentRequest {
            deposit_amount: Some(deposit),
            service_title: Some("Kitchen Deep Clean".to_string()),
            booking_ref: Some("GG12345678".to_string()),
            ..Default::default()
        }
    }

    fn meta<'a>(params: &'a PaymentIntentParams, key: &str) -> &'a str {
        params
            .metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_deposit_converted_to_pence() {
        let params = intent_params(&request(FieldValue::Number(25.0))).unwrap();
        assert_eq!(params.amount, 2500);
        assert_eq!(params.currency, "gbp");
        assert_eq!(
            params.description,
            "Kitchen Deep Clean — 25% Deposit | Ref: GG12345678"
        );
    }

    #[test]
    fn test_deposit_below_minimum_rejected() {
        let err = intent_params(&request(FieldValue::Number(0.20))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid deposit amount");
    }

    #[test]
    fn test_minimum_boundary() {
        assert!(minor_units(0.29).is_err());
        assert_eq!(minor_units(0.30).unwrap(), 30);
        assert_eq!(minor_units(19.99).unwrap(), 1999);
        assert!(minor_units(f64::NAN).is_err());
    }

    #[test]
    fn test_text_deposit_parsed() {
        let params = intent_params(&request(FieldValue::Text("37.50".into()))).unwrap();
        assert_eq!(params.amount, 3750);
        assert_eq!(meta(&params, "deposit"), "37.50");
    }

    #[test]
    fn test_unparsable_deposit_rejected() {
        let err = intent_params(&request(FieldValue::Text("lots".into()))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid deposit amount");
    }

    #[test]
    fn test_missing_fields() {
        let mut req = request(FieldValue::Number(25.0));
        req.booking_ref = None;
        assert_eq!(
            intent_params(&req).unwrap_err().to_string(),
            "Missing required fields"
        );

        let req = request(FieldValue::Number(0.0));
        assert_eq!(
            intent_params(&req).unwrap_err().to_string(),
            "Missing required fields"
        );

        let mut req = request(FieldValue::Number(25.0));
        req.service_title = Some(String::new());
        assert!(intent_params(&req).is_err());
    }

    #[test]
    fn test_metadata_defaults_and_notes_truncated() {
        let mut req = request(FieldValue::Number(25.0));
        req.notes = Some("x".repeat(800));
        req.service_price = Some(FieldValue::Number(100.0));
        let params = intent_params(&req).unwrap();

        assert_eq!(meta(&params, "notes").len(), 500);
        assert_eq!(meta(&params, "full_price"), "100");
        assert_eq!(meta(&params, "bedrooms"), "");
        assert_eq!(meta(&params, "customer_name"), "");
        assert_eq!(params.receipt_email, "");
    }

    #[test]
    fn test_notes_limit_counts_utf16_units() {
        // Each emoji is two UTF-16 units.
        let notes = format!("{}{}", "a".repeat(497), "\u{1F9F9}\u{1F9F9}");
        assert_eq!(truncate_utf16(&notes, NOTES_LIMIT), format!("{}\u{1F9F9}", "a".repeat(497)));

        let notes = "\u{1F9F9}".repeat(300);
        let kept = truncate_utf16(&notes, NOTES_LIMIT);
        assert_eq!(kept.chars().count(), 250);
        assert_eq!(kept.encode_utf16().count(), 500);

        assert_eq!(truncate_utf16("short", NOTES_LIMIT), "short");
    }
}
