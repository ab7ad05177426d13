use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

pub const MISSING_FIELDS: &str = "partNumber, vendorCode, and a positive quantity are required";
pub const INVALID_PART_NUMBER: &str = "Invalid partNumber";
pub const INVALID_VENDOR_CODE: &str = "Invalid vendorCode";
pub const METAL_REQUIRES_QUEBEC: &str = "Metal items can only be purchased from Quebec vendors";

/// An order request pairing a part, a vendor and a quantity. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub id: u64,
    pub part_number: String,
    pub vendor_code: String,
    pub quantity: f64,
}

/// Purchase-line creation body exactly as received.
///
/// Fields are kept as raw JSON so a wrong type yields the same shape error
/// as a missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseLineRequest {
    #[serde(default)]
    pub part_number: Option<Value>,
    #[serde(default)]
    pub vendor_code: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
}

/// A creation request that passed the shape check.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchaseLine {
    pub part_number: String,
    pub vendor_code: String,
    pub quantity: f64,
}

impl CreatePurchaseLineRequest {
    pub fn new(part_number: &str, vendor_code: &str, quantity: impl Into<Value>) -> Self {
        Self {
            part_number: Some(Value::from(part_number)),
            vendor_code: Some(Value::from(vendor_code)),
            quantity: Some(quantity.into()),
        }
    }

    pub fn validate_shape(&self) -> Result<NewPurchaseLine, ServiceError> {
        let missing = || ServiceError::InvalidArgument(MISSING_FIELDS.to_string());

        let quantity = self
            .quantity
            .as_ref()
            .and_then(parse_quantity)
            .ok_or_else(missing)?;
        let part_number = non_empty_str(self.part_number.as_ref()).ok_or_else(missing)?;
        let vendor_code = non_empty_str(self.vendor_code.as_ref()).ok_or_else(missing)?;

        Ok(NewPurchaseLine {
            part_number,
            vendor_code,
            quantity,
        })
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Accepts JSON numbers and numeric strings; yields only finite values > 0.
pub fn parse_quantity(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(5), Some(5.0))]
    #[case(json!(0.5), Some(0.5))]
    #[case(json!("12"), Some(12.0))]
    #[case(json!(" 3 "), Some(3.0))]
    #[case(json!(0), None)]
    #[case(json!(-2), None)]
    #[case(json!("abc"), None)]
    #[case(json!(""), None)]
    #[case(json!("inf"), None)]
    #[case(json!("NaN"), None)]
    #[case(json!(true), None)]
    #[case(json!(null), None)]
    fn quantity_parsing(#[case] raw: Value, #[case] expected: Option<f64>) {
        assert_eq!(parse_quantity(&raw), expected);
    }

    #[test]
    fn shape_check_requires_all_fields() {
        let err = CreatePurchaseLineRequest {
            part_number: Some(json!("MTL-1001")),
            vendor_code: None,
            quantity: Some(json!(1)),
        }
        .validate_shape()
        .unwrap_err();
        assert_eq!(err, ServiceError::InvalidArgument(MISSING_FIELDS.into()));

        let err = CreatePurchaseLineRequest::new("", "V-QC-01", 1)
            .validate_shape()
            .unwrap_err();
        assert_eq!(err, ServiceError::InvalidArgument(MISSING_FIELDS.into()));
    }

    #[test]
    fn non_string_codes_count_as_missing() {
        let err = CreatePurchaseLineRequest {
            part_number: Some(json!(1001)),
            vendor_code: Some(json!("V-QC-01")),
            quantity: Some(json!(1)),
        }
        .validate_shape()
        .unwrap_err();
        assert_eq!(err, ServiceError::InvalidArgument(MISSING_FIELDS.into()));
    }

    #[test]
    fn shape_check_passes_through_values() {
        let line = CreatePurchaseLineRequest::new("PLS-3001", "V-BC-01", "4")
            .validate_shape()
            .unwrap();
        assert_eq!(
            line,
            NewPurchaseLine {
                part_number: "PLS-3001".into(),
                vendor_code: "V-BC-01".into(),
                quantity: 4.0,
            }
        );
    }
}
