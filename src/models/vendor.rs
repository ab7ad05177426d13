use serde::{Deserialize, Serialize};

/// Province code metal parts must be sourced from.
pub const QUEBEC: &str = "QC";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub vendor_code: String,
    pub name: String,
    pub address: String,
    pub province: String,
}

impl Vendor {
    pub fn new(
        vendor_code: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        province: impl Into<String>,
    ) -> Self {
        Self {
            vendor_code: vendor_code.into(),
            name: name.into(),
            address: address.into(),
            province: province.into(),
        }
    }

    pub fn is_quebec(&self) -> bool {
        self.province == QUEBEC
    }
}
