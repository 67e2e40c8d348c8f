//! Vendor record normalization
//!
//! Turns sheet rows and platform payloads into canonical vendor records using the
//! static schemas in [`schemas`].

pub mod header;
pub mod record;
pub mod schemas;

pub use header::{row_to_record, snake_case, HeaderMapping, INTAKE_HEADERS};
pub use record::{
    normalize, normalize_record, normalize_row, record_has_url_and_address, URL_AND_ADDRESS_FLAG,
};
pub use schemas::{
    platform_record_schema, residual_risk_schema, vendor_intake_schema, WriteBackColumn,
    RESIDUAL_RISK_CATEGORIES, WRITE_BACK_COLUMNS,
};
