//! Integration tests for sheet and platform record normalization

use serde_json::{json, Value};
use test_case::test_case;
use vendorsync::core::normalize::{
    normalize, normalize_record, normalize_row, platform_record_schema, record_has_url_and_address,
    vendor_intake_schema, HeaderMapping, URL_AND_ADDRESS_FLAG,
};
use vendorsync::core::schema::SpecError;
use vendorsync::domain::{ColumnId, RowId, SheetColumn, SheetRow};

fn intake(record: Value) -> Value {
    normalize_record(&record, &vendor_intake_schema()).unwrap()
}

#[test_case(json!({"company_url": "acme.com", "address_city": "Denver", "address_country": "US"}), true ; "url and full address")]
#[test_case(json!({"third_party_contact_email": "ann@acme.com", "address_city": "Denver", "address_country": "US"}), true ; "url from contact email")]
#[test_case(json!({"address_city": "Denver", "address_country": "US"}), false ; "missing url")]
#[test_case(json!({"company_url": "", "address_city": "Denver", "address_country": "US"}), false ; "blank url")]
#[test_case(json!({"company_url": "acme.com", "address_country": "US"}), false ; "missing city")]
#[test_case(json!({"company_url": "acme.com", "address_city": "Denver"}), false ; "missing country")]
#[test_case(json!({"company_url": "acme.com", "address_city": "Denver", "address_country": ""}), false ; "blank country")]
#[test_case(json!({}), false ; "nothing set")]
fn test_url_and_address_flag(record: Value, expected: bool) {
    let vendor = intake(record);
    assert_eq!(vendor[URL_AND_ADDRESS_FLAG], json!(expected));
    assert_eq!(record_has_url_and_address(&vendor), expected);
}

#[test]
fn test_normalize_row_from_loaded_sheet() {
    let columns = vec![
        SheetColumn {
            id: ColumnId::new(1),
            title: "Vendor Name".to_string(),
        },
        SheetColumn {
            id: ColumnId::new(2),
            title: "Vendor URL".to_string(),
        },
        SheetColumn {
            id: ColumnId::new(3),
            title: "Vendor Contact Name".to_string(),
        },
        SheetColumn {
            id: ColumnId::new(4),
            title: "Notes".to_string(),
        },
    ];
    let mapping = HeaderMapping::for_columns(&columns);
    let row = SheetRow::new(
        RowId::new(4711),
        [
            (ColumnId::new(1), json!("Initech")),
            (ColumnId::new(2), json!("http://initech.example")),
            (ColumnId::new(3), json!("Peter Gibbons")),
            (ColumnId::new(4), json!("call back")),
            (ColumnId::new(99), json!("orphan")),
        ],
    );

    let vendor = normalize_row(&row, &mapping, &vendor_intake_schema()).unwrap();

    assert_eq!(vendor["name"], json!("Initech"));
    assert_eq!(vendor["url"], json!("http://initech.example"));
    assert_eq!(vendor["custom_id"], json!("4711"));
    assert_eq!(
        vendor["third_party_contact"],
        json!({"first_name": "Peter", "last_name": "Gibbons"})
    );
    assert!(vendor.get("notes").is_none());
}

#[test]
fn test_normalize_translates_titles_and_column_ids() {
    let mapping = HeaderMapping::for_columns(&[SheetColumn {
        id: ColumnId::new(7),
        title: "Vendor Name".to_string(),
    }]);

    let by_id = normalize(&json!({"7": "Acme"}), &mapping, &vendor_intake_schema()).unwrap();
    let by_title =
        normalize(&json!({"Vendor Name": "Acme"}), &mapping, &vendor_intake_schema()).unwrap();

    assert_eq!(by_id["name"], json!("Acme"));
    assert_eq!(by_id, by_title);
}

#[test]
fn test_unknown_identifiers_are_dropped() {
    let vendor = normalize(
        &json!({"Favourite Colour": "Blue", "Vendor Name": "Acme"}),
        &HeaderMapping::standard(),
        &vendor_intake_schema(),
    )
    .unwrap();

    assert!(vendor.get("favourite_colour").is_none());
    assert!(vendor.get("Favourite Colour").is_none());
}

#[test]
fn test_scoping_and_metadata_groups() {
    let vendor = intake(json!({
        "profile_people": "Significant - many staff",
        "profile_devices": "unknown",
        "profile_data": "least",
        "meta_rto": "4h",
        "internal_vendor_owner": "",
    }));

    assert_eq!(
        vendor["third_party_scoping"],
        json!({"people": "Significant", "data": "Least"})
    );
    assert_eq!(
        vendor["custom_metadata"],
        json!({"cyber_classification": {"rto": "4h"}})
    );
}

#[test_case("Tier 2", json!({"tier": 2, "validated": false}) ; "tier two")]
#[test_case(" tier 2 validated ", json!({"tier": 2, "validated": true}) ; "validated with padding")]
#[test_case("TIER 3", json!({"tier": 3, "validated": false}) ; "upper case")]
#[test_case("No Assessment", Value::Null ; "no assessment")]
fn test_assessment_order(label: &str, expected: Value) {
    let vendor = intake(json!({"assessment_order": label}));
    assert_eq!(vendor["order_info"], expected);
}

#[test]
fn test_unknown_assessment_tier_is_left_out() {
    let vendor = intake(json!({"assessment_order": "Tier 9"}));
    assert!(vendor.get("order_info").is_none());
}

#[test]
fn test_malformed_ingest_date_fails_the_record() {
    let err = normalize_record(&json!({"ingest_date": "yesterday"}), &vendor_intake_schema())
        .unwrap_err();
    assert!(matches!(err, SpecError::InvalidDate { .. }));
}

#[test]
fn test_phone_numbers_become_text() {
    let vendor = intake(json!({"third_party_contact_phone": 5550100}));
    assert_eq!(vendor["third_party_contact"]["phone"], json!("5550100"));
}

#[test]
fn test_platform_records_carry_no_address_flag_requirement() {
    let record = normalize_record(
        &json!({"id": "tp-9", "name": "Hooli", "custom_id": 12}),
        &platform_record_schema(),
    )
    .unwrap();

    assert_eq!(record["id"], json!("tp-9"));
    assert_eq!(record["custom_id"], json!(12));
    assert_eq!(record["industry"], json!("Unknown"));
    assert_eq!(record[URL_AND_ADDRESS_FLAG], json!(false));
}
