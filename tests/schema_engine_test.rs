//! Integration tests for the declarative schema engine

use serde_json::{json, Value};
use vendorsync::core::normalize::{normalize, vendor_intake_schema, HeaderMapping};
use vendorsync::core::schema::{evaluate, Coalesce, Coercer, EmailPart, Outcome, Spec, SpecError};
use vendorsync::{chain, coalesce, mapping};

fn present(outcome: Result<Outcome, SpecError>) -> Value {
    outcome.unwrap().into_value().expect("expected a value")
}

#[test]
fn test_intake_row_end_to_end() {
    let raw = json!({
        "Vendor Name": "Acme",
        "Vendor Contact Email": "j.smith@acme.com",
        "Order Assessment Tier": "Tier 1"
    });

    let vendor = normalize(&raw, &HeaderMapping::standard(), &vendor_intake_schema()).unwrap();

    assert_eq!(vendor["name"], json!("Acme"));
    assert_eq!(vendor["url"], json!("https://acme.com"));
    assert_eq!(vendor["third_party_contact"]["first_name"], json!("J"));
    assert_eq!(vendor["third_party_contact"]["last_name"], json!("Smith"));
    assert_eq!(vendor["third_party_contact"]["email"], json!("j.smith@acme.com"));
    assert_eq!(vendor["order_info"], json!({"tier": 1, "validated": true}));
    assert!(vendor.get("address").is_none());
    assert!(vendor.get("third_party_scoping").is_none());
    assert!(vendor.get("custom_metadata").is_none());
    assert_eq!(vendor["record_has_url_and_address"], json!(false));
}

#[test]
fn test_fallback_chain_second_alternative_wins() {
    let first_name = coalesce![
        chain!["first_name", Coercer::Required],
        chain!["full_name", Coercer::split(false), Coercer::Required],
        chain!["email", Coercer::EmailMetadata(EmailPart::FirstName)],
    ];

    let record = json!({"full_name": "Ann Lee"});
    assert_eq!(present(first_name.evaluate(&record)), json!("Ann"));
}

#[test]
fn test_fallback_chain_exhausted_without_default() {
    let first_name = coalesce![
        chain!["first_name", Coercer::Required],
        chain!["full_name", Coercer::split(false), Coercer::Required],
    ];

    let err = first_name.evaluate(&json!({"full_name": "Ann"})).unwrap_err();
    assert!(matches!(err, SpecError::Exhausted(_)));
    assert!(err.is_recoverable());
}

#[test]
fn test_fallback_chain_default_and_omit() {
    let record = json!({});

    let defaulted = coalesce!["tier"].default_to(0);
    assert_eq!(present(defaulted.evaluate(&record)), json!(0));

    let omitted: Coalesce = coalesce!["tier"].or_omit();
    assert_eq!(omitted.evaluate(&record).unwrap(), Outcome::Omit);
}

#[test]
fn test_empty_nested_mapping_is_omitted_only_when_wrapped() {
    let address = || {
        mapping! {
            "city" => coalesce![chain!["address_city", Coercer::SkipFalsy]].or_omit(),
            "country" => coalesce![chain!["address_country", Coercer::SkipFalsy]].or_omit(),
        }
    };
    let record = json!({"name": "Acme", "address_city": ""});

    let wrapped = mapping! {
        "name" => "name",
        "address" => chain![address(), Coercer::SkipFalsy],
    };
    assert_eq!(present(evaluate(&record, &wrapped)), json!({"name": "Acme"}));

    let unwrapped = mapping! {
        "name" => "name",
        "address" => address(),
    };
    assert_eq!(
        present(evaluate(&record, &unwrapped)),
        json!({"name": "Acme", "address": {}})
    );
}

#[test]
fn test_bare_chain_over_missing_path_still_runs_coercers() {
    let schema = mapping! {
        "name" => "company_name",
        "phone" => chain!["phone", Coercer::SkipFalsy],
        "address" => chain![
            mapping! { "city" => chain!["address_city", Coercer::SkipFalsy] },
            Coercer::SkipFalsy,
        ],
    };

    assert_eq!(
        present(evaluate(&json!({"company_name": "Acme"}), &schema)),
        json!({"name": "Acme"})
    );
    assert_eq!(
        present(evaluate(&json!({"company_name": "Acme", "phone": ""}), &schema)),
        json!({"name": "Acme"})
    );
}

#[test]
fn test_recoverable_failure_at_field_omits_only_that_field() {
    let schema = mapping! {
        "name" => chain!["company_name", Coercer::Required],
        "domain" => chain!["email", Coercer::EmailMetadata(EmailPart::Domain)],
        "url" => "url",
    };

    for record in [
        json!({"url": "acme.com"}),
        json!({"url": "acme.com", "company_name": ""}),
        json!({"url": "acme.com", "company_name": null, "email": "nope"}),
    ] {
        assert_eq!(present(evaluate(&record, &schema)), json!({"url": "acme.com"}));
    }
}

#[test]
fn test_hard_date_failure_escapes_fallback() {
    let schema = mapping! {
        "ingest_date" => coalesce![chain!["ingest_date", Coercer::DateOrNone]].or_omit(),
    };

    let err = evaluate(&json!({"ingest_date": "03/15/2024"}), &schema).unwrap_err();
    assert!(matches!(err, SpecError::InvalidDate { .. }));
    assert!(!err.is_recoverable());

    assert_eq!(
        present(evaluate(&json!({"ingest_date": "2024-03-15"}), &schema)),
        json!({"ingest_date": "2024-03-15"})
    );
    assert_eq!(
        present(evaluate(&json!({"ingest_date": ""}), &schema)),
        json!({"ingest_date": null})
    );
}

#[test]
fn test_each_evaluates_every_element() {
    let schema = Spec::each(mapping! {
        "id" => "id",
        "level" => chain![
            coalesce!["tier"].default_to(0),
            Coercer::InherentRiskLevelFromTier
        ],
    });

    let records = json!([{"id": "a", "tier": 3}, {"id": "b"}]);
    assert_eq!(
        present(schema.evaluate(&records)),
        json!([
            {"id": "a", "level": "Low Exposure"},
            {"id": "b", "level": "Unconfirmed Exposure"}
        ])
    );
}

#[test]
fn test_each_over_absent_list_is_empty() {
    let schema = mapping! {
        "labels" => chain!["outcomes", Spec::each("category")],
    };

    assert_eq!(present(evaluate(&json!({}), &schema)), json!({"labels": []}));
    assert_eq!(
        present(evaluate(&json!({"outcomes": null}), &schema)),
        json!({"labels": []})
    );
    assert_eq!(
        present(evaluate(&json!({"outcomes": [{"category": "Fraud"}]}), &schema)),
        json!({"labels": ["Fraud"]})
    );
}

#[test]
fn test_evaluation_is_idempotent() {
    let raw = json!({
        "Vendor Name": "Globex",
        "Vendor URL": "globex.io",
        "Vendor HQ City": "Springfield",
        "Vendor HQ Country": "US",
        "Data": "Moderate risk",
        "Ingest Date": "2023-11-02"
    });
    let mapping = HeaderMapping::standard();
    let schema = vendor_intake_schema();

    let first = normalize(&raw, &mapping, &schema).unwrap();
    let second = normalize(&raw, &mapping, &schema).unwrap();

    assert_eq!(first, second);
    assert_eq!(first["third_party_scoping"], json!({"data": "Moderate"}));
    assert_eq!(first["ingest_date"], json!("2023-11-02"));
}

#[test]
fn test_malformed_schema_is_rejected() {
    let schema = mapping! {
        "name" => "company_name",
        "name" => "legal_name",
    };
    assert!(matches!(schema.validate(), Err(SpecError::Malformed(_))));

    let schema = mapping! { "bad" => "a..b" };
    assert!(schema.validate().is_err());
}
