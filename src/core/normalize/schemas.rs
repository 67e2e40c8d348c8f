//! Static schemas
//!
//! - [`vendor_intake_schema`]: sheet row (canonical keys) to vendor record
//! - [`platform_record_schema`]: platform third-party JSON to vendor-risk record
//! - [`residual_risk_schema`]: per-category residual risk levels
//!
//! Plus the table of sheet columns written back from matched platform records.

use crate::core::schema::{Coercer, EmailPart, Spec};
use crate::{chain, coalesce, mapping};
use serde_json::{json, Value};

/// Risk categories reported by the platform and the slug used in field names
pub const RESIDUAL_RISK_CATEGORIES: [(&str, &str); 4] = [
    ("Data Loss", "data_loss"),
    ("Disruptive Attack", "disruptive_attack"),
    ("Destructive Attack", "destructive_attack"),
    ("Fraud", "fraud"),
];

/// A sheet column filled from the matched platform record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteBackColumn {
    /// Column title in the sheet
    pub title: &'static str,
    /// Canonical key of the column
    pub key: &'static str,
    /// Path into the matched vendor record
    pub path: &'static str,
}

const fn column(title: &'static str, key: &'static str, path: &'static str) -> WriteBackColumn {
    WriteBackColumn { title, key, path }
}

/// Columns synced back to the sheet for every matched vendor
pub const WRITE_BACK_COLUMNS: [WriteBackColumn; 20] = [
    column("GRX Vendor Name", "grx_vendor_name", "grx.name"),
    column("Impact", "impact", "grx.impact"),
    column("Likelihood", "likelihood", "grx.likelihood"),
    column("Industry", "industry", "grx.industry"),
    column(
        "CyberGRX Inherent Risk Level",
        "grx_inherent_risk_level",
        "grx.inherent_risk_level",
    ),
    column(
        "Is GRX Profile Complete",
        "is_profile_complete",
        "grx.is_profile_complete",
    ),
    column(
        "Is GRX Report Available",
        "is_report_available",
        "grx.is_report_available",
    ),
    column(
        "GRX Subscription Status",
        "grx_subscription_status",
        "grx.subscription_status",
    ),
    column(
        "GRX Assessment Status",
        "grx_assessment_status",
        "grx.assessment_status",
    ),
    column(
        "GRX Assessment Progress",
        "grx_assessment_progress",
        "grx.assessment_progress",
    ),
    column(
        "GRX Assessment Completion Date",
        "grx_assessment_completion_date",
        "grx.assessment_completion_date",
    ),
    column(
        "GRX Assessment Requested Date",
        "grx_assessment_requested_completion_date",
        "grx.assessment_requested_completion_date",
    ),
    column(
        "Inherent Data Loss Score",
        "grx_inherent_data_loss_score",
        "grx.residual_risk_data_loss_inherent_risk_level",
    ),
    column(
        "Residual Data Loss Score",
        "grx_residual_data_loss_score",
        "grx.residual_risk_data_loss_residual_risk_level",
    ),
    column(
        "Inherent Disruptive Attack Score",
        "grx_inherent_disruptive_attack_score",
        "grx.residual_risk_disruptive_attack_inherent_risk_level",
    ),
    column(
        "Residual Disruptive Attack Score",
        "grx_residual_disruptive_attack_score",
        "grx.residual_risk_disruptive_attack_residual_risk_level",
    ),
    column(
        "Inherent Destructive Attack Score",
        "grx_inherent_destructive_attack_score",
        "grx.residual_risk_destructive_attack_inherent_risk_level",
    ),
    column(
        "Residual Destructive Attack Score",
        "grx_residual_destructive_attack_score",
        "grx.residual_risk_destructive_attack_residual_risk_level",
    ),
    column(
        "Inherent Fraud Score",
        "grx_inherent_fraud_score",
        "grx.residual_risk_fraud_inherent_risk_level",
    ),
    column(
        "Residual Fraud Score",
        "grx_residual_fraud_score",
        "grx.residual_risk_fraud_residual_risk_level",
    ),
];

/// Non-empty value of `path`, else the field is left out
fn optional(path: &str) -> Spec {
    coalesce![chain![path, Coercer::SkipFalsy]].or_omit().into()
}

/// Scoping answer read from `path`, left out when unrecognized
fn answer(path: &str) -> Spec {
    coalesce![chain![path, Coercer::ValidateAnswer]].or_omit().into()
}

/// Drop the whole sub-object when none of its fields survived
fn unless_empty(inner: Spec) -> Spec {
    chain![inner, Coercer::SkipFalsy]
}

/// Contact name: explicit column, then the combined name, then the email address
fn contact_name(explicit: &str, last: bool, email_part: EmailPart) -> Spec {
    chain![
        coalesce![
            chain![explicit, Coercer::Required],
            chain![
                "third_party_contact_name",
                Coercer::split(last),
                Coercer::Required
            ],
            chain!["third_party_contact_email", Coercer::EmailMetadata(email_part)],
        ]
        .or_omit(),
        Coercer::SkipFalsy,
    ]
}

/// Schema turning a sheet row into a vendor record
///
/// Reads the canonical keys produced by
/// [`HeaderMapping`](crate::core::normalize::HeaderMapping).
///
/// # Examples
///
/// ```
/// use vendorsync::core::normalize::vendor_intake_schema;
/// use serde_json::json;
///
/// let record = json!({"company_name": "Acme", "company_url": "acme.com"});
/// let vendor = vendor_intake_schema().evaluate(&record).unwrap().into_value().unwrap();
/// assert_eq!(vendor["url"], json!("https://acme.com"));
/// ```
pub fn vendor_intake_schema() -> Spec {
    mapping! {
        "name" => "company_name",
        "url" => coalesce![chain![
            coalesce![
                chain!["company_url", Coercer::Required],
                chain![
                    "third_party_contact_email",
                    Coercer::EmailMetadata(EmailPart::Domain)
                ],
            ],
            Coercer::Required,
            Coercer::InsertHttp,
        ]]
        .or_omit(),
        "custom_id" => chain!["custom_id", Coercer::AsString],
        "ingest_date" => chain![
            coalesce!["ingest_date"].default_to(Value::Null),
            Coercer::DateOrNone
        ],
        "address" => unless_empty(mapping! {
            "city" => optional("address_city"),
            "country" => optional("address_country"),
        }),
        "order_info" => coalesce![chain!["assessment_order", Coercer::ValidAssessmentOrder]].or_omit(),
        "third_party_contact" => unless_empty(mapping! {
            "first_name" => contact_name("third_party_contact_first_name", false, EmailPart::FirstName),
            "last_name" => contact_name("third_party_contact_last_name", true, EmailPart::LastName),
            "email" => optional("third_party_contact_email"),
            "phone" => coalesce![chain![
                "third_party_contact_phone",
                Coercer::AsString,
                Coercer::SkipFalsy
            ]]
            .or_omit(),
        }),
        "third_party_scoping" => unless_empty(mapping! {
            "digital_identities" => answer("profile_digital_identities"),
            "people" => answer("profile_people"),
            "data" => answer("profile_data"),
            "applications" => answer("profile_applications"),
            "devices" => answer("profile_devices"),
            "networks" => answer("profile_networks"),
            "facilities" => answer("profile_facilities"),
            "business_process" => answer("profile_business_process"),
        }),
        "custom_metadata" => unless_empty(mapping! {
            "internal" => unless_empty(mapping! {
                "owner" => optional("internal_vendor_owner"),
                "description" => optional("internal_description"),
                "location" => optional("internal_location"),
            }),
            "cyber_classification" => unless_empty(mapping! {
                "critical_or_support" => optional("meta_is_critical_or_support"),
                "rto" => optional("meta_rto"),
                "data_sensitivity" => optional("meta_data_sensitivity"),
                "compliance" => optional("meta_compliance"),
                "tech_risk" => optional("meta_tech_risk"),
                "influence" => optional("meta_influence"),
            }),
        }),
    }
}

fn residual_risk_fields() -> Vec<(String, Spec)> {
    let mut fields = Vec::with_capacity(RESIDUAL_RISK_CATEGORIES.len() * 2);

    for (category, slug) in RESIDUAL_RISK_CATEGORIES {
        for level in ["inherent_risk_level", "residual_risk_level"] {
            let spec = coalesce![chain![
                coalesce!["residual_risk.residual_risk_outcomes"].default_to(json!([])),
                Coercer::category_match(category),
                level,
            ]]
            .default_to(Value::Null);

            fields.push((format!("residual_risk_{slug}_{level}"), spec.into()));
        }
    }

    fields
}

/// Schema reading the residual risk level pair of every category
pub fn residual_risk_schema() -> Spec {
    Spec::Mapping(residual_risk_fields())
}

/// Schema turning a platform third-party record into a vendor-risk record
///
/// Includes the [`residual_risk_schema`] fields.
pub fn platform_record_schema() -> Spec {
    let base: [(&str, Spec); 14] = [
        ("id", "id".into()),
        ("name", "name".into()),
        ("custom_id", "custom_id".into()),
        (
            "subscription_status",
            coalesce!["subscription.status"].default_to(Value::Null).into(),
        ),
        (
            "is_profile_complete",
            coalesce!["subscription.is_profile_complete"].default_to(false).into(),
        ),
        (
            "is_report_available",
            coalesce!["subscription.is_report_available"].default_to(false).into(),
        ),
        (
            "impact",
            coalesce!["inherent_risk.impact_label"].default_to("Unknown").into(),
        ),
        (
            "likelihood",
            coalesce!["inherent_risk.likelihood_label"].default_to("Unknown").into(),
        ),
        (
            "inherent_risk_level",
            chain![
                coalesce!["inherent_risk.recommended_report_tier"].default_to(0),
                Coercer::InherentRiskLevelFromTier
            ],
        ),
        ("industry", coalesce!["industry"].default_to("Unknown").into()),
        (
            "assessment_status",
            coalesce!["assessment.status"].default_to(Value::Null).into(),
        ),
        (
            "assessment_progress",
            coalesce!["assessment.progress"].default_to(Value::Null).into(),
        ),
        (
            "assessment_completion_date",
            coalesce!["assessment.completion_date"].default_to(Value::Null).into(),
        ),
        (
            "assessment_requested_completion_date",
            coalesce!["assessment.requested_completion_date"]
                .default_to(Value::Null)
                .into(),
        ),
    ];

    Spec::Mapping(
        base.into_iter()
            .map(|(key, spec)| (key.to_string(), spec))
            .chain(residual_risk_fields())
            .collect(),
    )
}
