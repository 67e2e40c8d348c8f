//! Email address syntax checks
//!
//! Only syntax is checked; deliverability is not. An empty local part is accepted.

use email_address::EmailAddress;

/// Stands in for an empty local part so the domain still gets checked
const PLACEHOLDER_LOCAL: &str = "postmaster";

/// The two halves of a syntactically valid address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEmail {
    /// Part before the `@`, case preserved
    pub local: String,
    /// Part after the `@`, lowercased
    pub domain: String,
}

/// Validate an address and split it into local part and domain
///
/// Surrounding whitespace is ignored. The error is a human-readable reason.
pub fn parse_email(address: &str) -> Result<ParsedEmail, String> {
    let address = address.trim();

    let empty_local = address.starts_with('@');
    let checked = if empty_local {
        format!("{PLACEHOLDER_LOCAL}{address}")
    } else {
        address.to_string()
    };

    let parsed: EmailAddress = checked
        .parse()
        .map_err(|e| format!("The email address is not valid: {e}"))?;

    let domain = parsed.domain().to_lowercase();
    check_domain(&domain)?;

    let local = if empty_local {
        String::new()
    } else {
        parsed.local_part().to_string()
    };

    Ok(ParsedEmail { local, domain })
}

fn check_domain(domain: &str) -> Result<(), String> {
    if domain.starts_with('[') {
        return Err("The part after the @-sign cannot be an address literal.".to_string());
    }

    let Some((_, tld)) = domain.rsplit_once('.') else {
        return Err("The part after the @-sign is not valid. It should have a period.".to_string());
    };
    if tld.is_empty() || tld.chars().all(|c| c.is_ascii_digit()) {
        return Err(
            "The part after the @-sign is not valid. It is not within a valid top-level domain."
                .to_string(),
        );
    }

    Ok(())
}
