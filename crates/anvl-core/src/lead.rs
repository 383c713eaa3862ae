//! Lead forms and their validation.
//!
//! One [`LeadForm`] shape serves every page. The [`Audience`] decides which
//! fields are required, what the consent checkbox means, and what the user
//! is told afterwards. A form only leaves the page as a validated [`Lead`],
//! which converts into the relay's [`ContactPayload`] wire body.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LeadError;

/// Which lead form variant a page renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// Floorplan lender demo request.
    Lender,
    /// Dealer onboarding request.
    Dealer,
    /// Institutional investor materials request.
    Investor,
    /// General "request a conversation" form.
    General,
}

impl Audience {
    /// Message shown when the consent checkbox is left unticked.
    #[must_use]
    pub fn consent_prompt(self) -> &'static str {
        match self {
            Self::Lender | Self::Dealer => "Please acknowledge the privacy policy.",
            Self::Investor => "Please confirm accredited investor status.",
            Self::General => "Please accept the privacy policy",
        }
    }

    /// Message shown after a successful submission.
    #[must_use]
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Lender | Self::Dealer => {
                "Request submitted! We'll reach out within 1 business day."
            }
            Self::Investor => "Request submitted! We'll send materials within 48 hours.",
            Self::General => "Thank you. We'll be in touch shortly.",
        }
    }

    fn required_fields(self) -> &'static [Field] {
        match self {
            Self::Lender | Self::Dealer => &[
                Field::Company,
                Field::ContactName,
                Field::Role,
                Field::Email,
                Field::Phone,
                Field::Geography,
            ],
            Self::Investor => &[
                Field::Company,
                Field::Role,
                Field::Email,
                Field::AumBracket,
                Field::Jurisdiction,
            ],
            Self::General => &[Field::ContactName, Field::Email, Field::Interest],
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lender => "lender",
            Self::Dealer => "dealer",
            Self::Investor => "investor",
            Self::General => "general",
        })
    }
}

/// Primary interest picked on the general contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Lender,
    Investor,
    Capital,
    Other,
}

impl Interest {
    fn label(self) -> &'static str {
        match self {
            Self::Lender => "Floorplan Lender",
            Self::Investor => "Institutional Investor",
            Self::Capital => "Capital Partner",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    ContactName,
    Email,
    Company,
    Role,
    Interest,
    Phone,
    Geography,
    AumBracket,
    Jurisdiction,
}

impl Field {
    fn name(self) -> &'static str {
        match self {
            Self::ContactName => "contact name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Role => "role",
            Self::Interest => "interest",
            Self::Phone => "phone",
            Self::Geography => "geography",
            Self::AumBracket => "AUM bracket",
            Self::Jurisdiction => "jurisdiction",
        }
    }
}

/// The editable state of a lead form.
///
/// Fields a given [`Audience`] does not render are simply left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadForm {
    pub contact_name: String,
    pub email: String,
    /// Institution, dealership, or firm name depending on audience.
    pub company: String,
    pub role: String,
    pub interest: Option<Interest>,
    pub message: String,
    /// Privacy acknowledgement, or accredited-investor confirmation.
    pub consent: bool,
    pub phone: String,
    pub geography: String,
    pub portfolio_size: String,
    pub loan_management_system: String,
    pub aum_bracket: String,
    pub jurisdiction: String,
}

impl LeadForm {
    /// Check the form against `audience`'s rules.
    ///
    /// Consent is checked first, then required fields in display order,
    /// then the email address.
    ///
    /// # Errors
    ///
    /// Returns the first [`LeadError`] encountered.
    pub fn validate(&self, audience: Audience) -> Result<Lead, LeadError> {
        if !self.consent {
            return Err(LeadError::ConsentRequired { audience });
        }

        for field in audience.required_fields() {
            if self.is_blank(*field) {
                return Err(LeadError::MissingField {
                    field: field.name(),
                });
            }
        }

        validate_email(&self.email)?;

        Ok(Lead {
            audience,
            form: self.clone(),
        })
    }

    fn is_blank(&self, field: Field) -> bool {
        let text = match field {
            Field::Interest => return self.interest.is_none(),
            Field::ContactName => &self.contact_name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::Role => &self.role,
            Field::Phone => &self.phone,
            Field::Geography => &self.geography,
            Field::AumBracket => &self.aum_bracket,
            Field::Jurisdiction => &self.jurisdiction,
        };
        text.trim().is_empty()
    }
}

/// Check that `email` looks like exactly one deliverable mailbox.
///
/// This is a plausibility check, not RFC 5322 parsing. It exists mainly so
/// the address is safe to place in a `Reply-To` header.
///
/// # Errors
///
/// Returns [`LeadError::MissingField`] for a blank address and
/// [`LeadError::InvalidEmail`] otherwise.
pub fn validate_email(email: &str) -> Result<(), LeadError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(LeadError::MissingField { field: "email" });
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(LeadError::InvalidEmail {
            reason: "contains whitespace or control characters",
        });
    }
    if email.contains(',') || email.contains(';') || email.contains('<') || email.contains('>') {
        return Err(LeadError::InvalidEmail {
            reason: "must be a single address",
        });
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(LeadError::InvalidEmail { reason: "missing '@'" });
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(LeadError::InvalidEmail {
            reason: "expected local@domain",
        });
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(LeadError::InvalidEmail {
            reason: "domain must contain a dot",
        });
    }
    Ok(())
}

/// A lead form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    audience: Audience,
    form: LeadForm,
}

impl Lead {
    #[must_use]
    pub fn audience(&self) -> Audience {
        self.audience
    }

    #[must_use]
    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    /// Build the relay wire body.
    ///
    /// Role-specific fields are appended to the message under a `Details:`
    /// block so nothing the user typed is lost in the email.
    #[must_use]
    pub fn to_payload(&self) -> ContactPayload {
        let f = &self.form;
        let name = if f.contact_name.trim().is_empty() {
            f.company.trim().to_owned()
        } else {
            f.contact_name.trim().to_owned()
        };

        let extras = [
            ("Company", f.company.as_str()),
            ("Role", f.role.as_str()),
            ("Interest", f.interest.map_or("", Interest::label)),
            ("Phone", f.phone.as_str()),
            ("Geography", f.geography.as_str()),
            ("Portfolio size", f.portfolio_size.as_str()),
            ("Loan management system", f.loan_management_system.as_str()),
            ("AUM bracket", f.aum_bracket.as_str()),
            ("Jurisdiction", f.jurisdiction.as_str()),
        ];
        let details = std::iter::once(format!("Audience: {}", self.audience))
            .chain(extras.into_iter().filter_map(|(label, value)| {
                let value = value.trim();
                (!value.is_empty()).then(|| format!("{label}: {value}"))
            }))
            .collect::<Vec<_>>()
            .join("\n");

        let message = f.message.trim();
        let message = if message.is_empty() {
            format!("Details:\n{details}")
        } else {
            format!("{message}\n\nDetails:\n{details}")
        };

        ContactPayload {
            name,
            email: f.email.trim().to_owned(),
            message,
        }
    }
}

/// JSON body accepted by `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn lender_form() -> LeadForm {
        LeadForm {
            company: "First Floorplan Bank".to_owned(),
            contact_name: "Dana Reyes".to_owned(),
            role: "VP Risk".to_owned(),
            email: "dana@firstfloorplan.com".to_owned(),
            phone: "555-0100".to_owned(),
            geography: "Texas".to_owned(),
            consent: true,
            ..LeadForm::default()
        }
    }

    #[test]
    fn consent_checked_before_anything_else() {
        let form = LeadForm::default();
        let err = form.validate(Audience::Lender).unwrap_err();
        assert_eq!(
            err,
            LeadError::ConsentRequired {
                audience: Audience::Lender
            }
        );
        assert_eq!(err.to_string(), "Please acknowledge the privacy policy.");
    }

    #[test]
    fn consent_prompt_varies_by_audience() {
        let form = LeadForm::default();
        let investor = form.validate(Audience::Investor).unwrap_err();
        assert_eq!(
            investor.to_string(),
            "Please confirm accredited investor status."
        );
        let general = form.validate(Audience::General).unwrap_err();
        assert_eq!(general.to_string(), "Please accept the privacy policy");
    }

    #[test]
    fn valid_lender_form_passes() {
        let lead = lender_form().validate(Audience::Lender).unwrap();
        assert_eq!(lead.audience(), Audience::Lender);
    }

    #[test]
    fn missing_required_field_is_named() {
        let mut form = lender_form();
        form.phone = "   ".to_owned();
        let err = form.validate(Audience::Lender).unwrap_err();
        assert_eq!(err, LeadError::MissingField { field: "phone" });
    }

    #[test]
    fn general_form_requires_interest() {
        let form = LeadForm {
            contact_name: "Sam".to_owned(),
            email: "sam@example.com".to_owned(),
            consent: true,
            ..LeadForm::default()
        };
        let err = form.validate(Audience::General).unwrap_err();
        assert_eq!(err, LeadError::MissingField { field: "interest" });

        let form = LeadForm {
            interest: Some(Interest::Capital),
            ..form
        };
        assert!(form.validate(Audience::General).is_ok());
    }

    #[test]
    fn investor_form_does_not_need_contact_name() {
        let form = LeadForm {
            company: "Granite Credit Partners".to_owned(),
            role: "Principal".to_owned(),
            email: "ops@granite.example".to_owned(),
            aum_bracket: "$1B-$5B".to_owned(),
            jurisdiction: "US".to_owned(),
            consent: true,
            ..LeadForm::default()
        };
        let lead = form.validate(Audience::Investor).unwrap();
        assert_eq!(lead.to_payload().name, "Granite Credit Partners");
    }

    #[test]
    fn email_plausibility() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email(" a@b.co ").is_ok());
        assert!(matches!(
            validate_email(""),
            Err(LeadError::MissingField { .. })
        ));
        for bad in [
            "nobody",
            "@b.co",
            "a@",
            "a@b",
            "a@@b.co",
            "a@b.co\r\nBcc: x@y.z",
            "a b@c.co",
            "a@b.co, c@d.co",
            "Name <a@b.co>",
            "a@.co",
        ] {
            assert!(
                matches!(validate_email(bad), Err(LeadError::InvalidEmail { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn payload_carries_message_and_details() {
        let mut form = lender_form();
        form.message = "  Interested in a pilot.  ".to_owned();
        form.portfolio_size = "$800M".to_owned();
        let payload = form.validate(Audience::Lender).unwrap().to_payload();

        assert_eq!(payload.name, "Dana Reyes");
        assert_eq!(payload.email, "dana@firstfloorplan.com");
        assert!(payload.message.starts_with("Interested in a pilot.\n\nDetails:\n"));
        assert!(payload.message.contains("Audience: lender\n"));
        assert!(payload.message.contains("Portfolio size: $800M"));
        assert!(!payload.message.contains("Jurisdiction"));
    }

    #[test]
    fn payload_without_message_is_details_only() {
        let payload = lender_form().validate(Audience::Dealer).unwrap().to_payload();
        assert!(payload.message.starts_with("Details:\nAudience: dealer"));
    }

    #[test]
    fn contact_payload_defaults_optional_fields() {
        let payload: ContactPayload = serde_json::from_str(r#"{"email":"x@y.io"}"#).unwrap();
        assert_eq!(payload.name, "");
        assert_eq!(payload.message, "");
    }
}
