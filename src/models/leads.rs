// src/models/leads.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// Maps the `lead_status` enum type of the database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "lead_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
    Archived,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Converted,
        LeadStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Converted => "converted",
            LeadStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLeadStatus(pub String);

impl FromStr for LeadStatus {
    type Err = UnknownLeadStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownLeadStatus(s.to_string()))
    }
}

// A contact-form submission
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,

    #[schema(example = "Jane Doe")]
    pub name: String,

    #[schema(example = "jane@example.com")]
    pub email: String,

    pub phone: Option<String>,

    #[schema(example = "Blockout curtains for three bedrooms")]
    pub project_details: Option<String>,

    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[validate(length(min = 1, max = 255, message = "Name must have between 1 and 255 characters."))]
    pub name: String,

    #[validate(
        email(message = "The e-mail address is invalid."),
        length(max = 255, message = "E-mail must have at most 255 characters.")
    )]
    pub email: String,

    #[validate(length(max = 20, message = "Phone must have at most 20 characters."))]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Project details are required."))]
    pub project_details: String,
}

// Admin edit of a lead. Absent fields are kept; an empty `phone` or `projectDetails` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadPayload {
    #[validate(length(min = 1, max = 255, message = "Name must have between 1 and 255 characters."))]
    pub name: Option<String>,

    #[validate(
        email(message = "The e-mail address is invalid."),
        length(max = 255, message = "E-mail must have at most 255 characters.")
    )]
    pub email: Option<String>,

    #[validate(length(max = 20, message = "Phone must have at most 20 characters."))]
    pub phone: Option<String>,

    pub project_details: Option<String>,

    #[schema(example = "contacted")]
    pub status: Option<String>,
}

// `UpdateLeadPayload` once its status has been parsed
#[derive(Debug, Clone, Default)]
pub struct LeadChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub project_details: Option<String>,
    pub status: Option<LeadStatus>,
}

// Per-status counters for the leads dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LeadStats {
    pub total: i64,
    pub new: i64,
    pub contacted: i64,
    pub converted: i64,
    pub archived: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLeadStatusPayload {
    #[schema(example = "contacted")]
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadQuery {
    /// new, contacted, converted or archived
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_status() {
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>(), Ok(status));
        }
    }

    #[test]
    fn rejects_unknown_and_differently_cased_statuses() {
        assert!("closed".parse::<LeadStatus>().is_err());
        assert!("New".parse::<LeadStatus>().is_err());
    }

    fn submission(email: String) -> CreateLeadPayload {
        CreateLeadPayload {
            name: "Jane".into(),
            email,
            phone: None,
            project_details: "Roman blinds".into(),
        }
    }

    #[test]
    fn email_longer_than_the_column_is_invalid() {
        let local = "a".repeat(64);
        let domain = format!("{}.{}.{}.example.com", "b".repeat(63), "c".repeat(63), "d".repeat(63));
        let long = format!("{local}@{domain}");
        assert!(long.len() > 255);

        let errors = submission(long).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        assert!(submission("jane@example.com".into()).validate().is_ok());
    }

    #[test]
    fn update_payload_checks_email_when_present() {
        let patch = UpdateLeadPayload {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
        assert!(UpdateLeadPayload::default().validate().is_ok());
    }

    #[test]
    fn serializes_as_lowercase() {
        assert_eq!(serde_json::to_string(&LeadStatus::Converted).unwrap(), "\"converted\"");
    }
}
