// src/services/lead_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::Storage,
    models::leads::{CreateLeadPayload, Lead, LeadChanges, LeadStats, LeadStatus, UpdateLeadPayload},
};

#[derive(Clone)]
pub struct LeadService {
    storage: Arc<dyn Storage>,
}

impl LeadService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn submit(&self, input: CreateLeadPayload) -> Result<Lead, AppError> {
        let lead = self.storage.create_lead(input).await?;
        tracing::info!(lead_id = %lead.id, "new lead submitted");
        Ok(lead)
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Lead>, AppError> {
        let status = status.map(parse_status).transpose()?;
        self.storage.list_leads(status).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Lead, AppError> {
        self.storage.get_lead(id).await?.ok_or(AppError::NotFound("Lead"))
    }

    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Lead, AppError> {
        let status = parse_status(status)?;
        self.storage.update_lead_status(id, status).await
    }

    pub async fn update(&self, id: Uuid, patch: UpdateLeadPayload) -> Result<Lead, AppError> {
        let changes = LeadChanges {
            status: patch.status.as_deref().map(parse_status).transpose()?,
            name: patch.name,
            email: patch.email,
            phone: patch.phone,
            project_details: patch.project_details,
        };
        self.storage.update_lead(id, changes).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.storage.delete_lead(id).await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Lead>, AppError> {
        self.storage.search_leads(term).await
    }

    /// Total plus one counter per status.
    pub async fn stats(&self) -> Result<LeadStats, AppError> {
        let mut stats = LeadStats {
            total: self.storage.count_leads(None).await?,
            ..Default::default()
        };
        for status in LeadStatus::ALL {
            let count = self.storage.count_leads(Some(status)).await?;
            match status {
                LeadStatus::New => stats.new = count,
                LeadStatus::Contacted => stats.contacted = count,
                LeadStatus::Converted => stats.converted = count,
                LeadStatus::Archived => stats.archived = count,
            }
        }
        Ok(stats)
    }
}

pub fn parse_status(raw: &str) -> Result<LeadStatus, AppError> {
    raw.parse::<LeadStatus>().map_err(|_| {
        let allowed: Vec<&str> = LeadStatus::ALL.iter().map(LeadStatus::as_str).collect();
        AppError::BadRequest(format!("Invalid status. Must be one of: {}", allowed.join(", ")))
    })
}
