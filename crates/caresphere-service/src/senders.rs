//! Sender identity settings and precedence resolution.

use crate::dto::{ResolvedSenders, SenderSettingResponse, UpsertSenderSettingRequest};
use async_trait::async_trait;
use caresphere_config::SenderDefaults;
use caresphere_core::validation::ValidateExt;
use caresphere_core::{
    CareError, CareResult, OrganizationId, ResolvedScope, SenderSetting, SenderSettingId,
    SettingScope, UserId,
};
use caresphere_repository::traits::SenderSettingRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// Sender settings management and resolution.
#[async_trait]
pub trait SenderSettingsService: Send + Sync {
    /// Resolves the sender identity for a messaging context.
    async fn resolve(
        &self,
        user_id: Option<UserId>,
        organization_id: Option<OrganizationId>,
    ) -> CareResult<ResolvedSenders>;

    /// Creates or replaces the setting row for one scope/reference pair.
    async fn upsert(&self, request: UpsertSenderSettingRequest)
        -> CareResult<SenderSettingResponse>;

    /// Lists all setting rows.
    async fn list(&self) -> CareResult<Vec<SenderSettingResponse>>;

    /// Deletes a setting row.
    async fn delete(&self, id: SenderSettingId) -> CareResult<()>;
}

/// Default implementation over the `sender_settings` table.
pub struct SenderSettingsServiceImpl {
    repository: Arc<dyn SenderSettingRepository>,
    defaults: SenderDefaults,
}

impl SenderSettingsServiceImpl {
    #[must_use]
    pub fn new(repository: Arc<dyn SenderSettingRepository>, defaults: SenderDefaults) -> Self {
        Self {
            repository,
            defaults,
        }
    }

    /// The first scope with any row wins wholesale. Fields that row left
    /// null fall back to static configuration, never to a lower scope.
    fn assemble(&self, row: SenderSetting) -> ResolvedSenders {
        let sender_phone = row.sender_phone;
        ResolvedSenders {
            sender_id: Some(row.id),
            default_from: row
                .sender_email
                .unwrap_or_else(|| self.defaults.from_email.clone()),
            default_from_name: row
                .sender_name
                .unwrap_or_else(|| self.defaults.from_name.clone()),
            sms_from: sender_phone
                .clone()
                .unwrap_or_else(|| self.defaults.sms_from.clone()),
            voice_from: sender_phone.unwrap_or_else(|| self.defaults.voice_from.clone()),
            resolved_scope: row.scope.into(),
        }
    }

    fn environment_defaults(&self) -> ResolvedSenders {
        ResolvedSenders {
            sender_id: None,
            default_from: self.defaults.from_email.clone(),
            default_from_name: self.defaults.from_name.clone(),
            sms_from: self.defaults.sms_from.clone(),
            voice_from: self.defaults.voice_from.clone(),
            resolved_scope: ResolvedScope::Env,
        }
    }
}

#[async_trait]
impl SenderSettingsService for SenderSettingsServiceImpl {
    async fn resolve(
        &self,
        user_id: Option<UserId>,
        organization_id: Option<OrganizationId>,
    ) -> CareResult<ResolvedSenders> {
        debug!(
            "Resolving sender settings (user: {:?}, organization: {:?})",
            user_id, organization_id
        );

        if let Some(user_id) = user_id {
            if let Some(row) = self
                .repository
                .find_by_scope(SettingScope::User, Some(user_id.into_inner()))
                .await?
            {
                return Ok(self.assemble(row));
            }
        }

        if let Some(organization_id) = organization_id {
            if let Some(row) = self
                .repository
                .find_by_scope(SettingScope::Organization, Some(organization_id.into_inner()))
                .await?
            {
                return Ok(self.assemble(row));
            }
        }

        if let Some(row) = self
            .repository
            .find_by_scope(SettingScope::Global, None)
            .await?
        {
            return Ok(self.assemble(row));
        }

        Ok(self.environment_defaults())
    }

    async fn upsert(
        &self,
        request: UpsertSenderSettingRequest,
    ) -> CareResult<SenderSettingResponse> {
        request.validate_request()?;

        if request.scope.requires_reference() && request.reference_id.is_none() {
            return Err(CareError::validation(
                "USER and ORGANIZATION settings require a reference id",
            ));
        }
        if !request.scope.requires_reference() && request.reference_id.is_some() {
            return Err(CareError::validation(
                "GLOBAL settings must not carry a reference id",
            ));
        }

        let setting = SenderSetting::new(
            request.scope,
            request.reference_id,
            request.sender_name,
            request.sender_email,
            request.sender_phone,
        );
        let stored = self.repository.upsert(&setting).await?;
        info!("Sender setting stored: {} ({})", stored.id, stored.scope);

        Ok(SenderSettingResponse::from(stored))
    }

    async fn list(&self) -> CareResult<Vec<SenderSettingResponse>> {
        debug!("Listing sender settings");

        let settings = self.repository.list().await?;
        Ok(settings.into_iter().map(SenderSettingResponse::from).collect())
    }

    async fn delete(&self, id: SenderSettingId) -> CareResult<()> {
        debug!("Deleting sender setting: {}", id);

        if !self.repository.delete(id).await? {
            return Err(CareError::not_found("SenderSetting", id));
        }
        info!("Sender setting deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for SenderSettingsServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SenderSettingsServiceImpl")
            .finish_non_exhaustive()
    }
}
