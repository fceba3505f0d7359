//! Handler for `/cloudinary/sign`: signed direct-to-CDN uploads.
//!
//! Browsers upload files straight to the media CDN. The server only signs the
//! upload parameters with the account secret, which never leaves the server.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use stockmedia_core::cdn::{
    sign_upload, validate_resource_type, DEFAULT_RESOURCE_TYPE, DEFAULT_UPLOAD_FOLDER,
};
use stockmedia_core::roles::UserRole;

use crate::config::CdnConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireContributor;
use crate::state::AppState;

/// Request body for `POST /cloudinary/sign`.
#[derive(Debug, Default, Deserialize)]
pub struct SignUploadRequest {
    pub folder: Option<String>,
    pub resource_type: Option<String>,
    pub transformation: Option<String>,
    /// Role hint sent by older clients. The session role is authoritative.
    pub role: Option<UserRole>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUploadResponse {
    pub signature: String,
    pub timestamp: i64,
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub upload_preset: Option<String>,
    pub folder: String,
    pub resource_type: String,
}

/// POST /api/cloudinary/sign
///
/// Sign upload parameters for a contributor or admin.
pub async fn sign(
    State(state): State<AppState>,
    RequireContributor(user): RequireContributor,
    Json(input): Json<SignUploadRequest>,
) -> AppResult<Json<SignUploadResponse>> {
    if input.role.is_some_and(|hint| hint != user.role) {
        tracing::debug!(user_id = user.user_id, "Ignoring mismatched role hint");
    }

    let timestamp = chrono::Utc::now().timestamp();
    let response = sign_request(&state.config.cdn, input, timestamp)?;

    tracing::info!(
        user_id = user.user_id,
        folder = %response.folder,
        resource_type = %response.resource_type,
        "Upload signature issued",
    );

    Ok(Json(response))
}

/// Resolve defaults and sign the upload parameters at `timestamp`.
fn sign_request(
    cdn: &CdnConfig,
    input: SignUploadRequest,
    timestamp: i64,
) -> Result<SignUploadResponse, AppError> {
    let api_secret = cdn
        .api_secret
        .as_deref()
        .ok_or_else(|| AppError::InternalError("CLOUDINARY_API_SECRET is not set".into()))?;

    let folder = non_blank(input.folder).unwrap_or_else(|| DEFAULT_UPLOAD_FOLDER.to_string());
    let resource_type =
        non_blank(input.resource_type).unwrap_or_else(|| DEFAULT_RESOURCE_TYPE.to_string());
    validate_resource_type(&resource_type)?;

    let mut params = BTreeMap::new();
    params.insert("folder".to_string(), folder.clone());
    if let Some(transformation) = non_blank(input.transformation) {
        params.insert("transformation".to_string(), transformation);
    }
    if let Some(preset) = &cdn.upload_preset {
        params.insert("upload_preset".to_string(), preset.clone());
    }

    let signature = sign_upload(&params, timestamp, api_secret, cdn.signature_algorithm);

    Ok(SignUploadResponse {
        signature,
        timestamp,
        cloud_name: cdn.cloud_name.clone(),
        api_key: cdn.api_key.clone(),
        upload_preset: cdn.upload_preset.clone(),
        folder,
        resource_type,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockmedia_core::cdn::SignatureAlgorithm;

    fn cdn() -> CdnConfig {
        CdnConfig {
            cloud_name: Some("demo".into()),
            api_key: Some("key".into()),
            api_secret: Some("secret".into()),
            upload_preset: None,
            signature_algorithm: SignatureAlgorithm::Sha1,
        }
    }

    #[test]
    fn defaults_are_applied() {
        let response = sign_request(&cdn(), SignUploadRequest::default(), 1_700_000_000).unwrap();
        assert_eq!(response.folder, DEFAULT_UPLOAD_FOLDER);
        assert_eq!(response.resource_type, DEFAULT_RESOURCE_TYPE);
        assert!(response.upload_preset.is_none());
        assert_eq!(response.signature.len(), 40);
    }

    #[test]
    fn resource_type_does_not_affect_signature() {
        let image = SignUploadRequest {
            resource_type: Some("image".into()),
            ..Default::default()
        };
        let a = sign_request(&cdn(), image, 1).unwrap();
        let b = sign_request(&cdn(), SignUploadRequest::default(), 1).unwrap();
        assert_eq!(a.signature, b.signature);
    }

    #[test]
    fn preset_is_signed() {
        let mut with_preset = cdn();
        with_preset.upload_preset = Some("stock".into());
        let a = sign_request(&with_preset, SignUploadRequest::default(), 1).unwrap();
        let b = sign_request(&cdn(), SignUploadRequest::default(), 1).unwrap();
        assert_ne!(a.signature, b.signature);
        assert_eq!(a.upload_preset.as_deref(), Some("stock"));
    }

    #[test]
    fn unknown_resource_type_is_rejected() {
        let input = SignUploadRequest {
            resource_type: Some("raw".into()),
            ..Default::default()
        };
        assert!(sign_request(&cdn(), input, 1).is_err());
    }

    #[test]
    fn missing_secret_is_an_internal_error() {
        let mut config = cdn();
        config.api_secret = None;
        assert!(matches!(
            sign_request(&config, SignUploadRequest::default(), 1),
            Err(AppError::InternalError(_))
        ));
    }
}
