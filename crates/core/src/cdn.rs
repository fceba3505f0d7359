//! Media CDN request signing and delivery URL construction.
//!
//! Uploads go straight from the browser to the CDN; the server only signs the
//! parameters. The signature is the hex digest of the parameters sorted by
//! key and joined as `k=v&k=v`, with the API secret appended.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::media::MediaType;

/// Folder used when the client does not request one.
pub const DEFAULT_UPLOAD_FOLDER: &str = "stock-platform/uploads";

/// Resource type used when the client does not request one.
pub const DEFAULT_RESOURCE_TYPE: &str = "auto";

/// Resource types a client may request for an upload.
pub const VALID_RESOURCE_TYPES: &[&str] = &["image", "video", "auto"];

/// Base host for public delivery URLs.
pub const DELIVERY_HOST: &str = "https://res.cloudinary.com";

/// Parameters the CDN excludes from the string to sign.
const UNSIGNED_PARAMS: &[&str] = &["file", "api_key", "resource_type", "cloud_name"];

/// Digest used for upload signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl FromStr for SignatureAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(SignatureAlgorithm::Sha1),
            "sha256" => Ok(SignatureAlgorithm::Sha256),
            other => Err(CoreError::Validation(format!(
                "Unsupported signature algorithm '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureAlgorithm::Sha1 => f.write_str("sha1"),
            SignatureAlgorithm::Sha256 => f.write_str("sha256"),
        }
    }
}

/// Validate a client-requested upload resource type.
pub fn validate_resource_type(resource_type: &str) -> Result<(), CoreError> {
    if !VALID_RESOURCE_TYPES.contains(&resource_type) {
        return Err(CoreError::Validation(format!(
            "Invalid resource_type '{resource_type}'. Must be one of: {}",
            VALID_RESOURCE_TYPES.join(", ")
        )));
    }
    Ok(())
}

/// Build the canonical string to sign from upload parameters and timestamp.
///
/// Empty values and the parameters the CDN never signs are dropped.
pub fn string_to_sign(params: &BTreeMap<String, String>, timestamp: i64) -> String {
    let ts = timestamp.to_string();
    let mut signed: BTreeMap<&str, &str> = params
        .iter()
        .filter(|(k, v)| !v.is_empty() && !UNSIGNED_PARAMS.contains(&k.as_str()))
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    signed.insert("timestamp", &ts);

    signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Sign upload parameters with the account's API secret.
pub fn sign_upload(
    params: &BTreeMap<String, String>,
    timestamp: i64,
    api_secret: &str,
    algorithm: SignatureAlgorithm,
) -> String {
    let payload = format!("{}{api_secret}", string_to_sign(params, timestamp));
    match algorithm {
        SignatureAlgorithm::Sha1 => hex::encode(Sha1::digest(payload.as_bytes())),
        SignatureAlgorithm::Sha256 => hex::encode(Sha256::digest(payload.as_bytes())),
    }
}

/// Public delivery URL that forces a download (`fl_attachment`).
pub fn attachment_url(cloud_name: &str, media_type: MediaType, public_id: &str) -> String {
    format!(
        "{DELIVERY_HOST}/{cloud_name}/{}/upload/fl_attachment/{public_id}",
        media_type.resource_type()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn string_to_sign_sorts_and_filters() {
        let p = params(&[
            ("folder", "stock-platform/uploads"),
            ("resource_type", "image"),
            ("transformation", ""),
            ("api_key", "abc"),
        ]);
        assert_eq!(
            string_to_sign(&p, 1_700_000_000),
            "folder=stock-platform/uploads&timestamp=1700000000"
        );
    }

    #[test]
    fn known_sha1_signature() {
        // Reference vector from the CDN's signed-upload documentation.
        let p = params(&[
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop"),
            ("public_id", "sample_image"),
        ]);
        let signature = sign_upload(&p, 1315060510, "abcd", SignatureAlgorithm::Sha1);
        assert_eq!(signature, "bfd09f95f331f558cbd1320e67aa8d488770583e");
    }

    #[test]
    fn signature_is_order_independent() {
        let a = params(&[("folder", "f"), ("tags", "x")]);
        let b = params(&[("tags", "x"), ("folder", "f")]);
        assert_eq!(
            sign_upload(&a, 42, "secret", SignatureAlgorithm::Sha256),
            sign_upload(&b, 42, "secret", SignatureAlgorithm::Sha256)
        );
    }

    #[test]
    fn signature_depends_on_secret_and_timestamp() {
        let p = params(&[("folder", "f")]);
        let base = sign_upload(&p, 42, "secret", SignatureAlgorithm::Sha1);
        assert_ne!(base, sign_upload(&p, 43, "secret", SignatureAlgorithm::Sha1));
        assert_ne!(base, sign_upload(&p, 42, "other", SignatureAlgorithm::Sha1));
    }

    #[test]
    fn digest_lengths() {
        let p = params(&[]);
        assert_eq!(sign_upload(&p, 1, "s", SignatureAlgorithm::Sha1).len(), 40);
        assert_eq!(sign_upload(&p, 1, "s", SignatureAlgorithm::Sha256).len(), 64);
    }

    #[test]
    fn algorithm_parsing() {
        assert_eq!(
            "SHA256".parse::<SignatureAlgorithm>().unwrap(),
            SignatureAlgorithm::Sha256
        );
        assert_eq!(
            "sha1".parse::<SignatureAlgorithm>().unwrap(),
            SignatureAlgorithm::Sha1
        );
        assert!("md5".parse::<SignatureAlgorithm>().is_err());
    }

    #[test]
    fn resource_type_validation() {
        assert!(validate_resource_type("auto").is_ok());
        assert!(validate_resource_type("raw").is_err());
    }

    #[test]
    fn attachment_url_shape() {
        assert_eq!(
            attachment_url("demo", MediaType::Video, "sample-product-demo"),
            "https://res.cloudinary.com/demo/video/upload/fl_attachment/sample-product-demo"
        );
    }
}
