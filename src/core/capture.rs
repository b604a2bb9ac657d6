//! One-shot capture of the two things a field submission needs besides
//! text: a photo and a position. They are independent and can be awaited
//! together.

use crate::errors::{AppError, AppResult};
use crate::models::GeoPoint;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// Encode raw bytes as an inline `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Read an image file and return it as an inline payload.
pub async fn read_photo(path: &Path) -> AppResult<String> {
    let bytes = tokio::fs::read(path).await?;
    if bytes.is_empty() {
        return Err(AppError::Validation(format!(
            "photo file {} is empty",
            path.display()
        )));
    }

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        tracing::warn!(path = %path.display(), mime = %mime, "photo does not look like an image");
    }

    Ok(encode_data_url(mime.essence_str(), &bytes))
}

/// Resolve the device position.
///
/// The CLI has no GPS: coordinates come from the caller. Missing or invalid
/// values are reported the same way a denied geolocation prompt would be.
pub async fn acquire_location(lat: Option<f64>, lng: Option<f64>) -> Result<GeoPoint, String> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => GeoPoint::new(lat, lng)
            .ok_or_else(|| format!("coordinates out of range: {}, {}", lat, lng)),
        _ => Err("location unavailable: pass both --lat and --lng".to_string()),
    }
}

/// Short description of an inline payload: mime type and decoded size.
pub fn describe_payload(data_url: &str) -> String {
    let Some(rest) = data_url.strip_prefix("data:") else {
        return "external".to_string();
    };
    let Some((mime, b64)) = rest.split_once(";base64,") else {
        return "inline".to_string();
    };

    // 4 base64 chars → 3 bytes
    let bytes = b64.len() / 4 * 3;
    format!("{}, {:.1} KiB", mime, bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn photo_becomes_a_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("before.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let url = read_photo(&path).await.unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn empty_or_missing_photo_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();

        assert!(matches!(
            read_photo(&empty).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            read_photo(&dir.path().join("nope.jpg")).await,
            Err(AppError::Io(_))
        ));
    }

    #[tokio::test]
    async fn location_needs_both_coordinates() {
        assert!(acquire_location(Some(-23.5), Some(-46.6)).await.is_ok());
        assert!(acquire_location(Some(-23.5), None).await.is_err());
        assert!(acquire_location(Some(123.0), Some(0.0)).await.is_err());
    }

    #[test]
    fn describes_inline_payloads() {
        assert_eq!(describe_payload("data:image/png;base64,AAAA"), "image/png, 0.0 KiB");
        assert_eq!(describe_payload("https://example.org/x.png"), "external");
    }
}
