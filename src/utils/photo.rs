use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::AppError;

const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;
const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Durable storage for uploaded employee photos.
#[async_trait]
pub trait PhotoUploader: Send + Sync {
    /// Stores the image and returns the URL it is served from.
    async fn upload(&self, image: InlineImage) -> Result<String, AppError>;
}

#[derive(Debug)]
pub struct InlineImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub extension: &'static str,
}

/// True when the reference is already hosted somewhere and needs no upload.
pub fn is_remote_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Decodes a `data:<mime>;base64,<payload>` URL or bare base64 into an image.
pub fn decode_inline_image(reference: &str) -> Result<InlineImage, AppError> {
    let invalid = || AppError::Validation("Invalid employee photo".to_string());

    let payload = match reference.strip_prefix("data:") {
        Some(data_url) => {
            let (header, payload) = data_url.split_once(',').ok_or_else(invalid)?;
            if !header.ends_with(";base64") {
                return Err(invalid());
            }
            payload
        }
        None => reference,
    };

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact).map_err(|_| invalid())?;
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(AppError::Validation("Employee photo exceeds 10MiB limit".to_string()));
    }

    let file_type = infer::get(&bytes).ok_or_else(invalid)?;
    if !ALLOWED_MIME_TYPES.contains(&file_type.mime_type()) {
        return Err(invalid());
    }

    Ok(InlineImage {
        mime_type: file_type.mime_type(),
        extension: file_type.extension(),
        bytes,
    })
}

/// Turns a photo reference into a URL. Empty references resolve to nothing and
/// URLs pass through untouched; inline data is uploaded.
pub async fn resolve_photo(reference: Option<&str>, uploader: &dyn PhotoUploader) -> Result<Option<String>, AppError> {
    let reference = match reference {
        Some(reference) if !reference.is_empty() => reference,
        _ => return Ok(None),
    };
    if is_remote_url(reference) {
        return Ok(Some(reference.to_string()));
    }

    let image = decode_inline_image(reference)?;
    let url = uploader.upload(image).await?;
    log::info!("Uploaded employee photo to {}", url);
    Ok(Some(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeUploader, PNG_PIXEL};

    #[actix_web::test]
    async fn nothing_in_nothing_out() {
        let uploader = FakeUploader::default();
        assert_eq!(resolve_photo(None, &uploader).await, Ok(None));
        assert_eq!(resolve_photo(Some(""), &uploader).await, Ok(None));
        assert_eq!(uploader.uploads(), 0);
    }

    #[actix_web::test]
    async fn urls_pass_through_and_resolution_is_idempotent() {
        let uploader = FakeUploader::default();
        let data_url = format!("data:image/png;base64,{}", STANDARD.encode(PNG_PIXEL));

        let first = resolve_photo(Some(&data_url), &uploader).await.unwrap().unwrap();
        let second = resolve_photo(Some(&first), &uploader).await.unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(uploader.uploads(), 1);

        let plain = "http://cdn.example.com/a.jpg";
        assert_eq!(resolve_photo(Some(plain), &uploader).await, Ok(Some(plain.to_string())));
    }

    #[actix_web::test]
    async fn upload_failure_propagates() {
        let uploader = FakeUploader::failing();
        let result = resolve_photo(Some(&STANDARD.encode(PNG_PIXEL)), &uploader).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[test]
    fn decodes_bare_base64_and_sniffs_type() {
        let image = decode_inline_image(&STANDARD.encode(PNG_PIXEL)).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.extension, "png");
    }

    #[test]
    fn rejects_non_images_and_bad_payloads() {
        let text = STANDARD.encode(b"just some text, definitely not an image");
        assert!(decode_inline_image(&text).is_err());
        assert!(decode_inline_image("data:image/png,rawbytes").is_err());
        assert!(decode_inline_image("%%%not base64%%%").is_err());
    }

    #[test]
    fn only_http_schemes_count_as_urls() {
        assert!(is_remote_url("https://example.com/p.png"));
        assert!(is_remote_url("http://example.com/p.png"));
        assert!(!is_remote_url("ftp://example.com/p.png"));
        assert!(!is_remote_url("HTTPS://example.com/p.png"));
    }
}
