//! Image uploads: multipart decoding, filename sanitizing, and the on-disk sink.

use std::collections::HashMap;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::Multipart;
use tracing::{debug, warn};
use unicode_normalization::UnicodeNormalization;

use crate::utils::error::AppError;

pub const IMAGE_FIELD: &str = "image_file";

pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// A decoded multipart form: text fields plus at most one image.
#[derive(Debug, Default)]
pub struct UploadForm {
    fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl UploadForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Upload(format!("Malformed upload: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == IMAGE_FIELD {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Upload(format!("Failed to read upload: {e}")))?;
                // An untouched file input still submits the field, with no filename.
                if !file_name.is_empty() {
                    form.image = Some(ImageUpload { file_name, bytes });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Upload(format!("Failed to read field: {e}")))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Trimmed value of a text field; missing fields read as empty.
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

/// Reduces a client filename to `[A-Za-z0-9_.-]`, turning path separators and whitespace
/// runs into `_` and stripping leading/trailing dots and underscores. Accented letters are
/// NFKD-decomposed first so they keep their base letter.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let spaced: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(stem, ext)| {
            !stem.is_empty()
                && ALLOWED_IMAGE_EXTENSIONS
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Validates the upload's name and extension without touching the disk.
pub fn validated_name(upload: &ImageUpload) -> Result<String, AppError> {
    let name = sanitize_filename(&upload.file_name)
        .ok_or_else(|| AppError::Upload("Invalid file name".into()))?;

    if !has_allowed_extension(&name) {
        return Err(AppError::Upload(format!(
            "Only image files are allowed ({})",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    Ok(name)
}

/// Writes the image under `dir` and returns the stored name. A file of the same name is replaced.
pub async fn save_image(dir: &Path, upload: &ImageUpload) -> Result<String, AppError> {
    let name = validated_name(upload)?;

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&name), &upload.bytes).await?;

    debug!(file = %name, size = upload.bytes.len(), "Stored upload");
    Ok(name)
}

/// Best-effort removal; a missing file is not an error.
pub async fn remove_image(dir: &Path, name: &str) {
    let Some(safe) = sanitize_filename(name).filter(|safe| safe == name) else {
        warn!(file = %name, "Refusing to remove file with unexpected name");
        return;
    };

    match tokio::fs::remove_file(dir.join(&safe)).await {
        Ok(()) => debug!(file = %safe, "Removed upload"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(file = %safe, error = %e, "Failed to remove upload"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            bytes: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("poster.png").as_deref(), Some("poster.png"));
        assert_eq!(
            sanitize_filename("Tech Fest 2024.JPG").as_deref(),
            Some("Tech_Fest_2024.JPG")
        );
    }

    #[test]
    fn sanitize_strips_directories_and_traversal() {
        assert_eq!(
            sanitize_filename("../../etc/passwd").as_deref(),
            Some("etc_passwd")
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\photo.gif").as_deref(),
            Some("C_Users_me_photo.gif")
        );
    }

    #[test]
    fn sanitize_decomposes_accents() {
        assert_eq!(sanitize_filename("café.png").as_deref(), Some("cafe.png"));
        assert_eq!(
            sanitize_filename("Ünïcödé poster.jpg").as_deref(),
            Some("Unicode_poster.jpg")
        );
    }

    #[test]
    fn sanitize_rejects_names_with_nothing_left() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("..."), None);
        assert_eq!(sanitize_filename("日本語"), None);
    }

    #[test]
    fn extension_allow_list() {
        assert!(has_allowed_extension("a.png"));
        assert!(has_allowed_extension("a.JPeG"));
        assert!(has_allowed_extension("a.webp"));
        assert!(!has_allowed_extension("a.exe"));
        assert!(!has_allowed_extension("a.png.php"));
        assert!(!has_allowed_extension("png"));
    }

    #[test]
    fn validated_name_rejects_disallowed_extension() {
        assert!(matches!(
            validated_name(&upload("script.sh")),
            Err(AppError::Upload(_))
        ));
        assert_eq!(validated_name(&upload("a b.png")).unwrap(), "a_b.png");
    }

    #[tokio::test]
    async fn save_then_remove() {
        let dir = tempfile::tempdir().unwrap();

        let name = save_image(dir.path(), &upload("team photo.png")).await.unwrap();
        assert_eq!(name, "team_photo.png");
        assert!(dir.path().join(&name).exists());

        remove_image(dir.path(), &name).await;
        assert!(!dir.path().join(&name).exists());

        // Second removal is a no-op.
        remove_image(dir.path(), &name).await;
    }

    #[tokio::test]
    async fn same_name_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let first = ImageUpload {
            file_name: "x.png".into(),
            bytes: Bytes::from_static(b"first"),
        };
        let second = ImageUpload {
            file_name: "x.png".into(),
            bytes: Bytes::from_static(b"second"),
        };

        save_image(dir.path(), &first).await.unwrap();
        save_image(dir.path(), &second).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("x.png")).unwrap(), b"second");
    }
}
