//! Multipart bodies for post and profile uploads.

use std::path::{Path, PathBuf};

use jamjournal_api_types::MediaKind;
use reqwest::multipart::{Form, Part};

use super::error::ClientError;

/// One media attachment in a post form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaUpload {
    Local {
        path: PathBuf,
        media_type: MediaKind,
        title: String,
        artist: String,
    },
    External {
        url: String,
        media_type: MediaKind,
        platform: Option<String>,
        title: String,
        artist: String,
    },
}

/// Fields of the admin post editor. Used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub genre_id: Option<i64>,
    pub tags: Vec<String>,
    pub featured: bool,
    pub hero_image: Option<PathBuf>,
    /// Passed through verbatim; the backend stamps creation time when absent.
    pub created_at: Option<String>,
    pub categories: Vec<String>,
    pub media: Vec<MediaUpload>,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.title.trim().is_empty() {
            return Err(ClientError::InvalidInput("title is required".into()));
        }
        Ok(())
    }

    /// Text parts in submission order. Files are not included.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("excerpt", self.excerpt.clone()),
            ("content", self.content.clone()),
        ];
        if let Some(genre_id) = self.genre_id {
            fields.push(("genre_id", genre_id.to_string()));
        }
        let tags: Vec<&str> = self
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .collect();
        fields.push(("tags", tags.join(",")));
        fields.push(("featured", self.featured.to_string()));
        if let Some(created_at) = self.created_at.as_ref().filter(|v| !v.trim().is_empty()) {
            fields.push(("created_at", created_at.clone()));
        }
        for category in &self.categories {
            fields.push(("categories", category.clone()));
        }
        for media in &self.media {
            match media {
                MediaUpload::Local {
                    media_type,
                    title,
                    artist,
                    ..
                } => {
                    fields.push(("mediaTypes", media_type.as_str().to_string()));
                    fields.push(("mediaTitles", title.clone()));
                    fields.push(("mediaArtists", artist.clone()));
                }
                MediaUpload::External {
                    url,
                    media_type,
                    platform,
                    title,
                    artist,
                } => {
                    fields.push(("externalMediaUrls", url.clone()));
                    fields.push(("externalMediaTypes", media_type.as_str().to_string()));
                    fields.push((
                        "externalMediaPlatforms",
                        platform.clone().unwrap_or_default(),
                    ));
                    fields.push(("externalMediaTitles", title.clone()));
                    fields.push(("externalMediaArtists", artist.clone()));
                }
            }
        }
        fields
    }

    pub async fn into_multipart(self) -> Result<Form, ClientError> {
        self.validate()?;
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        if let Some(path) = self.hero_image.as_deref() {
            form = form.part("heroImage", file_part(path).await?);
        }
        for media in &self.media {
            if let MediaUpload::Local { path, .. } = media {
                form = form.part("mediaFiles", file_part(path).await?);
            }
        }
        Ok(form)
    }
}

/// Editable profile of the signed-in administrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub bio: String,
    pub avatar: Option<PathBuf>,
}

impl ProfileForm {
    pub async fn into_multipart(self) -> Result<Form, ClientError> {
        let mut form = Form::new().text("name", self.name).text("bio", self.bio);
        if let Some(path) = self.avatar.as_deref() {
            form = form.part("avatar", file_part(path).await?);
        }
        Ok(form)
    }
}

async fn file_part(path: &Path) -> Result<Part, ClientError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|err| ClientError::File {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Part::bytes(data)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(ClientError::from)
}
