#![deny(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::{Path, PathBuf};

use jamjournal::application::error::AppError;
use jamjournal::config::PostFormArgs;
use jamjournal::infra::http::{MediaUpload, PostForm};
use jamjournal_api_types::MediaKind;

fn read_file(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|err| {
        AppError::validation(format!("failed to read {}: {err}", path.display()))
    })
}

/// Inline value or file contents; the file wins when both are given.
pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, AppError> {
    read_opt_value(val, file)?.ok_or_else(|| AppError::validation("value required"))
}

pub fn read_opt_value(
    val: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>, AppError> {
    if let Some(path) = file {
        return read_file(&path).map(Some);
    }
    Ok(val)
}

fn media_kind(value: &str) -> Result<MediaKind, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "audio" => Ok(MediaKind::Audio),
        "video" => Ok(MediaKind::Video),
        other => Err(AppError::validation(format!(
            "media type must be audio or video, got `{other}`"
        ))),
    }
}

/// `audio|video;PATH;TITLE;ARTIST`
pub fn parse_local_media(spec: &str) -> Result<MediaUpload, AppError> {
    let parts: Vec<&str> = spec.split(';').collect();
    let [kind, path, title, artist] = parts.as_slice() else {
        return Err(AppError::validation(format!(
            "local media `{spec}` must look like TYPE;PATH;TITLE;ARTIST"
        )));
    };
    if path.trim().is_empty() {
        return Err(AppError::validation("local media path is empty"));
    }
    Ok(MediaUpload::Local {
        path: PathBuf::from(path.trim()),
        media_type: media_kind(kind)?,
        title: title.trim().to_string(),
        artist: artist.trim().to_string(),
    })
}

/// `audio|video;URL;PLATFORM;TITLE;ARTIST`; an empty platform is omitted.
pub fn parse_external_media(spec: &str) -> Result<MediaUpload, AppError> {
    let parts: Vec<&str> = spec.split(';').collect();
    let [kind, url, platform, title, artist] = parts.as_slice() else {
        return Err(AppError::validation(format!(
            "external media `{spec}` must look like TYPE;URL;PLATFORM;TITLE;ARTIST"
        )));
    };
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::validation(format!(
            "external media URL `{url}` must be http or https"
        )));
    }
    let platform = platform.trim();
    Ok(MediaUpload::External {
        url: url.to_string(),
        media_type: media_kind(kind)?,
        platform: (!platform.is_empty()).then(|| platform.to_string()),
        title: title.trim().to_string(),
        artist: artist.trim().to_string(),
    })
}

pub fn post_form(args: PostFormArgs) -> Result<PostForm, AppError> {
    let PostFormArgs {
        title,
        excerpt,
        content,
        content_file,
        genre_id,
        tags,
        featured,
        hero_image,
        created_at,
        categories,
        local_media,
        external_media,
    } = args;

    let mut media = Vec::with_capacity(local_media.len() + external_media.len());
    for spec in &local_media {
        media.push(parse_local_media(spec)?);
    }
    for spec in &external_media {
        media.push(parse_external_media(spec)?);
    }

    let form = PostForm {
        title,
        excerpt,
        content: read_opt_value(content, content_file)?.unwrap_or_default(),
        genre_id,
        tags,
        featured,
        hero_image,
        created_at,
        categories: categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect(),
        media,
    };
    form.validate()?;
    Ok(form)
}
