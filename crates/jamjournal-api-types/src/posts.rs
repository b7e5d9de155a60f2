use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSource {
    External,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

/// A media attachment embedded in a post. It has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub source: MediaSource,
    pub media_type: MediaKind,
    #[serde(default)]
    pub platform: Option<String>,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub genre_id: Option<i64>,
    #[serde(default, alias = "genre")]
    pub genre_name: Option<String>,
    #[serde(default, deserialize_with = "tags_from_wire")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub rating: u64,
    #[serde(default)]
    pub priority: i64,
}

impl Post {
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().map(|author| author.name.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Joined(String),
}

/// The backend stores tags as a comma-joined column and returns either
/// that string or an array depending on the route.
fn tags_from_wire<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<TagsRepr>::deserialize(deserializer)? {
        None => return Ok(Vec::new()),
        Some(TagsRepr::List(list)) => list,
        Some(TagsRepr::Joined(joined)) => joined.split(',').map(str::to_string).collect(),
    };
    Ok(raw
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect())
}

/// Server-side collection selector for `GET /api/posts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostCategory {
    Latest,
    Featured,
    Popular,
}

impl PostCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PostCategory::Latest => "latest",
            PostCategory::Featured => "featured",
            PostCategory::Popular => "popular",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostOrder {
    Priority,
}

impl PostOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            PostOrder::Priority => "priority",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PostListQuery {
    pub category: Option<PostCategory>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort_by: Option<PostOrder>,
}

impl PostListQuery {
    pub fn category(category: PostCategory, limit: u32) -> Self {
        Self {
            category: Some(category),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn by_priority() -> Self {
        Self {
            sort_by: Some(PostOrder::Priority),
            ..Self::default()
        }
    }

    /// Query pairs in the order the backend documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_ref() {
            pairs.push(("search", search.clone()));
        }
        if let Some(order) = self.sort_by {
            pairs.push(("sortBy", order.as_str().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityRequest {
    pub priority: i64,
}
