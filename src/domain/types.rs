//! Filter and ordering vocabulary shared by every list view.

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// Label the public pages use for the "no genre restriction" option.
pub const ALL_GENRES_LABEL: &str = "All Genres";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum GenreFilter {
    #[default]
    All,
    Named(String),
}

impl GenreFilter {
    pub fn named(name: impl Into<String>) -> Self {
        Self::from_label(&name.into())
    }

    /// Accepts the labels the UI offers; the sentinels map to [`GenreFilter::All`].
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case(ALL_GENRES_LABEL)
        {
            Self::All
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    pub fn matches(&self, genre: Option<&str>) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Named(name) => genre == Some(name.as_str()),
        }
    }
}

/// Name to store for a genre. Blank names and the "All Genres" sentinels
/// are rejected.
pub fn stored_genre_name(name: &str) -> Result<&str, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("genre name is required"));
    }
    match GenreFilter::from_label(trimmed) {
        GenreFilter::All => Err(DomainError::reserved(trimmed)),
        GenreFilter::Named(_) => Ok(trimmed),
    }
}

impl FromStr for GenreFilter {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(value))
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str(ALL_GENRES_LABEL),
            GenreFilter::Named(name) => f.write_str(name),
        }
    }
}

/// Secondary public filter: everything, featured posts, or posts from the
/// freshness window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    #[default]
    All,
    Featured,
    Recent,
}

impl Highlight {
    pub fn as_str(self) -> &'static str {
        match self {
            Highlight::All => "all",
            Highlight::Featured => "featured",
            Highlight::Recent => "recent",
        }
    }
}

impl FromStr for Highlight {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Highlight::All),
            "featured" => Ok(Highlight::Featured),
            "recent" => Ok(Highlight::Recent),
            other => Err(DomainError::unknown("highlight filter", other, "all, featured, recent")),
        }
    }
}

/// Admin status filter. A post counts as published when it is featured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Published => "published",
            StatusFilter::Draft => "draft",
        }
    }

    pub fn matches(self, published: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Published => published,
            StatusFilter::Draft => !published,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(StatusFilter::All),
            "published" => Ok(StatusFilter::Published),
            "draft" => Ok(StatusFilter::Draft),
            other => Err(DomainError::unknown("status filter", other, "all, published, draft")),
        }
    }
}

/// Which text fields the free-text predicate looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchScope {
    /// Title, excerpt and author name (public blog).
    #[default]
    TitleExcerptAuthor,
    /// Title and author name (admin content list).
    TitleAuthor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Keep the order the backend returned.
    Server,
    #[default]
    Latest,
    Popular,
    Rating,
    Priority,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Server => "server",
            SortKey::Latest => "latest",
            SortKey::Popular => "popular",
            SortKey::Rating => "rating",
            SortKey::Priority => "priority",
        }
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(SortKey::Server),
            "latest" | "" => Ok(SortKey::Latest),
            "popular" | "views" => Ok(SortKey::Popular),
            "rating" => Ok(SortKey::Rating),
            "priority" => Ok(SortKey::Priority),
            other => Err(DomainError::unknown(
                "sort key",
                other,
                "latest, popular, rating, priority, server",
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_sentinels_disable_the_predicate() {
        assert_eq!(GenreFilter::from_label("All Genres"), GenreFilter::All);
        assert_eq!(GenreFilter::from_label("all"), GenreFilter::All);
        assert_eq!(GenreFilter::from_label("  "), GenreFilter::All);
        assert!(GenreFilter::All.matches(None));

        let jazz = GenreFilter::from_label("Jazz");
        assert!(jazz.matches(Some("Jazz")));
        assert!(!jazz.matches(Some("Hip-Hop")));
        assert!(!jazz.matches(None));
    }

    #[test]
    fn sentinels_are_not_storable_genre_names() {
        assert_eq!(stored_genre_name("  Shoegaze ").ok(), Some("Shoegaze"));
        for reserved in ["All Genres", "all genres", "ALL"] {
            assert!(matches!(
                stored_genre_name(reserved),
                Err(DomainError::ReservedName { .. })
            ));
        }
        assert!(matches!(
            stored_genre_name("   "),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        assert_eq!("Popular".parse::<SortKey>().ok(), Some(SortKey::Popular));
        let err = "loudest".parse::<SortKey>().expect_err("unknown key");
        assert!(matches!(err, DomainError::UnknownVariant { .. }));
    }

    #[test]
    fn status_filter_tracks_featured_flag() {
        assert!(StatusFilter::Published.matches(true));
        assert!(!StatusFilter::Published.matches(false));
        assert!(StatusFilter::Draft.matches(false));
        assert!(StatusFilter::All.matches(false));
    }
}
