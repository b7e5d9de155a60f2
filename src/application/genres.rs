//! Genre catalogue: picker options for the public pages and admin CRUD.

use std::num::NonZeroUsize;

use jamjournal_api_types::Genre;

use super::error::AppError;
use super::listview::ListView;
use crate::domain::types::{ALL_GENRES_LABEL, SortKey, stored_genre_name};
use crate::infra::http::{ApiClient, ClientError, ScopeHandle};

const GENRE_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct GenreCatalogue {
    pub genres: ListView<Genre>,
}

impl Default for GenreCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl GenreCatalogue {
    pub fn new() -> Self {
        let page_size = NonZeroUsize::new(GENRE_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            genres: ListView::new("genres", "Failed to load genres", page_size)
                .with_sort(SortKey::Server),
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle) {
        self.genres.load(scope.run(client.list_genres())).await;
    }

    /// Picker labels: the "All Genres" sentinel followed by every genre name.
    pub fn options(&self) -> Vec<String> {
        std::iter::once(ALL_GENRES_LABEL.to_string())
            .chain(self.genres.items().iter().map(|genre| genre.name.clone()))
            .collect()
    }

    pub async fn create(&mut self, client: &ApiClient, name: &str) -> Result<Genre, AppError> {
        let name = stored_genre_name(name)?;
        let genre = client.create_genre(name).await?;
        self.genres.push(genre.clone());
        Ok(genre)
    }

    pub async fn rename(
        &mut self,
        client: &ApiClient,
        id: i64,
        name: &str,
    ) -> Result<Genre, AppError> {
        let name = stored_genre_name(name)?;
        let genre = client.update_genre(id, name).await?;
        if !self.genres.replace(genre.clone()) {
            self.genres.push(genre.clone());
        }
        Ok(genre)
    }

    /// Remove after the backend confirms; a failed delete leaves the row.
    pub async fn delete(&mut self, client: &ApiClient, id: i64) -> Result<(), ClientError> {
        client.delete_genre(id).await?;
        self.genres.remove(&id);
        Ok(())
    }
}
