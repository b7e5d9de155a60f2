//! The `ListItem` seam: what the filter, sort and mutation layers need to
//! know about a row.

use std::fmt::Debug;
use std::hash::Hash;

use jamjournal_api_types::{Genre, Post, Subscriber, TopContent};
use time::OffsetDateTime;

pub trait ListItem: Clone {
    type Id: Clone + Eq + Hash + Debug + Send + 'static;

    fn id(&self) -> Self::Id;

    fn title(&self) -> &str;

    fn excerpt(&self) -> Option<&str> {
        None
    }

    fn author(&self) -> Option<&str> {
        None
    }

    fn genre(&self) -> Option<&str> {
        None
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        None
    }

    fn featured(&self) -> bool {
        false
    }

    fn views(&self) -> u64 {
        0
    }

    fn rating(&self) -> u64 {
        0
    }

    fn priority(&self) -> i64 {
        0
    }
}

impl ListItem for Post {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn excerpt(&self) -> Option<&str> {
        Some(&self.excerpt)
    }

    fn author(&self) -> Option<&str> {
        self.author_name()
    }

    fn genre(&self) -> Option<&str> {
        self.genre_name.as_deref()
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.created_at
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn views(&self) -> u64 {
        self.views
    }

    fn rating(&self) -> u64 {
        self.rating
    }

    fn priority(&self) -> i64 {
        self.priority
    }
}

impl ListItem for TopContent {
    type Id = Option<i64>;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn views(&self) -> u64 {
        self.views
    }

    fn rating(&self) -> u64 {
        self.rating
    }
}

impl ListItem for Subscriber {
    type Id = String;

    fn id(&self) -> String {
        self.email.clone()
    }

    fn title(&self) -> &str {
        &self.email
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.subscribed_at
    }
}

impl ListItem for Genre {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }
}
