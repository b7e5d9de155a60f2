//! Newsletter signup and the admin subscriber and campaign views.

use std::num::NonZeroUsize;

use jamjournal_api_types::{ApiMessage, Campaign, Subscriber};
use tracing::info;

use super::listview::{Fetcher, ListView};
use crate::domain::types::{SearchScope, SortKey};
use crate::infra::http::{ApiClient, ClientError, ScopeHandle};

const SUBSCRIBED: &str = "Subscribed to the newsletter";
const UNSUBSCRIBED: &str = "Unsubscribed from the newsletter";
const SENT: &str = "Newsletter sent";

/// Public signup. Returns the backend's acknowledgement or a default one.
pub async fn subscribe(client: &ApiClient, email: &str) -> Result<String, ClientError> {
    let reply = client.subscribe(email).await?;
    Ok(message_or(reply, SUBSCRIBED))
}

pub async fn unsubscribe(client: &ApiClient, email: &str) -> Result<String, ClientError> {
    let reply = client.unsubscribe(email).await?;
    Ok(message_or(reply, UNSUBSCRIBED))
}

fn message_or(reply: ApiMessage, fallback: &str) -> String {
    reply
        .message
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[derive(Debug, Clone)]
pub struct NewsletterAdmin {
    pub subscribers: ListView<Subscriber>,
    pub campaigns: Fetcher<Vec<Campaign>>,
}

impl NewsletterAdmin {
    pub fn new(page_size: NonZeroUsize) -> Self {
        let mut subscribers = ListView::new(
            "newsletter_subscribers",
            "Failed to load subscribers",
            page_size,
        )
        .with_sort(SortKey::Latest);
        subscribers.set_scope(SearchScope::TitleAuthor);
        Self {
            subscribers,
            campaigns: Fetcher::new("newsletter_campaigns", "Failed to load campaigns"),
        }
    }

    pub async fn load(&mut self, client: &ApiClient, scope: &ScopeHandle) {
        tokio::join!(
            self.subscribers.load(scope.run(client.subscribers())),
            self.campaigns.run(scope.run(client.campaigns())),
        );
    }

    /// Send a campaign, then refresh the campaign history.
    pub async fn send(
        &mut self,
        client: &ApiClient,
        scope: &ScopeHandle,
        subject: &str,
        content: &str,
    ) -> Result<String, ClientError> {
        let reply = client.send_newsletter(subject, content).await?;
        info!(subject, "newsletter sent");
        self.campaigns.run(scope.run(client.campaigns())).await;
        Ok(message_or(reply, SENT))
    }
}
