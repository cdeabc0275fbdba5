//! Subscription administration and message inspection.

pub mod batch;
pub mod decoder;

use crate::config::ApiVersion;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::transport::RestClient;
use pulsar_admin_types::{Message, MessageId, TopicName};

pub use decoder::decode_response;

const SUBSCRIPTION: &str = "subscription";

/// Admin interface for the subscriptions of a topic.
#[derive(Clone)]
pub struct Subscriptions {
    rest: RestClient,
    version: ApiVersion,
}

impl Subscriptions {
    pub fn new(rest: RestClient, version: ApiVersion) -> Self {
        Self { rest, version }
    }

    fn subscription_endpoint(&self, topic: &TopicName, subscription: &str) -> Endpoint {
        Endpoint::topic(self.version, topic)
            .segment(SUBSCRIPTION)
            .segment(subscription)
    }

    /// Create a subscription positioned at `position`.
    pub async fn create(
        &self,
        topic: &TopicName,
        subscription: &str,
        position: MessageId,
    ) -> Result<()> {
        let endpoint = self.subscription_endpoint(topic, subscription);
        self.rest.put(&endpoint, &position).await
    }

    async fn delete_subscription(
        &self,
        topic: &TopicName,
        subscription: &str,
        force: bool,
    ) -> Result<()> {
        let endpoint = self
            .subscription_endpoint(topic, subscription)
            .query("force", force);
        self.rest.delete(&endpoint).await
    }

    /// Delete a subscription. Fails while consumers are connected.
    pub async fn delete(&self, topic: &TopicName, subscription: &str) -> Result<()> {
        self.delete_subscription(topic, subscription, false).await
    }

    /// Delete a subscription, disconnecting its consumers.
    pub async fn force_delete(&self, topic: &TopicName, subscription: &str) -> Result<()> {
        self.delete_subscription(topic, subscription, true).await
    }

    pub async fn list(&self, topic: &TopicName) -> Result<Vec<String>> {
        let endpoint = Endpoint::topic(self.version, topic).segment("subscriptions");
        self.rest.get(&endpoint).await
    }

    /// Move the cursor to `id`, or the nearest earlier valid position.
    pub async fn reset_cursor_to_message_id(
        &self,
        topic: &TopicName,
        subscription: &str,
        id: MessageId,
    ) -> Result<()> {
        let endpoint = self
            .subscription_endpoint(topic, subscription)
            .segment("resetcursor");
        self.rest.post(&endpoint, &id).await
    }

    /// Move the cursor to the position closest to `timestamp_ms`.
    pub async fn reset_cursor_to_timestamp(
        &self,
        topic: &TopicName,
        subscription: &str,
        timestamp_ms: i64,
    ) -> Result<()> {
        let endpoint = self
            .subscription_endpoint(topic, subscription)
            .segment("resetcursor")
            .segment(timestamp_ms);
        self.rest.post_empty(&endpoint).await
    }

    /// Skip the whole backlog.
    pub async fn clear_backlog(&self, topic: &TopicName, subscription: &str) -> Result<()> {
        let endpoint = self
            .subscription_endpoint(topic, subscription)
            .segment("skip_all");
        self.rest.post_empty(&endpoint).await
    }

    pub async fn skip_messages(&self, topic: &TopicName, subscription: &str, n: i64) -> Result<()> {
        let endpoint = self
            .subscription_endpoint(topic, subscription)
            .segment("skip")
            .segment(n);
        self.rest.post_empty(&endpoint).await
    }

    /// Expire messages older than `expire_secs` on one subscription.
    pub async fn expire_messages(
        &self,
        topic: &TopicName,
        subscription: &str,
        expire_secs: i64,
    ) -> Result<()> {
        let endpoint = self
            .subscription_endpoint(topic, subscription)
            .segment("expireMessages")
            .segment(expire_secs);
        self.rest.post_empty(&endpoint).await
    }

    /// Expire messages older than `expire_secs` on every subscription.
    pub async fn expire_all_messages(&self, topic: &TopicName, expire_secs: i64) -> Result<()> {
        let endpoint = Endpoint::topic(self.version, topic)
            .segment("all_subscription")
            .segment("expireMessages")
            .segment(expire_secs);
        self.rest.post_empty(&endpoint).await
    }

    /// Peek at least `count` messages from the subscription cursor.
    ///
    /// Positions are fetched one at a time starting from 1. A position holding
    /// a batch yields all its messages, so the result can hold more than
    /// `count` messages. Any failure aborts the whole peek.
    pub async fn peek_messages(
        &self,
        topic: &TopicName,
        subscription: &str,
        count: usize,
    ) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        let mut remaining = count;
        let mut position: u64 = 1;

        while remaining > 0 {
            let batch = self.peek_nth_message(topic, subscription, position).await?;
            tracing::debug!(
                "Peeked {} message(s) at position {} of {}/{}",
                batch.len(),
                position,
                topic,
                subscription
            );
            remaining = remaining.saturating_sub(batch.len());
            messages.extend(batch);
            position += 1;
        }

        Ok(messages)
    }

    async fn peek_nth_message(
        &self,
        topic: &TopicName,
        subscription: &str,
        position: u64,
    ) -> Result<Vec<Message>> {
        let endpoint = self
            .subscription_endpoint(topic, subscription)
            .segment("position")
            .segment(position);
        let response = self.rest.get_raw(&endpoint).await?;
        decode_response(&topic.to_string(), &response)
    }

    /// Fetch the message stored at `ledger_id:entry_id`.
    ///
    /// For a batched entry this is the first message of the batch. Returns
    /// `None` when the entry decodes to no message at all.
    pub async fn get_message_by_id(
        &self,
        topic: &TopicName,
        ledger_id: i64,
        entry_id: i64,
    ) -> Result<Option<Message>> {
        let endpoint = Endpoint::topic(self.version, topic)
            .segment("ledger")
            .segment(ledger_id)
            .segment("entry")
            .segment(entry_id);
        let response = self.rest.get_raw(&endpoint).await?;
        let messages = decode_response(&topic.to_string(), &response)?;
        Ok(messages.into_iter().next())
    }
}
