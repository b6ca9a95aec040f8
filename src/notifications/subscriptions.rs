//! Topic subscription bookkeeping.
//!
//! The push transport itself is external; this module keeps track of which
//! topics the device is subscribed to (persisted in the key/value store as a
//! comma-joined list) so that moving home unsubscribes the stale ones.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SUBSCRIBED_TOPICS_KEY;
use crate::error_handling::{NotificationError, StoreError};
use crate::storage::KeyValueStore;

/// Push-notification transport.
#[async_trait]
pub trait NotificationSubscriber: Send + Sync {
    async fn subscribe(&self, topic: &str) -> Result<(), NotificationError>;
    async fn unsubscribe(&self, topic: &str) -> Result<(), NotificationError>;
}

/// Subscriber that only logs; used where no push transport is wired in.
#[derive(Debug, Default)]
pub struct LoggingSubscriber;

#[async_trait]
impl NotificationSubscriber for LoggingSubscriber {
    async fn subscribe(&self, topic: &str) -> Result<(), NotificationError> {
        log::info!("Subscribe to topic {}", topic);
        Ok(())
    }

    async fn unsubscribe(&self, topic: &str) -> Result<(), NotificationError> {
        log::info!("Unsubscribe from topic {}", topic);
        Ok(())
    }
}

/// Subscribes/unsubscribes topics and records the current set.
///
/// A transport failure is logged and leaves the recorded set unchanged, so the
/// next call retries it. Store failures are returned.
pub struct TopicSubscriptions {
    subscriber: Arc<dyn NotificationSubscriber>,
    store: Arc<dyn KeyValueStore>,
}

impl TopicSubscriptions {
    pub fn new(subscriber: Arc<dyn NotificationSubscriber>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { subscriber, store }
    }

    /// Topics currently recorded as subscribed.
    pub fn subscribed_topics(&self) -> Result<Vec<String>, StoreError> {
        match self.store.get(SUBSCRIBED_TOPICS_KEY)? {
            Some(value) if !value.is_empty() => {
                Ok(value.split(',').map(str::to_string).collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn set_subscribed_topics(&self, topics: &[String]) -> Result<(), StoreError> {
        self.store.set(SUBSCRIBED_TOPICS_KEY, &topics.join(","))
    }

    pub fn is_subscribed(&self, topic: &str) -> Result<bool, StoreError> {
        Ok(self.subscribed_topics()?.iter().any(|t| t == topic))
    }

    fn remove_topic(&self, topic: &str) -> Result<(), StoreError> {
        let topics: Vec<String> = self
            .subscribed_topics()?
            .into_iter()
            .filter(|t| t != topic)
            .collect();
        self.set_subscribed_topics(&topics)
    }

    pub async fn subscribe_to_topic(&self, topic: &str) -> Result<(), StoreError> {
        if self.is_subscribed(topic)? {
            log::debug!("Already subscribed to topic {}", topic);
            return Ok(());
        }

        match self.subscriber.subscribe(topic).await {
            Ok(()) => {
                log::info!("Subscribed to topic {}", topic);
                let mut topics = self.subscribed_topics()?;
                topics.push(topic.to_string());
                self.set_subscribed_topics(&topics)
            }
            Err(e) => {
                log::warn!("Error subscribing to topic {}: {}", topic, e);
                Ok(())
            }
        }
    }

    pub async fn unsubscribe_from_topic(&self, topic: &str) -> Result<(), StoreError> {
        match self.subscriber.unsubscribe(topic).await {
            Ok(()) => {
                log::info!("Unsubscribed from topic {}", topic);
                self.remove_topic(topic)
            }
            Err(e) => {
                log::warn!("Error unsubscribing from topic {}: {}", topic, e);
                Ok(())
            }
        }
    }

    /// Subscribes to every topic in `topics`.
    ///
    /// With `remove_others`, recorded topics not in `topics` are unsubscribed
    /// first; blank entries are dropped from the record without a remote call.
    pub async fn subscribe_to_topics<S: AsRef<str>>(
        &self,
        topics: &[S],
        remove_others: bool,
    ) -> Result<(), StoreError> {
        if remove_others {
            let extra: Vec<String> = self
                .subscribed_topics()?
                .into_iter()
                .filter(|existing| !topics.iter().any(|t| t.as_ref() == existing))
                .collect();
            for topic in extra {
                if topic.is_empty() {
                    self.remove_topic(&topic)?;
                } else {
                    self.unsubscribe_from_topic(&topic).await?;
                }
            }
        }

        for topic in topics {
            self.subscribe_to_topic(topic.as_ref()).await?;
        }
        Ok(())
    }

    /// Unsubscribes from every recorded topic.
    pub async fn disable_notifications(&self) -> Result<(), StoreError> {
        for topic in self.subscribed_topics()? {
            self.unsubscribe_from_topic(&topic).await?;
        }
        Ok(())
    }
}
