//! Notification topics and subscription bookkeeping.
//!
//! Each resolved location yields two topics: one for the whole state and one
//! for the matched county/city, so a user gets both state-wide and local news.

mod subscriptions;
mod topics;

// Re-export public API
pub use subscriptions::{LoggingSubscriber, NotificationSubscriber, TopicSubscriptions};
pub use topics::{generate_topic, topics_for_location};
