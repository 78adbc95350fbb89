//! Newsletter subscription DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use portal_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsletterSubscribe {
    #[validate(email)]
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsletterUnsubscribe {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub subscribed_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsletterIssue {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub content: String,
}
