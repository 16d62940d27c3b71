// NOTE: Messages are within Threads
use crate::ais::types::{Message, Role};
use async_openai::types::{CreateMessageRequest, MessageContent, MessageObject, MessageRole};

// region:       -- Message Constructors

pub fn create_user_message(content: impl Into<String>) -> CreateMessageRequest {
    CreateMessageRequest {
        role: "user".to_string(),
        content: content.into(),
        ..Default::default()
    }
}

// endregion:    -- Message Constructors

// region:       -- Content Extractor

/// First text segment of the message, skipping image content.
pub fn first_text_segment(content: Vec<MessageContent>) -> Option<String> {
    content.into_iter().find_map(|c| match c {
        MessageContent::Text(inner) => Some(inner.text.value),
        MessageContent::ImageFile(_) => None,
    })
}

impl From<MessageObject> for Message {
    fn from(message_obj: MessageObject) -> Self {
        let role = match message_obj.role {
            MessageRole::User => Role::User,
            MessageRole::Assistant => Role::Assistant,
        };

        Message {
            role,
            text: first_text_segment(message_obj.content).unwrap_or_default(),
            created_at: message_obj.created_at.into(),
        }
    }
}

// endregion:    -- Content Extractor
