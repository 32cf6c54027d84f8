use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::messages::dtos::{
    ContactMessageDto, CreateContactMessageDto, PublicContactMessageDto,
};
use crate::modules::storage::MessageStore;

/// Service for contact form submissions
pub struct MessageService {
    messages: Arc<dyn MessageStore>,
}

impl MessageService {
    pub fn new(messages: Arc<dyn MessageStore>) -> Self {
        Self { messages }
    }

    /// Store a contact form submission
    pub async fn submit(&self, dto: CreateContactMessageDto) -> Result<ContactMessageDto> {
        let message = self
            .messages
            .create_message(dto.into_new(), Utc::now())
            .await
            .map_err(|e| {
                AppError::operation_failed("create_message", "Failed to save contact message", e)
            })?;

        tracing::info!(
            "Contact message received: id={}, newsletter={}",
            message.id,
            message.newsletter
        );

        Ok(message.into())
    }

    /// Every message with personal details, newest first
    pub async fn list(&self) -> Result<Vec<ContactMessageDto>> {
        let messages = self.messages.list_messages().await.map_err(|e| {
            AppError::operation_failed("list_messages", "Failed to fetch contact messages", e)
        })?;

        Ok(messages.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<ContactMessageDto>> {
        let message = self.messages.get_message(id).await.map_err(|e| {
            AppError::operation_failed("get_message", "Failed to fetch contact message", e)
        })?;

        Ok(message.map(Into::into))
    }

    /// Messages safe to show publicly: id, subject, area and timestamp only
    pub async fn list_public(&self) -> Result<Vec<PublicContactMessageDto>> {
        let messages = self.messages.list_public_messages().await.map_err(|e| {
            AppError::operation_failed(
                "list_public_messages",
                "Failed to fetch contact messages",
                e,
            )
        })?;

        Ok(messages.into_iter().map(Into::into).collect())
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self.messages.delete_message(id).await.map_err(|e| {
            AppError::operation_failed("delete_message", "Failed to delete contact message", e)
        })?;

        if deleted {
            tracing::info!("Contact message deleted: id={}", id);
        }

        Ok(deleted)
    }
}
