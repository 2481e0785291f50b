//! Message creation and listing.
//!
//! Creating a message is the render pipeline: validate the notification,
//! reconcile supplied metadata against its declared placeholders, render
//! the template body, persist the contents. Messages are immutable; there
//! is no update or delete.

use uuid::Uuid;

use crate::error::Result;
use crate::metrics::MESSAGES_RENDERED_TOTAL;
use crate::model::{CreateMessageRequest, Message};
use crate::store::{MessageFilter, Page, PageRequest};
use crate::template::{reconcile, render};

use super::CatalogService;

impl CatalogService {
    pub async fn create_message(&self, req: CreateMessageRequest) -> Result<Message> {
        req.validate()?;

        let notification = self.require_notification(req.notification_id).await?;

        let substitutions = reconcile(&notification.placeholders, &req.metadata)?;
        let contents = render(&notification.template_body, &substitutions);

        let message = self
            .store
            .insert_message(Message::new(req.email, contents, notification.id))
            .await?;

        MESSAGES_RENDERED_TOTAL.inc();
        tracing::info!(
            message_id = %message.id,
            notification_id = %notification.id,
            "Message rendered"
        );

        Ok(message)
    }

    pub async fn list_messages(
        &self,
        notification_id: Uuid,
        filter: MessageFilter,
        page: PageRequest,
    ) -> Result<Page<Message>> {
        self.require_notification(notification_id).await?;

        Ok(self
            .store
            .list_messages(notification_id, &filter, page)
            .await?)
    }
}
