//! Domain entities and request types.

mod entities;
mod requests;

pub use entities::{Application, Event, LifecycleState, Message, Notification, Tag, User};
pub use requests::{
    CreateApplicationRequest, CreateEventRequest, CreateMessageRequest,
    CreateNotificationRequest, LoginRequest, RegisterRequest, UpdateApplicationRequest,
    UpdateEventRequest, UpdateNotificationRequest,
};
