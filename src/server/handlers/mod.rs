pub mod daemon;
pub mod item_create;
pub mod item_list;
pub mod item_read;
pub mod message_list;
pub mod message_send;
pub mod moderation;
