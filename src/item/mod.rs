//! Lost & found items: records, submission validation and the owning store.

pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use error::ItemError;
pub use store::ItemStore;
pub use types::{
    Item, ItemFilter, ItemPage, ItemStats, ItemStatus, ItemType, NewItem, CATEGORIES, MAX_IMAGES,
};
