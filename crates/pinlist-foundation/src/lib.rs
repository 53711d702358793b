//! List container foundation: item-key indexing, sticky top/bottom tracking,
//! deferred child attach, scroll feedback suppression and the list-control
//! methods exposed to scripts.

mod error;
pub mod list;


pub use error::ListError;
pub use list::*;
