//! External service integrations.

pub mod cms_client {
    pub use crate::cms_client::*;
}
