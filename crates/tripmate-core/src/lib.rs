pub mod config;
pub mod error;
pub mod message;
pub mod types;

pub use config::{require_secret, Config, ModelConfig};
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use types::{SessionId, Timestamp};

pub mod prelude {
    pub use crate::config::{require_secret, Config, ModelConfig};
    pub use crate::error::{Error, Result};
    pub use crate::message::{Message, Role};
    pub use crate::types::{SessionId, Timestamp};
}
