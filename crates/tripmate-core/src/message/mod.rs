mod message;
mod role;

pub use message::Message;
pub use role::Role;
