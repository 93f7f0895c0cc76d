mod id;
mod timestamp;

pub use id::SessionId;
pub use timestamp::Timestamp;
