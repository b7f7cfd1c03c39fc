pub mod engine;
pub mod formatter;
pub mod router;
pub mod types;

pub use engine::{
    AdapterError, CapabilityDispatcher, ChatEngine, GenerativeResponder, ResponderError,
};
pub use router::route;
pub use types::*;
