

mod store;

pub use store::{InMemorySessionStore, SessionId, SessionStore};
