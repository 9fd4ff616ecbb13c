//! Session resolution.
//!
//! A session is derived from the credential store once per screen
//! activation and published to subscribers.

mod resolver;

pub use resolver::SessionResolver;
