//! Repository modules - typed access to stored documents.
//!
//! Each repository wraps the document store port and converts between
//! domain aggregates and their JSON documents.

pub mod location;
pub mod session;

pub use location::LocationRepository;
pub use session::SessionRepository;
