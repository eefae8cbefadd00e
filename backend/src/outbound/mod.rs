//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **mongo**: document-store repositories for users and vehicles
//! - **userinfo**: bearer-token authenticator against an identity provider
//!
//! Adapters translate between domain types and wire or storage formats. They
//! contain no business logic.

pub mod mongo;
pub mod userinfo;
