//! Wire contracts shared by the portal frontends.
//!
//! Everything here mirrors the JSON the marketplace REST backend speaks
//! (camelCase keys), so the types deserialize straight from responses.

pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
