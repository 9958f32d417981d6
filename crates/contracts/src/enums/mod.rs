pub mod portal_type;

pub use portal_type::PortalType;
