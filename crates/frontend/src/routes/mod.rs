pub mod routes;
pub mod sections;
