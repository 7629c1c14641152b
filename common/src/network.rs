pub mod endpoint;
pub mod role;
