pub mod interface;
pub mod naming;
pub mod probe;
