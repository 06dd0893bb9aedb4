pub mod edit;
pub mod frame;
pub mod query;
pub mod session;
