pub mod describe;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod paths;
pub mod registry;
pub mod render;
pub mod selection;
pub mod session;
pub mod settings;
pub mod state;
pub mod store;
