pub mod model;
pub mod server;

pub use model::FamilySchema;
pub use server::SessionBridge;
