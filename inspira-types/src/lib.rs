pub mod claims;
pub mod enums;
pub mod models;

pub use claims::*;
pub use enums::*;
pub use models::*;
