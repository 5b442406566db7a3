pub mod errors;
pub mod ids;
pub mod lifecycle;
pub mod model;
pub mod money;
pub mod policy;
pub mod types;

pub use errors::*;
pub use ids::*;
pub use lifecycle::*;
pub use model::*;
pub use money::*;
pub use policy::*;
pub use types::*;
