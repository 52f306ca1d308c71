pub mod crop;
pub mod environmental;
pub mod pesticide;
pub mod plan;

pub use crop::*;
pub use environmental::*;
pub use pesticide::*;
pub use plan::*;
