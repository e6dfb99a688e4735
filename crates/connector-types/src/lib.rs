pub mod params;
pub mod stage;
pub mod topology;

pub use params::*;
pub use stage::*;
pub use topology::*;
