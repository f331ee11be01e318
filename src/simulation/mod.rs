mod source;
mod stage;
mod world;

pub use source::Source;
pub use stage::Stage;
pub use world::Simulation;
