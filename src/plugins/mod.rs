pub mod base;
pub mod draw;
pub mod measure;

pub use base::PluginTrait;
pub use draw::{DrawPlugin, DrawState};
pub use measure::{AreaLabel, UnitSystem};
