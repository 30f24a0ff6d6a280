pub mod spec_loader;

pub use spec_loader::{SpecLoadError, SpecLoader};
