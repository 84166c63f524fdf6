pub mod apportion;
pub mod regime;

pub use apportion::{apportion, Apportionment, EngineConfig};
pub use regime::TaxRegime;
