pub mod ec_level;
pub mod symbol;

pub use ec_level::EcLevel;
pub use symbol::{BlockLayout, GridAdjust, SymbolReading, SymbolSource};
