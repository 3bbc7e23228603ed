pub mod descriptor;
pub mod manager;
pub mod style;

pub use descriptor::{LayerDescriptor, LayerType, SourceDescriptor, SourceKind};
pub use manager::{LedgerEntry, SourceLedger};
pub use style::{Interpolatable, LinePaint, Rgb, StyleInput, StyleValue};
