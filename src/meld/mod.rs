pub mod decompose;
pub mod meld;
pub mod meld_type;
pub mod waiting;

pub use decompose::{counts_from_codes, DecomposeTarget, Decomposition, MeldDecomposer};
pub use meld::{Meld, ParseMeldError};
pub use meld_type::{MeldKind, THIRTEEN_ORPHAN_ANCHOR};
pub use waiting::{WaitShape, WaitingAnalyzer, WaitingSet};
