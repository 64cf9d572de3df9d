pub mod diagnostics;
pub mod simulation;
