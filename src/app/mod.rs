// Application layer - Use case interactors

pub mod container;
pub mod detect_interactor;
pub mod merge_interactor;
pub mod report;
pub mod run_interactor;
pub mod splice_interactor;

// Re-export interactors
pub use container::DefaultAppContainer;
pub use detect_interactor::{DetectInteractor, DetectReport};
pub use merge_interactor::{MergeInteractor, MergeReport};
pub use report::RunReport;
pub use run_interactor::RunInteractor;
pub use splice_interactor::SpliceInteractor;
