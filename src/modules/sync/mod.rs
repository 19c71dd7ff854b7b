pub mod application;

pub use application::cleanup::CleanupService;
pub use application::engine::SyncEngine;
pub use application::reconciler::{AnimeReconciler, ReconcileOutcome};
pub use application::scheduler::SyncScheduler;
