pub mod milestones;
pub mod purchase_lines;
pub mod query;

pub use milestones::MilestoneService;
pub use purchase_lines::PurchaseLineService;
pub use query::QueryService;
