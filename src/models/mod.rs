pub mod item;
pub mod job;
pub mod milestone;
pub mod purchase_line;
pub mod vendor;

pub use item::{Item, Material};
pub use job::Job;
pub use milestone::{reconcile_completion, Milestone, MilestonePatch};
pub use purchase_line::{CreatePurchaseLineRequest, NewPurchaseLine, PurchaseLine};
pub use vendor::Vendor;
