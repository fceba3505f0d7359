//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod license_repo;
pub mod media_asset_repo;
pub mod order_repo;
pub mod payout_repo;
pub mod stats_repo;
pub mod user_repo;

pub use license_repo::LicenseRepo;
pub use media_asset_repo::MediaAssetRepo;
pub use order_repo::OrderRepo;
pub use payout_repo::PayoutRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
