//! Static Reference Store
//!
//! Hand-authored reference tables shown by the dashboard:
//!
//! - **Technology catalog**: cost, efficiency and emission attributes per
//!   renewable technology
//! - **Rankings**: per building type, an ordered list of recommended
//!   technologies with a justification
//!
//! The tables are embedded at compile time (`data/reference.toml`) and can be
//! replaced by a file named in the configuration.

mod error;
mod store;
mod types;

pub use error::{CatalogError, CatalogResult};
pub use store::{ReferenceStore, EMBEDDED_REFERENCE};
pub use types::{BuildingRanking, ElectricityCost, RankingEntry, Technology, Tier};
