pub mod cursor;
pub mod ledger;
pub mod tags;

pub use cursor::{has_candidates, run_pass, Acceptance, Acceptor, Quota, UsedSet};
pub use ledger::{OrganizationUsage, UsageLedger};
pub use tags::Tagged;
