// Core engine exports
pub mod activity;
pub mod clock;
pub mod dates;
pub mod discovery;
pub mod matcher;
pub mod profiles;
pub mod safety;
pub mod session;

pub use activity::ActivityLog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use dates::{parse_date_time, DateError, DateNegotiator};
pub use discovery::{DiscoveryFeed, FeedError};
pub use matcher::{MatchEngine, MatchError};
pub use profiles::ProfileDirectory;
pub use safety::{SafetyContacts, SafetyError};
pub use session::{Session, SessionError};
