pub mod location;
pub mod role;
pub mod status;
pub mod submission;

pub use location::GeoPoint;
pub use role::UserRole;
pub use status::ServiceStatus;
pub use submission::{NewSubmission, Submission};
