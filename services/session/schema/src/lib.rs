//! sea-orm entities for the records the session service reads.

pub mod staff;
pub mod users;
