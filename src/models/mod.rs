pub mod person;
pub mod record;
pub mod roster;
pub mod status;
