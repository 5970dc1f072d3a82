pub mod catalog;
pub mod draft;
pub mod personal;
pub mod professional;
pub mod profile;
pub mod records;
pub mod session;
