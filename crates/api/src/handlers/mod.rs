pub mod admin;
pub mod checkout;
pub mod dashboard;
pub mod debug;
pub mod downloads;
pub mod licenses;
pub mod media;
pub mod uploads;
pub mod users;
