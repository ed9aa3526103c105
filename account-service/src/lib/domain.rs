pub mod account;
pub mod contact;
