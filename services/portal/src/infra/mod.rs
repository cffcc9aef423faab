pub mod db;
pub mod dns;
pub mod mail;
pub mod tickets;
