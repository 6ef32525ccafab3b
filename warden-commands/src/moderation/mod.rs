pub mod ban;
pub mod clear;
pub mod kick;
pub mod messages;
pub mod timeout;
pub mod unban;
pub mod untimeout;
