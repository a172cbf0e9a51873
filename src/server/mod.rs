pub mod echo;
pub mod listener;
