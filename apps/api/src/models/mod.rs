pub mod artifact;
pub mod chat;
pub mod options;
