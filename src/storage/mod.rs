pub mod layout;
pub mod meta;
pub mod record_store;
pub mod sequence;
pub mod tables;
