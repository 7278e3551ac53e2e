mod activity_store;

pub use activity_store::*;
