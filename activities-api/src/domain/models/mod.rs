mod activity;
mod ids;

pub use activity::*;
pub use ids::*;
