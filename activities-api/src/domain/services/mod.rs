mod activities;

pub use activities::ActivityServiceImpl;
