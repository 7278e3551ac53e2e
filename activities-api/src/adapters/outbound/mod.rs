pub mod sqlite;

#[cfg(test)]
mod mock;

#[cfg(test)]
pub use mock::MockActivityStore;
