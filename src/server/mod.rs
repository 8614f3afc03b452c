//! TCP front end: accepts connections and hands each one to its own task.

pub mod listener;
