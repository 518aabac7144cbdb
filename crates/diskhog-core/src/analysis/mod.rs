/// Analysis modules: post-aggregation ranking and report views.

pub mod hierarchy;
pub mod top_n;

pub use hierarchy::{format_hierarchy, render, HierarchyLine};
pub use top_n::{Measured, TopNSelector};
