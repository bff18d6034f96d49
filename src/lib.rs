//! Decide whether two randomly shaped binary search trees hold the same values.
//!
//! Each tree is walked in order by its own emitter task, which pushes values into a bounded
//! stream. The comparator drains both streams with a fair select and stops at the first position
//! where they disagree, so neither traversal is ever materialized in full.
//!
//! ```
//! use samebst::{CompareConfig, Comparator, Tree};
//!
//! let a = Tree::build(1000, 3);
//! let b = Tree::build(1000, 3);
//! let mut comparator = Comparator::new(CompareConfig::default()).unwrap();
//! assert!(comparator.same(&a, &b));
//! assert!(!comparator.same(&a, &Tree::build(1000, 2)));
//! ```

pub mod compare;
pub mod config;
pub mod emit;
pub mod error;
pub mod node;
pub mod sync;
pub mod tree;

pub use compare::{
    compare_streams, compare_streams_until, same, same_sequential, Comparator, Verdict,
};
pub use config::CompareConfig;
pub use emit::{emit, emit_recursive};
pub use error::{CompareError, StreamError};
pub use sync::{
    channel, select, select_deadline, Receiver, ReceiverMethods, Recv, Sender, Synchronized,
};
pub use tree::Tree;
