///----------------------------------------------------------------------------------------------------
/// The author disclaims copyright to this source code. In place of a legal notice, here is a blessing:
///     May you do good and not evil.
///     May you find forgiveness for yourself and forgive others.
///     May you share freely, never taking more than you give.
///----------------------------------------------------------------------------------------------------
/// This file implements the stream comparator and the `Comparator` that wires two emitters to it.
/// The comparator drains both streams with a fair select and stops at the first position where
/// they disagree. It takes the receivers by value: returning drops them, which disconnects both
/// streams, so any emitter still walking gets `StreamError::Disconnected` on its next send and
/// exits instead of blocking on a full stream forever.
///----------------------------------------------------------------------------------------------------
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::{Duration, Instant};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::CompareConfig;
use crate::emit::emit;
use crate::error::{CompareError, StreamError};
use crate::sync::{
    channel, select_deadline, Receiver, ReceiverMethods as _, Recv, Sender, Synchronized,
};
use crate::tree::Tree;

/// Outcome of a comparison that may be cut short by a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Equal,
    NotEqual,
    /// The deadline passed before the streams settled it. Says nothing about equality.
    Indeterminate,
}

impl Verdict {
    pub fn is_equal(self) -> bool {
        self == Verdict::Equal
    }
}

impl From<bool> for Verdict {
    fn from(equal: bool) -> Self {
        if equal {
            Verdict::Equal
        } else {
            Verdict::NotEqual
        }
    }
}

/// True iff both streams yield the same values in the same order and end at the same point.
pub fn compare_streams<T: PartialEq>(a: Receiver<T>, b: Receiver<T>) -> bool {
    let verdict = compare_streams_until(a, b, None);
    debug_assert_ne!(verdict, Verdict::Indeterminate);
    verdict.is_equal()
}

/// `compare_streams` that gives up at `deadline` with `Verdict::Indeterminate`.
pub fn compare_streams_until<T: PartialEq>(
    a: Receiver<T>,
    b: Receiver<T>,
    deadline: Option<Instant>,
) -> Verdict {
    match drain_pair(&a, &b, deadline) {
        Ok((equal, rounds)) => {
            debug!(equal, rounds, "comparison finished");
            Verdict::from(equal)
        }
        Err(e) => {
            debug!(error = %e, "comparison abandoned");
            Verdict::Indeterminate
        }
    }
}

/// One round per position: wait for whichever stream is ready, then read the other stream's item
/// for the same position. Returns the verdict and the number of rounds it took.
pub(crate) fn drain_pair<T: PartialEq>(
    a: &Receiver<T>,
    b: &Receiver<T>,
    deadline: Option<Instant>,
) -> Result<(bool, usize), StreamError> {
    let streams = [a, b];
    let mut rounds = 0;
    loop {
        rounds += 1;
        let first = select_deadline(&streams, deadline)?;
        let chosen = streams[first].read();
        let other = read(streams[1 - first], deadline)?;
        match (chosen, other) {
            (Recv::Closed, other) => return Ok((other.is_closed(), rounds)),
            (Recv::Value(_), Recv::Closed) => return Ok((false, rounds)),
            (Recv::Value(x), Recv::Value(y)) => {
                if x != y {
                    return Ok((false, rounds));
                }
            }
        }
    }
}

fn read<T>(stream: &Receiver<T>, deadline: Option<Instant>) -> Result<Recv<T>, StreamError> {
    match deadline {
        Some(deadline) => stream.read_deadline(deadline),
        None => Ok(stream.read()),
    }
}

/// Runs one emitter per tree on its own pool and compares the two streams on the calling thread.
///
/// Comparisons take `&mut self`: one call needs both of its emitters running at once, and a pool
/// of `workers` threads can only promise that to a single call at a time. Share a comparator
/// between threads through `Comparator::shared`.
pub struct Comparator {
    config: CompareConfig,
    pool: ThreadPool,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Result<Self, CompareError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.effective_workers())
            .thread_name(|i| format!("samebst-emitter-{}", i))
            .build()?;
        Ok(Self { config, pool })
    }

    /// Wrap the comparator for use from several threads; each caller locks it for one comparison.
    pub fn shared(self) -> Synchronized<Comparator> {
        Arc::new(parking_lot::Mutex::new(self))
    }

    /// Whether `t1` and `t2` hold the same values, regardless of shape.
    pub fn same(&mut self, t1: &Tree, t2: &Tree) -> bool {
        self.run(t1, t2, None).is_equal()
    }

    /// Like `same`, but reports `Verdict::Indeterminate` if no verdict is reached within `timeout`.
    pub fn same_within(&mut self, t1: &Tree, t2: &Tree, timeout: Duration) -> Verdict {
        self.run(t1, t2, Some(Instant::now() + timeout))
    }

    fn run(&mut self, t1: &Tree, t2: &Tree, deadline: Option<Instant>) -> Verdict {
        let capacity = self.config.effective_capacity();
        let (tx1, rx1) = channel(capacity);
        let (tx2, rx2) = channel(capacity);
        // The scope only returns once both emitters are done, which the dropped receivers
        // guarantee even on an early verdict.
        self.pool.in_place_scope(|s| {
            s.spawn(move |_| {
                run_emitter(t1, tx1);
            });
            s.spawn(move |_| {
                run_emitter(t2, tx2);
            });
            compare_streams_until(rx1, rx2, deadline)
        })
    }
}

/// Emit `tree` into `sink`. Returns false if the comparator stopped reading before the end, which
/// is the normal outcome of an early verdict.
fn run_emitter(tree: &Tree, sink: Sender<i64>) -> bool {
    match emit(tree, sink) {
        Ok(_) => true,
        Err(StreamError::Disconnected) => false,
        Err(e @ StreamError::Timeout) => {
            warn!(error = %e, "emitter failed");
            false
        }
    }
}

/// Compare two trees with a default `Comparator`.
pub fn same(t1: &Tree, t2: &Tree) -> Result<bool, CompareError> {
    Ok(Comparator::new(CompareConfig::default())?.same(t1, t2))
}

/// Single-threaded comparison walking both trees in lockstep with explicit stacks. Baseline for
/// the streaming version.
pub fn same_sequential(t1: &Tree, t2: &Tree) -> bool {
    t1.iter().eq(t2.iter())
}
