///----------------------------------------------------------------------------------------------------
/// The author disclaims copyright to this source code. In place of a legal notice, here is a blessing:
///     May you do good and not evil.
///     May you find forgiveness for yourself and forgive others.
///     May you share freely, never taking more than you give.
///----------------------------------------------------------------------------------------------------
/// This file contains the synchronization pieces shared by the emitters and the comparator. The
/// streams are `crossbeam::channel` bounded channels: a full channel blocks the sender, dropping the
/// sender closes the stream, and dropping the receiver makes every further send fail. On top of
/// that sit a tagged read (`Recv`) so closure is never a sentinel, a fair `select` over several
/// receivers, and the `Synchronized<T>` alias for handing one object to several threads. The
/// mutex is `parking_lot::Mutex` (not std::sync::Mutex).
///----------------------------------------------------------------------------------------------------
use crossbeam::channel::{bounded, RecvTimeoutError, Select};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;

pub use crossbeam::channel::{Receiver, Sender};

use crate::error::StreamError;

/// Protect anything with a Mutex. Can pass between threads (implements the clone trait)
pub type Synchronized<T> = Arc<Mutex<T>>;

/// Result of reading from a stream: a value, or the end of the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recv<T> {
    Value(T),
    Closed,
}

impl<T> Recv<T> {
    pub fn is_closed(&self) -> bool {
        matches!(self, Recv::Closed)
    }
}

/// Create a bounded stream holding at most `capacity` in-flight values. A capacity of zero would
/// make a rendezvous channel, so it is raised to one.
pub fn channel<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    bounded(capacity.max(1))
}

/// Additional methods for Receivers
pub trait ReceiverMethods<T> {
    fn read(&self) -> Recv<T>;
    fn read_deadline(&self, deadline: Instant) -> Result<Recv<T>, StreamError>;
}

impl<T> ReceiverMethods<T> for Receiver<T> {
    /// Block until a value arrives or the stream is closed and drained.
    fn read(&self) -> Recv<T> {
        match self.recv() {
            Ok(value) => Recv::Value(value),
            Err(_) => Recv::Closed,
        }
    }

    /// Like `read`, but gives up with `StreamError::Timeout` once `deadline` passes.
    fn read_deadline(&self, deadline: Instant) -> Result<Recv<T>, StreamError> {
        match self.recv_deadline(deadline) {
            Ok(value) => Ok(Recv::Value(value)),
            Err(RecvTimeoutError::Disconnected) => Ok(Recv::Closed),
            Err(RecvTimeoutError::Timeout) => Err(StreamError::Timeout),
        }
    }
}

/// Wait until at least one of `receivers` is ready (holds a value or is closed) and return its
/// index. Among several ready receivers one is picked at random. Each stream has a single reader,
/// so a `read` on the returned receiver does not block.
///
/// # Panics
///
/// Panics if `receivers` is empty.
pub fn select<T>(receivers: &[&Receiver<T>]) -> usize {
    assert!(!receivers.is_empty(), "select over no receivers");
    let mut sel = Select::new();
    for receiver in receivers {
        sel.recv(receiver);
    }
    sel.ready()
}

/// `select` with an optional deadline; returns `StreamError::Timeout` if nothing became ready.
pub fn select_deadline<T>(
    receivers: &[&Receiver<T>],
    deadline: Option<Instant>,
) -> Result<usize, StreamError> {
    let Some(deadline) = deadline else {
        return Ok(select(receivers));
    };
    assert!(!receivers.is_empty(), "select over no receivers");
    let mut sel = Select::new();
    for receiver in receivers {
        sel.recv(receiver);
    }
    sel.ready_deadline(deadline).map_err(|_| StreamError::Timeout)
}

#[cfg(test)]
mod tests {
    use super::{channel, select, select_deadline, ReceiverMethods as _, Recv};
    use crate::error::StreamError;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_values_then_closed() {
        let (tx, rx) = channel(4);
        tx.send(1).unwrap();
        tx.send(2).unwrap();
        drop(tx);
        assert_eq!(rx.read(), Recv::Value(1));
        assert_eq!(rx.read(), Recv::Value(2));
        assert_eq!(rx.read(), Recv::Closed);
        // Closure is sticky.
        assert_eq!(rx.read(), Recv::Closed);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let (_tx, rx) = channel::<i64>(0);
        assert_eq!(rx.capacity(), Some(1));
    }

    #[test]
    fn test_send_blocks_until_room() {
        let (tx, rx) = channel(2);
        let producer = thread::spawn(move || {
            for i in 0..100 {
                tx.send(i).unwrap();
            }
        });
        let mut received = Vec::new();
        loop {
            assert!(rx.len() <= 2);
            match rx.read() {
                Recv::Value(v) => received.push(v),
                Recv::Closed => break,
            }
        }
        producer.join().unwrap();
        assert_eq!(received, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_dropping_receiver_unblocks_sender() {
        let (tx, rx) = channel(1);
        tx.send(0).unwrap();
        let producer = thread::spawn(move || tx.send(1).map_err(StreamError::from));
        thread::sleep(Duration::from_millis(20));
        drop(rx);
        assert_eq!(producer.join().unwrap(), Err(StreamError::Disconnected));
    }

    #[test]
    fn test_read_deadline() {
        let (tx, rx) = channel::<i64>(1);
        let deadline = Instant::now() + Duration::from_millis(10);
        assert_eq!(rx.read_deadline(deadline), Err(StreamError::Timeout));
        drop(tx);
        assert_eq!(rx.read_deadline(Instant::now()), Ok(Recv::Closed));
    }

    #[test]
    fn test_select_picks_the_ready_stream() {
        let (_tx_a, rx_a) = channel::<i64>(1);
        let (tx_b, rx_b) = channel::<i64>(1);
        tx_b.send(7).unwrap();
        assert_eq!(select(&[&rx_a, &rx_b]), 1);
        assert_eq!(rx_b.read(), Recv::Value(7));
    }

    #[test]
    fn test_select_sees_closure() {
        let (tx_a, rx_a) = channel::<i64>(1);
        let (_tx_b, rx_b) = channel::<i64>(1);
        let closer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            drop(tx_a);
        });
        assert_eq!(select(&[&rx_a, &rx_b]), 0);
        assert!(rx_a.read().is_closed());
        closer.join().unwrap();
    }

    #[test]
    fn test_select_is_unbiased_when_both_ready() {
        let (tx_a, rx_a) = channel::<i64>(1);
        let (tx_b, rx_b) = channel::<i64>(1);
        tx_a.send(0).unwrap();
        tx_b.send(0).unwrap();
        let mut hits = [0usize; 2];
        for _ in 0..2000 {
            hits[select(&[&rx_a, &rx_b])] += 1;
        }
        // Both streams stay ready since nothing is read, so each side should win about half.
        assert!(hits[0] > 700 && hits[1] > 700, "biased select: {:?}", hits);
    }

    #[test]
    fn test_select_deadline_times_out() {
        let (_tx_a, rx_a) = channel::<i64>(1);
        let (_tx_b, rx_b) = channel::<i64>(1);
        let deadline = Some(Instant::now() + Duration::from_millis(10));
        assert_eq!(
            select_deadline(&[&rx_a, &rx_b], deadline),
            Err(StreamError::Timeout)
        );
    }
}
