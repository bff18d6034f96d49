///----------------------------------------------------------------------------------------------------
/// The author disclaims copyright to this source code. In place of a legal notice, here is a blessing:
///     May you do good and not evil.
///     May you find forgiveness for yourself and forgive others.
///     May you share freely, never taking more than you give.
///----------------------------------------------------------------------------------------------------
/// This file implements the ordered emitter: an in-order walk of one tree that pushes every value
/// into a bounded stream and then closes it. Each emitter owns its sink, so the stream is closed
/// exactly once, when the sink is dropped on the way out, whichever way the walk ends.
///----------------------------------------------------------------------------------------------------
use tracing::{debug, trace};

use crate::error::StreamError;
use crate::node::Node;
use crate::sync::Sender;
use crate::tree::Tree;

/// Send every value of `tree` to `sink` in ascending order, then close it. Blocks whenever the
/// sink is full. Returns how many values were sent, or `StreamError::Disconnected` if the reader
/// went away first, in which case the walk stops where it was.
pub fn emit(tree: &Tree, sink: Sender<i64>) -> Result<usize, StreamError> {
    let mut sent = 0;
    for value in tree.iter() {
        if let Err(e) = sink.send(value) {
            trace!(sent, "reader gone, abandoning emission");
            return Err(e.into());
        }
        sent += 1;
    }
    debug!(sent, "emission finished");
    Ok(sent)
}

/// Recursive form of `emit`. Recursion depth equals tree height, so keep it to trees whose height
/// is known to be small.
pub fn emit_recursive(tree: &Tree, sink: Sender<i64>) -> Result<usize, StreamError> {
    let mut sent = 0;
    if let Some(root) = tree.root() {
        walk(root, &sink, &mut sent)?;
    }
    Ok(sent)
}

fn walk(node: &Node, sink: &Sender<i64>, sent: &mut usize) -> Result<(), StreamError> {
    if let Some(left) = node.left() {
        walk(left, sink, sent)?;
    }
    sink.send(node.value())?;
    *sent += 1;
    if let Some(right) = node.right() {
        walk(right, sink, sent)?;
    }
    Ok(())
}
