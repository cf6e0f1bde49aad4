//! Graph traversal helpers

/// Depth-first walk with an explicit stack.
///
/// `next(node)` returns the next node to descend into from `node`, or `None`
/// when `node` is exhausted (it is then popped and its parent is asked again).
/// The callback is responsible for marking nodes so it never returns one that
/// is already on the stack.
pub fn walk<F>(start: usize, mut next: F)
where
    F: FnMut(usize) -> Option<usize>,
{
    let mut stack = vec![start];

    while let Some(&node) = stack.last() {
        match next(node) {
            Some(child) => stack.push(child),
            None => {
                stack.pop();
            }
        }
    }
}
