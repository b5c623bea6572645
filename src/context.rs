use crate::Value;


/// The frames in scope while rendering, innermost last.
///
/// Frames are borrowed: rendering never changes host data.
///
/// ```
/// use moustache::{ContextStack, Value};
///
/// let root = Value::from_iter([("a", Value::from_iter([("b", "ab")]))]);
/// let contexts = [root];
/// let stack = ContextStack::new(&contexts);
/// assert_eq!(stack.resolve("a.b"), Some(&Value::from("ab")));
/// assert_eq!(stack.resolve("a.c"), None);
/// ```
#[derive(Debug, Clone)]
pub struct ContextStack<'a> {
    frames: Vec<&'a Value>,
}

impl<'a> ContextStack<'a> {
    pub fn new(contexts: &'a [Value]) -> Self {
        ContextStack {
            frames: contexts.iter().collect()
        }
    }

    pub fn push(&mut self, frame: &'a Value) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<&'a Value> {
        self.frames.pop()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn top(&self) -> Option<&'a Value> {
        self.frames.last().copied()
    }

    /// Find the value bound to `key`, innermost frame first.
    ///
    /// `.` is the innermost frame itself. A dotted key is first looked up
    /// literally, then segment by segment: the first segment against the
    /// whole stack, every following one against the previous result only.
    pub fn resolve(&self, key: &str) -> Option<&'a Value> {
        if key == "." {
            return self.top();
        }
        if let Some(value) = self.lookup(key) {
            return Some(value);
        }
        let (head, rest) = key.split_once('.')?;
        rest.split('.')
            .try_fold(self.lookup(head)?, |value, segment| value.get(segment))
    }

    fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.frames.iter()
            .rev()
            .find_map(|frame| frame.get(key))
    }
}
