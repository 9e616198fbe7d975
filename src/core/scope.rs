//! Nesting-scope state machine shared by [`JsonReader`](crate::stream::JsonReader)
//! and [`JsonWriter`](crate::stream::JsonWriter).
//!
//! Both sides drive the exact same transitions so that whatever the writer
//! refuses to emit, the reader refuses to accept.

use log::trace;

use crate::error::{JsonError, JsonResult};

/// Kind of an open container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Object,
    Array,
}

impl ScopeKind {
    pub fn open_char(self) -> char {
        match self {
            ScopeKind::Object => '{',
            ScopeKind::Array => '[',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            ScopeKind::Object => '}',
            ScopeKind::Array => ']',
        }
    }
}

/// One frame of the scope stack.
///
/// Frames are plain values: every transition returns the next frame instead
/// of flipping flags in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scope {
    kind: ScopeKind,
    // Object only: a member name has been consumed and its value has not.
    name_pending: bool,
    // At least one member or element has been completed.
    has_values: bool,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            name_pending: false,
            has_values: false,
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn name_pending(&self) -> bool {
        self.name_pending
    }

    pub fn has_values(&self) -> bool {
        self.has_values
    }

    /// Accepts a member name. Yields the next frame and whether a comma
    /// separates this member from the previous one.
    fn with_name(self) -> JsonResult<(Scope, bool)> {
        match self.kind {
            ScopeKind::Array => Err(JsonError::Sequencing(
                "a name can only appear inside an object".to_string(),
            )),
            ScopeKind::Object if self.name_pending => Err(JsonError::Sequencing(
                "a name was already given without a value after it".to_string(),
            )),
            ScopeKind::Object => Ok((
                Scope {
                    name_pending: true,
                    ..self
                },
                self.has_values,
            )),
        }
    }

    /// Checks that a value may start in this frame. Returns whether a comma
    /// precedes it; for objects the comma travels with the name instead.
    fn check_value(self) -> JsonResult<bool> {
        match self.kind {
            ScopeKind::Object if !self.name_pending => Err(JsonError::Sequencing(
                "a value inside an object must follow a name".to_string(),
            )),
            ScopeKind::Object => Ok(false),
            ScopeKind::Array => Ok(self.has_values),
        }
    }

    /// Frame after a member or element has been completed.
    fn with_value(self) -> Scope {
        Scope {
            name_pending: false,
            has_values: true,
            ..self
        }
    }
}

/// Stack of open containers plus the root-level bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Scope>,
    max_depth: Option<usize>,
    root_complete: bool,
}

impl ScopeStack {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
            root_complete: false,
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost open frame, if any.
    pub fn current(&self) -> Option<&Scope> {
        self.frames.last()
    }

    pub fn current_kind(&self) -> Option<ScopeKind> {
        self.current().map(Scope::kind)
    }

    /// True once the root value has been completed.
    pub fn is_root_complete(&self) -> bool {
        self.root_complete
    }

    /// Validates that a value (scalar or container) may start at the current
    /// position and reports whether a comma must precede it. Nothing changes
    /// until [`Self::commit_value`] is called.
    pub fn check_value(&self) -> JsonResult<bool> {
        match self.frames.last() {
            Some(scope) => scope.check_value(),
            None if self.root_complete => Err(JsonError::Sequencing(
                "the root value is already complete".to_string(),
            )),
            None => Ok(false),
        }
    }

    /// Records that the value started after [`Self::check_value`] is done.
    pub fn commit_value(&mut self) {
        match self.frames.last_mut() {
            Some(scope) => *scope = scope.with_value(),
            None => self.root_complete = true,
        }
    }

    /// Validates and commits a scalar value in one step.
    pub fn value(&mut self) -> JsonResult<bool> {
        let comma = self.check_value()?;
        self.commit_value();
        Ok(comma)
    }

    /// Accepts a member name in the current object.
    pub fn name(&mut self) -> JsonResult<bool> {
        let Some(scope) = self.frames.last_mut() else {
            return Err(JsonError::Sequencing(
                "a name can only appear inside an object".to_string(),
            ));
        };
        let (next, comma) = scope.with_name()?;
        *scope = next;
        Ok(comma)
    }

    /// Opens a nested container. The container counts as a value of its
    /// parent, so the parent's rules apply first.
    pub fn enter(&mut self, kind: ScopeKind) -> JsonResult<bool> {
        let comma = self.check_value()?;
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(JsonError::DepthLimitExceeded(max));
            }
        }
        self.frames.push(Scope::new(kind));
        trace!("enter {:?} at depth {}", kind, self.frames.len());
        Ok(comma)
    }

    /// Validates closing the innermost container without changing anything.
    pub fn check_exit(&self) -> JsonResult<ScopeKind> {
        let Some(scope) = self.frames.last() else {
            return Err(JsonError::Sequencing(
                "there is no open container to close".to_string(),
            ));
        };
        if scope.name_pending {
            return Err(JsonError::Sequencing(
                "an object cannot be closed between a name and its value".to_string(),
            ));
        }
        Ok(scope.kind)
    }

    /// Closes the innermost container and completes it as a value of its
    /// parent.
    pub fn exit(&mut self) -> JsonResult<ScopeKind> {
        let kind = self.check_exit()?;
        self.frames.pop();
        trace!("exit {:?} to depth {}", kind, self.frames.len());
        self.commit_value();
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_values_alternate_in_objects() {
        let mut stack = ScopeStack::default();
        assert!(!stack.enter(ScopeKind::Object).unwrap());

        assert!(!stack.name().unwrap());
        assert!(!stack.value().unwrap());
        assert!(stack.name().unwrap());
        assert!(!stack.value().unwrap());

        assert_eq!(stack.exit().unwrap(), ScopeKind::Object);
        assert!(stack.is_root_complete());
    }

    #[test]
    fn arrays_report_comma_before_every_value_but_the_first() {
        let mut stack = ScopeStack::default();
        stack.enter(ScopeKind::Array).unwrap();

        assert!(!stack.value().unwrap());
        assert!(stack.value().unwrap());
        assert!(stack.enter(ScopeKind::Array).unwrap());
        assert!(!stack.value().unwrap());
        stack.exit().unwrap();
        assert!(stack.value().unwrap());
    }

    #[test]
    fn value_without_name_in_object_is_rejected() {
        let mut stack = ScopeStack::default();
        stack.enter(ScopeKind::Object).unwrap();

        assert!(matches!(stack.value(), Err(JsonError::Sequencing(_))));
        assert!(matches!(
            stack.enter(ScopeKind::Array),
            Err(JsonError::Sequencing(_))
        ));
    }

    #[test]
    fn two_names_in_a_row_are_rejected() {
        let mut stack = ScopeStack::default();
        stack.enter(ScopeKind::Object).unwrap();
        stack.name().unwrap();

        assert!(matches!(stack.name(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn names_outside_objects_are_rejected() {
        let mut stack = ScopeStack::default();
        assert!(matches!(stack.name(), Err(JsonError::Sequencing(_))));

        stack.enter(ScopeKind::Array).unwrap();
        assert!(matches!(stack.name(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn nested_container_consumes_the_pending_name_on_exit() {
        let mut stack = ScopeStack::default();
        stack.enter(ScopeKind::Object).unwrap();
        stack.name().unwrap();
        stack.enter(ScopeKind::Array).unwrap();
        stack.exit().unwrap();

        let parent = stack.current().unwrap();
        assert!(!parent.name_pending());
        assert!(parent.has_values());
        assert!(stack.name().unwrap());
    }

    #[test]
    fn closing_with_a_dangling_name_is_rejected() {
        let mut stack = ScopeStack::default();
        stack.enter(ScopeKind::Object).unwrap();
        stack.name().unwrap();

        assert!(matches!(stack.exit(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn extra_exit_is_rejected() {
        let mut stack = ScopeStack::default();
        stack.enter(ScopeKind::Object).unwrap();
        stack.exit().unwrap();

        assert!(matches!(stack.exit(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn only_one_root_value() {
        let mut stack = ScopeStack::default();
        stack.value().unwrap();

        assert!(stack.is_root_complete());
        assert!(matches!(stack.value(), Err(JsonError::Sequencing(_))));
        assert!(matches!(
            stack.enter(ScopeKind::Array),
            Err(JsonError::Sequencing(_))
        ));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut stack = ScopeStack::new(Some(2));
        stack.enter(ScopeKind::Array).unwrap();
        stack.enter(ScopeKind::Array).unwrap();

        assert!(matches!(
            stack.enter(ScopeKind::Array),
            Err(JsonError::DepthLimitExceeded(2))
        ));
        assert_eq!(stack.depth(), 2);
    }
}
