//! Notification seam toward external collaborators (UI, AI backends).
//!
//! Notifications fire after the mutation has committed and only for forward
//! operations; undo and redo stay silent. Nothing flows back into the engine.

/// Receives passive notifications about committed mutations.
pub trait MessageObserver: Send {
    fn on_edit(&mut self, _message_id: &str, _new_content: &str) {}

    fn on_delete(&mut self, _message_id: &str) {}

    /// Regeneration was requested; the collaborator is expected to call
    /// `edit` once new content is available.
    fn on_regenerate(&mut self, _message_id: &str) {}

    fn on_branch(&mut self, _new_branch_id: &str, _fork_point_id: &str) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MessageObserver for NoopObserver {}

type EditFn = Box<dyn FnMut(&str, &str) + Send>;
type IdFn = Box<dyn FnMut(&str) + Send>;
type BranchFn = Box<dyn FnMut(&str, &str) + Send>;

/// Closure-backed observer; every callback is optional.
///
/// Builders carry a `_with` suffix so they never shadow the `MessageObserver`
/// methods of the same name.
#[derive(Default)]
pub struct Callbacks {
    on_edit: Option<EditFn>,
    on_delete: Option<IdFn>,
    on_regenerate: Option<IdFn>,
    on_branch: Option<BranchFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_edit_with(mut self, f: impl FnMut(&str, &str) + Send + 'static) -> Self {
        self.on_edit = Some(Box::new(f));
        self
    }

    pub fn on_delete_with(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_delete = Some(Box::new(f));
        self
    }

    pub fn on_regenerate_with(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_regenerate = Some(Box::new(f));
        self
    }

    pub fn on_branch_with(mut self, f: impl FnMut(&str, &str) + Send + 'static) -> Self {
        self.on_branch = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_edit", &self.on_edit.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .field("on_regenerate", &self.on_regenerate.is_some())
            .field("on_branch", &self.on_branch.is_some())
            .finish()
    }
}

impl MessageObserver for Callbacks {
    fn on_edit(&mut self, message_id: &str, new_content: &str) {
        if let Some(f) = self.on_edit.as_mut() {
            f(message_id, new_content);
        }
    }

    fn on_delete(&mut self, message_id: &str) {
        if let Some(f) = self.on_delete.as_mut() {
            f(message_id);
        }
    }

    fn on_regenerate(&mut self, message_id: &str) {
        if let Some(f) = self.on_regenerate.as_mut() {
            f(message_id);
        }
    }

    fn on_branch(&mut self, new_branch_id: &str, fork_point_id: &str) {
        if let Some(f) = self.on_branch.as_mut() {
            f(new_branch_id, fork_point_id);
        }
    }
}
