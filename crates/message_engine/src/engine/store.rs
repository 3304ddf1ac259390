//! MessageStore - Ordered, cross-branch message collection
//!
//! Single source of truth for message data. Insertion order is stable and
//! shared by every branch; branch views are filters over it.
//!
//! A fork point shares its id with its copy on the forked branch, so id
//! lookups take a preferred branch and fall back to the first match in store
//! order. Undo/redo address records exactly by `(id, branch_id)`.

use message_core::Message;

#[derive(Debug, Clone, Default)]
pub(crate) struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Append a message, returning its index
    pub fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Insert at `index`, clamped to the current length. Returns the actual index.
    pub fn insert_at(&mut self, index: usize, message: Message) -> usize {
        let index = index.min(self.messages.len());
        self.messages.insert(index, message);
        index
    }

    /// Remove a message by id, returning where it was and what it held
    pub fn remove(&mut self, message_id: &str, preferred_branch: &str) -> Option<(usize, Message)> {
        let index = self.position(message_id, preferred_branch)?;
        Some((index, self.messages.remove(index)))
    }

    /// Remove the record with this exact id and branch
    pub fn remove_exact(&mut self, message_id: &str, branch_id: &str) -> Option<(usize, Message)> {
        let index = self.position_exact(message_id, branch_id)?;
        Some((index, self.messages.remove(index)))
    }

    /// Remove every message on a branch, returning how many were dropped
    pub fn remove_branch(&mut self, branch_id: &str) -> usize {
        let before = self.messages.len();
        self.messages.retain(|m| !m.is_on_branch(branch_id));
        before - self.messages.len()
    }

    /// Overwrite the stored record with the same id and branch
    pub fn replace(&mut self, message: Message) -> bool {
        match self.position_exact(&message.id, &message.branch_id) {
            Some(index) => {
                self.messages[index] = message;
                true
            }
            None => false,
        }
    }

    /// Index of `message_id`, preferring its record on `preferred_branch`
    pub fn position(&self, message_id: &str, preferred_branch: &str) -> Option<usize> {
        self.position_exact(message_id, preferred_branch)
            .or_else(|| self.messages.iter().position(|m| m.id == message_id))
    }

    pub fn position_exact(&self, message_id: &str, branch_id: &str) -> Option<usize> {
        self.messages
            .iter()
            .position(|m| m.id == message_id && m.is_on_branch(branch_id))
    }

    pub fn get(&self, message_id: &str, preferred_branch: &str) -> Option<&Message> {
        let index = self.position(message_id, preferred_branch)?;
        self.messages.get(index)
    }

    pub fn get_mut(&mut self, message_id: &str, preferred_branch: &str) -> Option<&mut Message> {
        let index = self.position(message_id, preferred_branch)?;
        self.messages.get_mut(index)
    }

    pub fn on_branch<'a>(&'a self, branch_id: &'a str) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages.iter().filter(move |m| m.is_on_branch(branch_id))
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
