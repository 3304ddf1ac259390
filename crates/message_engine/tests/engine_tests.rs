//! Tests for message operations, branching and notifications

use std::sync::{Arc, Mutex};

use message_engine::{Callbacks, MessageDraft, MessageEngine, Role, MAIN_BRANCH_ID};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Edit(String, String),
    Delete(String),
    Regenerate(String),
    Branch(String, String),
}

fn recording_engine() -> (MessageEngine, Arc<Mutex<Vec<Event>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let (edits, deletes, regens, branches) = (
        Arc::clone(&events),
        Arc::clone(&events),
        Arc::clone(&events),
        Arc::clone(&events),
    );

    let callbacks = Callbacks::new()
        .on_edit_with(move |id, content| {
            edits
                .lock()
                .unwrap()
                .push(Event::Edit(id.to_string(), content.to_string()))
        })
        .on_delete_with(move |id| deletes.lock().unwrap().push(Event::Delete(id.to_string())))
        .on_regenerate_with(move |id| {
            regens
                .lock()
                .unwrap()
                .push(Event::Regenerate(id.to_string()))
        })
        .on_branch_with(move |branch, fork| {
            branches
                .lock()
                .unwrap()
                .push(Event::Branch(branch.to_string(), fork.to_string()))
        });

    (MessageEngine::new().with_observer(callbacks), events)
}

#[test]
fn test_hello_edit_delete_scenario() {
    let (mut engine, events) = recording_engine();

    let id = engine.add(MessageDraft::user("Hello"));
    let messages = engine.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "Hello");
    assert!(events.lock().unwrap().is_empty());

    assert!(engine.edit(&id, "Hi"));
    let message = engine.get_message(&id).unwrap();
    assert_eq!(message.content, "Hi");
    assert_eq!(message.original_content.as_deref(), Some("Hello"));
    assert_eq!(message.version, Some(1));

    assert!(engine.delete(&id));
    assert!(engine.messages().is_empty());

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            Event::Edit(id.clone(), "Hi".to_string()),
            Event::Delete(id.clone()),
        ]
    );
}

#[test]
fn test_add_count_matches_active_branch_adds() {
    let mut engine = MessageEngine::new();
    for i in 0..7 {
        engine.add(MessageDraft::user(format!("message {i}")));
        assert_eq!(engine.messages().len(), i + 1);
    }
    engine.add(MessageDraft::user("elsewhere").on_branch("side"));
    assert_eq!(engine.messages().len(), 7);
}

#[test]
fn test_second_edit_keeps_original_content() {
    let mut engine = MessageEngine::new();
    let id = engine.add(MessageDraft::user("first"));

    engine.edit(&id, "second");
    engine.edit(&id, "third");

    let message = engine.get_message(&id).unwrap();
    assert_eq!(message.content, "third");
    assert_eq!(message.original_content.as_deref(), Some("first"));
    assert_eq!(message.version, Some(2));
}

#[test]
fn test_deleted_id_is_dead_for_later_operations() {
    let (mut engine, events) = recording_engine();
    let id = engine.add(MessageDraft::user("Hello"));
    engine.delete(&id);
    let history_len = engine.history().len();
    events.lock().unwrap().clear();

    assert!(!engine.edit(&id, "Hi"));
    assert!(!engine.delete(&id));
    assert!(!engine.regenerate(&id));
    assert!(!engine.start_editing(&id));
    assert!(!engine.cancel_editing(&id));
    assert!(engine.branch_conversation(&id).is_none());

    assert!(engine.messages().iter().all(|m| m.id != id));
    assert_eq!(engine.history().len(), history_len);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_regenerate_notifies_without_mutation() {
    let (mut engine, events) = recording_engine();
    let id = engine.add(MessageDraft::assistant("Draft answer"));

    assert!(engine.regenerate(&id));
    assert_eq!(engine.get_message(&id).unwrap().content, "Draft answer");
    assert_eq!(*events.lock().unwrap(), vec![Event::Regenerate(id.clone())]);

    // The collaborator answers through edit
    engine.edit(&id, "Better answer");
    assert_eq!(engine.get_message(&id).unwrap().version, Some(1));
}

#[test]
fn test_branch_isolates_new_timeline() {
    let (mut engine, events) = recording_engine();
    let q = engine.add(MessageDraft::user("Question"));
    let a = engine.add(MessageDraft::assistant("Answer"));
    let main_before: Vec<_> = engine.messages().into_iter().cloned().collect();

    let branch = engine.branch_conversation(&a).unwrap();
    assert_ne!(branch, MAIN_BRANCH_ID);
    assert_eq!(engine.current_branch_id(), branch);
    assert!(engine.branches().len() >= 2);
    assert_eq!(
        *events.lock().unwrap(),
        vec![Event::Branch(branch.clone(), a.clone())]
    );

    // The fork point keeps its id on the new branch; edits there never reach main
    assert_eq!(engine.messages()[1].id, a);
    engine.edit(&a, "Alternative answer");
    assert_eq!(engine.get_message(&a).unwrap().content, "Alternative answer");
    engine.add(MessageDraft::user("Follow-up on branch"));

    let main_after: Vec<_> = engine
        .branches()
        .get(MAIN_BRANCH_ID)
        .unwrap()
        .iter()
        .map(|m| (*m).clone())
        .collect();
    assert_eq!(main_after, main_before);

    engine.switch_to_branch(MAIN_BRANCH_ID);
    assert_eq!(engine.get_message(&q).unwrap().content, "Question");
    assert_eq!(engine.get_message(&a).unwrap().content, "Answer");
}

#[test]
fn test_fork_point_operations_target_active_branch() {
    let mut engine = MessageEngine::new();
    let a = engine.add(MessageDraft::user("fork here"));
    let branch = engine.branch_conversation(&a).unwrap();

    assert!(engine.start_editing(&a));
    assert!(engine.edit(&a, "branch wording"));
    assert!(engine.undo());
    assert!(engine.redo());

    engine.switch_to_branch(MAIN_BRANCH_ID);
    let original = engine.get_message(&a).unwrap();
    assert_eq!(original.content, "fork here");
    assert!(!original.is_editing);
    assert!(original.version.is_none());

    engine.switch_to_branch(branch.as_str());
    assert_eq!(engine.get_message(&a).unwrap().content, "branch wording");

    // Deleting on the branch leaves main's record in place
    assert!(engine.delete(&a));
    assert!(engine.messages().is_empty());
    engine.undo();
    assert_eq!(engine.messages()[0].id, a);
    engine.redo();
    assert!(engine.messages().is_empty());
    assert_eq!(
        engine.branches().get(MAIN_BRANCH_ID).unwrap()[0].content,
        "fork here"
    );
}

#[test]
fn test_add_ignores_draft_parent() {
    let mut engine = MessageEngine::new();
    let id = engine.add(MessageDraft::user("x").with_parent("p"));
    assert!(engine.get_message(&id).unwrap().parent_id.is_none());
}

#[test]
fn test_switch_back_to_main_restores_view() {
    let mut engine = MessageEngine::new();
    let first = engine.add(MessageDraft::user("one"));
    engine.add(MessageDraft::assistant("two"));
    engine.branch_conversation(&first).unwrap();
    engine.add(MessageDraft::assistant("branch reply"));

    engine.switch_to_branch(MAIN_BRANCH_ID);
    assert_eq!(engine.current_branch_id(), MAIN_BRANCH_ID);
    let contents: Vec<&str> = engine.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two"]);
}

#[test]
fn test_branch_of_branch_copies_full_store_prefix() {
    let mut engine = MessageEngine::new();
    let first = engine.add(MessageDraft::user("one"));
    engine.add(MessageDraft::assistant("two"));
    let branch = engine.branch_conversation(&first).unwrap();

    // Fork again from the copy on the new branch
    let copy_id = engine.messages()[0].id.clone();
    let nested = engine.branch_conversation(&copy_id).unwrap();

    assert_eq!(engine.current_branch_id(), nested);
    // Prefix of the full store: main's two messages plus the first branch's copy
    let contents: Vec<&str> = engine.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["one", "two", "one"]);
    assert_eq!(engine.branches().len(), 3);
    assert_eq!(engine.branches().get(&branch).unwrap().len(), 1);
}

#[test]
fn test_messages_up_to_on_active_branch() {
    let mut engine = MessageEngine::new();
    let ids: Vec<String> = ["a", "b", "c", "d"]
        .iter()
        .map(|c| engine.add(MessageDraft::user(*c)))
        .collect();

    let prefix: Vec<&str> = engine
        .messages_up_to(&ids[2])
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(prefix, vec![ids[0].as_str(), ids[1].as_str(), ids[2].as_str()]);
    assert!(engine.messages_up_to("does-not-exist").is_empty());
}

#[test]
fn test_engines_are_independent() {
    let mut first = MessageEngine::new();
    let mut second = MessageEngine::new();

    let id = first.add(MessageDraft::user("only in first"));
    second.add(MessageDraft::user("only in second"));

    assert!(second.get_message(&id).is_none());
    assert!(first.undo());
    assert_eq!(second.messages().len(), 1);
}
