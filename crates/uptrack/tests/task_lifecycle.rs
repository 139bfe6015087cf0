use uptrack::tracking::{InMemoryTaskStore, Task, TaskSource, TaskStatus};

#[test]
fn every_mutation_adds_exactly_one_history_entry() {
    let mut task = Task::new("Onboarding", "Prepare the welcome checklist");
    assert_eq!(task.history_len(), 1);
    assert_eq!(task.history()[0], "task created");

    let mutations: [fn(&mut Task); 8] = [
        |task| task.set_title("Onboarding v2"),
        |task| task.set_description("Checklist and accounts"),
        |task| task.set_due_date("2026-11-01"),
        |task| task.set_status(TaskStatus::Completed),
        |task| task.assign_to("alice"),
        Task::complete,
        Task::reopen,
        Task::cancel,
    ];

    for (step, mutate) in mutations.iter().enumerate() {
        let before = task.history_len();
        mutate(&mut task);
        assert_eq!(task.history_len(), before + 1, "mutation {step} adds one entry");
    }

    assert_eq!(task.history()[0], "task created");
}

#[test]
fn status_follows_the_last_transition() {
    let mut task = Task::new("Retro", "Sprint retrospective");

    task.complete();
    assert_eq!(task.status(), TaskStatus::Completed);
    task.reopen();
    assert_eq!(task.status(), TaskStatus::Reopened);
    task.cancel();
    assert_eq!(task.status(), TaskStatus::Canceled);
    task.complete();
    assert_eq!(task.status(), TaskStatus::Completed);

    assert_eq!(
        task.history(),
        vec![
            "task created",
            "task completed",
            "task reopened",
            "task canceled",
            "task completed",
        ]
    );
}

#[test]
fn history_is_a_copy() {
    let mut task = Task::new("Audit", "Quarterly audit");
    let mut copy = task.history();
    copy.push("tampered".to_string());
    copy.clear();

    task.complete();

    assert_eq!(task.history(), vec!["task created", "task completed"]);
}

#[test]
fn stored_tasks_keep_their_history() {
    let store = InMemoryTaskStore::new();
    let mut task = Task::new("Invoice", "Send the October invoice");
    task.set_due_date("2026-10-31");
    store.add(task).expect("task stored");

    let listed = store.list_all_tasks().expect("tasks listed");
    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed[0].history(),
        vec!["task created", "due date set to 2026-10-31"]
    );
    assert!(store.add(Task::new("Invoice", "duplicate")).is_err());

    store.delete(&listed[0]).expect("task deleted");
    assert!(store.list_all_tasks().expect("tasks listed").is_empty());
}
