use crate::tracking::Task;

/// Demo tasks used when the task source is empty and sample data is enabled.
pub fn sample_tasks() -> Vec<Task> {
    let mut dashboard = Task::new(
        "Dashboard implementieren",
        "UI für das Dashboard erstellen und mit Backend verbinden",
    );
    dashboard.set_due_date("2023-12-15");
    dashboard.complete();

    let mut authentication = Task::new(
        "Benutzerauthentifizierung",
        "Login-System mit Passwort-Hashing implementieren",
    );
    authentication.set_due_date("2023-12-20");

    let mut database = Task::new(
        "Datenbankanbindung",
        "Repository-Klassen für Datenbankzugriff erstellen",
    );
    database.set_due_date("2024-01-10");
    database.cancel();

    let mut unit_tests = Task::new(
        "Unit Tests schreiben",
        "Testabdeckung für Core-Funktionalitäten erhöhen",
    );
    unit_tests.set_due_date("2023-12-30");

    let mut documentation = Task::new(
        "Dokumentation aktualisieren",
        "JavaDoc und README auf aktuellen Stand bringen",
    );
    documentation.set_due_date("2024-01-05");
    documentation.complete();

    vec![dashboard, authentication, database, unit_tests, documentation]
}
