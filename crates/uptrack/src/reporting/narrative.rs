use super::aggregate::{AggregatedReportData, TaskSnapshot, DUE_SOON_DAYS};
use super::config::{ReportConfig, ReportFormat};
use crate::tracking::{TaskStatus, UserRole};
use chrono::NaiveDateTime;
use std::fmt::{self, Write as _};

const GENERATED_AT_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

pub(crate) fn build(
    data: &AggregatedReportData,
    config: &ReportConfig,
    format: ReportFormat,
    generated_at: NaiveDateTime,
) -> String {
    let mut out = String::new();
    // `fmt::Write` for `String` never returns an error.
    let _ = write_report(&mut out, data, config, format, generated_at);
    out
}

fn write_report(
    out: &mut String,
    data: &AggregatedReportData,
    config: &ReportConfig,
    format: ReportFormat,
    generated_at: NaiveDateTime,
) -> fmt::Result {
    writeln!(out, "# UpTrack Systemreport")?;
    writeln!(
        out,
        "Generiert am: {}",
        generated_at.format(GENERATED_AT_FORMAT)
    )?;
    writeln!(out)?;

    if config.include_users {
        write_users(out, data, config.include_statistics)?;
    }
    if config.include_tasks {
        write_tasks(out, data, config.include_statistics)?;
    }
    if config.include_charts {
        write_charts(out, data, format)?;
    }

    Ok(())
}

fn write_users(out: &mut String, data: &AggregatedReportData, statistics: bool) -> fmt::Result {
    writeln!(out, "## Benutzerinformationen")?;
    writeln!(out)?;
    writeln!(out, "Gesamtanzahl Benutzer: {}", data.total_users)?;
    writeln!(out)?;

    for user in &data.users {
        writeln!(out, "- {} ({})", user.username, user.role.label())?;
        writeln!(
            out,
            "  Status: {}",
            if user.active { "Aktiv" } else { "Inaktiv" }
        )?;
        writeln!(out)?;
    }

    if !statistics {
        return Ok(());
    }

    writeln!(out, "### Benutzerstatistiken")?;
    writeln!(out)?;
    writeln!(out, "Aktive Benutzer: {}", data.active_users)?;
    writeln!(out, "Inaktive Benutzer: {}", data.inactive_users)?;
    writeln!(out)?;
    writeln!(out, "Benutzertypen:")?;
    for role in UserRole::ordered() {
        if let Some(count) = data.role_counts.get(&role) {
            writeln!(out, "- {}: {}", role.label(), count)?;
        }
    }
    writeln!(out)
}

fn write_tasks(out: &mut String, data: &AggregatedReportData, statistics: bool) -> fmt::Result {
    writeln!(out, "## Aufgabeninformationen")?;
    writeln!(out)?;
    writeln!(out, "Gesamtanzahl Aufgaben: {}", data.total_tasks)?;
    writeln!(out)?;

    for task in &data.tasks {
        write_task_details(out, task)?;
    }

    if !statistics {
        return Ok(());
    }

    writeln!(out, "### Aufgabenstatistiken")?;
    writeln!(out)?;
    writeln!(
        out,
        "Abgeschlossene Aufgaben: {} ({:.2}%)",
        data.completed_tasks, data.completion_rate
    )?;
    writeln!(out, "Offene Aufgaben: {}", data.open_tasks)?;
    writeln!(out, "Abgebrochene Aufgaben: {}", data.canceled_tasks)?;
    writeln!(out)?;

    writeln!(out, "Status-Übersicht:")?;
    for status in TaskStatus::ordered() {
        if let Some(count) = data.status_counts.get(&status) {
            writeln!(out, "- {}: {}", status.label(), count)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Überfällige Aufgaben: {}", data.overdue_count)?;
    writeln!(
        out,
        "In den nächsten {DUE_SOON_DAYS} Tagen fällig: {}",
        data.due_soon_count
    )?;
    writeln!(out)?;

    writeln!(out, "### Benutzerproduktivität")?;
    writeln!(out)?;
    for workload in &data.assignments {
        writeln!(
            out,
            "- {}: {} Aufgaben insgesamt, {} abgeschlossen ({:.2}%)",
            workload.assignee,
            workload.total(),
            workload.completed,
            workload.completion_rate()
        )?;
    }
    writeln!(out)
}

fn write_task_details(out: &mut String, task: &TaskSnapshot) -> fmt::Result {
    writeln!(out, "- {}", task.title)?;
    writeln!(out, "  Beschreibung: {}", task.description)?;
    writeln!(out, "  Status: {}", task.status.label())?;
    writeln!(
        out,
        "  Fälligkeitsdatum: {}",
        task.due_date.as_deref().unwrap_or("nicht gesetzt")
    )?;
    writeln!(out, "  Zugewiesen an: {}", task.assignee)?;

    if !task.history.is_empty() {
        writeln!(out, "  Historie:")?;
        for entry in &task.history {
            writeln!(out, "    - {entry}")?;
        }
    }
    writeln!(out)
}

fn write_charts(
    out: &mut String,
    data: &AggregatedReportData,
    format: ReportFormat,
) -> fmt::Result {
    writeln!(out, "## Visualisierungen")?;
    writeln!(out)?;

    match format {
        ReportFormat::Txt => {
            writeln!(out, "### Aufgabenstatus-Verteilung")?;
            writeln!(out)?;
            writeln!(out, "Aufgabenstatus:")?;
            for status in TaskStatus::ordered() {
                if let Some(count) = data.status_counts.get(&status) {
                    writeln!(out, "{}: {} ({})", status.label(), "#".repeat(*count), count)?;
                }
            }
            writeln!(out)
        }
        ReportFormat::Html | ReportFormat::Pdf => {
            writeln!(out, "### Aufgabenstatus-Verteilung")?;
            writeln!(out)?;
            writeln!(out, "[Hier würde ein Statusverteilungs-Diagramm angezeigt]")?;
            writeln!(out)?;
            writeln!(out, "### Benutzeraktivität")?;
            writeln!(out)?;
            writeln!(out, "[Hier würde ein Benutzeraktivitäts-Diagramm angezeigt]")?;
            writeln!(out)
        }
        ReportFormat::Csv => Ok(()),
    }
}
