use super::config::ReportFormat;
use tracing::{info, warn};

const HTML_PREAMBLE: &str =
    "<!DOCTYPE html><html><head><title>UpTrack Report</title></head><body>";
const HTML_POSTAMBLE: &str = "</body></html>";

/// Literal substitutions applied in order. Headers are opened but never
/// closed; rendered reports depend on that exact output.
const HTML_SUBSTITUTIONS: [(&str, &str); 6] = [
    ("### ", "<h3>"),
    ("## ", "<h2>"),
    ("# ", "<h1>"),
    ("\n- ", "\n<br>• "),
    ("\n\n", "</p><p>"),
    ("\n<br>• ", "<br>• "),
];

const CSV_HEADER: [&str; 3] = ["Kategorie", "Name", "Wert"];
const CSV_CATEGORY: &str = "Element";

/// Turns a narrative text body into the requested output encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(narrative: &str, format: ReportFormat) -> String {
        match format {
            ReportFormat::Txt => narrative.to_string(),
            ReportFormat::Html => render_html(narrative),
            ReportFormat::Csv => render_csv(narrative),
            ReportFormat::Pdf => {
                info!("pdf output is written as plain text; real pdf encoding is not supported");
                narrative.to_string()
            }
        }
    }
}

fn render_html(narrative: &str) -> String {
    let body = HTML_SUBSTITUTIONS
        .iter()
        .fold(narrative.to_string(), |text, (from, to)| text.replace(from, to));

    let mut html = String::with_capacity(HTML_PREAMBLE.len() + body.len() + HTML_POSTAMBLE.len());
    html.push_str(HTML_PREAMBLE);
    html.push_str(&body);
    html.push_str(HTML_POSTAMBLE);
    html
}

/// `- label: value` lines become rows; everything else is dropped.
fn csv_rows(narrative: &str) -> impl Iterator<Item = (&str, &str)> {
    narrative.lines().filter_map(|line| {
        let item = line.strip_prefix("- ")?;
        let (label, value) = item.split_once(':')?;
        Some((label.trim(), value.trim()))
    })
}

fn render_csv(narrative: &str) -> String {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if let Err(err) = writer.write_record(CSV_HEADER) {
        warn!(%err, "failed to write csv header");
    }
    for (label, value) in csv_rows(narrative) {
        if let Err(err) = writer.write_record([CSV_CATEGORY, label, value]) {
            warn!(%err, label, "skipping csv row");
        }
    }

    match writer.into_inner() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            warn!(%err, "failed to flush csv output");
            format!("{}\n", CSV_HEADER.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_is_passed_through() {
        let text = "# Title\n\n- a: 1\n";
        assert_eq!(ReportRenderer::render(text, ReportFormat::Txt), text);
    }

    #[test]
    fn pdf_is_passed_through() {
        let text = "# Title\nbody";
        assert_eq!(ReportRenderer::render(text, ReportFormat::Pdf), text);
    }

    #[test]
    fn html_wraps_and_substitutes() {
        let html = ReportRenderer::render("# Title\n\n- x", ReportFormat::Html);

        assert!(html.starts_with(HTML_PREAMBLE));
        assert!(html.ends_with(HTML_POSTAMBLE));
        assert!(html.contains("<h1>Title</p><p><br>• x"));
    }

    #[test]
    fn html_maps_each_header_level() {
        let html = ReportRenderer::render(
            "## Users\n### Stats\nlist:\n- a\n- b",
            ReportFormat::Html,
        );

        assert!(html.contains("<h2>Users\n<h3>Stats\nlist:<br>• a<br>• b"));
        assert!(!html.contains("</h2>"));
        assert!(!html.contains("</h3>"));
    }

    #[test]
    fn csv_keeps_only_labelled_bullets() {
        let csv = ReportRenderer::render(
            "# Report\n- Alice: 3\n- no colon here\n  - indented: 9\nplain: 4\n- Bob: 1: extra\n",
            ReportFormat::Csv,
        );

        assert_eq!(
            csv,
            "Kategorie,Name,Wert\nElement,Alice,3\nElement,Bob,1: extra\n"
        );
    }

    #[test]
    fn csv_quotes_values_containing_commas() {
        let csv = ReportRenderer::render(
            "- bob: 2 Aufgaben insgesamt, 1 abgeschlossen (50.00%)",
            ReportFormat::Csv,
        );

        assert_eq!(
            csv,
            "Kategorie,Name,Wert\nElement,bob,\"2 Aufgaben insgesamt, 1 abgeschlossen (50.00%)\"\n"
        );
    }

    #[test]
    fn csv_of_empty_text_is_header_only() {
        assert_eq!(
            ReportRenderer::render("", ReportFormat::Csv),
            "Kategorie,Name,Wert\n"
        );
    }
}
