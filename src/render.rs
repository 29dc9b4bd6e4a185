//! Text rendering of session view state.
//!
//! Pure functions from panel state to display strings; the session and
//! fetchers never format anything themselves. ANSI emphasis is optional
//! so output stays clean when piped.

use crate::markdown::Span;
use crate::session::{ContentOverlay, ResultsPanel, SearchSession, SummaryPanel};
use lantern_search::{ImagePage, ResultPage};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render the whole session: results panel, then summary, then overlay.
pub fn render_session(session: &SearchSession, ansi: bool) -> String {
    let mut out = String::new();

    out.push_str(&render_results(session, ansi));

    match session.summary() {
        SummaryPanel::Hidden => {}
        panel => {
            out.push('\n');
            out.push_str(&render_summary(panel, ansi));
        }
    }

    match session.overlay() {
        ContentOverlay::Closed => {}
        overlay => {
            out.push('\n');
            out.push_str(&render_content(overlay));
        }
    }

    out
}

/// Render the results panel with its header.
pub fn render_results(session: &SearchSession, ansi: bool) -> String {
    let mut out = String::new();

    if let Some(identity) = session.identity() {
        let header = format!("RESULTS FOR \"{}\"", identity.query);
        if ansi {
            out.push_str(&format!("{BOLD}{header}{RESET}\n"));
        } else {
            out.push_str(&header);
            out.push('\n');
        }
    }

    match session.results() {
        ResultsPanel::Empty => out.push_str("Type a query to search.\n"),
        ResultsPanel::Loading => out.push_str("Searching…\n"),
        ResultsPanel::Failed(message) => {
            out.push_str(&format!("Search failed: {message}\n"));
        }
        ResultsPanel::Text(page) => out.push_str(&render_text_page(page)),
        ResultsPanel::Images(page) => out.push_str(&render_image_page(page)),
    }

    out
}

fn render_text_page(page: &ResultPage) -> String {
    if page.results.is_empty() {
        return "No results found.\n".to_owned();
    }

    let mut out = format!(
        "{} results · {:.2}s\n\n",
        page.total_results, page.execution_time
    );
    for result in &page.results {
        if result.is_featured() {
            out.push_str(&format!("[featured] {}\n", result.title));
        } else {
            out.push_str(&format!("{}. {}\n", result.position, result.title));
        }
        out.push_str(&format!("   {} — {}\n", result.domain, result.url));
        if !result.snippet.is_empty() {
            out.push_str(&format!("   {}\n", result.snippet));
        }
        out.push('\n');
    }
    out
}

fn render_image_page(page: &ImagePage) -> String {
    if page.results.is_empty() {
        return "No images found.\n".to_owned();
    }

    let mut out = format!(
        "{} images · {:.2}s\n\n",
        page.total_results, page.execution_time
    );
    for image in &page.results {
        let title = if image.title.is_empty() {
            image.alt_text.as_str()
        } else {
            image.title.as_str()
        };
        out.push_str(&format!("{}. {}\n", image.position, title));
        if let (Some(w), Some(h)) = (image.width, image.height) {
            out.push_str(&format!("   {w}×{h} · {}\n", image.source_domain));
        } else if !image.source_domain.is_empty() {
            out.push_str(&format!("   {}\n", image.source_domain));
        }
        out.push_str(&format!("   {}\n\n", image.url));
    }
    out
}

/// Render the AI summary panel.
pub fn render_summary(panel: &SummaryPanel, ansi: bool) -> String {
    match panel {
        SummaryPanel::Hidden => String::new(),
        SummaryPanel::Pending => "AI SUMMARY\nSummarizing…\n".to_owned(),
        SummaryPanel::Failed(message) => {
            format!("AI SUMMARY\nSummary unavailable: {message}\n")
        }
        SummaryPanel::Ready(summary) => {
            let mut out = "AI SUMMARY\n".to_owned();
            out.push_str(&render_spans(&summary.spans, ansi));
            out.push('\n');
            out
        }
    }
}

/// Flatten spans to a display string, emphasizing bold runs when `ansi`.
pub fn render_spans(spans: &[Span], ansi: bool) -> String {
    let mut out = String::new();
    for span in spans {
        if span.bold && ansi {
            out.push_str(BOLD);
            out.push_str(&span.text);
            out.push_str(RESET);
        } else {
            out.push_str(&span.text);
        }
    }
    out
}

/// Render the content overlay.
pub fn render_content(overlay: &ContentOverlay) -> String {
    match overlay {
        ContentOverlay::Closed => String::new(),
        ContentOverlay::Loading { url } => format!("PAGE CONTENT\nLoading {url}…\n"),
        ContentOverlay::Failed { url, message } => {
            format!("PAGE CONTENT\nCould not load {url}: {message}\n")
        }
        ContentOverlay::Open(page) => {
            let mut out = "PAGE CONTENT\n".to_owned();
            if !page.title.is_empty() {
                out.push_str(&format!("{}\n", page.title));
            }
            out.push_str(&format!("{}\n\n", page.url));
            out.push_str(&page.text);
            out.push('\n');
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown;
    use crate::session::SearchSession;
    use lantern_search::{Engine, SearchMode, SearchResult};

    fn page(n: usize) -> ResultPage {
        ResultPage {
            results: (1..=n)
                .map(|i| SearchResult {
                    id: format!("r{i}"),
                    title: format!("Result {i}"),
                    snippet: format!("Snippet {i}"),
                    url: format!("https://example.com/{i}"),
                    source: "google".into(),
                    domain: "example.com".into(),
                    position: i as i32,
                    features: Default::default(),
                })
                .collect(),
            total_results: n as u64,
            execution_time: 1.42,
        }
    }

    #[test]
    fn header_and_count_for_scenario() {
        let mut session = SearchSession::new(SearchMode::Text, Engine::Google, 5);
        let sub = session.submit("rust ownership").expect("submission");
        session.settle_results(sub.results_token, Ok(page(5)));

        let rendered = render_results(&session, false);
        assert!(rendered.contains("RESULTS FOR \"rust ownership\""));
        assert!(rendered.contains("5 results"));
        // Order equals backend positions 1..5.
        let idx: Vec<usize> = (1..=5)
            .map(|i| {
                rendered
                    .find(&format!("{i}. Result {i}"))
                    .unwrap_or_else(|| panic!("result {i} missing"))
            })
            .collect();
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn empty_page_renders_no_results_not_error() {
        let mut session = SearchSession::new(SearchMode::Text, Engine::Google, 10);
        let sub = session.submit("rust").expect("submission");
        session.settle_results(sub.results_token, Ok(page(0)));
        let rendered = render_results(&session, false);
        assert!(rendered.contains("No results found."));
        assert!(!rendered.contains("Search failed"));
    }

    #[test]
    fn failed_fetch_renders_inline_error() {
        let mut session = SearchSession::new(SearchMode::Text, Engine::Google, 10);
        let sub = session.submit("rust").expect("submission");
        session.settle_results(
            sub.results_token,
            Err(lantern_search::SearchError::Backend("engine down".into())),
        );
        let rendered = render_results(&session, false);
        assert!(rendered.contains("Search failed: backend error: engine down"));
    }

    #[test]
    fn loading_state_renders_spinner_text() {
        let mut session = SearchSession::new(SearchMode::Text, Engine::Google, 10);
        session.submit("rust").expect("submission");
        assert!(render_results(&session, false).contains("Searching…"));
    }

    #[test]
    fn summary_bold_lead_uses_ansi_when_enabled() {
        let spans = markdown::parse_spans("**Lead.** Rest.");
        let with_ansi = render_spans(&spans, true);
        assert!(with_ansi.contains("\x1b[1mLead.\x1b[0m"));
        let plain = render_spans(&spans, false);
        assert_eq!(plain, "Lead. Rest.");
    }

    #[test]
    fn featured_results_marked() {
        let mut featured = page(1);
        featured.results[0].position = -1;
        featured.results[0].source = "google_featured".into();
        let rendered = render_text_page(&featured);
        assert!(rendered.contains("[featured] Result 1"));
    }

    #[test]
    fn content_overlay_renders_title_and_text() {
        let overlay = ContentOverlay::Open(lantern_search::ExtractedPage {
            url: "https://example.com/a".into(),
            title: "An Article".into(),
            text: "Body text.".into(),
            text_blocks: vec![],
            execution_time: 0.2,
        });
        let rendered = render_content(&overlay);
        assert!(rendered.contains("An Article"));
        assert!(rendered.contains("Body text."));
    }
}
