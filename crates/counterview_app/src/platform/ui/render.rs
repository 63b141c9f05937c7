use std::io::{self, Write};

use counterview_core::{AppViewModel, LinkTarget, LinkView};

/// One step of terminal output, produced from a view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermCommand {
    /// Drop whatever the previous render printed.
    Clear,
    Status { text: String, submit_enabled: bool },
    Heading(String),
    Paragraph(String),
    Link { index: usize, link: LinkView },
}

pub fn render(view: &AppViewModel) -> Vec<TermCommand> {
    let mut cmds = vec![TermCommand::Clear];

    let status = match &view.loading_label {
        Some(label) => label.clone(),
        None => "Ready".to_string(),
    };
    cmds.push(TermCommand::Status {
        text: status,
        submit_enabled: view.submit_enabled,
    });

    if let Some(summary) = &view.summary {
        cmds.push(TermCommand::Heading("Summary".to_string()));
        cmds.push(TermCommand::Paragraph(summary.clone()));
        cmds.push(TermCommand::Heading("Related articles".to_string()));
        cmds.extend(
            view.links
                .iter()
                .enumerate()
                .map(|(i, link)| TermCommand::Link {
                    index: i + 1,
                    link: link.clone(),
                }),
        );
    }

    cmds
}

/// Applies [`TermCommand`]s to a writer.
pub struct TerminalWriter<W: Write> {
    out: W,
    /// Emit escape sequences (screen clear, OSC 8 hyperlinks).
    rich: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(out: W, rich: bool) -> Self {
        Self { out, rich }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn apply(&mut self, cmds: &[TermCommand]) -> io::Result<()> {
        for cmd in cmds {
            match cmd {
                TermCommand::Clear => {
                    if self.rich {
                        write!(self.out, "\x1b[2J\x1b[H")?;
                    }
                }
                TermCommand::Status {
                    text,
                    submit_enabled,
                } => {
                    let control = if *submit_enabled { "enabled" } else { "disabled" };
                    writeln!(self.out, "[{text}] submit {control}")?;
                }
                TermCommand::Heading(text) => {
                    writeln!(self.out)?;
                    writeln!(self.out, "{text}")?;
                    writeln!(self.out, "{}", "-".repeat(text.chars().count()))?;
                }
                TermCommand::Paragraph(text) => {
                    writeln!(self.out, "{}", strip_controls(text))?;
                }
                TermCommand::Link { index, link } => {
                    let href = strip_controls(&link.href);
                    match link.target {
                        LinkTarget::NewContext if self.rich => {
                            // OSC 8: the terminal hands the URL to the browser.
                            writeln!(self.out, "{index}. \x1b]8;;{href}\x1b\\{href}\x1b]8;;\x1b\\")?;
                        }
                        LinkTarget::NewContext => writeln!(self.out, "{index}. {href}")?,
                    }
                }
            }
        }
        self.out.flush()
    }
}

/// Remove control characters so server text cannot inject escape sequences.
fn strip_controls(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use counterview_core::{update, AnalysisResponse, AppState, Msg, Surface};
    use pretty_assertions::assert_eq;

    fn settled_view(articles: &[&str]) -> AppViewModel {
        let (state, _) = update(
            AppState::new(Surface::TextForm),
            Msg::InputChanged("text".to_string()),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        let id = state.in_flight().unwrap();
        let (state, _) = update(
            state,
            Msg::AnalysisSucceeded {
                submission_id: id,
                response: AnalysisResponse {
                    summary: "S".to_string(),
                    articles: articles.iter().map(|a| a.to_string()).collect(),
                },
            },
        );
        state.view()
    }

    fn plain(cmds: &[TermCommand]) -> String {
        let mut writer = TerminalWriter::new(Vec::new(), false);
        writer.apply(cmds).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn result_renders_summary_then_numbered_links() {
        let text = plain(&render(&settled_view(&["http://a", "http://b"])));
        assert_eq!(
            text,
            "[Ready] submit enabled\n\nSummary\n-------\nS\n\nRelated articles\n----------------\n1. http://a\n2. http://b\n"
        );
    }

    #[test]
    fn empty_articles_render_no_links() {
        let cmds = render(&settled_view(&[]));
        assert!(!cmds.iter().any(|c| matches!(c, TermCommand::Link { .. })));
        assert!(plain(&cmds).ends_with("----------------\n"));
    }

    #[test]
    fn loading_view_disables_submit() {
        let (state, _) = update(
            AppState::new(Surface::TextForm),
            Msg::InputChanged("text".to_string()),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        let cmds = render(&state.view());
        assert_eq!(cmds[0], TermCommand::Clear);
        assert_eq!(
            cmds[1],
            TermCommand::Status {
                text: "Analyzing...".to_string(),
                submit_enabled: false
            }
        );
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn rich_mode_emits_hyperlinks_and_clear() {
        let mut writer = TerminalWriter::new(Vec::new(), true);
        writer.apply(&render(&settled_view(&["http://a"]))).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.starts_with("\x1b[2J\x1b[H"));
        assert!(text.contains("1. \x1b]8;;http://a\x1b\\http://a\x1b]8;;\x1b\\\n"));
    }

    #[test]
    fn escape_sequences_in_server_text_are_dropped() {
        assert_eq!(strip_controls("a\x1b]8;;evil\x07b\nc"), "a]8;;evilb\nc");
    }
}
