//! Line-driven terminal front end.
//!
//! Commands typed on stdin are turned into messages; every render prints a
//! plain-text summary and, when configured, writes the full HTML page to a
//! snapshot file that can be opened in a browser.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use digest_core::{AppViewModel, Key, Msg, PageItem, ToastKind, ViewRegion};
use digest_logging::{digest_error, digest_info};

use super::app::{Driver, Surface};
use super::ui::{page, render};

const HELP: &str = "commands: open <file> | back | esc | left | right | prev | next | page <n> | refresh | refresh-detail | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConsoleCommand {
    Dispatch(Msg),
    Help,
    Quit,
    Unknown(String),
}

/// Parses one input line; blank lines yield `None`.
pub(crate) fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match (verb.to_ascii_lowercase().as_str(), rest) {
        ("open", filename) if !filename.is_empty() => ConsoleCommand::Dispatch(Msg::CardSelected {
            filename: filename.to_string(),
        }),
        ("back", "") => ConsoleCommand::Dispatch(Msg::BackClicked),
        ("esc", "") => ConsoleCommand::Dispatch(Msg::KeyPressed(Key::Escape)),
        ("left", "") => ConsoleCommand::Dispatch(Msg::KeyPressed(Key::ArrowLeft)),
        ("right", "") => ConsoleCommand::Dispatch(Msg::KeyPressed(Key::ArrowRight)),
        ("prev", "") => ConsoleCommand::Dispatch(Msg::PrevPageClicked),
        ("next", "") => ConsoleCommand::Dispatch(Msg::NextPageClicked),
        ("page", number) => match number.parse::<u32>() {
            Ok(page) => ConsoleCommand::Dispatch(Msg::PageRequested(page)),
            Err(_) => ConsoleCommand::Unknown(line.to_string()),
        },
        ("refresh", "") => ConsoleCommand::Dispatch(Msg::RefreshClicked),
        ("refresh-detail", "") => ConsoleCommand::Dispatch(Msg::RefreshDetailClicked),
        ("help" | "?", "") => ConsoleCommand::Help,
        ("quit" | "exit" | "q", "") => ConsoleCommand::Quit,
        _ => ConsoleCommand::Unknown(line.to_string()),
    };
    Some(command)
}

pub(crate) struct ConsoleSurface<W: Write> {
    out: W,
    snapshot_path: Option<PathBuf>,
}

impl<W: Write> ConsoleSurface<W> {
    pub(crate) fn new(out: W, snapshot_path: Option<PathBuf>) -> Self {
        Self { out, snapshot_path }
    }

    fn write_snapshot(&self, view: &AppViewModel) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        let document = page::document(&render::render(view));
        if let Err(err) = std::fs::write(path, document) {
            digest_error!("Failed to write snapshot to {:?}: {}", path, err);
        }
    }
}

impl<W: Write> Surface for ConsoleSurface<W> {
    fn render(&mut self, view: &AppViewModel) {
        let _ = self.out.write_all(describe(view).as_bytes());
        let _ = self.out.flush();
        self.write_snapshot(view);
    }

    fn scroll_to_top(&mut self) {}
}

/// Plain-text rendering of a view.
pub(crate) fn describe(view: &AppViewModel) -> String {
    let mut out = String::new();
    for toast in &view.toasts {
        let marker = match toast.kind {
            ToastKind::Success => "+",
            ToastKind::Error => "!",
        };
        let _ = writeln!(out, "{marker} {}", toast.message);
    }
    if view.loading {
        out.push_str("Loading...\n");
    }

    match view.region {
        ViewRegion::List => {
            let _ = writeln!(out, "== {} digests in total ==", view.total_count);
            if view.show_cards {
                if view.cards.is_empty() {
                    out.push_str("  (no digests yet)\n");
                }
                for card in &view.cards {
                    let _ = writeln!(
                        out,
                        "  [{}] {} | {} | {} | {} items | {}",
                        card.filename,
                        card.title,
                        card.publish_date,
                        card.bv_id,
                        card.news_count,
                        card.organized
                    );
                    if !card.overview_excerpt.is_empty() {
                        let _ = writeln!(out, "      {}", card.overview_excerpt);
                    }
                }
            }
            if let (true, Some(pagination)) = (view.show_pagination, &view.pagination) {
                let mut line = String::from(if pagination.prev_enabled { "<" } else { "-" });
                for item in &pagination.items {
                    line.push(' ');
                    match item {
                        PageItem::Page {
                            number,
                            current: true,
                        } => {
                            let _ = write!(line, "[{number}]");
                        }
                        PageItem::Page { number, .. } => {
                            let _ = write!(line, "{number}");
                        }
                        PageItem::Ellipsis => line.push_str("..."),
                    }
                }
                line.push(' ');
                line.push_str(if pagination.next_enabled { ">" } else { "-" });
                let _ = writeln!(
                    out,
                    "  {line}   Page {} / {}",
                    pagination.current_page, pagination.total_pages
                );
            }
        }
        ViewRegion::Detail => {
            if let Some(detail) = &view.detail {
                let _ = writeln!(out, "== {} ==", detail.title);
                let _ = writeln!(out, "  Published: {}", detail.publish_date);
                let _ = writeln!(
                    out,
                    "  Video:     {}",
                    detail.bv_link.as_deref().unwrap_or(digest_core::UNKNOWN_BV_ID)
                );
                let _ = writeln!(out, "  Organized: {}", detail.organized);
                let _ = writeln!(out, "  Items:     {}", detail.news_count);
                match &detail.body {
                    Some(body) => {
                        let _ = writeln!(out, "  ({} bytes of content)", body.as_str().len());
                    }
                    None => out.push_str("  (content unavailable)\n"),
                }
            }
        }
    }
    out
}

/// Runs until `quit` or end of input.
pub(crate) fn run(
    mut driver: Driver,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    snapshot_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let quit = Arc::new(AtomicBool::new(false));
    spawn_stdin_reader(msg_tx.clone(), quit.clone());

    let mut surface = ConsoleSurface::new(io::stdout(), snapshot_path);
    println!("{HELP}");
    let _ = msg_tx.send(Msg::Started);

    while !quit.load(Ordering::Relaxed) {
        match msg_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(msg) => driver.dispatch(msg, &mut surface),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    digest_info!("Console session finished");
    Ok(())
}

fn spawn_stdin_reader(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_command(&line) {
                Some(ConsoleCommand::Dispatch(msg)) => {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                Some(ConsoleCommand::Help) => println!("{HELP}"),
                Some(ConsoleCommand::Quit) => break,
                Some(ConsoleCommand::Unknown(input)) => {
                    println!("unknown command: {input}");
                    println!("{HELP}");
                }
                None => {}
            }
        }
        quit.store(true, Ordering::Relaxed);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use digest_core::{CardView, PaginationView};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(
            parse_command("open 2024-06-14 morning.json"),
            Some(ConsoleCommand::Dispatch(Msg::CardSelected {
                filename: "2024-06-14 morning.json".to_string()
            }))
        );
        assert_eq!(
            parse_command("ESC"),
            Some(ConsoleCommand::Dispatch(Msg::KeyPressed(Key::Escape)))
        );
        assert_eq!(
            parse_command("right"),
            Some(ConsoleCommand::Dispatch(Msg::KeyPressed(Key::ArrowRight)))
        );
        assert_eq!(
            parse_command("page 3"),
            Some(ConsoleCommand::Dispatch(Msg::PageRequested(3)))
        );
        assert_eq!(
            parse_command("refresh-detail"),
            Some(ConsoleCommand::Dispatch(Msg::RefreshDetailClicked))
        );
        assert_eq!(parse_command("quit"), Some(ConsoleCommand::Quit));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert_eq!(
            parse_command("page two"),
            Some(ConsoleCommand::Unknown("page two".to_string()))
        );
        assert_eq!(
            parse_command("open"),
            Some(ConsoleCommand::Unknown("open".to_string()))
        );
        assert_eq!(
            parse_command("back now"),
            Some(ConsoleCommand::Unknown("back now".to_string()))
        );
    }

    #[test]
    fn describes_list_with_pagination() {
        let view = AppViewModel {
            show_cards: true,
            show_pagination: true,
            total_count: 25,
            cards: vec![CardView {
                filename: "a.json".to_string(),
                title: "Morning".to_string(),
                publish_date: "2024-06-14".to_string(),
                bv_id: "BV1abc".to_string(),
                overview_excerpt: String::new(),
                news_count: 3,
                organized: "yesterday".to_string(),
            }],
            pagination: Some(PaginationView {
                items: digest_core::pagination_window(1, 3),
                current_page: 1,
                total_pages: 3,
                prev_enabled: false,
                next_enabled: true,
            }),
            ..AppViewModel::default()
        };

        assert_eq!(
            describe(&view),
            "== 25 digests in total ==\n  [a.json] Morning | 2024-06-14 | BV1abc | 3 items | yesterday\n  - [1] 2 3 >   Page 1 / 3\n"
        );
    }

    #[test]
    fn surface_writes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.html");
        let mut surface = ConsoleSurface::new(Vec::new(), Some(path.clone()));

        surface.render(&AppViewModel::default());

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("0 digests in total"));
        assert!(String::from_utf8(surface.out).unwrap().contains("== 0 digests"));
    }
}
