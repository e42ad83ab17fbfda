//! Line-oriented terminal surface: cards on stdout, commands from stdin.

use std::{
    io::{self, Write},
    sync::Mutex,
};

use browser_core::{IntentSender, PaginationView, PresentationSurface};
use shared::domain::Item;

pub const HELP: &str = "\
commands:
  <name or number>   search the catalog
  /<term>            search even when the term is a command word (e.g. /n)
  next, n            next page
  prev, p            previous page
  list, l            back to the paged list (reloads the current page)
  help, h            this text
  quit, q            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    List,
    Help,
    Quit,
    Search(String),
}

/// Anything that is not a keyword is search input, including a blank line. A leading `/`
/// forces a search, so keys that collide with a keyword stay reachable.
pub fn parse_command(line: &str) -> Command {
    if let Some(term) = line.trim_start().strip_prefix('/') {
        return Command::Search(term.to_string());
    }
    match line.trim().to_ascii_lowercase().as_str() {
        "next" | "n" => Command::Next,
        "prev" | "previous" | "p" => Command::Previous,
        "list" | "l" => Command::List,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Search(line.to_string()),
    }
}

/// Forwards a non-terminal command as an intent. Returns `false` for `Quit`.
pub fn dispatch(command: Command, intents: &IntentSender, surface: &TerminalSurface) -> bool {
    match command {
        Command::Next => {
            intents.next_page();
        }
        Command::Previous => {
            intents.previous_page();
        }
        Command::List => {
            intents.reload_list();
        }
        Command::Search(raw) => {
            intents.submit_search(surface, &raw);
        }
        Command::Help => surface.print_help(),
        Command::Quit => return false,
    }
    true
}

pub fn format_card(item: &Item) -> String {
    let mut card = format!("#{:03} {}\n", item.id.0, item.name);
    card.push_str(&format!("  types:     {}\n", item.types.join(", ")));
    card.push_str(&format!("  abilities: {}\n", item.abilities.join(", ")));
    card.push_str(&format!(
        "  height:    {:.1} m   weight: {:.1} kg\n",
        f64::from(item.height) / 10.0,
        f64::from(item.weight) / 10.0
    ));
    if let Some(url) = &item.image_url {
        card.push_str(&format!("  image:     {url}\n"));
    }
    card
}

pub fn format_pagination(pagination: PaginationView) -> Option<String> {
    if !pagination.visible {
        return None;
    }
    let previous = if pagination.previous_enabled {
        "[p] prev"
    } else {
        "[ ] prev"
    };
    let next = if pagination.next_enabled {
        "next [n]"
    } else {
        "next [ ]"
    };
    Some(format!("{previous}  | page {} |  {next}", pagination.page_label))
}

pub struct TerminalSurface {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSurface {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }

    pub fn print_help(&self) {
        self.write(HELP);
    }

    fn write(&self, text: &str) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(err) = writeln!(out, "{text}").and_then(|()| out.flush()) {
            tracing::debug!("terminal write failed: {err}");
        }
    }
}

impl PresentationSurface for TerminalSurface {
    fn render_items(&self, items: &[Item]) {
        if items.is_empty() {
            return;
        }
        let cards: Vec<String> = items.iter().map(format_card).collect();
        self.write(&cards.join("\n"));
    }

    fn set_loading(&self, loading: bool) {
        if loading {
            self.write("loading...");
        }
    }

    fn show_error(&self, message: &str) {
        self.write(&format!("error: {message}"));
    }

    fn clear_error(&self) {}

    fn show_validation(&self, message: &str) {
        self.write(&format!("! {message}"));
    }

    fn update_pagination(&self, pagination: PaginationView) {
        match format_pagination(pagination) {
            Some(line) => self.write(&line),
            None => self.write("(search result - type 'list' to return to browsing)"),
        }
    }
}
