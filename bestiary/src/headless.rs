//! Headless mode for the viewer.
//!
//! A line-oriented interface over stdin/stdout for scripts and quick lookups:
//! - Plain lines are monster name searches
//! - Lines starting with `#` are commands (next, prev, monster, spells, help, quit)
//! - Stat blocks are printed as indented plain text

use std::io::{self, BufRead, Write};

use bestiary_core::{
    render_monster, spell_card, MonsterSearch, SearchController, SearchOutcome, SearchQuery,
    SearchStatus,
};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Next,
    Prev,
    Monster(i64),
    Spells(String),
    Help,
    Quit,
}

impl Command {
    /// Parse a line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let Some(rest) = line.strip_prefix('#') else {
            return Ok(Some(Command::Search(line.to_string())));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        let command = match name {
            "next" => Command::Next,
            "prev" => Command::Prev,
            "monster" => {
                let id = arg
                    .parse()
                    .map_err(|_| format!("Usage: #monster <id> (got {arg:?})"))?;
                Command::Monster(id)
            }
            "spells" => Command::Spells(arg.to_string()),
            "all" => Command::Search(String::new()),
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err("Unknown command. Type #help for help.".to_string()),
        };
        Ok(Some(command))
    }
}

/// Search state plus the service it talks to.
pub struct HeadlessSession<'a> {
    service: &'a dyn MonsterSearch,
    search: SearchController,
}

impl<'a> HeadlessSession<'a> {
    pub fn new(service: &'a dyn MonsterSearch, page_size: u32) -> Self {
        Self {
            service,
            search: SearchController::new(page_size),
        }
    }

    /// Run one command, writing its output. Returns false once the session
    /// should end.
    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Search(name) => {
                self.search.set_query(name);
                let outcome = self.search.submit(self.service).await;
                self.print_outcome(outcome, out)?;
            }
            Command::Next => match self.search.next_page() {
                Some(ticket) => {
                    let outcome = self.search.run(ticket, self.service).await;
                    self.print_outcome(outcome, out)?;
                }
                None => writeln!(out, "[ERROR] Run a search first")?,
            },
            Command::Prev => match self.search.previous_page() {
                Some(ticket) => {
                    let outcome = self.search.run(ticket, self.service).await;
                    self.print_outcome(outcome, out)?;
                }
                None => writeln!(out, "[ERROR] Already on the first page")?,
            },
            Command::Monster(id) => match self.service.get_monster(id).await {
                Ok(monster) => writeln!(out, "{}\n", render_monster(&monster))?,
                Err(e) => writeln!(out, "[ERROR] Monster {id}: {e}")?,
            },
            Command::Spells(name) => {
                let query = SearchQuery::by_name(name).with_page_count(self.search.page_size());
                match self.service.search_spells(&query).await {
                    Ok(spells) => {
                        writeln!(out, "[SPELLS] {}", spells.len())?;
                        for spell in &spells {
                            writeln!(out, "{}\n", spell_card(spell))?;
                        }
                    }
                    Err(e) => writeln!(out, "[ERROR] {e}")?,
                }
            }
            Command::Help => print_help(out)?,
            Command::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(false);
            }
        }

        out.flush()?;
        Ok(true)
    }

    fn print_outcome(&self, outcome: SearchOutcome, out: &mut impl Write) -> io::Result<()> {
        match outcome {
            SearchOutcome::Applied(count) => {
                writeln!(out, "[RESULTS] {count} (page {})", self.search.page())?;
                for monster in self.search.results() {
                    writeln!(out, "{}\n", render_monster(monster))?;
                }
            }
            SearchOutcome::Failed => {
                if let SearchStatus::Failed(error) = self.search.status() {
                    writeln!(out, "[ERROR] {error}")?;
                }
            }
            SearchOutcome::Stale => {}
        }
        Ok(())
    }
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "[HELP]")?;
    writeln!(out, "  <name>         - Search monsters by name")?;
    writeln!(out, "  #all           - List all monsters")?;
    writeln!(out, "  #next / #prev  - Page through the last search")?;
    writeln!(out, "  #monster <id>  - Show one monster by id")?;
    writeln!(out, "  #spells <name> - Search spells by name")?;
    writeln!(out, "  #help          - Show this help")?;
    writeln!(out, "  #quit          - Exit")
}

/// Run headless mode. With `query`, search once and exit; otherwise read
/// commands from stdin until EOF or `#quit`.
pub async fn run_headless(
    service: &dyn MonsterSearch,
    page_size: u32,
    query: Option<String>,
) -> anyhow::Result<()> {
    let mut session = HeadlessSession::new(service, page_size);
    let mut stdout = io::stdout();

    if let Some(query) = query {
        session.execute(Command::Search(query), &mut stdout).await?;
        return Ok(());
    }

    println!("=== Bestiary Headless Mode ===");
    print_help(&mut stdout)?;
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("[ERROR] {message}");
                continue;
            }
        };

        if !session.execute(command, &mut stdout).await? {
            break;
        }
    }

    Ok(())
}
