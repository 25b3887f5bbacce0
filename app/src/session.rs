//! FILENAME: app/src/session.rs
//! PURPOSE: Interactive filter session over one loaded snapshot.
//! CONTEXT: Every accepted command replaces the FilterConfig and recomputes the
//! view from the session cache. Rejected input leaves the previous config.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pipeline_engine::{
    compute, parse_date, CategoryFilter, ConfigError, DashboardView, DateRange, FilterConfig,
    PipelineCache,
};
use thiserror::Error;

use crate::error::AppError;
use crate::render::{export_view, render_dashboard};
use crate::{log_debug, log_info};

pub const PROMPT: &str = "> ";

pub const HELP: &str = "\
Commands:
  from <YYYY-MM-DD>          set the start date
  to <YYYY-MM-DD>            set the end date (inclusive)
  range <start> <end>        set both dates
  category <name|All>        filter by product category
  categories                 list the categories
  top <5-20>                 length of the ranked tables
  reviews on|off             show or hide recent reviews
  show                       print the dashboard
  export <file.json|.xlsx>   save the current view
  help                       this text
  quit                       leave the session";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    From(NaiveDate),
    To(NaiveDate),
    Range(NaiveDate, NaiveDate),
    Category(CategoryFilter),
    Categories,
    Top(usize),
    Reviews(bool),
    Show,
    Export(PathBuf),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("unknown command '{0}', type 'help' for the list")]
    UnknownCommand(String),

    #[error("'{0}' needs {1}")]
    MissingArgument(&'static str, &'static str),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("expected 'on' or 'off', got '{0}'")]
    InvalidToggle(String),

    #[error("unknown category '{0}', type 'categories' for the list")]
    UnknownCategory(String),

    #[error(transparent)]
    Filter(#[from] ConfigError),
}

impl SessionCommand {
    /// `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, SessionError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let rest: Vec<&str> = words.collect();
        let first = |name: &'static str, what: &'static str| {
            rest.first().copied().ok_or(SessionError::MissingArgument(name, what))
        };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "from" => SessionCommand::From(parse_date(first("from", "a date")?)?),
            "to" => SessionCommand::To(parse_date(first("to", "a date")?)?),
            "range" => {
                if rest.len() < 2 {
                    return Err(SessionError::MissingArgument("range", "two dates"));
                }
                SessionCommand::Range(parse_date(rest[0])?, parse_date(rest[1])?)
            }
            // Category names may contain spaces
            "category" => {
                if rest.is_empty() {
                    return Err(SessionError::MissingArgument("category", "a name"));
                }
                SessionCommand::Category(CategoryFilter::parse(&rest.join(" ")))
            }
            "categories" => SessionCommand::Categories,
            "top" => {
                let text = first("top", "a number")?;
                let n = text
                    .parse::<usize>()
                    .map_err(|_| SessionError::InvalidNumber(text.to_string()))?;
                SessionCommand::Top(n)
            }
            "reviews" => match first("reviews", "on or off")?.to_ascii_lowercase().as_str() {
                "on" => SessionCommand::Reviews(true),
                "off" => SessionCommand::Reviews(false),
                other => return Err(SessionError::InvalidToggle(other.to_string())),
            },
            "show" => SessionCommand::Show,
            "export" => SessionCommand::Export(PathBuf::from(first("export", "a file name")?)),
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            other => return Err(SessionError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// Filter state plus the view computed for it.
pub struct Session<'a> {
    cache: &'a PipelineCache,
    config: FilterConfig,
    view: DashboardView,
    output_dir: PathBuf,
}

impl<'a> Session<'a> {
    /// Starts from the widget defaults of the snapshot.
    pub fn new(cache: &'a PipelineCache, output_dir: &Path) -> Self {
        let config = FilterConfig::defaults_for(cache);
        let view = compute(cache, &config);
        Session {
            cache,
            config,
            view,
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Validates `next`, then swaps it in and recomputes.
    fn replace_config(&mut self, next: FilterConfig) -> Result<(), SessionError> {
        next.validate()?;
        if let CategoryFilter::Only(name) = &next.category {
            if !self.cache.categories().iter().any(|c| c == name) {
                return Err(SessionError::UnknownCategory(name.clone()));
            }
        }
        self.view = compute(self.cache, &next);
        self.config = next;
        log_debug!(
            "SESSION",
            "recomputed range={} category={} top_n={}",
            self.config.date_range,
            self.config.category,
            self.config.top_n
        );
        Ok(())
    }

    /// Applies one filter command. Returns false for commands that do not
    /// change the filter.
    pub fn apply(&mut self, command: &SessionCommand) -> Result<bool, SessionError> {
        let next = match command {
            SessionCommand::From(start) => self.config.with_start(*start),
            SessionCommand::To(end) => self.config.with_end(*end),
            SessionCommand::Range(start, end) => {
                self.config.with_date_range(DateRange::new(*start, *end))
            }
            SessionCommand::Category(category) => self.config.with_category(category.clone()),
            SessionCommand::Top(n) => self.config.with_top_n(*n),
            SessionCommand::Reviews(on) => self.config.with_recent_reviews(*on),
            _ => return Ok(false),
        };
        self.replace_config(next)?;
        Ok(true)
    }

    /// Relative export paths land in the output directory.
    pub fn export(&self, path: &Path) -> Result<PathBuf, AppError> {
        let target = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        };
        export_view(&self.view, &target)?;
        Ok(target)
    }

    fn write_summary(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            out,
            "range {} | category {} | top {} | reviews {} | sales {} | orders {}",
            self.config.date_range,
            self.config.category,
            self.config.top_n,
            if self.config.show_recent_reviews { "on" } else { "off" },
            crate::render::format_money(self.view.kpis.total_sales),
            self.view.kpis.total_orders
        )
    }
}

/// Reads commands until `quit` or end of input.
pub fn run_session(
    cache: &PipelineCache,
    output_dir: &Path,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let mut session = Session::new(cache, output_dir);
    log_info!("SESSION", "interactive session started");

    render_dashboard(session.view(), out)?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {}", e)?;
                continue;
            }
        };

        match &command {
            SessionCommand::Quit => break,
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Show => render_dashboard(session.view(), out)?,
            SessionCommand::Categories => {
                writeln!(out, "All")?;
                for category in cache.categories() {
                    writeln!(out, "{}", category)?;
                }
            }
            SessionCommand::Export(path) => match session.export(path) {
                Ok(target) => writeln!(out, "exported {}", target.display())?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            _ => match session.apply(&command) {
                Ok(_) => session.write_summary(out)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
        }
    }

    log_info!("SESSION", "interactive session ended");
    Ok(())
}
