mod config;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use notora_core::autosave::AutosaveSession;
use notora_core::calendar::{CalendarIndexer, MonthCursor};
use notora_core::export;
use notora_core::models::{CalendarDay, Note, NoteColor};
use notora_core::query::{self, NoteFilter};
use notora_core::storage::{
    AttachmentRepository, Database, NoteRepository, SqliteStore, TaskRepository,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(
    name = "notora",
    version,
    about = "Note-taking with pinning, search, a calendar view and checklist tasks"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "notora.toml")]
    config: PathBuf,

    /// Path to the database, overriding the config
    #[arg(long)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, optionally searched and filtered
    List {
        /// Case-insensitive search over title and body
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only pinned notes
        #[arg(long)]
        pinned: bool,
        /// Only notes created today
        #[arg(long)]
        today: bool,
    },
    /// Create a note
    New {
        title: String,
        body: String,
        /// Card color: white, yellow, green, blue, pink or purple
        #[arg(long)]
        color: Option<String>,
    },
    /// Show one note with its attachments
    Show { id: String },
    /// Change a note's title and/or body (runs through autosave)
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },
    /// Toggle a note's pin
    Pin { id: String },
    /// Delete a note
    Delete { id: String },
    /// Record an attachment on a note
    Attach {
        id: String,
        /// Attachment file name
        name: String,
        #[arg(long, default_value = "application/octet-stream")]
        mime: String,
    },
    /// Export a note as plain text
    Export {
        id: String,
        /// Output file; defaults to "<title>.txt"
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print a month calendar (defaults to the current month)
    Calendar {
        year: Option<i32>,
        /// Month number, 1-12
        month: Option<u32>,
    },
    /// Manage checklist tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task
    Add { text: String },
    /// List tasks in their current order
    List,
    /// Toggle a task's completion (completed tasks sink to the bottom)
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;
    let db_path = cli.database.unwrap_or_else(|| config.database.clone());
    let store = Database::new(&db_path).get_or_create()?;

    match cli.command {
        Commands::List {
            query,
            pinned,
            today,
        } => {
            let notes = NoteRepository::get_all(&store)?;
            let filters = NoteFilter {
                pinned,
                today,
                checklist: false,
            };
            for note in query::compose_now(&notes, &query, &filters) {
                print_note_line(&note);
            }
        }
        Commands::New { title, body, color } => {
            let color = parse_color(color.as_deref().unwrap_or(&config.default_color))?;
            let note = NoteRepository::create(&store, &title, &body, color)?;
            println!("Created note {}", note.id);
        }
        Commands::Show { id } => {
            let note = NoteRepository::get(&store, &id)?;
            println!("{}", export::note_to_text(&note));
            let attachments = AttachmentRepository::get_all_for(&store, &note)?;
            if !attachments.is_empty() {
                println!();
                for att in attachments {
                    println!("  [{}] {} ({})", att.id, att.name, att.mime);
                }
            }
        }
        Commands::Edit { id, title, body } => {
            let current = NoteRepository::get(&store, &id)?;
            let title = title.unwrap_or_else(|| current.title.clone());
            let body = body.unwrap_or_else(|| current.body.clone());
            if title.trim().is_empty() || body.trim().is_empty() {
                bail!("A note needs both a title and a body");
            }

            let mut session = AutosaveSession::with_quiet_period(
                id,
                Duration::from_millis(config.autosave_quiet_ms),
            );
            session.record_edit(&title, &body, Instant::now());
            if let Some(saved) = session.finish(&store)? {
                if let Some(link) = export::detect_link(&saved.body) {
                    println!("\u{1F517} {}", link);
                }
                println!("Saved note {}", saved.id);
            }
        }
        Commands::Pin { id } => {
            NoteRepository::toggle_pin(&store, &id)?;
        }
        Commands::Delete { id } => {
            NoteRepository::delete(&store, &id)?;
        }
        Commands::Attach { id, name, mime } => {
            let attachment = AttachmentRepository::create(&store, &name, &mime)?;
            NoteRepository::attach(&store, &id, &attachment.id)?;
            println!("Attached {} as {}", name, attachment.id);
        }
        Commands::Export { id, out } => {
            let note = NoteRepository::get(&store, &id)?;
            let path = out.unwrap_or_else(|| PathBuf::from(export::export_filename(&note)));
            std::fs::write(&path, export::note_to_text(&note))?;
            println!("Exported to {}", path.display());
        }
        Commands::Calendar { year, month } => {
            let cursor = match (year, month) {
                (Some(year), Some(month)) => {
                    if !(1..=12).contains(&month) {
                        bail!("Month must be 1-12");
                    }
                    MonthCursor::new(year, month - 1)?
                }
                (None, None) => MonthCursor::current(),
                _ => bail!("Calendar takes either no arguments or a year and a month"),
            };
            print_calendar(&store, cursor)?;
        }
        Commands::Task { command } => match command {
            TaskCommands::Add { text } => {
                let task = TaskRepository::add(&store, &text)?;
                println!("Added task {}", task.id);
            }
            TaskCommands::List => {
                for task in TaskRepository::get_all(&store)? {
                    let mark = if task.completed { "x" } else { " " };
                    println!("[{}] {}  {}", mark, task.id, task.text);
                }
            }
            TaskCommands::Toggle { id } => {
                TaskRepository::toggle(&store, &id)?;
            }
            TaskCommands::Delete { id } => {
                TaskRepository::delete(&store, &id)?;
            }
        },
    }

    Ok(())
}

fn parse_color(name: &str) -> Result<NoteColor> {
    match name.to_lowercase().as_str() {
        "white" => Ok(NoteColor::White),
        "yellow" => Ok(NoteColor::Yellow),
        "green" => Ok(NoteColor::Green),
        "blue" => Ok(NoteColor::Blue),
        "pink" => Ok(NoteColor::Pink),
        "purple" => Ok(NoteColor::Purple),
        other => Err(anyhow!(
            "Unknown color '{}'; expected white, yellow, green, blue, pink or purple",
            other
        )),
    }
}

fn print_note_line(note: &Note) {
    let pin = if note.pinned { "\u{1F4CC}" } else { "  " };
    println!("{} {}  {}  {}", pin, note.id, note.date_key(), note.title);
}

fn print_calendar(store: &SqliteStore, cursor: MonthCursor) -> Result<()> {
    let grid = CalendarIndexer::build_month(store, cursor)?;

    println!("{:^35}", cursor.label());
    println!(" Su   Mo   Tu   We   Th   Fr   Sa");
    for week in &grid {
        let row: String = week.iter().map(format_day).collect();
        println!("{}", row.trim_end());
    }
    println!("\n [n] today  n* has notes");
    Ok(())
}

fn format_day(day: &CalendarDay) -> String {
    let notes_mark = if day.has_notes { "*" } else { " " };
    if day.is_today {
        format!("[{:>2}]{}", day.day(), notes_mark)
    } else if day.is_current_month {
        format!(" {:>2} {}", day.day(), notes_mark)
    } else {
        // Days padding out the grid from adjacent months
        format!(" {:>2}.{}", day.day(), notes_mark)
    }
}
