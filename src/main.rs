use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;

use dayplan::commands::{self, NewHabit, NewTask};
use dayplan::storage::JsonStore;

#[derive(Parser)]
#[command(name = "dayplan")]
#[command(about = "Daily planner with recurring tasks and habit streaks", long_about = None)]
struct Cli {
    /// Owner whose data to operate on
    #[arg(short, long, global = true, default_value = "default")]
    owner: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task (recurring with --repeat)
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Date in YYYY-MM-DD; the anchor date for recurring tasks
        #[arg(short, long)]
        date: String,
        /// Longer description
        #[arg(long)]
        desc: Option<String>,
        /// Count task: how many times (must be > 0)
        #[arg(short, long)]
        count: Option<u32>,
        /// Value task: target amount
        #[arg(short, long)]
        value: Option<f64>,
        /// Priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,
        /// Tags (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
        /// Planned duration in minutes
        #[arg(long)]
        duration: Option<u32>,
        /// Reminder time (HH:MM)
        #[arg(long)]
        remind: Option<String>,
        /// Repeat frequency (daily, weekdays, weekly, monthly)
        #[arg(short, long)]
        repeat: Option<String>,
        /// Repeat every N days/weeks/months
        #[arg(short, long, default_value_t = 1)]
        every: u32,
        /// Last day the repeat may produce an occurrence
        #[arg(short, long)]
        until: Option<String>,
        /// Weekdays for weekly repeats (e.g. mon,thu or 1,4)
        #[arg(long)]
        on: Option<String>,
    },
    /// Show the planner for a day (default: today)
    Plan {
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List tasks in a date range (default: the coming week)
    List {
        /// Range start in YYYY-MM-DD
        #[arg(short, long)]
        from: Option<String>,
        /// Range end in YYYY-MM-DD
        #[arg(short, long)]
        to: Option<String>,
        /// List everything
        #[arg(short, long)]
        all: bool,
    },
    /// Toggle a task's completion
    Complete { id: u64 },
    /// Remove a task
    Remove { id: u64 },
    /// Edit a task
    Edit {
        id: u64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        desc: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
        /// Make it a count task with this quantity
        #[arg(short, long)]
        count: Option<u32>,
        /// Make it a value task with this amount
        #[arg(short, long)]
        value: Option<f64>,
        /// New duration in minutes
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Manage habits
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },
    /// Manage day notes
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Reset the database (delete all tasks, habits and notes)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

#[derive(Subcommand)]
enum HabitCommands {
    /// Add a new habit
    Add {
        /// Habit name
        name: String,
        /// Longer description
        #[arg(long)]
        desc: Option<String>,
        /// Frequency (daily, weekdays, weekly)
        #[arg(short, long)]
        frequency: Option<String>,
        /// Time of day (morning, afternoon, evening, anytime)
        #[arg(short, long)]
        time: Option<String>,
        /// Goal type (none, monthly, yearly, custom)
        #[arg(short, long)]
        goal: Option<String>,
        /// Goal target (completions)
        #[arg(long)]
        goal_target: Option<u32>,
        /// Goal date for custom goals
        #[arg(long)]
        goal_date: Option<String>,
    },
    /// List habits with streaks
    List,
    /// Toggle today's completion
    Toggle { id: u64 },
    /// Edit a habit
    Edit {
        id: u64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        desc: Option<String>,
        /// New frequency
        #[arg(short, long)]
        frequency: Option<String>,
        /// New time of day
        #[arg(short, long)]
        time: Option<String>,
        /// New goal type (none clears)
        #[arg(short, long)]
        goal: Option<String>,
        /// New goal target
        #[arg(long)]
        goal_target: Option<u32>,
        /// New goal date
        #[arg(long)]
        goal_date: Option<String>,
    },
    /// Remove a habit
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Create or update the note for a day (default: today)
    Set {
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
        /// Note text
        #[arg(short, long)]
        note: Option<String>,
        /// Reflection text
        #[arg(short, long)]
        reflection: Option<String>,
    },
    /// Show the note for a day (default: today)
    Show {
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove the note for a day (default: today)
    Remove {
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let store = JsonStore::open_default();
    let owner = cli.owner;

    match cli.command {
        Some(Commands::Add {
            title,
            date,
            desc,
            count,
            value,
            priority,
            tag,
            duration,
            remind,
            repeat,
            every,
            until,
            on,
        }) => commands::cmd_add(
            &store,
            &owner,
            NewTask {
                title,
                date,
                description: desc,
                count,
                value,
                priority,
                tags: tag,
                duration,
                remind,
                repeat,
                every,
                until,
                on,
            },
            false,
        ),
        Some(Commands::Plan { date }) => commands::cmd_plan(&store, &owner, date, false),
        Some(Commands::List { from, to, all }) => commands::cmd_list(&store, &owner, from, to, all),
        Some(Commands::Complete { id }) => commands::cmd_complete(&store, &owner, id, false),
        Some(Commands::Remove { id }) => commands::cmd_remove(&store, &owner, id, false),
        Some(Commands::Edit {
            id,
            title,
            desc,
            date,
            priority,
            count,
            value,
            duration,
        }) => commands::cmd_edit(
            &store, &owner, id, title, desc, date, priority, count, value, duration, false,
        ),
        Some(Commands::Habit { command }) => match command {
            HabitCommands::Add {
                name,
                desc,
                frequency,
                time,
                goal,
                goal_target,
                goal_date,
            } => commands::cmd_habit_add(
                &store,
                &owner,
                NewHabit {
                    name,
                    description: desc,
                    frequency,
                    time,
                    goal,
                    goal_target,
                    goal_date,
                },
                false,
            ),
            HabitCommands::List => commands::cmd_habit_list(&store, &owner),
            HabitCommands::Toggle { id } => commands::cmd_habit_toggle(&store, &owner, id, false),
            HabitCommands::Edit {
                id,
                name,
                desc,
                frequency,
                time,
                goal,
                goal_target,
                goal_date,
            } => commands::cmd_habit_edit(
                &store,
                &owner,
                id,
                name,
                desc,
                frequency,
                time,
                goal,
                goal_target,
                goal_date,
                false,
            ),
            HabitCommands::Remove { id } => commands::cmd_habit_remove(&store, &owner, id, false),
        },
        Some(Commands::Note { command }) => match command {
            NoteCommands::Set {
                date,
                note,
                reflection,
            } => commands::cmd_note_set(&store, &owner, date, note, reflection, false),
            NoteCommands::Show { date } => commands::cmd_note_show(&store, &owner, date),
            NoteCommands::Remove { date } => commands::cmd_note_remove(&store, &owner, date, false),
        },
        Some(Commands::Reset { force }) => commands::cmd_reset(&store, force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "dayplan", &mut io::stdout());
        }
        None => commands::cmd_plan(&store, &owner, None, false),
    }
}
