//! traumafit - a fitness companion for the terminal
//!
//! - `timer`: countdown with an alarm at zero
//! - `steps`: today's step count against a daily goal
//! - `calories`: calories burned from a workout log
//! - `journal`, `reminder`, `stats`: local records

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};

use traumafit::cli::{
    CaloriesArgs, Cli, Commands, Display, JournalCommand, ReminderCommand, StatsCommand,
    StepsArgs, TimerArgs,
};
use traumafit::config::{AppConfig, ConfigError};
use traumafit::sound::{create_player, resolve_alarm, SoundPlayer};
use traumafit::stats::{StatsUpdate, UserStats};
use traumafit::steps::{FileStepSource, StepPoller, StepTracker};
use traumafit::store::JsonFileStore;
use traumafit::timer::{IntervalClock, SoundNotifier, TimerController};
use traumafit::{Journal, Reminders, TimerPhase};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        if let Some(hint) = suggestion_for(&e) {
            Display::show_hint(hint);
        }
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Timer(args)) => run_timer(args, &config).await?,
        Some(Commands::Steps(args)) => run_steps(args, &config).await?,
        Some(Commands::Calories(args)) => show_calories(&args, &config),
        Some(Commands::Journal { action }) => run_journal(action, &config)?,
        Some(Commands::Reminder { action }) => run_reminder(action, &config)?,
        Some(Commands::Stats { action }) => run_stats(action, &config)?,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

// ============================================================================
// Timer
// ============================================================================

/// Runs a countdown in the foreground until it expires or Ctrl-C.
async fn run_timer(args: TimerArgs, config: &AppConfig) -> Result<()> {
    let sound_enabled = config.sound_enabled && !args.no_sound;
    let player = create_player(sound_enabled);
    let alarm = resolve_alarm(config.alarm_sound.as_deref());

    let (clock, mut ticks) = IntervalClock::new();
    let mut controller = TimerController::new(clock, SoundNotifier::new(player, alarm));

    controller.start(args.hours, args.minutes, args.seconds);
    if !controller.is_running() {
        Display::show_timer_zero();
        return Ok(());
    }
    Display::show_timer_progress(&controller.snapshot());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            tick = ticks.recv() => {
                let Some(id) = tick else {
                    bail!("timer clock stopped unexpectedly");
                };
                controller.on_tick(id);
                match controller.phase() {
                    TimerPhase::Running => Display::show_timer_progress(&controller.snapshot()),
                    TimerPhase::Expired => {
                        Display::show_timer_expired();
                        break;
                    }
                    TimerPhase::Idle => break,
                }
            }
            _ = &mut ctrl_c => {
                let snapshot = controller.snapshot();
                controller.stop();
                Display::show_timer_stopped(&snapshot);
                return Ok(());
            }
        }
    }

    // The alarm plays on a detached sink; let it finish unless interrupted.
    let notifier = controller.notifier();
    let player = notifier.player();
    if !player.is_disabled() && player.is_available() {
        tokio::select! {
            _ = tokio::time::sleep(notifier.alarm().alarm_wait()) => {}
            _ = &mut ctrl_c => {}
        }
    }
    Ok(())
}

// ============================================================================
// Steps / Calories
// ============================================================================

async fn run_steps(args: StepsArgs, config: &AppConfig) -> Result<()> {
    let source = FileStepSource::new(args.source);
    let mut tracker = StepTracker::new(config.step_goal);

    if args.once {
        tracker.refresh(&source).await;
        Display::show_steps(&tracker);
        return Ok(());
    }

    let poller = StepPoller::new(config.step_poll_interval());
    tokio::select! {
        _ = poller.run(&mut tracker, &source, Display::show_steps) => {}
        _ = tokio::signal::ctrl_c() => {}
    }
    Ok(())
}

fn show_calories(args: &CaloriesArgs, config: &AppConfig) {
    Display::show_calories(&args.to_log(), config.calorie_goal);
}

// ============================================================================
// Records
// ============================================================================

fn open_store(config: &AppConfig) -> Result<JsonFileStore> {
    let dir = config.resolve_data_dir()?;
    JsonFileStore::open(&dir)
        .with_context(|| format!("failed to open record store at {}", dir.display()))
}

fn run_journal(action: JournalCommand, config: &AppConfig) -> Result<()> {
    let mut journal = Journal::load(open_store(config)?).context("failed to load journal")?;

    match action {
        JournalCommand::Add { text, mood } => match journal.add(&text, mood, Utc::now())? {
            Some(id) => Display::show_journal_added(&id),
            None => Display::show_journal_empty_text(),
        },
        JournalCommand::List => Display::show_journal(journal.newest_first()),
        JournalCommand::Delete { id } => {
            Display::show_deleted("Journal entry", journal.delete(id)?);
        }
    }
    Ok(())
}

fn run_reminder(action: ReminderCommand, config: &AppConfig) -> Result<()> {
    let mut reminders =
        Reminders::load(open_store(config)?).context("failed to load reminders")?;

    match action {
        ReminderCommand::Add { at } => {
            let id = reminders.add(at, Utc::now())?;
            Display::show_reminder_added(&id, &at);
        }
        ReminderCommand::List => Display::show_reminders(reminders.items()),
        ReminderCommand::Delete { id } => {
            Display::show_deleted("Reminder", reminders.delete(&id)?);
        }
    }
    Ok(())
}

fn run_stats(action: Option<StatsCommand>, config: &AppConfig) -> Result<()> {
    let mut store = open_store(config)?;
    let mut stats = UserStats::load(&store).context("failed to load stats")?;

    match action {
        None | Some(StatsCommand::Show) => Display::show_stats(&stats),
        Some(StatsCommand::Set(args)) => {
            let update = StatsUpdate::from(args);
            if update.is_empty() {
                bail!("nothing to update; pass at least one field (see `stats set --help`)");
            }
            stats.update(update);
            stats.save(&mut store)?;
            Display::show_stats_saved();
            Display::show_stats(&stats);
        }
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

/// Returns a hint for errors that carry one.
fn suggestion_for(error: &anyhow::Error) -> Option<&'static str> {
    error
        .downcast_ref::<ConfigError>()
        .map(ConfigError::suggestion)
}

// ============================================================================
// Tests
// ============================================================================
