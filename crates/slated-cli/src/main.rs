use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use slated_core::config::InterpreterConfig;
use slated_core::{
    Category, Course, Interpreter, ParseOutcome, ParsedEvent, ParsedGrade, ParsedScheduleItem,
    ReminderLead, SlotContext,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "slated", version, about = "Natural-language planner command interpreter")]
struct Cli {
    #[arg(
        long,
        value_delimiter = ',',
        help = "Known category names, comma separated"
    )]
    categories: Vec<String>,

    #[arg(long, value_delimiter = ',', help = "Known course names, comma separated")]
    courses: Vec<String>,

    #[arg(long, help = "Path to an interpreter config file (YAML)")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Interpret a single line of input and print the outcome")]
    Parse {
        #[arg(help = "The input text", trailing_var_arg = true)]
        input: Vec<String>,
        #[arg(long, help = "Print the outcome as JSON")]
        json: bool,
    },
    #[command(about = "Interactive session with clarification follow-ups")]
    Repl {
        #[arg(long, help = "Print each outcome as JSON")]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let interpreter = match &cli.config {
        Some(path) => Interpreter::with_config(InterpreterConfig::load(path)?),
        None => Interpreter::new(),
    };
    let categories: Vec<Category> = cli.categories.iter().map(Category::new).collect();
    let courses: Vec<Course> = cli.courses.iter().map(Course::new).collect();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Parse { input, json } => {
            let text = input.join(" ");
            let outcome = interpreter.parse(&text, &categories, &courses);
            print_outcome(&outcome, json)?;
        }
        Commands::Repl { json } => {
            run_repl(&interpreter, &categories, &courses, json)?;
        }
    }

    Ok(())
}

fn run_repl(
    interpreter: &Interpreter,
    categories: &[Category],
    courses: &[Course],
    json: bool,
) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut pending: Option<(SlotContext, Option<Uuid>)> = None;

    println!("slated repl. Empty line or ctrl-d to exit.");
    loop {
        if pending.is_some() {
            print!("... ");
        } else {
            print!("> ");
        }
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let outcome = match pending.take() {
            Some((context, conversation_id)) => {
                interpreter.parse_follow_up(line, context, conversation_id, categories, courses)
            }
            None => interpreter.parse(line, categories, courses),
        };

        if let ParseOutcome::NeedsMoreInfo {
            context: Some(context),
            conversation_id,
            ..
        } = &outcome
        {
            pending = Some((context.clone(), *conversation_id));
        }
        print_outcome(&outcome, json)?;
    }
    Ok(())
}

fn print_outcome(outcome: &ParseOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }
    match outcome {
        ParseOutcome::Event(event) => print_event(event),
        ParseOutcome::Schedule(item) => print_schedule(item),
        ParseOutcome::Grade(grade) => print_grade(grade),
        ParseOutcome::NeedsMoreInfo { prompt, .. } => println!("{prompt}"),
        ParseOutcome::Unrecognized { original_input } => {
            println!("Could not interpret: {original_input}");
        }
        ParseOutcome::NotAttempted => println!("Nothing to interpret."),
    }
    Ok(())
}

fn print_event(event: &ParsedEvent) {
    println!("Event: {}", event.title);
    if let Some(date) = event.date {
        println!("  Date: {date}");
    }
    match (&event.time, event.all_day) {
        (Some(time), _) => println!("  Time: {time}"),
        (None, true) => println!("  Time: all day"),
        (None, false) => {}
    }
    if let Some(category) = &event.category_name {
        println!("  Category: {category}");
    }
    if let Some(reminder) = &event.reminder {
        println!("  Reminder: {}", reminder_label(reminder));
    }
}

fn print_schedule(item: &ParsedScheduleItem) {
    println!("Schedule item: {}", item.title);
    let days: Vec<String> = item.days.iter().map(|d| d.to_string()).collect();
    println!("  Days: {}", days.join(", "));
    if let Some(start) = &item.start_time {
        println!("  Start: {start}");
    }
    if let Some(end) = &item.end_time {
        println!("  End: {end}");
    }
    if let Some(secs) = item.duration_secs {
        println!("  Duration: {} min", secs / 60);
    }
    if let Some(reminder) = &item.reminder {
        println!("  Reminder: {}", reminder_label(reminder));
    }
    if let Some(color) = &item.color_hex {
        println!("  Color: {color}");
    }
}

fn print_grade(grade: &ParsedGrade) {
    println!("Grade: {} / {}", grade.course_name, grade.assignment_name);
    println!("  Grade: {}", grade.grade);
    match grade.weight {
        Some(weight) => println!("  Weight: {weight}%"),
        None => println!("  Weight: (none)"),
    }
}

fn reminder_label(reminder: &ReminderLead) -> String {
    match reminder.minutes() {
        None => "none".to_string(),
        Some(m) if m < 60 => format!("{m} minutes before"),
        Some(m) if m % 1440 == 0 => {
            let days = m / 1440;
            if days == 7 {
                "1 week before".to_string()
            } else if days == 1 {
                "1 day before".to_string()
            } else {
                format!("{days} days before")
            }
        }
        Some(m) => format!("{} hours before", m / 60),
    }
}
