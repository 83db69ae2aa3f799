//! gradebook CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Course marks, grades and class reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a set of component marks locally
    Preview {
        #[arg(long)]
        assignment: f64,

        #[arg(long)]
        quiz: f64,

        #[arg(long)]
        project: f64,

        #[arg(long)]
        midsem: f64,

        #[arg(long)]
        final_exam: f64,
    },

    /// Validate a JSON file of marks entries before uploading
    Validate {
        /// JSON array of marks entries
        #[arg(long)]
        marks: PathBuf,
    },

    /// Export a course's marks and statistics
    Export {
        /// Course identifier on the backend
        #[arg(long)]
        course: String,

        /// Course name used in filenames and report headers (defaults to the id)
        #[arg(long)]
        course_name: Option<String>,

        /// Output format: csv, html, stats, all (comma-separated)
        #[arg(long, default_value = "all")]
        format: String,

        /// Output directory
        #[arg(long, default_value = "./gradebook-exports")]
        output: PathBuf,

        #[command(flatten)]
        credentials: Credentials,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the backend's statistics for a course
    Stats {
        /// Course identifier on the backend
        #[arg(long)]
        course: String,

        #[command(flatten)]
        credentials: Credentials,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and an example marks file
    Init,
}

#[derive(clap::Args)]
pub struct Credentials {
    /// Lecturer email
    #[arg(long, env = "GRADEBOOK_EMAIL")]
    email: String,

    /// Lecturer password
    #[arg(long, env = "GRADEBOOK_PASSWORD", hide_env_values = true)]
    password: String,
}

#[tokio::main]
async fn main() {
    let directive = match "gradebook=info".parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => directive,
        Err(e) => {
            eprintln!("Error: invalid log directive: {e}");
            process::exit(1);
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Preview {
            assignment,
            quiz,
            project,
            midsem,
            final_exam,
        } => commands::preview::execute(assignment, quiz, project, midsem, final_exam),
        Commands::Validate { marks } => commands::validate::execute(marks),
        Commands::Export {
            course,
            course_name,
            format,
            output,
            credentials,
            config,
        } => {
            commands::export::execute(course, course_name, format, output, credentials, config)
                .await
        }
        Commands::Stats {
            course,
            credentials,
            config,
        } => commands::stats::execute(course, credentials, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
