// crates/cli/src/main.rs
//! `cx`: prompt scoring and coaching over imported Claude Code sessions.

mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use claude_x_core::{
    paths, tools, CoachConfig, FsExtensionDetector, NoExtensions, NoHistory, PatternScanner,
    PromptAnalytics, PromptCoach, PromptHistory, TemplateLibrary,
};
use claude_x_db::{import_projects_dir, SqliteStore};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cx")]
#[command(about = "Score, rank and coach your Claude Code prompts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Import session logs from ~/.claude/projects
    Import {
        /// Only import projects whose name contains this
        #[arg(short, long)]
        project: Option<String>,

        /// Projects directory to read instead of ~/.claude/projects
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Score a single prompt on structure and context
    Score {
        prompt: String,

        #[arg(long)]
        json: bool,
    },

    /// Diagnose a prompt and suggest improvements
    Coach {
        prompt: String,

        /// Do not learn from your past best prompts
        #[arg(long)]
        no_history: bool,

        /// Do not look for installed commands and skills
        #[arg(long)]
        no_extensions: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show best (or worst) prompts, or export the prompt library
    Prompts {
        #[arg(short, long)]
        project: Option<String>,

        #[arg(short, long, default_value = "10")]
        limit: usize,

        #[arg(long)]
        worst: bool,

        /// Keep only prompts meeting the configured structure and context minimums
        #[arg(long)]
        strict: bool,

        /// Minimum structure + context score
        #[arg(long)]
        min_quality: Option<f64>,

        /// Write the markdown prompt library (optionally to PATH)
        #[arg(long, num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },

    /// Full analytics report as JSON
    Report {
        #[arg(short, long)]
        project: Option<String>,

        /// Write to FILE instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Browse the built-in prompt templates
    Templates {
        #[arg(long, conflicts_with_all = ["search", "category"])]
        show: Option<String>,

        #[arg(short, long, conflicts_with = "category")]
        search: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// Run a tool-gateway operation and print its JSON result
    Tool {
        #[command(subcommand)]
        tool: ToolCommand,
    },
}

#[derive(Subcommand)]
enum ToolCommand {
    Best {
        #[arg(short, long)]
        project: Option<String>,
        #[arg(short, long, default_value = "10")]
        limit: usize,
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        min_quality: Option<f64>,
    },
    Worst {
        #[arg(short, long)]
        project: Option<String>,
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    Sessions {
        #[arg(short, long)]
        project: Option<String>,
    },
    Patterns {
        #[arg(short, long)]
        project: Option<String>,
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
    Score {
        prompt: String,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "warn,claude_x=info,cx=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_analytics(config: CoachConfig) -> Result<PromptAnalytics<SqliteStore>> {
    let store = SqliteStore::open_default().context("Failed to open the session database")?;
    debug!("Using database {}", store.db_path().display());
    Ok(PromptAnalytics::with_config(store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CoachConfig::load_default()?;

    match cli.command {
        Command::Import { project, dir } => {
            let dir = match dir {
                Some(d) => d,
                None => paths::claude_projects_dir().context("Home directory not found")?,
            };
            let store = SqliteStore::open_default().context("Failed to open the session database")?;
            let stats = import_projects_dir(&store, &dir, project.as_deref(), &PatternScanner)?;
            print!("{}", render::import_summary(&stats));
        }

        Command::Score { prompt, json } => {
            let result = tools::score_prompt(&prompt);
            if json {
                render::print_json(&result)?;
            } else {
                print!("{}", render::score_text(&result));
            }
        }

        Command::Coach {
            prompt,
            no_history,
            no_extensions,
            json,
        } => {
            let analytics = if no_history {
                None
            } else {
                match open_analytics(config.clone()) {
                    Ok(a) => Some(a),
                    Err(e) => {
                        warn!("Coaching without history: {:#}", e);
                        None
                    }
                }
            };
            let history: &dyn PromptHistory = match &analytics {
                Some(a) => a,
                None => &NoHistory,
            };

            let detector = paths::claude_dir().map(FsExtensionDetector::new);
            let mut coach = PromptCoach::new(history).with_history_limit(config.history_limit);
            coach = match &detector {
                Some(d) => coach.with_extensions(d),
                None => coach.with_extensions(&NoExtensions),
            };

            let result = coach.analyze(&prompt, !no_extensions, analytics.is_some());
            if json {
                render::print_json(&result)?;
            } else {
                print!("{}", render::coaching_text(&result));
            }
        }

        Command::Prompts {
            project,
            limit,
            worst,
            strict,
            min_quality,
            export,
        } => {
            let analytics = open_analytics(config)?;
            if let Some(output) = export {
                let path = analytics.export_prompt_library(project.as_deref(), output.as_deref())?;
                println!("Prompt library written to {}", path.display());
                return Ok(());
            }

            let label = project.as_deref().unwrap_or("all");
            if worst {
                let prompts = analytics.get_worst_prompts(project.as_deref(), limit)?;
                print!("{}", render::ranked_table(&format!("Worst prompts ({label})"), &prompts));
            } else {
                let prompts =
                    analytics.get_best_prompts(project.as_deref(), limit, strict, min_quality)?;
                print!("{}", render::ranked_table(&format!("Best prompts ({label})"), &prompts));
            }
        }

        Command::Report { project, output } => {
            let analytics = open_analytics(config)?;
            let report = analytics.generate_full_report(project.as_deref())?;
            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Report written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }

        Command::Templates {
            show,
            search,
            category,
        } => {
            let library = TemplateLibrary;
            if let Some(name) = show {
                print!("{}", render::template_detail(library.get(&name)?));
            } else {
                let templates = match (search, category) {
                    (Some(q), _) => library.search(&q),
                    (None, Some(c)) => library.by_category(&c),
                    (None, None) => library.all().iter().collect(),
                };
                print!("{}", render::template_list(&templates));
            }
        }

        Command::Tool { tool } => run_tool(tool, config)?,
    }

    Ok(())
}

fn run_tool(tool: ToolCommand, config: CoachConfig) -> Result<()> {
    match tool {
        ToolCommand::Score { prompt } => render::print_json(&tools::score_prompt(&prompt)),
        ToolCommand::Best {
            project,
            limit,
            strict,
            min_quality,
        } => {
            let analytics = open_analytics(config)?;
            let result =
                tools::get_best_prompts(&analytics, project.as_deref(), limit, strict, min_quality)?;
            render::print_json(&result)
        }
        ToolCommand::Worst { project, limit } => {
            let analytics = open_analytics(config)?;
            render::print_json(&tools::get_worst_prompts(&analytics, project.as_deref(), limit)?)
        }
        ToolCommand::Sessions { project } => {
            let analytics = open_analytics(config)?;
            render::print_json(&tools::analyze_sessions(&analytics, project.as_deref())?)
        }
        ToolCommand::Patterns { project, limit } => {
            let analytics = open_analytics(config)?;
            render::print_json(&tools::get_prompt_patterns(&analytics, project.as_deref(), limit)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_flag_optional_path() {
        let cli = Cli::try_parse_from(["cx", "prompts", "--export"]).unwrap();
        match cli.command {
            Command::Prompts { export, .. } => assert_eq!(export, Some(None)),
            _ => panic!("expected prompts"),
        }

        let cli = Cli::try_parse_from(["cx", "prompts", "--export", "out.md", "-p", "front"]).unwrap();
        match cli.command {
            Command::Prompts {
                export, project, ..
            } => {
                assert_eq!(export, Some(Some(PathBuf::from("out.md"))));
                assert_eq!(project.as_deref(), Some("front"));
            }
            _ => panic!("expected prompts"),
        }
    }

    #[test]
    fn test_templates_flags_conflict() {
        assert!(Cli::try_parse_from(["cx", "templates", "--show", "a", "--search", "b"]).is_err());
    }
}
