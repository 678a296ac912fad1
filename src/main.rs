use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use scaffoldr::llm::{AnthropicClient, LlmClient};
use scaffoldr::pipeline::CodingPipeline;
use scaffoldr::project::{ProjectHandle, ProjectWriter, render_tree, run_instructions};
use scaffoldr::prompt::{PromptLoader, PromptRenderer};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

/// Replies that end the interactive loop
const EXIT_WORDS: &[&str] = &["", "done", "exit", "quit"];

fn setup_logging(default_level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scaffoldr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("scaffoldr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Generate {
            task,
            output,
            interactive,
        } => handle_generate_command(task, output.as_deref(), *interactive, config).await,
        Commands::Materialize { input, task, output } => {
            handle_materialize_command(input, task.as_deref(), output.as_deref(), config)
        }
        Commands::Tree { dir } => handle_tree_command(dir),
        Commands::RunSteps { dir } => handle_run_steps_command(dir),
    }
}

fn project_writer(output: Option<&Path>, config: &Config) -> ProjectWriter {
    let writer = ProjectWriter::new(output.unwrap_or(&config.output.base_dir));
    info!("Projects go under {}", writer.base_dir().display());
    writer
}

fn build_pipeline(config: &Config) -> Result<CodingPipeline<AnthropicClient>> {
    let client = AnthropicClient::new(config.llm.to_anthropic()).context("Failed to create LLM client")?;
    info!("Using model {}", client.model());

    let renderer = match &config.pipeline.prompts_dir {
        Some(dir) => PromptRenderer::with_overrides(&PromptLoader::new(dir)).context("Failed to load prompt overrides")?,
        None => PromptRenderer::new(),
    };

    Ok(CodingPipeline::with_renderer(client, renderer, config.pipeline_config()))
}

async fn handle_generate_command(task: &str, output: Option<&Path>, interactive: bool, config: &Config) -> Result<()> {
    info!("Generating project for task: {}", task);
    println!("{} {}", "Task:".green(), task);

    let pipeline = build_pipeline(config)?;
    let writer = project_writer(output, config);

    let result = pipeline.run(task).await.context("Code generation failed")?;
    if let Some(plan) = &result.plan {
        println!("\n{}\n{}", "Plan:".cyan(), plan);
    }
    if let Some(review) = &result.review {
        println!("\n{}\n{}", "Review:".cyan(), review);
    }

    let handle = writer.materialize(task, &result.code).context("Failed to write project")?;
    print_project(&handle);

    if interactive {
        modification_loop(&pipeline, &writer, task, result.code).await?;
    }

    let usage = pipeline.client().total_usage();
    info!("Token usage: {} in, {} out", usage.input_tokens, usage.output_tokens);
    Ok(())
}

async fn modification_loop(
    pipeline: &CodingPipeline<AnthropicClient>,
    writer: &ProjectWriter,
    task: &str,
    mut code: String,
) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("\n{} ", "Describe changes (or 'done'):".yellow());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }
        let request = line.trim();
        if EXIT_WORDS.contains(&request.to_lowercase().as_str()) {
            break;
        }

        info!("Modification requested: {}", request);
        let revised = match pipeline.modify(&code, request).await {
            Ok(revised) => revised,
            Err(e) => {
                eprintln!("{} {}", "Modification failed:".red(), e);
                continue;
            }
        };

        match writer.materialize(task, &revised) {
            Ok(handle) => {
                print_project(&handle);
                code = revised;
            }
            Err(e) => eprintln!("{} {}", "Failed to write project:".red(), e),
        }
    }
    Ok(())
}

fn handle_materialize_command(input: &Path, task: Option<&str>, output: Option<&Path>, config: &Config) -> Result<()> {
    let markdown = if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
        buffer
    } else {
        fs::read_to_string(input).context(format!("Failed to read {}", input.display()))?
    };

    // Without a task, name the folder after the input file
    let task = task
        .map(String::from)
        .or_else(|| input.file_stem().map(|s| s.to_string_lossy().to_string()))
        .unwrap_or_default();

    info!("Materializing {} as '{}'", input.display(), task);
    let handle = project_writer(output, config)
        .materialize(&task, &markdown)
        .context("Failed to write project")?;
    print_project(&handle);
    Ok(())
}

fn handle_tree_command(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        eyre::bail!("{} is not a directory", dir.display());
    }
    let root = std::path::absolute(dir).context(format!("Failed to resolve {}", dir.display()))?;
    println!("{}", render_tree(&root));
    Ok(())
}

fn handle_run_steps_command(dir: &Path) -> Result<()> {
    let root = std::path::absolute(dir).context(format!("Failed to resolve {}", dir.display()))?;
    for step in run_instructions(&root) {
        println!("  {}", step);
    }
    Ok(())
}

fn print_project(handle: &ProjectHandle) {
    println!("\n{} {}", "Project created:".green().bold(), handle.root.display());
    for file in &handle.created_files {
        println!("  {} {}", "+".green(), file);
    }

    println!("\n{}", handle.tree());

    println!("\n{}", "To run:".cyan());
    for step in handle.run_instructions() {
        println!("  {}", step);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with the configured default level
    setup_logging(config.log_level.as_deref().unwrap_or("info")).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
