//! Portfolio admin CLI.
//!
//! Creates, updates, deletes and lists the project documents of a static-site
//! portfolio, placing images under `assets/images/projects/<slug>/` and
//! committing each change with git.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portfolio_admin::core::document::render;
use portfolio_admin::core::record::ProjectRecord;
use portfolio_admin::core::slug::slugify;
use portfolio_admin::create::create_project;
use portfolio_admin::delete::delete_project;
use portfolio_admin::exit_codes;
use portfolio_admin::io::assets::Upload;
use portfolio_admin::io::git::{NoPublish, Publisher, publisher_for};
use portfolio_admin::list::list_projects;
use portfolio_admin::logging;
use portfolio_admin::portfolio::Portfolio;
use portfolio_admin::show::load_project;
use portfolio_admin::update::update_project;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "portfolio-admin",
    version,
    about = "Manage the projects of a static-site portfolio"
)]
struct Cli {
    /// Site root containing `_projects/` and `assets/`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to `<root>/.portfolio-admin.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not commit or push after changing files.
    #[arg(long, global = true)]
    no_git: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List projects, newest first.
    List {
        /// Print JSON instead of one line per project.
        #[arg(long)]
        json: bool,
    },
    /// Print one project (JSON) with visuals reconciled against its images.
    Show { slug: String },
    /// Create a project from a TOML record and its images.
    Create {
        /// TOML file describing the project.
        #[arg(short, long)]
        input: PathBuf,
        /// Image files in visual order; the first is the hero.
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Replace a project; images not re-uploaded are kept.
    Update {
        slug: String,
        /// TOML file describing the project.
        #[arg(short, long)]
        input: PathBuf,
        /// Replacement image as `<position>=<path>` (0 is the hero).
        #[arg(long = "image", value_parser = parse_positional_image)]
        images: Vec<(usize, PathBuf)>,
    },
    /// Delete a project and its images.
    Delete { slug: String },
    /// Print the document a TOML record would produce, without writing it.
    Render {
        input: PathBuf,
        /// Slug used for asset paths (defaults to the title's slug).
        #[arg(long)]
        slug: Option<String>,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::for_error(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let portfolio = Portfolio::open(&cli.root, cli.config.as_deref())?;
    let publisher: Box<dyn Publisher> = if cli.no_git {
        Box::new(NoPublish)
    } else {
        publisher_for(portfolio.root(), &portfolio.config().git)
    };

    match cli.command {
        Command::List { json } => cmd_list(&portfolio, json),
        Command::Show { slug } => print_json(&load_project(&portfolio, &slug)?),
        Command::Create { input, images } => {
            let record = read_record(&input)?;
            let images = images
                .iter()
                .map(|path| read_image(path))
                .collect::<Result<Vec<_>>>()?;
            print_json(&create_project(
                &portfolio,
                publisher.as_ref(),
                record,
                &images,
            )?)
        }
        Command::Update {
            slug,
            input,
            images,
        } => {
            let record = read_record(&input)?;
            let uploads = images
                .iter()
                .map(|(position, path)| -> Result<Upload> {
                    Ok(Upload::new(*position, read_image(path)?))
                })
                .collect::<Result<Vec<_>>>()?;
            print_json(&update_project(
                &portfolio,
                publisher.as_ref(),
                &slug,
                record,
                &uploads,
            )?)
        }
        Command::Delete { slug } => {
            print_json(&delete_project(&portfolio, publisher.as_ref(), &slug)?)
        }
        Command::Render { input, slug } => {
            let record = read_record(&input)?.normalized();
            let slug = slug.unwrap_or_else(|| slugify(&record.title));
            print!("{}", render(&record, &slug)?);
            Ok(())
        }
        Command::Config => {
            print!(
                "{}",
                toml::to_string_pretty(portfolio.config()).context("serialize config")?
            );
            Ok(())
        }
    }
}

fn cmd_list(portfolio: &Portfolio, json: bool) -> Result<()> {
    let projects = list_projects(portfolio)?;
    if json {
        return print_json(&projects);
    }
    for project in projects {
        println!(
            "{}\t{}\t{}\t{}",
            project.date, project.slug, project.title, project.category
        );
    }
    Ok(())
}

fn read_record(path: &Path) -> Result<ProjectRecord> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read image {}", path.display()))
}

/// Serialize `value` to pretty-printed JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{payload}");
    Ok(())
}

fn parse_positional_image(arg: &str) -> Result<(usize, PathBuf), String> {
    let (position, path) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected <position>=<path>, got '{arg}'"))?;
    let position = position
        .trim()
        .parse()
        .map_err(|_| format!("invalid position '{position}'"))?;
    if path.is_empty() {
        return Err("image path must not be empty".to_string());
    }
    Ok((position, PathBuf::from(path)))
}
