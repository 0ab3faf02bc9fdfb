use clap::{Parser, Subcommand};
use mdblog::{config, deploy, generate, output, package, tree};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mdblog")]
#[command(about = "Static blog generator for Markdown content trees")]
#[command(long_about = "\
Static blog generator for Markdown content trees

Your filesystem is the data source. A directory with an index.md is an
article, a directory without one is a category, and any other file is
copied through unchanged.

Content structure:

  blog/
  ├── config.toml                  # Site config (optional; see gen-config)
  ├── about/
  │   └── index.md                 # Article: rendered to about/index.html
  ├── posts/                       # Category: gets a generated index.html
  │   ├── first-post/
  │   │   ├── index.md             # Front matter (title/date/summary) + body
  │   │   └── diagram.png          # Copied next to the rendered page
  │   └── second-post/
  │       └── index.md
  └── images/                      # Assets: copied, no index page

Category listings show sub-categories first (name order), then articles
newest-first by their front-matter date.

Publishing archives the output with its internal root renamed to the
configured alias, uploads it over scp, and swaps it live under sudo,
keeping the previous version as <live_dir>.bak.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "blog", global = true)]
    source: PathBuf,

    /// Output directory (deleted and rebuilt on every build)
    #[arg(long, default_value = "public", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the site into the output directory
    Build,
    /// Archive the generated output into site.tar.gz
    Package,
    /// Upload the archive and swap it live on the remote host
    Deploy,
    /// Run the full pipeline: build → package → deploy
    Publish,
    /// Walk and classify the content tree without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.source)?;

    match cli.command {
        Command::Build => {
            run_build(&cli, &config)?;
        }
        Command::Package => {
            run_package(&cli, &config)?;
        }
        Command::Deploy => {
            run_deploy(&cli, &config)?;
        }
        Command::Publish => {
            run_build(&cli, &config)?;
            let archive = run_package(&cli, &config)?;
            run_deploy(&cli, &config)?;
            println!("==> Published {}", archive.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let tree = tree::build(&cli.source, &cli.output, &config.ignore)?;
            output::print_tree(&tree);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_build(cli: &Cli, config: &config::SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "==> Building {} → {}",
        cli.source.display(),
        cli.output.display()
    );
    let mut tree = tree::build(&cli.source, &cli.output, &config.ignore)?;
    output::print_tree(&tree);

    let summary = generate::generate(&mut tree, &config.assets_dir)?;
    let styles = styles_path(&cli.source, &config.styles_dir);
    if generate::copy_styles(&styles, &cli.output)? {
        println!("Copied stylesheets from {}", styles.display());
    }
    output::print_generate_summary(&summary);
    Ok(())
}

fn run_package(
    cli: &Cli,
    config: &config::SiteConfig,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    println!("==> Packaging {}", cli.output.display());
    let summary = package::package(&cli.output, &config.archive.alias)?;
    println!(
        "Packaged {} files into {} (as {}/)",
        summary.files,
        summary.archive.display(),
        config.archive.alias
    );
    Ok(summary.archive)
}

fn run_deploy(cli: &Cli, config: &config::SiteConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate_for_deploy()?;
    let archive = package::archive_path(&cli.output);
    println!(
        "==> Deploying {} to {}",
        archive.display(),
        config.remote.host
    );
    deploy::deploy(&archive, &config.remote, &config.archive.alias)?;
    println!(
        "==> Live at {}/{}",
        config.remote.web_root, config.remote.live_dir
    );
    Ok(())
}

/// The stylesheet directory lives next to the content root.
fn styles_path(source: &Path, styles_dir: &str) -> PathBuf {
    source
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(styles_dir)
}
