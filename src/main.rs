use clap::{Parser, Subcommand};
use polydocs::paths::{Env, ProjectPaths};
use polydocs::pipeline::{self, BuildOptions};
use polydocs::site::{self, MkdocsCli};
use polydocs::{output, serve, vcs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "polydocs")]
#[command(about = "Config generator and build driver for multi-language documentation sites")]
#[command(long_about = "\
Config generator and build driver for multi-language documentation sites

One base template plus one multilingual custom file produce one resolved site
config per language, with navigation, translations, PDF export, and asset
paths kept consistent across all of them.

Project structure:

  conf/
  ├── base.yml                 # Generation defaults shared by every language
  ├── custom.yml               # Translations + site identity, keyed by language
  └── mkdocs-<lang>.yml        # Generated, one per language
  page/
  ├── assets/                  # Shared static assets → copied into site/assets
  └── docs/
      ├── docs-<lang>/         # Authored sources, one tree per language
      └── fixed-docs-<lang>/   # Generated (templated copy)
  site/                        # Generated site: root = default language,
                               # /<lang> subtree for every other
  .github/workflows/page.yml   # CI workflow; CONFIG_FILES line is managed

The declared language order (site_name keys in custom.yml) drives everything:
config output order, the CI config list, and the full-then-incremental site
build sequence.")]
#[command(version)]
struct Cli {
    /// Project root directory
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive one resolved site config per language
    BuildConfig {
        /// Environment the language switcher links target
        #[arg(long, value_enum, default_value = "local")]
        env: Env,
        /// Leave the CI workflow file untouched
        #[arg(long)]
        skip_workflow: bool,
    },
    /// Build the static site from the generated configs
    BuildSite {
        /// Site renderer binary to shell out to
        #[arg(long, default_value = "mkdocs")]
        renderer: PathBuf,
    },
    /// Serve the generated site locally
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = serve::DEFAULT_PORT)]
        port: u16,
    },
    /// Point conf/custom.yml and the README at this repository
    Init,
    /// Rebase local history onto the upstream template
    UpdateTemplate {
        /// Template repository to pull from
        #[arg(long, default_value = vcs::TEMPLATE_REPO)]
        upstream: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let paths = ProjectPaths::new(&cli.project);

    match cli.command {
        Command::BuildConfig { env, skip_workflow } => {
            println!("==> Generating configs from {}", paths.conf_dir.display());
            let options = BuildOptions { env, skip_workflow };
            let report = pipeline::build_configs(&paths, options)?;
            output::print_build_config(&report, &paths.root);
        }
        Command::BuildSite { renderer } => {
            println!("==> Building site into {}", paths.site_dir.display());
            let renderer = MkdocsCli::new(renderer);
            let builds = site::build_site(&paths, &renderer)?;
            output::print_build_site(&builds);
        }
        Command::Serve { port } => {
            serve::serve(&paths.site_dir, port)?;
        }
        Command::Init => {
            println!("==> Initializing {}", paths.root.display());
            let summary = vcs::init_project(&paths)?;
            output::print_init(&summary);
        }
        Command::UpdateTemplate { upstream } => {
            println!("==> Updating from {upstream}");
            vcs::update_from_template(&paths.root, &upstream)?;
            println!("==> Template update complete");
        }
    }

    Ok(())
}
