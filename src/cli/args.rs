//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Open Graph image generator for blog posts
#[derive(Parser, Debug, Clone)]
#[command(name = "og-image", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: og.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "og.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate images for every post (or the given post files)
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Render one image from explicit metadata
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },

    /// Write a default og.toml
    #[command(visible_alias = "i")]
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// List font families available for rendering
    Fonts,
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Post files to generate. If omitted, scans the posts directory.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub paths: Vec<PathBuf>,

    /// Build environment; generation is skipped for `build.skip_envs`
    #[arg(short, long, env = "OG_ENV", default_value = "development")]
    pub env: String,

    /// Print what would be generated without writing anything
    #[arg(short, long)]
    pub dry: bool,
}

/// Render command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Title text
    #[arg(short, long)]
    pub title: String,

    /// Post date (YYYY-MM-DD); omitted from the image when unset
    #[arg(short, long)]
    pub date: Option<String>,

    /// Tag, repeatable
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Output image path; the format follows the extension
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: PathBuf,
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::parse_from(["og-image", "g", "--env", "production", "--dry", "a.md", "b.md"]);
        let Commands::Generate { args } = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.env, "production");
        assert!(args.dry);
        assert_eq!(args.paths, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert_eq!(cli.config, PathBuf::from("og.toml"));
    }

    #[test]
    fn test_render_args() {
        let cli = Cli::parse_from([
            "og-image", "render", "--title", "Hello", "--tag", "rust", "--tag", "web", "-o", "out.png",
            "-C", "site/og.toml",
        ]);
        let Commands::Render { args } = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.title, "Hello");
        assert_eq!(args.date, None);
        assert_eq!(args.tags, vec!["rust", "web"]);
        assert_eq!(args.output, PathBuf::from("out.png"));
        assert_eq!(cli.config, PathBuf::from("site/og.toml"));
    }

    #[test]
    fn test_init_is_init() {
        let cli = Cli::parse_from(["og-image", "init", "--force"]);
        assert!(cli.is_init());
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}
