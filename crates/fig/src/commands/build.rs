//! `fig build` command implementation.

use std::path::PathBuf;

use clap::Args;
use fig_config::{CliSettings, Config};
use fig_renderer::directive::DirectiveRegistry;
use fig_site::{BuildOptions, SiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover fig.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of render threads (overrides config).
    #[arg(short = 'j', long, env = "FIG_THREADS")]
    threads: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the site cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            threads: self.threads,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = &config.site_resolved;

        output.info(&format!("Source: {}", site.source_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let options = BuildOptions {
            extension: site.extension.clone(),
            gfm: config.render.gfm,
            extract_title: config.render.extract_title,
            threads: config.render.threads,
        };
        let builder = SiteBuilder::new(DirectiveRegistry::standard(), options);
        let report = builder.build(&site.source_dir, &site.output_dir)?;

        for warning in &report.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        output.success(&format!(
            "Built {} page(s) to {}",
            report.pages.len(),
            site.output_dir.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_with_explicit_config() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("fig.toml");
        fs::write(&config_path, "[site]\nsource_dir = \"pages\"\noutput_dir = \"out\"\n").unwrap();
        fs::create_dir(temp.path().join("pages")).unwrap();
        fs::write(
            temp.path().join("pages/index.md"),
            "# Home\n\nFigure :figure_number\n",
        )
        .unwrap();

        let args = BuildArgs {
            config: Some(config_path),
            source_dir: None,
            output_dir: None,
            threads: Some(1),
            verbose: false,
        };
        args.execute().unwrap();

        let html = fs::read_to_string(temp.path().join("out/index.html")).unwrap();
        assert!(html.contains("<p>Figure 2</p>"));
    }

    #[test]
    fn test_build_missing_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let args = BuildArgs {
            config: Some(temp.path().join("missing.toml")),
            source_dir: None,
            output_dir: None,
            threads: None,
            verbose: false,
        };
        let err = args.execute().unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(fig_config::ConfigError::NotFound(_))
        ));
        assert_eq!(
            err.to_string(),
            format!(
                "Configuration file not found: {}",
                temp.path().join("missing.toml").display()
            )
        );
    }
}
