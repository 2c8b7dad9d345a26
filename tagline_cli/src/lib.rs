use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Reflow, indent, and number text with composable tag pipelines.",
	long_about = "tagline applies a pipeline of text transforms to a file or to stdin.\n\nA \
	              pipeline is a `|`-separated list of steps, each a transform name with \
	              `:`-separated arguments. Steps run left to right.\n\nExamples:\n  tagline \
	              apply 'outdent|wrap:72' notes.txt\n  tagline apply 'numbering:roman:1' < \
	              list.txt\n  tagline list"
)]
pub struct TaglineCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory to search for `tagline.toml`. Defaults to the current
	/// directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Apply a pipeline to a file or stdin and print the result.
	///
	/// Step names are the built-in transforms (see `tagline list`) or
	/// pipelines named in `tagline.toml`. `numbering` steps start from the
	/// `[numbering]` defaults in config, with pipeline arguments taking
	/// precedence.
	Apply {
		/// The pipeline expression, e.g. `outdent|wrap:72|numbering:"roman"`.
		pipeline: String,

		/// File to read. Reads stdin when omitted.
		file: Option<PathBuf>,

		/// Print a diff of the input against the output instead of the output.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// List the built-in transforms, numeral schemes, and configured
	/// pipelines.
	List {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = ListOutputFormat::Text)]
		format: ListOutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListOutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
