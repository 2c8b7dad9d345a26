use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tagline_cli::Commands;
use tagline_cli::ListOutputFormat;
use tagline_cli::TaglineCli;
use tagline_core::AnyEmptyResult;
use tagline_core::AnyResult;
use tagline_core::NumeralScheme;
use tagline_core::TagError;
use tagline_core::TaglineConfig;
use tagline_core::pipeline::BUILTIN_TRANSFORMS;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Paint `$text` with an `OwoColorize` method, or leave it plain when color is
/// off.
macro_rules! colored {
	($text:expr, $paint:ident) => {
		if color_enabled() {
			format!("{}", $text.$paint())
		} else {
			format!("{}", $text)
		}
	};
}

/// Sample magnitudes shown for each scheme in `tagline list`.
const SCHEME_SAMPLE: [u64; 4] = [1, 2, 3, 4];

fn main() {
	let args = TaglineCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_logging(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Apply {
			pipeline,
			file,
			diff,
		}) => run_apply(&args, pipeline, file.as_ref(), *diff),
		Some(Commands::List { format }) => run_list(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `tagline --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<TagError>() {
			Ok(tag_err) => {
				let report: miette::Report = (*tag_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so they never mix with transformed output. `RUST_LOG`
/// overrides the level picked by `--verbose`.
fn init_logging(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(verbose)
		.init();
}

fn resolve_root(args: &TaglineCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &TaglineCli) -> AnyResult<TaglineConfig> {
	let root = resolve_root(args);
	let config = TaglineConfig::load(&root)?;

	if config.is_none() {
		tracing::debug!(root = %root.display(), "no config file found, using defaults");
	}

	Ok(config.unwrap_or_default())
}

fn read_input(file: Option<&PathBuf>) -> AnyResult<String> {
	let input = match file {
		Some(path) => std::fs::read_to_string(path).map_err(TagError::from)?,
		None => {
			let mut buffer = String::new();
			std::io::stdin()
				.read_to_string(&mut buffer)
				.map_err(TagError::from)?;
			buffer
		}
	};

	Ok(input)
}

fn run_apply(
	args: &TaglineCli,
	pipeline: &str,
	file: Option<&PathBuf>,
	diff: bool,
) -> AnyEmptyResult {
	let config = load_config(args)?;
	let tag = config.pipeline(pipeline)?;
	tracing::debug!(tag = %tag, "built pipeline");

	let input = read_input(file)?;
	// The final newline terminates the last line rather than starting an
	// empty one.
	let body = input.strip_suffix('\n').unwrap_or(&input);
	let output = tag.text(body);

	if diff {
		print_diff(&format!("{body}\n"), &format!("{output}\n"));
	} else {
		println!("{output}");
	}

	Ok(())
}

#[derive(Serialize)]
struct SchemeReport {
	key: &'static str,
	sample: Vec<String>,
}

#[derive(Serialize)]
struct ListReport<'a> {
	transforms: &'a [&'static str],
	schemes: Vec<SchemeReport>,
	pipelines: &'a BTreeMap<String, String>,
}

fn run_list(args: &TaglineCli, format: ListOutputFormat) -> AnyEmptyResult {
	let config = load_config(args)?;
	let schemes: Vec<SchemeReport> = NumeralScheme::ALL
		.iter()
		.map(|scheme| {
			SchemeReport {
				key: scheme.key(),
				sample: SCHEME_SAMPLE
					.iter()
					.map(|&magnitude| scheme.encode(magnitude))
					.collect(),
			}
		})
		.collect();

	match format {
		ListOutputFormat::Json => {
			let report = ListReport {
				transforms: &BUILTIN_TRANSFORMS,
				schemes,
				pipelines: &config.pipelines,
			};
			println!("{}", serde_json::to_string_pretty(&report)?);
		}
		ListOutputFormat::Text => {
			println!("{}", colored!("Transforms:", bold));
			for name in BUILTIN_TRANSFORMS {
				println!("  {name}");
			}

			println!();
			println!("{}", colored!("Schemes:", bold));
			for scheme in &schemes {
				println!("  {:<8} {}", scheme.key, scheme.sample.join(" "));
			}

			println!();
			println!("{}", colored!("Pipelines:", bold));
			if config.pipelines.is_empty() {
				println!("  (none)");
			}
			for (name, source) in &config.pipelines {
				println!("  {name} = {source}");
			}
		}
	}

	Ok(())
}

/// Print a line diff between two strings, colorized.
fn print_diff(before: &str, after: &str) {
	let diff = TextDiff::from_lines(before, after);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("{}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("{}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!(" {change}");
			}
		}
	}
}
