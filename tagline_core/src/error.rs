use miette::Diagnostic;
use thiserror::Error;

/// Failures at the edges of the engine. Transforms themselves never fail;
/// these cover the places where text from the outside world names things:
/// numeral scheme keys, pipeline expressions, and configuration files.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum TagError {
	#[error(transparent)]
	#[diagnostic(code(tagline::io_error))]
	Io(#[from] std::io::Error),

	#[error("unknown numeral scheme: `{0}`")]
	#[diagnostic(
		code(tagline::unknown_scheme),
		help("available schemes: digit, Digit, sub, alpha, Alpha, roman, Roman")
	)]
	UnknownScheme(String),

	#[error("invalid pipeline at offset {offset}: {reason}")]
	#[diagnostic(
		code(tagline::pipeline_syntax),
		help("pipelines look like `outdent|wrap:72|numbering:\"roman\"`")
	)]
	PipelineSyntax { offset: usize, reason: String },

	#[error("unknown transform: `{0}`")]
	#[diagnostic(
		code(tagline::unknown_transform),
		help(
			"available transforms: identity, raw, paragraph, fold, flush, outdent, indent, wrap, \
			 numbering, or a pipeline named in tagline.toml"
		)
	)]
	UnknownTransform(String),

	#[error("transform `{name}` expects {expected} argument(s), got {got}")]
	#[diagnostic(code(tagline::invalid_transform_args))]
	InvalidTransformArgs {
		name: String,
		expected: String,
		got: usize,
	},

	#[error("transform `{name}` expects an integer argument, got `{value}`")]
	#[diagnostic(code(tagline::invalid_transform_arg_type))]
	InvalidTransformArgType { name: String, value: String },

	#[error("pipeline `{0}` refers to itself")]
	#[diagnostic(
		code(tagline::pipeline_cycle),
		help("named pipelines in tagline.toml may use each other but must not form a loop")
	)]
	PipelineCycle(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(tagline::config_parse),
		help("check that tagline.toml is valid TOML with [numbering] and/or [pipelines] sections")
	)]
	ConfigParse(String),
}

pub type TagResult<T> = Result<T, TagError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
