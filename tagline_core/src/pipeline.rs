//! Pipeline expressions: `outdent|wrap:72|numbering:"roman"`.
//!
//! A pipeline is a `|`-delimited list of steps, each a transform name with
//! `:`-delimited arguments. Steps run left to right, so `a|b|c` builds the
//! composite tag `c(b(a))`.

use logos::Logos;
use snailquote::unescape;

use crate::NumberingOptions;
use crate::Tag;
use crate::TagError;
use crate::TagResult;
use crate::TaglineConfig;
use crate::compose;
use crate::numbering::numbering;
use crate::transforms;

/// Raw tokens produced by logos.
#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
	#[token("|")]
	Pipe,
	#[token(":")]
	ArgumentDelimiter,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
	Ident,
	#[regex(r#""([^"\\]|\\.)*""#)]
	DoubleQuotedString,
	#[regex(r"'[^']*'")]
	SingleQuotedString,
	#[regex(r"[+-]?[0-9]+")]
	Int,
}

/// A pipeline token together with its byte offset in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub kind: TokenKind,
	pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
	/// `|`
	Pipe,
	/// `:`
	ArgumentDelimiter,
	/// A transform name, e.g. `wrap`. Also accepted as a bare string
	/// argument, as in `numbering:roman`.
	Ident(String),
	/// A quoted string with its quotes removed and escapes processed.
	String(String),
	/// An integer, e.g. `-2`.
	Int(i64),
}

/// An argument passed to a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
	String(String),
	Int(i64),
}

impl std::fmt::Display for Argument {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(value) => write!(f, "{value:?}"),
			Self::Int(value) => write!(f, "{value}"),
		}
	}
}

/// One `name:arg:arg` step of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStep {
	pub name: String,
	pub args: Vec<Argument>,
	/// Byte offset of the step name in the pipeline source.
	pub offset: usize,
}

/// A parsed pipeline expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
	pub steps: Vec<PipelineStep>,
}

/// Split a pipeline expression into tokens.
pub fn tokenize(source: &str) -> TagResult<Vec<Token>> {
	let mut tokens = Vec::new();

	for (result, span) in RawToken::lexer(source).spanned() {
		let slice = &source[span.clone()];
		let offset = span.start;

		let Ok(raw) = result else {
			return Err(syntax_error(offset, format!("unexpected `{slice}`")));
		};

		let kind = match raw {
			RawToken::Pipe => TokenKind::Pipe,
			RawToken::ArgumentDelimiter => TokenKind::ArgumentDelimiter,
			RawToken::Ident => TokenKind::Ident(slice.to_string()),
			RawToken::DoubleQuotedString => TokenKind::String(unquote(slice, offset)?),
			RawToken::SingleQuotedString => {
				TokenKind::String(slice[1..slice.len() - 1].to_string())
			}
			RawToken::Int => {
				let value = slice
					.parse::<i64>()
					.map_err(|e| syntax_error(offset, e.to_string()))?;
				TokenKind::Int(value)
			}
		};

		tokens.push(Token { kind, offset });
	}

	Ok(tokens)
}

/// Strip the quotes from a double-quoted token and process its escapes.
/// Single-quoted strings are taken literally.
fn unquote(slice: &str, offset: usize) -> TagResult<String> {
	let inner = &slice[1..slice.len() - 1];

	if !inner.contains('\\') {
		return Ok(inner.to_string());
	}

	unescape(slice).map_err(|e| syntax_error(offset, e.to_string()))
}

fn syntax_error(offset: usize, reason: impl Into<String>) -> TagError {
	TagError::PipelineSyntax {
		offset,
		reason: reason.into(),
	}
}

/// Where the parser is within the current step.
#[derive(Clone, Copy)]
enum ParserState {
	/// Expecting a step name.
	Name,
	/// After a step name or argument; expecting `:`, `|` or the end.
	AfterStep,
	/// After `:`; expecting an argument.
	Argument,
}

impl Pipeline {
	/// Parse `source` into steps.
	pub fn parse(source: &str) -> TagResult<Self> {
		let tokens = tokenize(source)?;
		let mut steps: Vec<PipelineStep> = Vec::new();
		let mut state = ParserState::Name;

		for token in tokens {
			match (state, token.kind) {
				(ParserState::Name, TokenKind::Ident(name)) => {
					steps.push(PipelineStep {
						name,
						args: Vec::new(),
						offset: token.offset,
					});
					state = ParserState::AfterStep;
				}
				(ParserState::Name, _) => {
					return Err(syntax_error(token.offset, "expected a transform name"));
				}
				(ParserState::AfterStep, TokenKind::Pipe) => state = ParserState::Name,
				(ParserState::AfterStep, TokenKind::ArgumentDelimiter) => {
					state = ParserState::Argument;
				}
				(ParserState::AfterStep, _) => {
					return Err(syntax_error(token.offset, "expected `|` or `:`"));
				}
				(ParserState::Argument, kind) => {
					let argument = match kind {
						TokenKind::Ident(value) | TokenKind::String(value) => {
							Argument::String(value)
						}
						TokenKind::Int(value) => Argument::Int(value),
						TokenKind::Pipe | TokenKind::ArgumentDelimiter => {
							return Err(syntax_error(token.offset, "expected an argument"));
						}
					};

					// A step was pushed before entering the argument state.
					if let Some(step) = steps.last_mut() {
						step.args.push(argument);
					}
					state = ParserState::AfterStep;
				}
			}
		}

		match state {
			ParserState::AfterStep => Ok(Self { steps }),
			ParserState::Name | ParserState::Argument => {
				Err(syntax_error(source.len(), "unexpected end of pipeline"))
			}
		}
	}

	/// Build the composed tag. Step names that are not built-in transforms
	/// are looked up among the named pipelines in `config`.
	pub fn build(&self, config: &TaglineConfig) -> TagResult<Tag> {
		self.build_inner(config, &mut Vec::new())
	}

	fn build_inner(&self, config: &TaglineConfig, stack: &mut Vec<String>) -> TagResult<Tag> {
		let tags = self
			.steps
			.iter()
			.map(|step| build_step(step, config, stack))
			.collect::<TagResult<Vec<_>>>()?;

		Ok(compose(tags))
	}
}

/// Parse and build `source` in one go.
pub fn build_pipeline(source: &str, config: &TaglineConfig) -> TagResult<Tag> {
	Pipeline::parse(source)?.build(config)
}

/// Names of the built-in transforms, in the order they are listed.
pub const BUILTIN_TRANSFORMS: [&str; 9] = [
	"identity",
	"raw",
	"paragraph",
	"fold",
	"flush",
	"outdent",
	"indent",
	"wrap",
	"numbering",
];

fn build_step(
	step: &PipelineStep,
	config: &TaglineConfig,
	stack: &mut Vec<String>,
) -> TagResult<Tag> {
	tracing::trace!(step = %step.name, args = step.args.len(), "building pipeline step");

	let tag = match step.name.as_str() {
		"identity" => {
			expect_args(step, 0, 0)?;
			transforms::identity()
		}
		"raw" => {
			expect_args(step, 0, 0)?;
			transforms::raw()
		}
		"paragraph" => {
			expect_args(step, 0, 0)?;
			transforms::paragraph()
		}
		"fold" => {
			expect_args(step, 0, 0)?;
			transforms::fold()
		}
		"flush" => {
			expect_args(step, 0, 0)?;
			transforms::flush()
		}
		"outdent" => {
			expect_args(step, 0, 0)?;
			transforms::outdent()
		}
		"indent" => {
			expect_args(step, 1, 1)?;
			transforms::indent(int_arg(step, 0)?)
		}
		"wrap" => {
			expect_args(step, 1, 1)?;
			transforms::wrap(int_arg(step, 0)?)
		}
		"numbering" => {
			expect_args(step, 0, 2)?;
			let mut options = NumberingOptions::default();

			for arg in &step.args {
				match arg {
					Argument::String(key) => options.scheme = Some(key.parse()?),
					Argument::Int(start) => options.number_from = Some(*start),
				}
			}

			numbering(options.with_fallback(&config.numbering))
		}
		name => {
			let Some(source) = config.pipelines.get(name) else {
				return Err(TagError::UnknownTransform(name.to_string()));
			};

			expect_args(step, 0, 0)?;

			if stack.iter().any(|entered| entered == name) {
				return Err(TagError::PipelineCycle(name.to_string()));
			}

			stack.push(name.to_string());
			let tag = Pipeline::parse(source)?.build_inner(config, stack)?;
			stack.pop();
			tag
		}
	};

	Ok(tag)
}

fn expect_args(step: &PipelineStep, min: usize, max: usize) -> TagResult<()> {
	let got = step.args.len();
	if got >= min && got <= max {
		return Ok(());
	}

	let expected = if min == max {
		format!("{min}")
	} else {
		format!("{min}-{max}")
	};

	Err(TagError::InvalidTransformArgs {
		name: step.name.clone(),
		expected,
		got,
	})
}

fn int_arg(step: &PipelineStep, index: usize) -> TagResult<i32> {
	match step.args.get(index) {
		Some(Argument::Int(value)) => {
			Ok((*value).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
		}
		Some(other) => {
			Err(TagError::InvalidTransformArgType {
				name: step.name.clone(),
				value: other.to_string(),
			})
		}
		None => {
			Err(TagError::InvalidTransformArgs {
				name: step.name.clone(),
				expected: format!("{}", index + 1),
				got: step.args.len(),
			})
		}
	}
}
