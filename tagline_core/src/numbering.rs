//! Line numbering.
//!
//! [`numbering`] builds a tag that prefixes each normalized line with a
//! counter value. The caller's [`NumberingOptions`] are never touched: every
//! invocation derives a fresh [`ResolvedNumbering`] once the line count is
//! known, since the automatic pad width depends on it.

use serde::Deserialize;
use serde::Serialize;

use crate::Lines;
use crate::NumeralScheme;
use crate::Tag;

/// Signs used when every number shows one, indexed by `signum + 1`.
const SIGNS: [&str; 3] = ["-", "±", "+"];

/// Which set of default affixes to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberingStyle {
	/// `0: first line`
	#[default]
	Plain,
	/// `0 │ first line`, with the zero row drawn as a rule.
	LineArt,
}

impl NumberingStyle {
	fn suffix(self) -> &'static str {
		match self {
			Self::Plain => ": ",
			Self::LineArt => " │ ",
		}
	}

	fn zero_suffix(self) -> &'static str {
		match self {
			Self::Plain => ": ",
			Self::LineArt => "─┼─",
		}
	}

	/// A distinct fill for the zero row, or `None` to reuse the regular one.
	fn zero_pad(self) -> Option<&'static str> {
		match self {
			Self::Plain => None,
			Self::LineArt => Some("─"),
		}
	}
}

/// Caller-facing numbering configuration. Every field is optional; unset
/// fields are filled in by [`NumberingOptions::resolve`].
///
/// ```toml
/// [numbering]
/// style = "line-art"
/// scheme = "roman"
/// number_from = 1
/// sign_all = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberingOptions {
	/// First number. Defaults to 0. Lowered when the last line would pass
	/// `i64::MAX`.
	pub number_from: Option<i64>,
	pub prefix: Option<String>,
	pub suffix: Option<String>,
	/// Prefix for the row numbered 0. Defaults to `prefix`.
	pub zero_prefix: Option<String>,
	/// Suffix for the row numbered 0. Defaults to the style's zero suffix,
	/// or `suffix` when that is set.
	pub zero_suffix: Option<String>,
	/// Total width of the rendered number. `0` or unset computes it from the
	/// scheme and the numbers being rendered.
	pub pad_width: Option<usize>,
	/// Fill used for left padding. Defaults to a space.
	pub pad: Option<String>,
	/// Fill used on the row numbered 0. Defaults to `pad`, or a rule in the
	/// line-art style.
	pub zero_pad: Option<String>,
	pub scheme: Option<NumeralScheme>,
	/// Show a sign on every number, `±` for zero.
	pub sign_all: Option<bool>,
	pub style: Option<NumberingStyle>,
}

impl NumberingOptions {
	/// Fill every unset field from `fallback`.
	#[must_use]
	pub fn with_fallback(self, fallback: &NumberingOptions) -> Self {
		Self {
			number_from: self.number_from.or(fallback.number_from),
			prefix: self.prefix.or_else(|| fallback.prefix.clone()),
			suffix: self.suffix.or_else(|| fallback.suffix.clone()),
			zero_prefix: self.zero_prefix.or_else(|| fallback.zero_prefix.clone()),
			zero_suffix: self.zero_suffix.or_else(|| fallback.zero_suffix.clone()),
			pad_width: self.pad_width.or(fallback.pad_width),
			pad: self.pad.or_else(|| fallback.pad.clone()),
			zero_pad: self.zero_pad.or_else(|| fallback.zero_pad.clone()),
			scheme: self.scheme.or(fallback.scheme),
			sign_all: self.sign_all.or(fallback.sign_all),
			style: self.style.or(fallback.style),
		}
	}

	/// Apply the defaults for a run over `line_count` lines.
	pub fn resolve(&self, line_count: usize) -> ResolvedNumbering {
		let style = self.style.unwrap_or_default();
		let scheme = self.scheme.unwrap_or_default();
		// Lowered so the last row still fits in an i64.
		let span = i64::try_from(line_count.saturating_sub(1)).unwrap_or(i64::MAX);
		let number_from = self.number_from.unwrap_or(0).min(i64::MAX - span);
		let sign_all = self.sign_all.unwrap_or(false);

		let prefix = self.prefix.clone().unwrap_or_default();
		let suffix = self
			.suffix
			.clone()
			.unwrap_or_else(|| style.suffix().to_string());
		let zero_prefix = self.zero_prefix.clone().unwrap_or_else(|| prefix.clone());
		let zero_suffix = self.zero_suffix.clone().unwrap_or_else(|| {
			match &self.suffix {
				Some(suffix) => suffix.clone(),
				None => style.zero_suffix().to_string(),
			}
		});
		let pad = self.pad.clone().unwrap_or_else(|| " ".to_string());
		let zero_pad = self.zero_pad.clone().unwrap_or_else(|| {
			match style.zero_pad() {
				Some(fill) => fill.to_string(),
				None => pad.clone(),
			}
		});

		let last = number_from + span;
		let reserve_sign = sign_all || number_from < 0;
		let width = match self.pad_width {
			Some(width) if width > 0 => width,
			_ => {
				let magnitude = number_from.unsigned_abs().max(last.unsigned_abs());
				scheme.width(magnitude) + usize::from(reserve_sign)
			}
		};

		ResolvedNumbering {
			number_from,
			prefix,
			suffix,
			zero_prefix,
			zero_suffix,
			width,
			pad,
			zero_pad,
			scheme,
			sign_all,
			reserve_sign,
		}
	}
}

/// Numbering configuration with every default applied, valid for a single
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNumbering {
	pub number_from: i64,
	pub prefix: String,
	pub suffix: String,
	pub zero_prefix: String,
	pub zero_suffix: String,
	/// Total width of the number including any sign column.
	pub width: usize,
	pub pad: String,
	pub zero_pad: String,
	pub scheme: NumeralScheme,
	pub sign_all: bool,
	/// Whether a column is kept for the sign.
	pub reserve_sign: bool,
}

impl ResolvedNumbering {
	fn sign(&self, value: i64) -> &'static str {
		if self.sign_all {
			// signum is -1, 0 or 1, so the index is always 0..=2.
			SIGNS[(value.signum() + 1) as usize]
		} else if value < 0 {
			"-"
		} else {
			""
		}
	}

	/// Render `value` with its sign, padded to the configured width.
	pub fn render_number(&self, value: i64) -> String {
		let fill = if value == 0 { &self.zero_pad } else { &self.pad };
		let sign = self.sign(value);
		let digits = self.scheme.encode(value.unsigned_abs());

		if is_numeric_fill(fill) {
			// Pad the digits alone so the sign stays attached to them.
			let digit_width = self.width.saturating_sub(usize::from(self.reserve_sign));
			let padded = pad_start(&digits, digit_width, fill);
			let sign = if sign.is_empty() && self.reserve_sign {
				" "
			} else {
				sign
			};
			format!("{sign}{padded}")
		} else {
			pad_start(&format!("{sign}{digits}"), self.width, fill)
		}
	}

	/// The full prefix placed before a line numbered `value`.
	pub fn render_row(&self, value: i64) -> String {
		let number = self.render_number(value);

		if value == 0 {
			format!("{}{number}{}", self.zero_prefix, self.zero_suffix)
		} else {
			format!("{}{number}{}", self.prefix, self.suffix)
		}
	}
}

/// Per-invocation line counter. Yields the row prefix for the current value
/// and then advances by one.
#[derive(Debug)]
pub struct Counter<'a> {
	value: i64,
	numbering: &'a ResolvedNumbering,
}

impl<'a> Counter<'a> {
	pub fn new(numbering: &'a ResolvedNumbering) -> Self {
		Self {
			value: numbering.number_from,
			numbering,
		}
	}

	pub fn value(&self) -> i64 {
		self.value
	}
}

impl Iterator for Counter<'_> {
	type Item = String;

	fn next(&mut self) -> Option<Self::Item> {
		let row = self.numbering.render_row(self.value);
		self.value = self.value.saturating_add(1);
		Some(row)
	}
}

/// A tag that numbers every normalized line.
pub fn numbering(options: NumberingOptions) -> Tag {
	Tag::from_text_fn("numbering", move |text| number_lines(text, &options))
}

pub fn number_lines(text: &str, options: &NumberingOptions) -> String {
	let lines = Lines::split(text);
	let resolved = options.resolve(lines.len());
	tracing::debug!(?resolved, lines = lines.len(), "numbering lines");

	Counter::new(&resolved)
		.zip(lines.iter())
		.map(|(row, line)| format!("{row}{line}"))
		.collect::<Vec<_>>()
		.join("\n")
}

/// A fill counts as numeric when it is made only of ASCII digits, like `0`.
fn is_numeric_fill(fill: &str) -> bool {
	!fill.is_empty() && fill.chars().all(|ch| ch.is_ascii_digit())
}

/// Left-pad `text` to `width` characters by repeating `fill`, truncating the
/// last repetition when it does not fit.
fn pad_start(text: &str, width: usize, fill: &str) -> String {
	let length = text.chars().count();
	if length >= width || fill.is_empty() {
		return text.to_string();
	}

	let mut padded: String = fill.chars().cycle().take(width - length).collect();
	padded.push_str(text);
	padded
}
