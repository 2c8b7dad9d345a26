//! The line-oriented transform library.
//!
//! Every constructor here returns a [`Tag`]. Apart from `identity` and `raw`
//! the transforms merge their template, normalize it with [`Lines::split`],
//! and then apply their rule. None of them fail: empty input, empty
//! templates, and zero or negative widths all produce ordinary text.

use crate::Lines;
use crate::Tag;
use crate::Template;
use crate::lines::indentation;
use crate::lines::is_blank;
use crate::lines::strip_leading;

/// Merge segments and values and nothing more.
pub fn identity() -> Tag {
	Tag::new("identity", Template::merge)
}

/// Merge the raw segments, leaving escape sequences as written.
pub fn raw() -> Tag {
	Tag::new("raw", Template::merge_raw)
}

/// Keep the non-blank lines, one per paragraph.
pub fn paragraph() -> Tag {
	Tag::from_text_fn("paragraph", paragraph_text)
}

/// Remove every line break.
pub fn fold() -> Tag {
	Tag::from_text_fn("fold", fold_text)
}

/// Trim every line on both sides.
pub fn flush() -> Tag {
	Tag::from_text_fn("flush", flush_text)
}

/// Remove the indentation common to all non-blank lines.
pub fn outdent() -> Tag {
	Tag::from_text_fn("outdent", outdent_text)
}

/// Add `amount` spaces to every line, or when negative remove up to
/// `-amount` characters of common indentation.
pub fn indent(amount: i32) -> Tag {
	Tag::from_text_fn(format!("indent:{amount}"), move |text| {
		indent_text(text, amount)
	})
}

/// Reflow text to `width` columns, keeping indentation.
pub fn wrap(width: i32) -> Tag {
	Tag::from_text_fn(format!("wrap:{width}"), move |text| wrap_text(text, width))
}

pub fn paragraph_text(text: &str) -> String {
	Lines::split(text)
		.iter()
		.filter(|line| !is_blank(line))
		.map(String::as_str)
		.collect::<Vec<_>>()
		.join("\n\n")
}

pub fn fold_text(text: &str) -> String {
	Lines::split(text).concat()
}

pub fn flush_text(text: &str) -> String {
	Lines::split(text)
		.iter()
		.map(|line| line.trim())
		.collect::<Vec<_>>()
		.join("\n")
}

pub fn outdent_text(text: &str) -> String {
	let lines = Lines::split(text);
	let common = lines.min_indentation_or_zero();
	strip_all(&lines, common)
}

pub fn indent_text(text: &str, amount: i32) -> String {
	let lines = Lines::split(text);

	if amount >= 0 {
		let pad = " ".repeat(amount.unsigned_abs() as usize);
		return lines
			.iter()
			.map(|line| format!("{pad}{line}"))
			.collect::<Vec<_>>()
			.join("\n");
	}

	let requested = amount.unsigned_abs() as usize;
	let removable = requested.min(lines.min_indentation_or_zero());
	strip_all(&lines, removable)
}

fn strip_all(lines: &Lines, count: usize) -> String {
	lines
		.iter()
		.map(|line| strip_leading(line, count))
		.collect::<Vec<_>>()
		.join("\n")
}

/// A logical line in [`wrap_text`]: the width of its indentation and the
/// content after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentedLine {
	pub indentation: usize,
	/// The leading whitespace as written on the first source line, `indentation`
	/// characters long. Every physical line of the output starts with it.
	pub lead: String,
	pub text: String,
}

impl IndentedLine {
	fn blank() -> Self {
		Self::default()
	}

	fn is_blank(&self) -> bool {
		self.text.is_empty()
	}
}

pub fn wrap_text(text: &str, width: i32) -> String {
	let width = usize::try_from(width).unwrap_or(0);
	let logical = logical_lines(&Lines::split(text));
	tracing::trace!(width, logical_lines = logical.len(), "wrapping");

	logical
		.iter()
		.flat_map(|line| split_to_width(line, width))
		.collect::<Vec<_>>()
		.join("\n")
}

/// Merge runs of consecutive lines that share an indentation width. A blank
/// line becomes its own unindented logical line and ends any run.
pub fn logical_lines(lines: &Lines) -> Vec<IndentedLine> {
	let mut logical: Vec<IndentedLine> = Vec::new();
	let mut merging = false;

	for line in lines.iter() {
		if is_blank(line) {
			logical.push(IndentedLine::blank());
			merging = false;
			continue;
		}

		let width = indentation(line);
		let lead: String = line.chars().take(width).collect();
		let content = strip_leading(line, width);

		match logical.last_mut() {
			Some(current) if merging && current.indentation == width => {
				current.text.push(' ');
				current.text.push_str(&content);
			}
			_ => {
				logical.push(IndentedLine {
					indentation: width,
					lead,
					text: content,
				});
				merging = true;
			}
		}
	}

	logical
}

fn split_to_width(line: &IndentedLine, width: usize) -> Vec<String> {
	if line.is_blank() {
		return vec![String::new()];
	}

	let mut physical = Vec::new();
	let mut rest: Vec<char> = line.lead.chars().chain(line.text.chars()).collect();

	while rest.len() > width {
		let Some(at) = break_point(&rest, line.indentation, width) else {
			break;
		};

		physical.push(rest[..at].iter().collect());
		rest = line
			.lead
			.chars()
			.chain(rest[at + 1..].iter().copied())
			.collect();
	}

	physical.push(rest.into_iter().collect());
	physical
}

/// Where to break `chars`: the last space at or before column `width`, else
/// the first space after it. Spaces inside the indentation never count.
fn break_point(chars: &[char], indentation: usize, width: usize) -> Option<usize> {
	let last = chars.len().checked_sub(1)?;
	let earliest = indentation + 1;

	(earliest..=width.min(last))
		.rev()
		.find(|&index| chars[index] == ' ')
		.or_else(|| (width.max(earliest)..=last).find(|&index| chars[index] == ' '))
}
