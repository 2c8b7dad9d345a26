use derive_more::Deref;
use derive_more::DerefMut;

/// Text split into normalized lines. Every line-oriented transform starts
/// from this shape.
///
/// Normalization trims trailing whitespace, folds each run of whitespace
/// after the first non-whitespace character into a single space, and keeps
/// at most one blank line between two non-blank lines. Leading whitespace is
/// left untouched since indentation analysis depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Lines(
	#[deref]
	#[deref_mut]
	Vec<String>,
);

impl Lines {
	/// Split and normalize `text`.
	pub fn split(text: &str) -> Self {
		let mut lines: Vec<String> = Vec::new();

		for raw in text.split('\n') {
			let line = normalize_line(raw);

			// The first line is always kept, blank or not. After that a blank
			// line survives only when it follows a non-blank one.
			if line.is_empty() && lines.last().is_some_and(String::is_empty) {
				continue;
			}

			lines.push(line);
		}

		Self(lines)
	}

	/// The smallest indentation among the non-blank lines, or `None` when
	/// every line is blank.
	pub fn min_indentation(&self) -> Option<usize> {
		min_indentation(&self.0)
	}

	/// Like [`Lines::min_indentation`], with the all-blank case read as 0.
	pub fn min_indentation_or_zero(&self) -> usize {
		self.min_indentation().unwrap_or(0)
	}

	pub fn into_inner(self) -> Vec<String> {
		self.0
	}
}

/// Split `text` into normalized lines. See [`Lines`].
pub fn split_lines(text: &str) -> Lines {
	Lines::split(text)
}

/// Minimum count of leading whitespace characters across the lines that
/// carry content. Returns `None` when there are no such lines.
pub fn min_indentation<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
	lines
		.iter()
		.map(AsRef::as_ref)
		.filter(|line| !is_blank(line))
		.map(indentation)
		.min()
}

/// Number of leading whitespace characters in `line`.
pub fn indentation(line: &str) -> usize {
	line.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// A line is blank when it has no non-whitespace content.
pub fn is_blank(line: &str) -> bool {
	line.trim().is_empty()
}

/// Drop the first `count` characters of `line`. Lines shorter than `count`
/// become empty.
pub fn strip_leading(line: &str, count: usize) -> String {
	line.chars().skip(count).collect()
}

fn normalize_line(raw: &str) -> String {
	let trimmed = raw.trim_end();
	let body_start = trimmed.len() - trimmed.trim_start().len();
	let (leading, body) = trimmed.split_at(body_start);

	let mut line = String::with_capacity(trimmed.len());
	line.push_str(leading);

	let mut in_gap = false;
	for ch in body.chars() {
		if ch.is_whitespace() {
			in_gap = true;
			continue;
		}

		if in_gap {
			line.push(' ');
			in_gap = false;
		}

		line.push(ch);
	}

	line
}
