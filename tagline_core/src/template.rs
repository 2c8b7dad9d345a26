use std::fmt::Display;

/// A literal template: `segments[0] values[0] segments[1] … segments[n-1]`.
///
/// `raw` carries the same segments with their escape sequences left
/// unprocessed. Only the `raw` transform reads it; everything else merges the
/// cooked `segments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
	segments: Vec<String>,
	raw: Vec<String>,
	values: Vec<String>,
}

impl Template {
	/// Build a template from already-cooked segments. The segments double as
	/// the raw form. Values are rendered to text immediately.
	pub fn new<S, V>(segments: S, values: V) -> Self
	where
		S: IntoIterator,
		S::Item: Into<String>,
		V: IntoIterator,
		V::Item: Display,
	{
		let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
		Self {
			raw: segments.clone(),
			segments,
			values: render_values(values),
		}
	}

	/// Build a template with an explicit raw form for each segment.
	pub fn with_raw<S, R, V>(segments: S, raw: R, values: V) -> Self
	where
		S: IntoIterator,
		S::Item: Into<String>,
		R: IntoIterator,
		R::Item: Into<String>,
		V: IntoIterator,
		V::Item: Display,
	{
		Self {
			segments: segments.into_iter().map(Into::into).collect(),
			raw: raw.into_iter().map(Into::into).collect(),
			values: render_values(values),
		}
	}

	/// Parse template source text. Every unescaped `{}` is a placeholder for
	/// the next value. The source slices between placeholders are the raw
	/// segments; cooking them processes `\n`, `\t`, `\r`, `\0`, `\\`, `\{` and
	/// `\}`. Unknown escapes are kept as written.
	pub fn parse<V>(source: &str, values: V) -> Self
	where
		V: IntoIterator,
		V::Item: Display,
	{
		let raw = split_placeholders(source);
		let segments = raw.iter().map(|segment| cook(segment)).collect();

		Self {
			segments,
			raw,
			values: render_values(values),
		}
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	pub fn raw(&self) -> &[String] {
		&self.raw
	}

	pub fn values(&self) -> &[String] {
		&self.values
	}

	/// Zip the cooked segments with the values. Missing values render as the
	/// empty string and surplus values are ignored.
	pub fn merge(&self) -> String {
		zip_segments(&self.segments, &self.values)
	}

	/// Zip the raw segments with the values.
	pub fn merge_raw(&self) -> String {
		zip_segments(&self.raw, &self.values)
	}
}

impl From<&str> for Template {
	fn from(text: &str) -> Self {
		Self::from(text.to_string())
	}
}

impl From<String> for Template {
	fn from(text: String) -> Self {
		Self {
			raw: vec![text.clone()],
			segments: vec![text],
			values: Vec::new(),
		}
	}
}

/// Build a [`Template`](crate::Template) from template source and values,
/// in the manner of `format!`.
///
/// ```rust
/// use tagline_core::template;
///
/// let name = "world";
/// let greeting = template!("Hello, {}!", name);
/// assert_eq!(greeting.merge(), "Hello, world!");
/// ```
#[macro_export]
macro_rules! template {
	($source:expr $(, $value:expr)* $(,)?) => {{
		let values: ::std::vec::Vec<::std::string::String> =
			::std::vec![$(::std::string::ToString::to_string(&$value)),*];
		$crate::Template::parse($source, values)
	}};
}

fn render_values<V>(values: V) -> Vec<String>
where
	V: IntoIterator,
	V::Item: Display,
{
	values.into_iter().map(|value| value.to_string()).collect()
}

fn zip_segments(segments: &[String], values: &[String]) -> String {
	let mut merged = String::new();

	for (index, segment) in segments.iter().enumerate() {
		merged.push_str(segment);

		if index + 1 < segments.len() {
			if let Some(value) = values.get(index) {
				merged.push_str(value);
			}
		}
	}

	merged
}

fn split_placeholders(source: &str) -> Vec<String> {
	let mut segments = Vec::new();
	let mut current = String::new();
	let mut chars = source.chars().peekable();

	while let Some(ch) = chars.next() {
		match ch {
			'\\' => {
				current.push(ch);
				if let Some(escaped) = chars.next() {
					current.push(escaped);
				}
			}
			'{' if chars.peek() == Some(&'}') => {
				chars.next();
				segments.push(std::mem::take(&mut current));
			}
			_ => current.push(ch),
		}
	}

	segments.push(current);
	segments
}

fn cook(raw: &str) -> String {
	let mut cooked = String::with_capacity(raw.len());
	let mut chars = raw.chars();

	while let Some(ch) = chars.next() {
		if ch != '\\' {
			cooked.push(ch);
			continue;
		}

		match chars.next() {
			Some('n') => cooked.push('\n'),
			Some('t') => cooked.push('\t'),
			Some('r') => cooked.push('\r'),
			Some('0') => cooked.push('\0'),
			Some(escaped @ ('\\' | '{' | '}')) => cooked.push(escaped),
			Some(other) => {
				cooked.push('\\');
				cooked.push(other);
			}
			None => cooked.push('\\'),
		}
	}

	cooked
}
