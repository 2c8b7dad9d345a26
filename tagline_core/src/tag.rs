use std::fmt;
use std::sync::Arc;

use crate::Template;
use crate::transforms::identity;

type TagFn = dyn Fn(&Template) -> String + Send + Sync;

/// Name given to tags built without one.
pub const ANONYMOUS_TAG: &str = "anonymous";

/// A chainable tag function.
///
/// A `Tag` pairs a transform from a [`Template`] to a `String` with a display
/// name. It can be called three ways through [`Tag::call`]: on a template
/// (returns the transformed text), on another tag (returns the composite
/// `self(other)`, which runs `other` first), or on plain text (returns the
/// transformed text as if the text were a one-segment template).
///
/// Cloning is cheap; the function and name are shared.
#[derive(Clone)]
pub struct Tag {
	name: Arc<str>,
	func: Arc<TagFn>,
}

/// The shapes a [`Tag`] accepts.
#[derive(Debug, Clone, Copy)]
pub enum TagInput<'a> {
	/// A literal template with segments and values.
	Template(&'a Template),
	/// Another tag to run before this one.
	Tag(&'a Tag),
	/// Plain text, treated as a single segment with no values.
	Text(&'a str),
}

impl<'a> From<&'a Template> for TagInput<'a> {
	fn from(template: &'a Template) -> Self {
		Self::Template(template)
	}
}

impl<'a> From<&'a Tag> for TagInput<'a> {
	fn from(tag: &'a Tag) -> Self {
		Self::Tag(tag)
	}
}

impl<'a> From<&'a str> for TagInput<'a> {
	fn from(text: &'a str) -> Self {
		Self::Text(text)
	}
}

impl<'a> From<&'a String> for TagInput<'a> {
	fn from(text: &'a String) -> Self {
		Self::Text(text.as_str())
	}
}

/// What a [`Tag`] call produces: text for templates and plain strings, a new
/// tag when called with a tag.
#[derive(Debug, Clone)]
pub enum TagOutput {
	Text(String),
	Tag(Tag),
}

impl TagOutput {
	pub fn into_text(self) -> Option<String> {
		match self {
			Self::Text(text) => Some(text),
			Self::Tag(_) => None,
		}
	}

	pub fn into_tag(self) -> Option<Tag> {
		match self {
			Self::Tag(tag) => Some(tag),
			Self::Text(_) => None,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::Tag(_) => None,
		}
	}
}

impl Tag {
	/// Wrap `func` as a named, chainable tag.
	pub fn new<F>(name: impl Into<String>, func: F) -> Self
	where
		F: Fn(&Template) -> String + Send + Sync + 'static,
	{
		Self {
			name: Arc::from(name.into()),
			func: Arc::new(func),
		}
	}

	/// Wrap `func` with the default name.
	pub fn from_fn<F>(func: F) -> Self
	where
		F: Fn(&Template) -> String + Send + Sync + 'static,
	{
		Self::new(ANONYMOUS_TAG, func)
	}

	/// Wrap a plain string transform. The template is merged first.
	pub fn from_text_fn<F>(name: impl Into<String>, func: F) -> Self
	where
		F: Fn(&str) -> String + Send + Sync + 'static,
	{
		Self::new(name, move |template: &Template| func(&template.merge()))
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// The same tag under another display name.
	#[must_use]
	pub fn with_name(self, name: impl Into<String>) -> Self {
		Self {
			name: Arc::from(name.into()),
			func: self.func,
		}
	}

	/// Dispatch on the shape of `input`.
	pub fn call<'a>(&self, input: impl Into<TagInput<'a>>) -> TagOutput {
		match input.into() {
			TagInput::Template(template) => TagOutput::Text(self.apply(template)),
			TagInput::Tag(inner) => TagOutput::Tag(self.chain(inner)),
			TagInput::Text(text) => TagOutput::Text(self.text(text)),
		}
	}

	/// Run the tag on a template.
	pub fn apply(&self, template: &Template) -> String {
		(self.func)(template)
	}

	/// Run the tag on plain text.
	pub fn text(&self, text: &str) -> String {
		self.apply(&Template::from(text))
	}

	/// Build `self(inner)`: `inner` runs on the template, its output becomes
	/// a one-segment template, and `self` runs on that.
	#[must_use]
	pub fn chain(&self, inner: &Tag) -> Tag {
		let name = format!("{}({})", self.name, inner.name);
		tracing::trace!(tag = %name, "composed tag");

		let outer = Arc::clone(&self.func);
		let inner = Arc::clone(&inner.func);

		Self {
			name: Arc::from(name),
			func: Arc::new(move |template: &Template| {
				let intermediate = Template::from(inner(template));
				outer(&intermediate)
			}),
		}
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}

impl fmt::Debug for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Tag").field("name", &self.name).finish_non_exhaustive()
	}
}

/// Compose `tags` so they run in sequence, first to last. `[a, b, c]`
/// becomes `c(b(a))`. An empty sequence composes to `identity`.
pub fn compose<I>(tags: I) -> Tag
where
	I: IntoIterator<Item = Tag>,
{
	let mut tags = tags.into_iter();
	let Some(first) = tags.next() else {
		return identity();
	};

	tags.fold(first, |inner, outer| outer.chain(&inner))
}
