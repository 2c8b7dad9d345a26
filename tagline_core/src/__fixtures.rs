use crate::Tag;

/// Upper-cases its input.
pub fn upper_tag() -> Tag {
	Tag::from_text_fn("upper", |text| text.to_uppercase())
}

/// Wraps its input in square brackets.
pub fn brackets_tag() -> Tag {
	Tag::from_text_fn("brackets", |text| format!("[{text}]"))
}

/// Reverses its input character by character.
pub fn reverse_tag() -> Tag {
	Tag::from_text_fn("reverse", |text| text.chars().rev().collect())
}

/// `count` lines reading `row 0`, `row 1`, ….
pub fn rows(count: usize) -> String {
	(0..count)
		.map(|index| format!("row {index}"))
		.collect::<Vec<_>>()
		.join("\n")
}

pub const PROSE: &str = "The quick brown fox jumps over the lazy dog while the cat \
                         watches from a sunny windowsill, unimpressed by all of it.";

pub const INDENTED_LIST: &str = "\
Ingredients:
    two cups of flour
    one egg

    a pinch of salt
  Serves four.";
