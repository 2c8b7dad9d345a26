use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::TagError;

/// A numeral scheme renders a magnitude as text. Signs are handled by the
/// numbering counter, so schemes only ever see non-negative numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum NumeralScheme {
	/// `0`, `1`, `2`, …
	#[default]
	#[serde(rename = "digit")]
	Digit,
	/// Full-width digits: `０`, `１`, `２`, …
	#[serde(rename = "Digit")]
	WideDigit,
	/// Subscript digits: `₀`, `₁`, `₂`, …
	#[serde(rename = "sub")]
	Subscript,
	/// Bijective base 26: `a` … `z`, `aa`, `ab`, …
	#[serde(rename = "alpha")]
	Alpha,
	#[serde(rename = "Alpha")]
	UpperAlpha,
	/// Subtractive Roman numerals: `i`, `ii`, `iii`, `iv`, … up to
	/// [`ROMAN_MAX`], decimal digits beyond.
	#[serde(rename = "roman")]
	Roman,
	#[serde(rename = "Roman")]
	UpperRoman,
}

struct SchemeEntry {
	key: &'static str,
	scheme: NumeralScheme,
	encode: fn(u64) -> String,
}

static REGISTRY: [SchemeEntry; 7] = [
	SchemeEntry {
		key: "digit",
		scheme: NumeralScheme::Digit,
		encode: decimal,
	},
	SchemeEntry {
		key: "Digit",
		scheme: NumeralScheme::WideDigit,
		encode: wide_decimal,
	},
	SchemeEntry {
		key: "sub",
		scheme: NumeralScheme::Subscript,
		encode: subscript_decimal,
	},
	SchemeEntry {
		key: "alpha",
		scheme: NumeralScheme::Alpha,
		encode: lower_alpha,
	},
	SchemeEntry {
		key: "Alpha",
		scheme: NumeralScheme::UpperAlpha,
		encode: upper_alpha,
	},
	SchemeEntry {
		key: "roman",
		scheme: NumeralScheme::Roman,
		encode: lower_roman,
	},
	SchemeEntry {
		key: "Roman",
		scheme: NumeralScheme::UpperRoman,
		encode: upper_roman,
	},
];

/// Largest magnitude written as a Roman numeral (`mmmcmxcix`). Anything
/// larger is rendered with decimal digits.
pub const ROMAN_MAX: u64 = 3999;

/// The smallest number needing each Roman numeral length. Position `i` holds
/// the first value whose numeral is `i + 1` characters long.
const ROMAN_WIDTH_BREAKPOINTS: [u64; 15] = [
	1, 2, 3, 8, 18, 28, 38, 88, 188, 288, 388, 888, 1888, 2888, 3888,
];

const ROMAN_LITERALS: [(u64, &str); 13] = [
	(1000, "m"),
	(900, "cm"),
	(500, "d"),
	(400, "cd"),
	(100, "c"),
	(90, "xc"),
	(50, "l"),
	(40, "xl"),
	(10, "x"),
	(9, "ix"),
	(5, "v"),
	(4, "iv"),
	(1, "i"),
];

const WIDE_DIGITS: [char; 10] = ['０', '１', '２', '３', '４', '５', '６', '７', '８', '９'];
const SUBSCRIPT_DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

impl NumeralScheme {
	/// Every registered scheme, in registry order.
	pub const ALL: [NumeralScheme; 7] = [
		Self::Digit,
		Self::WideDigit,
		Self::Subscript,
		Self::Alpha,
		Self::UpperAlpha,
		Self::Roman,
		Self::UpperRoman,
	];

	fn entry(self) -> &'static SchemeEntry {
		REGISTRY
			.iter()
			.find(|entry| entry.scheme == self)
			.unwrap_or(&REGISTRY[0])
	}

	/// The registry key, e.g. `roman`.
	pub fn key(self) -> &'static str {
		self.entry().key
	}

	/// Render `magnitude` in this scheme.
	pub fn encode(self, magnitude: u64) -> String {
		(self.entry().encode)(magnitude)
	}

	/// Characters needed to render any magnitude from 0 up to `magnitude`.
	pub fn width(self, magnitude: u64) -> usize {
		match self {
			Self::Roman | Self::UpperRoman => {
				ROMAN_WIDTH_BREAKPOINTS
					.iter()
					.position(|&breakpoint| breakpoint > magnitude)
					.unwrap_or_else(|| {
						// Past the table every numeral up to `ROMAN_MAX` fits in 15
						// characters and larger magnitudes render as decimal.
						ROMAN_WIDTH_BREAKPOINTS.len().max(decimal(magnitude).len())
					})
			}
			// Positional schemes never get shorter as the magnitude grows.
			_ => self.encode(magnitude).chars().count(),
		}
	}
}

impl FromStr for NumeralScheme {
	type Err = TagError;

	fn from_str(key: &str) -> Result<Self, Self::Err> {
		REGISTRY
			.iter()
			.find(|entry| entry.key == key)
			.map(|entry| entry.scheme)
			.ok_or_else(|| TagError::UnknownScheme(key.to_string()))
	}
}

impl fmt::Display for NumeralScheme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.key())
	}
}

fn decimal(magnitude: u64) -> String {
	magnitude.to_string()
}

fn wide_decimal(magnitude: u64) -> String {
	map_digits(magnitude, &WIDE_DIGITS)
}

fn subscript_decimal(magnitude: u64) -> String {
	map_digits(magnitude, &SUBSCRIPT_DIGITS)
}

fn map_digits(magnitude: u64, glyphs: &[char; 10]) -> String {
	magnitude
		.to_string()
		.bytes()
		.map(|byte| glyphs[usize::from(byte - b'0')])
		.collect()
}

fn lower_alpha(magnitude: u64) -> String {
	bijective_alpha(magnitude, b'a')
}

fn upper_alpha(magnitude: u64) -> String {
	bijective_alpha(magnitude, b'A')
}

/// 1 → a, 26 → z, 27 → aa. Zero has no letters.
fn bijective_alpha(mut magnitude: u64, base: u8) -> String {
	let mut letters = Vec::new();

	while magnitude > 0 {
		magnitude -= 1;
		letters.push(char::from(base + (magnitude % 26) as u8));
		magnitude /= 26;
	}

	letters.iter().rev().collect()
}

fn lower_roman(mut magnitude: u64) -> String {
	if magnitude > ROMAN_MAX {
		return decimal(magnitude);
	}

	let mut numeral = String::new();

	for (value, literal) in ROMAN_LITERALS {
		while magnitude >= value {
			numeral.push_str(literal);
			magnitude -= value;
		}
	}

	numeral
}

fn upper_roman(magnitude: u64) -> String {
	lower_roman(magnitude).to_ascii_uppercase()
}
