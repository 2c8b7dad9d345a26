use rstest::rstest;
use similar_asserts::assert_eq;

use super::__fixtures::*;
use super::*;
use crate::pipeline::Argument;
use crate::pipeline::Pipeline;
use crate::pipeline::PipelineStep;
use crate::transforms::*;

// --- Line model ---

#[rstest]
#[case::folds_inner_whitespace("a  b \t c", vec!["a b c"])]
#[case::keeps_leading_whitespace("  a \t b  ", vec!["  a b"])]
#[case::collapses_blank_runs("a\n\n\n\nb", vec!["a", "", "b"])]
#[case::keeps_one_leading_blank("\n\na", vec!["", "a"])]
#[case::whitespace_only_is_blank("a\n   \nb", vec!["a", "", "b"])]
#[case::trailing_newline("a\n", vec!["a", ""])]
#[case::empty("", vec![""])]
#[case::carriage_returns("a\r\nb\r\n", vec!["a", "b", ""])]
fn split_lines_normalizes(#[case] input: &str, #[case] expected: Vec<&str>) {
	let lines = split_lines(input);
	assert_eq!(lines.into_inner(), expected);
}

#[test]
fn min_indentation_ignores_blank_lines() {
	assert_eq!(min_indentation(&["    a", "", "  b", "      c"]), Some(2));
	assert_eq!(min_indentation(&["", "   "]), None);
	assert_eq!(Lines::split("\n\n").min_indentation_or_zero(), 0);
}

#[test]
fn strip_leading_never_fails_on_short_lines() {
	assert_eq!(strip_leading("  ab", 2), "ab");
	assert_eq!(strip_leading("a", 5), "");
}

// --- Templates ---

#[test]
fn identity_zips_segments_and_values() {
	let template = Template::new(["a", "b", "c"], [1, 2]);
	assert_eq!(identity().apply(&template), "a1b2c");
}

#[test]
fn identity_renders_missing_values_as_empty() {
	let template = Template::new(["a", "b", "c"], [1]);
	assert_eq!(identity().apply(&template), "a1bc");
}

#[test]
fn identity_round_trips_single_segment() {
	let template = Template::from("  unchanged\n\n\ttext  ");
	assert_eq!(identity().apply(&template), "  unchanged\n\n\ttext  ");
	assert_eq!(identity().apply(&Template::default()), "");
}

#[test]
fn template_macro_formats_values() {
	let count = 3;
	let template = template!("{} apples and {} pears", count, "no");
	assert_eq!(template.segments(), ["", " apples and ", " pears"]);
	assert_eq!(template.merge(), "3 apples and no pears");
}

#[test]
fn parse_keeps_raw_segments() {
	let template = Template::parse(r"a\tb {} c", [1]);
	assert_eq!(template.segments(), ["a\tb ", " c"]);
	assert_eq!(template.raw(), [r"a\tb ", " c"]);
	assert_eq!(identity().apply(&template), "a\tb 1 c");
	assert_eq!(raw().apply(&template), r"a\tb 1 c");
}

#[test]
fn parse_escaped_braces_are_not_placeholders() {
	let template = Template::parse(r"\{} {}", ["x"]);
	assert_eq!(template.segments(), ["{} ", ""]);
	assert_eq!(template.merge(), "{} x");
}

#[test]
fn parse_keeps_unknown_escapes() {
	let template = Template::parse(r"\q\", Vec::<String>::new());
	assert_eq!(template.merge(), r"\q\");
}

#[test]
fn with_raw_keeps_separate_raw_segments() {
	let template = Template::with_raw(["a\tb", "c"], [r"a\tb", "c"], [7]);

	assert_eq!(template.values(), ["7"]);
	assert_eq!(identity().apply(&template), "a\tb7c");
	assert_eq!(raw().apply(&template), r"a\tb7c");
}

// --- Chaining ---

#[test]
fn call_dispatches_on_text() {
	let output = upper_tag().call("hi");
	assert_eq!(output.into_text().as_deref(), Some("HI"));
}

#[test]
fn call_dispatches_on_template() {
	let template = template!("hi {}", "you");
	let output = upper_tag().call(&template);
	assert_eq!(output.as_text(), Some("HI YOU"));
}

#[test]
fn call_with_tag_composes() {
	let composite = brackets_tag()
		.call(&upper_tag())
		.into_tag()
		.expect("calling with a tag returns a tag");

	assert_eq!(composite.name(), "brackets(upper)");
	assert_eq!(composite.text("hi"), "[HI]");
}

#[test]
fn composition_runs_inner_first() {
	let outer_brackets = brackets_tag().chain(&reverse_tag());
	let outer_reverse = reverse_tag().chain(&brackets_tag());

	assert_eq!(outer_brackets.text("ab"), "[ba]");
	assert_eq!(outer_reverse.text("ab"), "]ba[");
}

#[test]
fn composition_receives_the_full_template() {
	let composite = upper_tag().chain(&identity());
	assert_eq!(composite.apply(&template!("{} + {}", 1, "x")), "1 + X");
}

#[test]
fn chaining_is_unbounded() {
	let deep = compose(vec![indent(1); 64]);
	assert_eq!(deep.text("x"), format!("{}x", " ".repeat(64)));
	assert_eq!(deep.name().matches("indent:1").count(), 64);
}

#[test]
fn compose_runs_first_to_last() {
	let tag = compose([reverse_tag(), brackets_tag(), upper_tag()]);
	assert_eq!(tag.name(), "upper(brackets(reverse))");
	assert_eq!(tag.text("ab"), "[BA]");
}

#[test]
fn compose_of_nothing_is_identity() {
	let tag = compose(Vec::new());
	assert_eq!(tag.name(), "identity");
	assert_eq!(tag.text("  a  b"), "  a  b");
}

#[test]
fn names_are_diagnostic_only() {
	let renamed = outdent().with_name("dedent");
	assert_eq!(renamed.name(), "dedent");
	assert_eq!(renamed.to_string(), "dedent");
	assert_eq!(renamed.text("  a\n  b"), outdent().text("  a\n  b"));
	assert_eq!(Tag::from_fn(Template::merge).name(), ANONYMOUS_TAG);
	assert_eq!(indent(-3).name(), "indent:-3");
	assert_eq!(wrap(40).name(), "wrap:40");
}

#[test]
#[tracing_test::traced_test]
fn composing_tags_is_traced() {
	let _tag = indent(1).chain(&outdent());
	assert!(logs_contain("composed tag"));
}

// --- Transform library ---

#[test]
fn paragraph_keeps_one_line_per_paragraph() {
	assert_eq!(paragraph().text("a\nb\n\n\nc"), "a\n\nb\n\nc");
	assert_eq!(paragraph().text(""), "");
}

#[rstest]
#[case("a\n\n\n\n\nb")]
#[case("\n\n\n")]
#[case("  x \n\n \n\t\ny\n\n")]
#[case(INDENTED_LIST)]
fn paragraph_never_emits_three_newlines(#[case] input: &str) {
	assert!(!paragraph().text(input).contains("\n\n\n"));
}

#[test]
fn fold_removes_line_breaks() {
	assert_eq!(fold().text("a\nb\n\nc"), "abc");
}

#[test]
fn flush_trims_every_line() {
	assert_eq!(flush().text("  a  \n\tb\n\n  c"), "a\nb\n\nc");
}

#[test]
fn outdent_removes_common_indentation() {
	assert_eq!(outdent().text("  a\n  b\n    c"), "a\nb\n  c");
	assert_eq!(outdent().text("    a\n\n      b"), "a\n\n  b");
	assert_eq!(outdent().text("\n\n"), "");
}

#[rstest]
#[case("  a\n  b\n    c")]
#[case("\t\tx\n\t\t\ty")]
#[case(INDENTED_LIST)]
fn outdent_is_idempotent(#[case] input: &str) {
	let once = outdent().text(input);
	assert_eq!(outdent().text(&once), once);
}

#[test]
fn indent_adds_spaces() {
	assert_eq!(indent(2).text("x\ny"), "  x\n  y");
	assert_eq!(indent(0).text("x"), "x");
}

#[rstest]
#[case::partial(-1, "   a\n b")]
#[case::exact(-2, "  a\nb")]
#[case::clamped(-10, "  a\nb")]
fn negative_indent_removes_at_most_common_indentation(
	#[case] amount: i32,
	#[case] expected: &str,
) {
	assert_eq!(indent(amount).text("    a\n  b"), expected);
}

#[test]
fn wrap_breaks_at_last_space_before_width() {
	assert_eq!(
		wrap(10).text("the quick brown fox jumps"),
		"the quick\nbrown fox\njumps"
	);
}

#[test]
fn wrap_merges_lines_with_equal_indentation() {
	assert_eq!(
		wrap(100).text("one two\nthree   four\nfive"),
		"one two three four five"
	);
	assert_eq!(wrap(80).text("a b\n  c d"), "a b\n  c d");
}

#[test]
fn wrap_reindents_continuations() {
	assert_eq!(
		wrap(12).text("  alpha beta\n  gamma delta"),
		"  alpha beta\n  gamma\n  delta"
	);
}

#[test]
fn wrap_blank_lines_break_merges() {
	assert_eq!(wrap(80).text("a\nb"), "a b");
	assert_eq!(wrap(80).text("a\n\nb"), "a\n\nb");
	assert_eq!(wrap(10).text(""), "");
}

#[test]
fn wrap_keeps_structure_of_indented_list() {
	assert_eq!(
		wrap(80).text(INDENTED_LIST),
		"Ingredients:\n    two cups of flour one egg\n\n    a pinch of salt\n  Serves four."
	);
	assert_eq!(
		wrap(20).text(INDENTED_LIST),
		"Ingredients:\n    two cups of\n    flour one egg\n\n    a pinch of salt\n  Serves four."
	);
}

#[test]
fn wrap_never_hyphenates() {
	assert_eq!(wrap(3).text("abcdefgh"), "abcdefgh");
	assert_eq!(wrap(3).text("abcdef gh"), "abcdef\ngh");
}

#[rstest]
#[case(-5)]
#[case(0)]
#[case(1)]
fn wrap_degrades_for_tiny_widths(#[case] width: i32) {
	assert_eq!(wrap(width).text("a b c"), "a\nb\nc");
}

const DEEP_INDENT: &str = "      alpha beta gamma";

#[rstest]
#[case::prose_0(PROSE, 0)]
#[case::prose_5(PROSE, 5)]
#[case::prose_12(PROSE, 12)]
#[case::prose_33(PROSE, 33)]
#[case::prose_80(PROSE, 80)]
#[case::list_10(INDENTED_LIST, 10)]
#[case::list_20(INDENTED_LIST, 20)]
#[case::deep_3(DEEP_INDENT, 3)]
#[case::deep_6(DEEP_INDENT, 6)]
#[case::deep_10(DEEP_INDENT, 10)]
#[case::deep_16(DEEP_INDENT, 16)]
fn wrapped_lines_fit_or_cannot_split(#[case] input: &str, #[case] width: i32) {
	let limit = usize::try_from(width).unwrap_or(0);
	for line in wrap(width).text(input).lines() {
		assert!(
			line.chars().count() <= limit || !line.trim_start().contains(' '),
			"line `{line}` exceeds {limit}"
		);
	}
}

#[test]
fn wrap_breaks_after_indentation_wider_than_width() {
	assert_eq!(
		wrap(3).text(DEEP_INDENT),
		"      alpha\n      beta\n      gamma"
	);
	assert_eq!(
		wrap(10).text(DEEP_INDENT),
		"      alpha\n      beta\n      gamma"
	);
}

#[test]
fn wrap_keeps_leading_tabs() {
	assert_eq!(wrap(80).text("\tfoo"), "\tfoo");
	assert_eq!(wrap(8).text("\tfoo bar baz"), "\tfoo bar\n\tbaz");
	assert_eq!(wrap(80).text("\ta\n\tb"), "\ta b");
}

#[test]
fn logical_lines_track_indentation() {
	let logical = transforms::logical_lines(&Lines::split("  a\n  b\n\n\tc"));
	assert_eq!(
		logical,
		vec![
			IndentedLine {
				indentation: 2,
				lead: "  ".to_string(),
				text: "a b".to_string(),
			},
			IndentedLine::default(),
			IndentedLine {
				indentation: 1,
				lead: "\t".to_string(),
				text: "c".to_string(),
			},
		]
	);
}

// --- Numeral schemes ---

#[rstest]
#[case(0, "")]
#[case(1, "a")]
#[case(26, "z")]
#[case(27, "aa")]
#[case(52, "az")]
#[case(53, "ba")]
#[case(702, "zz")]
#[case(703, "aaa")]
fn alpha_is_bijective_base_26(#[case] magnitude: u64, #[case] expected: &str) {
	assert_eq!(NumeralScheme::Alpha.encode(magnitude), expected);
	assert_eq!(
		NumeralScheme::UpperAlpha.encode(magnitude),
		expected.to_ascii_uppercase()
	);
}

#[rstest]
#[case(0, "")]
#[case(1, "i")]
#[case(4, "iv")]
#[case(9, "ix")]
#[case(14, "xiv")]
#[case(40, "xl")]
#[case(90, "xc")]
#[case(400, "cd")]
#[case(1994, "mcmxciv")]
#[case(3888, "mmmdccclxxxviii")]
fn roman_uses_subtractive_notation(#[case] magnitude: u64, #[case] expected: &str) {
	assert_eq!(NumeralScheme::Roman.encode(magnitude), expected);
}

#[test]
fn digit_variants() {
	assert_eq!(NumeralScheme::Digit.encode(1203), "1203");
	assert_eq!(NumeralScheme::WideDigit.encode(42), "４２");
	assert_eq!(NumeralScheme::Subscript.encode(105), "₁₀₅");
	assert_eq!(NumeralScheme::UpperRoman.encode(2024), "MMXXIV");
}

#[test]
fn roman_width_covers_every_smaller_numeral() {
	let mut widest = 0;
	for magnitude in 0..=1000 {
		widest = widest.max(NumeralScheme::Roman.encode(magnitude).chars().count());
		assert_eq!(NumeralScheme::Roman.width(magnitude), widest, "at {magnitude}");
	}
}

#[rstest]
#[case::largest(3999, "mmmcmxcix")]
#[case::past_largest(4000, "4000")]
#[case::huge(u64::MAX, "18446744073709551615")]
fn roman_falls_back_to_digits_past_its_range(#[case] magnitude: u64, #[case] expected: &str) {
	assert_eq!(NumeralScheme::Roman.encode(magnitude), expected);
	assert_eq!(
		NumeralScheme::UpperRoman.encode(magnitude),
		expected.to_ascii_uppercase()
	);
}

#[rstest]
#[case(3999, 15)]
#[case(4000, 15)]
#[case(1_000_000_000_000_000, 16)]
#[case(u64::MAX, 20)]
fn roman_width_stays_bounded(#[case] magnitude: u64, #[case] expected: usize) {
	assert_eq!(NumeralScheme::Roman.width(magnitude), expected);
	assert!(NumeralScheme::Roman.encode(magnitude).chars().count() <= expected);
}

#[rstest]
#[case(NumeralScheme::Digit, 9, 1)]
#[case(NumeralScheme::Digit, 10, 2)]
#[case(NumeralScheme::Digit, 0, 1)]
#[case(NumeralScheme::Alpha, 26, 1)]
#[case(NumeralScheme::Alpha, 27, 2)]
#[case(NumeralScheme::Roman, 38, 7)]
fn scheme_widths(#[case] scheme: NumeralScheme, #[case] magnitude: u64, #[case] expected: usize) {
	assert_eq!(scheme.width(magnitude), expected);
}

#[test]
fn schemes_parse_from_registry_keys() -> TagResult<()> {
	assert_eq!("roman".parse::<NumeralScheme>()?, NumeralScheme::Roman);
	assert_eq!("Roman".parse::<NumeralScheme>()?, NumeralScheme::UpperRoman);
	for scheme in NumeralScheme::ALL {
		assert_eq!(scheme.to_string().parse::<NumeralScheme>()?, scheme);
	}

	let unknown = "greek".parse::<NumeralScheme>();
	assert!(matches!(unknown, Err(TagError::UnknownScheme(key)) if key == "greek"));

	Ok(())
}

// --- Numbering ---

#[test]
fn numbering_defaults() {
	let tag = numbering(NumberingOptions::default());
	assert_eq!(tag.name(), "numbering");
	assert_eq!(tag.text("a\nb\nc"), "0: a\n1: b\n2: c");
}

#[test]
fn numbering_pads_to_widest_number() {
	let options = NumberingOptions {
		number_from: Some(1),
		..Default::default()
	};
	let output = numbering(options).text(&rows(10));
	let lines: Vec<_> = output.lines().collect();

	assert_eq!(lines[0], " 1: row 0");
	assert_eq!(lines[9], "10: row 9");
}

#[test]
fn numbering_with_numeric_fill() {
	let options = NumberingOptions {
		number_from: Some(1),
		pad: Some("0".to_string()),
		..Default::default()
	};
	let output = numbering(options).text(&rows(10));

	assert!(output.starts_with("01: row 0\n02: row 1"));
	assert!(output.ends_with("10: row 9"));
}

#[test]
fn numbering_negative_roman_rows_align() {
	let options = NumberingOptions {
		number_from: Some(-29),
		scheme: Some(NumeralScheme::Roman),
		..Default::default()
	};
	let output = numbering(options).text(&rows(27));
	let lines: Vec<_> = output.lines().collect();

	assert_eq!(lines.len(), 27);
	assert_eq!(lines[0], "  -xxix: row 0");
	assert_eq!(lines[26], "   -iii: row 26");
	for line in &lines {
		assert_eq!(line.find(": row"), Some(7), "misaligned `{line}`");
		assert!(line.contains('-'));
	}
}

#[test]
fn numbering_signs_only_negative_rows() {
	let options = NumberingOptions {
		number_from: Some(-2),
		..Default::default()
	};
	assert_eq!(
		numbering(options).text("a\nb\nc\nd\ne"),
		"-2: a\n-1: b\n 0: c\n 1: d\n 2: e"
	);
}

#[test]
fn numbering_keeps_signs_beside_numeric_padding() {
	let options = NumberingOptions {
		number_from: Some(-2),
		pad: Some("0".to_string()),
		pad_width: Some(3),
		..Default::default()
	};
	assert_eq!(
		numbering(options).text("a\nb\nc\nd"),
		"-02: a\n-01: b\n 00: c\n 01: d"
	);
}

#[test]
fn numbering_sign_all() {
	let options = NumberingOptions {
		number_from: Some(-1),
		sign_all: Some(true),
		..Default::default()
	};
	assert_eq!(numbering(options).text("a\nb\nc"), "-1: a\n±0: b\n+1: c");
}

#[test]
fn numbering_alpha_scheme() {
	let options = NumberingOptions {
		number_from: Some(1),
		scheme: Some(NumeralScheme::Alpha),
		..Default::default()
	};
	assert_eq!(numbering(options).text("x\ny\nz"), "a: x\nb: y\nc: z");
}

#[test]
fn numbering_line_art_draws_zero_rule() {
	let options = NumberingOptions {
		scheme: Some(NumeralScheme::Roman),
		style: Some(NumberingStyle::LineArt),
		..Default::default()
	};
	assert_eq!(
		numbering(options).text("a\nb\nc\nd"),
		"────┼─a\n  i │ b\n ii │ c\niii │ d"
	);
}

#[test]
fn numbering_explicit_width_and_string_fill() {
	let options = NumberingOptions {
		number_from: Some(1),
		pad_width: Some(5),
		pad: Some("ab".to_string()),
		prefix: Some("[".to_string()),
		suffix: Some("] ".to_string()),
		..Default::default()
	};
	assert_eq!(numbering(options).text("x"), "[abab1] x");
}

#[test]
fn numbering_resolves_without_mutating_options() {
	let options = NumberingOptions {
		number_from: Some(1),
		..Default::default()
	};
	let tag = numbering(options.clone());

	assert_eq!(tag.text("a"), "1: a");
	assert_eq!(tag.text(&rows(12)).lines().last(), Some("12: row 11"));
	assert_eq!(tag.text("a"), "1: a");
	assert_eq!(options.resolve(1).width, 1);
	assert_eq!(options.resolve(100).width, 3);
}

#[test]
fn numbering_huge_roman_start_renders_digits() -> TagResult<()> {
	let tag = TaglineConfig::default().pipeline("numbering:roman:9000000000000000000")?;
	assert_eq!(
		tag.text("a\nb"),
		"9000000000000000000: a\n9000000000000000001: b"
	);

	Ok(())
}

#[test]
fn numbering_start_is_lowered_to_fit_the_last_row() {
	let options = NumberingOptions {
		number_from: Some(i64::MAX),
		..Default::default()
	};
	assert_eq!(
		numbering(options.clone()).text("a\nb\nc"),
		"9223372036854775805: a\n9223372036854775806: b\n9223372036854775807: c"
	);
	assert_eq!(options.resolve(3).number_from, i64::MAX - 2);
	assert_eq!(options.resolve(1).number_from, i64::MAX);
}

#[test]
fn numbering_most_negative_start() {
	let options = NumberingOptions {
		number_from: Some(i64::MIN),
		..Default::default()
	};
	assert_eq!(
		numbering(options).text("a\nb"),
		"-9223372036854775808: a\n-9223372036854775807: b"
	);
}

#[test]
fn counter_advances_by_one() {
	let resolved = NumberingOptions::default().resolve(3);
	let mut counter = Counter::new(&resolved);

	assert_eq!(counter.value(), 0);
	assert_eq!(counter.next().as_deref(), Some("0: "));
	assert_eq!(counter.next().as_deref(), Some("1: "));
	assert_eq!(counter.value(), 2);
}

#[test]
fn numbering_options_fallback() {
	let base = NumberingOptions {
		number_from: Some(5),
		scheme: Some(NumeralScheme::Roman),
		..Default::default()
	};
	let merged = NumberingOptions {
		scheme: Some(NumeralScheme::Alpha),
		..Default::default()
	}
	.with_fallback(&base);

	assert_eq!(merged.number_from, Some(5));
	assert_eq!(merged.scheme, Some(NumeralScheme::Alpha));
}

// --- Pipelines ---

#[test]
fn parse_pipeline_steps() -> TagResult<()> {
	let pipeline = Pipeline::parse("outdent | wrap:72|numbering:\"roman\":-1")?;

	assert_eq!(
		pipeline.steps,
		vec![
			PipelineStep {
				name: "outdent".to_string(),
				args: vec![],
				offset: 0,
			},
			PipelineStep {
				name: "wrap".to_string(),
				args: vec![Argument::Int(72)],
				offset: 10,
			},
			PipelineStep {
				name: "numbering".to_string(),
				args: vec![Argument::String("roman".to_string()), Argument::Int(-1)],
				offset: 18,
			},
		]
	);

	Ok(())
}

#[test]
fn pipelines_build_composites() -> TagResult<()> {
	let config = TaglineConfig::default();
	let tag = config.pipeline("outdent|indent:2")?;

	assert_eq!(tag.name(), "indent:2(outdent)");
	assert_eq!(tag.text("    a\n      b"), "  a\n    b");

	Ok(())
}

#[test]
fn pipeline_accepts_bare_scheme_names() -> TagResult<()> {
	let tag = TaglineConfig::default().pipeline("numbering:Alpha:1")?;
	assert_eq!(tag.text("x\ny"), "A: x\nB: y");

	Ok(())
}

#[test]
fn pipeline_unescapes_strings() -> TagResult<()> {
	let tokens = pipeline::tokenize(r#"numbering:"ro\"man""#)?;
	assert_eq!(
		tokens.last().map(|token| &token.kind),
		Some(&pipeline::TokenKind::String("ro\"man".to_string()))
	);

	Ok(())
}

#[rstest]
#[case::empty("")]
#[case::dangling_pipe("outdent|")]
#[case::dangling_delimiter("wrap:")]
#[case::missing_pipe("wrap 40")]
#[case::leading_argument(":40")]
#[case::stray_character("outdent|@")]
fn pipeline_syntax_errors(#[case] source: &str) {
	let result = Pipeline::parse(source);
	assert!(
		matches!(result, Err(TagError::PipelineSyntax { .. })),
		"{result:?}"
	);
}

#[test]
fn pipeline_build_errors() {
	let config = TaglineConfig::default();

	assert!(matches!(
		config.pipeline("bogus"),
		Err(TagError::UnknownTransform(name)) if name == "bogus"
	));
	assert!(matches!(
		config.pipeline("wrap"),
		Err(TagError::InvalidTransformArgs { got: 0, .. })
	));
	assert!(matches!(
		config.pipeline("outdent:1"),
		Err(TagError::InvalidTransformArgs { got: 1, .. })
	));
	assert!(matches!(
		config.pipeline("wrap:'wide'"),
		Err(TagError::InvalidTransformArgType { .. })
	));
	assert!(matches!(
		config.pipeline("numbering:greek"),
		Err(TagError::UnknownScheme(_))
	));
}

// --- Config ---

#[test]
fn config_named_pipelines_and_numbering_defaults() -> TagResult<()> {
	let config = TaglineConfig::from_toml(
		r#"
[numbering]
scheme = "roman"
number_from = 1

[pipelines]
tidy = "outdent|wrap:12"
listing = "tidy|numbering"
"#,
	)?;

	let tag = config.pipeline("listing")?;
	assert_eq!(tag.name(), "numbering(wrap:12(outdent))");
	assert_eq!(tag.text("  alpha beta gamma"), " i: alpha beta\nii: gamma");

	let alpha = config.pipeline("numbering:alpha")?;
	assert_eq!(alpha.text("x\ny"), "a: x\nb: y");

	Ok(())
}

#[rstest]
#[case::self_reference("[pipelines]\nloop = \"outdent|loop\"", "loop")]
#[case::mutual("[pipelines]\na = \"b\"\nb = \"a\"", "a")]
fn config_pipeline_cycles_are_rejected(#[case] toml: &str, #[case] start: &str) -> TagResult<()> {
	let config = TaglineConfig::from_toml(toml)?;
	assert!(matches!(
		config.pipeline(start),
		Err(TagError::PipelineCycle(_))
	));

	Ok(())
}

#[test]
fn config_rejects_unknown_numbering_fields() {
	let result = TaglineConfig::from_toml("[numbering]\nwidth = 3\n");
	assert!(matches!(result, Err(TagError::ConfigParse(_))));
}

#[test]
fn config_load_discovers_candidates() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	assert!(TaglineConfig::load(tmp.path())?.is_none());

	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/tagline.toml"),
		"[pipelines]\nshort = \"wrap:20\"\n",
	)?;
	std::fs::write(
		tmp.path().join(".tagline.toml"),
		"[pipelines]\nshort = \"wrap:10\"\n",
	)?;

	assert_eq!(
		TaglineConfig::resolve_path(tmp.path()),
		Some(tmp.path().join(".tagline.toml"))
	);

	let config = TaglineConfig::load(tmp.path())?.unwrap_or_default();
	assert_eq!(config.pipelines.get("short").map(String::as_str), Some("wrap:10"));

	Ok(())
}
