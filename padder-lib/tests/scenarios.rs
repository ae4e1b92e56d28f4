use padder_lib::{
  change::ChangeEvent,
  config::PadderConfig,
  document::Document,
  host::Host,
  padding::{
    ActionKind,
    Outcome,
    Padder,
  },
  pairs::DEFAULT_PAIRS,
  position::Position,
};

fn doc(marked: &str) -> Document {
  Document::from_marked(marked).unwrap()
}

fn at(col: usize) -> Position {
  Position::new(0, col)
}

/// React to an event that was already applied to `marked`.
fn react(marked: &str, event: ChangeEvent) -> (Outcome, String) {
  let mut doc = doc(marked);
  let outcome = Padder::default().on_change_event(&event, &mut doc);
  (outcome, doc.marked())
}

/// Type `text` into `marked` and let the padder react.
fn type_text(padder: &Padder, marked: &str, text: &str) -> (Outcome, String) {
  let mut doc = doc(marked);
  let event = doc.type_text(text).unwrap();
  let outcome = padder.on_change_event(&event, &mut doc);
  (outcome, doc.marked())
}

fn backspace(padder: &Padder, marked: &str) -> (Outcome, String) {
  let mut doc = doc(marked);
  let event = doc.backspace().unwrap();
  let outcome = padder.on_change_event(&event, &mut doc);
  (outcome, doc.marked())
}

#[test]
fn backspace_in_padded_pair_unpads() {
  let (outcome, text) = react(
    r#"import {| } from "library""#,
    ChangeEvent::deletion(at(8), at(9)),
  );
  assert_eq!(outcome, Outcome::Applied(ActionKind::Unpad));
  assert_eq!(text, r#"import {|} from "library""#);
}

#[test]
fn space_after_opener_pads() {
  let (outcome, text) = react(
    r#"import {| } from "library""#,
    ChangeEvent::insertion(at(8), " "),
  );
  assert_eq!(outcome, Outcome::Applied(ActionKind::Pad));
  assert_eq!(text, r#"import { | } from "library""#);
}

#[test]
fn typed_closer_before_padded_closer_skips() {
  let (outcome, text) = react(
    r#"import { |} } from "library""#,
    ChangeEvent::insertion(at(9), "}"),
  );
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, r#"import {  }| from "library""#);
}

#[test]
fn closer_inside_open_string_is_left_alone() {
  let (outcome, text) = react(
    r#"import { foo: "bar|} }"#,
    ChangeEvent::insertion(at(18), "}"),
  );
  assert_eq!(outcome, Outcome::Ignored);
  assert_eq!(text, r#"import { foo: "bar|} }"#);
}

#[test]
fn backspace_after_padding_space_is_left_alone() {
  let (outcome, text) = react(
    r#"import { |} from "library""#,
    ChangeEvent::deletion(at(9), at(10)),
  );
  assert_eq!(outcome, Outcome::Ignored);
  assert_eq!(text, r#"import { |} from "library""#);
}

#[test]
fn space_before_opener_is_left_alone() {
  let (outcome, text) = react(
    r#"import |{ } from "library""#,
    ChangeEvent::insertion(at(7), " "),
  );
  assert_eq!(outcome, Outcome::Ignored);
  assert_eq!(text, r#"import |{ } from "library""#);
}

#[test]
fn keystrokes_round_trip() {
  let padder = Padder::default();

  let (_, text) = type_text(&padder, "import {|} from 'library'", " ");
  assert_eq!(text, "import { | } from 'library'");

  let (_, text) = type_text(&padder, &text, "foo");
  assert_eq!(text, "import { foo| } from 'library'");

  let (_, text) = type_text(&padder, &text, " ");
  assert_eq!(text, "import { foo | } from 'library'");

  let (outcome, text) = type_text(&padder, &text, "}");
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, "import { foo  }| from 'library'");

  let (outcome, text) = backspace(&padder, "import { | } from 'library'");
  assert_eq!(outcome, Outcome::Applied(ActionKind::Unpad));
  assert_eq!(text, "import {|} from 'library'");
}

#[test]
fn every_default_pair_pads_and_unpads() {
  let padder = Padder::default();

  for &(open, close) in DEFAULT_PAIRS {
    let (outcome, padded) = type_text(&padder, &format!("x = {open}|{close};"), " ");
    assert_eq!(outcome, Outcome::Applied(ActionKind::Pad), "{open}{close}");
    assert_eq!(padded, format!("x = {open} | {close};"));

    let (outcome, unpadded) = backspace(&padder, &padded);
    assert_eq!(outcome, Outcome::Applied(ActionKind::Unpad), "{open}{close}");
    assert_eq!(unpadded, format!("x = {open}|{close};"));
  }
}

#[test]
fn pad_only_mirrors_right_before_closer() {
  let padder = Padder::default();

  for marked in ["{|x}", "a|}", "{ |}", "(|]", "|{}"] {
    let (outcome, text) = type_text(&padder, marked, " ");
    assert_eq!(outcome, Outcome::Ignored, "{marked}");
    assert_eq!(text, marked.replacen('|', " |", 1));
  }
}

#[test]
fn skip_close_walks_out_of_nested_pairs() {
  let padder = Padder::default();

  let (_, text) = type_text(&padder, "let v = { a: { b| } };", " ");
  assert_eq!(text, "let v = { a: { b | } };");

  let (outcome, text) = type_text(&padder, &text, "}");
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, "let v = { a: { b  }| };");

  let (outcome, text) = type_text(&padder, &text, "}");
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, "let v = { a: { b  } }|;");
  assert_eq!(text.matches('}').count(), 2);
}

#[test]
fn skip_close_requires_the_innermost_opener() {
  let padder = Padder::default();

  let (outcome, text) = type_text(&padder, "f({ a: (1| })", ")");
  assert_eq!(outcome, Outcome::Ignored);
  assert_eq!(text, "f({ a: (1)| })");

  let (outcome, text) = type_text(&padder, "f({ a: [1]| })", "}");
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, "f({ a: [1] }|)");
}

#[test]
fn skip_close_ignores_escaped_and_quoted_openers() {
  let padder = Padder::default();

  let (outcome, _) = type_text(&padder, r#"s = "\"{" | }"#, "}");
  assert_eq!(outcome, Outcome::Ignored);

  let (outcome, text) = type_text(&padder, r#"{ s: "it\"s {" | }"#, "}");
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, r#"{ s: "it\"s {"  }|"#);
}

#[test]
fn multiple_cursors_disable_padding() {
  let padder = Padder::default();
  let mut doc = doc("{|} {|}");
  let event = doc.type_text(" ").unwrap();

  assert_eq!(doc.selections().len(), 2);
  assert_eq!(padder.on_change_event(&event, &mut doc), Outcome::Ignored);
  assert_eq!(doc.text().to_string(), "{ } {}");
}

#[test]
fn one_undo_reverts_keystroke_and_reaction() {
  let padder = Padder::default();
  let mut doc = doc("call(|)");

  let event = doc.type_text(" ").unwrap();
  padder.on_change_event(&event, &mut doc);
  assert_eq!(doc.marked(), "call( | )");

  assert!(doc.undo());
  assert_eq!(doc.marked(), "call(|)");
}

#[test]
fn other_lines_are_untouched() {
  let padder = Padder::default();
  let (outcome, text) = type_text(&padder, "{\n  [|]\n}", " ");
  assert_eq!(outcome, Outcome::Applied(ActionKind::Pad));
  assert_eq!(text, "{\n  [ | ]\n}");
}

#[test]
fn custom_pairs_from_config() {
  let config = PadderConfig::from_toml(
    r#"
      smart-close-max-parse-length = 40
      smart-pairs = { "<" = ">" }
    "#,
  )
  .unwrap();
  let padder = Padder::new(&config);

  let (outcome, text) = type_text(&padder, "Vec<|>", " ");
  assert_eq!(outcome, Outcome::Applied(ActionKind::Pad));
  assert_eq!(text, "Vec< | >");

  let (outcome, _) = type_text(&padder, "f(|)", " ");
  assert_eq!(outcome, Outcome::Ignored);

  let long = format!("{}Vec< T| >", "x".repeat(40));
  let (outcome, _) = type_text(&padder, &long, ">");
  assert_eq!(outcome, Outcome::Ignored);

  let (outcome, text) = type_text(&padder, "Vec< T| >", ">");
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, "Vec< T >|");
}

#[test]
fn skip_close_treats_empty_spans_as_closed() {
  let padder = Padder::default();

  let (outcome, text) = type_text(&padder, "{ foo() | }", "}");
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, "{ foo()  }|");

  let (outcome, text) = type_text(&padder, r#"{ a: "" | }"#, "}");
  assert_eq!(outcome, Outcome::Applied(ActionKind::SkipClose));
  assert_eq!(text, r#"{ a: ""  }|"#);
}
