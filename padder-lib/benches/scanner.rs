//! Benchmarks for the line scanner and the padder's per-keystroke cost.
//!
//! Run with: `cargo bench -p padder-lib --bench scanner`

use divan::{
  Bencher,
  black_box,
};
use padder_lib::{
  change::ChangeEvent,
  document::Document,
  padding::Padder,
  pairs::PairRegistry,
  position::Position,
  scanner::{
    remove_escaped_quotes,
    strip_closed_pairs,
    unclosed_pairs,
  },
};

fn main() {
  divan::main();
}

/// A single line of roughly `len` chars of nested object literals, left open
/// at the end.
fn make_line(len: usize) -> String {
  let chunk = r#"{ key: "va\"l{ue", list: [1, (2 + 3), 'x'], nested: { a: `t` } }, "#;
  let mut line = String::from("const value = [ ");
  while line.len() < len {
    line.push_str(chunk);
  }
  line.push_str("{ last: ");
  line
}

mod scan {
  use super::*;

  #[divan::bench(args = [64, 1000, 10_000])]
  fn unclosed(bencher: Bencher, len: usize) {
    let line = make_line(len);
    let pairs = PairRegistry::default();

    bencher.bench(|| black_box(unclosed_pairs(black_box(&line), &pairs)));
  }

  #[divan::bench(args = [64, 1000, 10_000])]
  fn strip(bencher: Bencher, len: usize) {
    let line = make_line(len);
    let unescaped = remove_escaped_quotes(&line).into_owned();
    let pairs = PairRegistry::default();

    bencher.bench(|| black_box(strip_closed_pairs(black_box(&unescaped), &pairs)));
  }

  #[divan::bench]
  fn deeply_nested(bencher: Bencher) {
    let line = format!("{}{}", "{ [ ( ".repeat(200), ") ] } ".repeat(199));
    let pairs = PairRegistry::default();

    bencher.bench(|| black_box(unclosed_pairs(black_box(&line), &pairs)));
  }
}

mod classify {
  use super::*;

  #[divan::bench(args = [64, 1000])]
  fn skip_close(bencher: Bencher, len: usize) {
    let line = make_line(len);
    let col = line.chars().count();
    let doc = Document::from_marked(&format!("{line}}}| }}")).unwrap();
    let event = ChangeEvent::insertion(Position::new(0, col), "}");
    let padder = Padder::default();

    bencher.bench(|| black_box(padder.classify(black_box(&event), &doc)));
  }

  #[divan::bench]
  fn pad(bencher: Bencher) {
    let doc = Document::from_marked("import { |} from 'library'").unwrap();
    let event = ChangeEvent::insertion(Position::new(0, 8), " ");
    let padder = Padder::default();

    bencher.bench(|| black_box(padder.classify(black_box(&event), &doc)));
  }
}
