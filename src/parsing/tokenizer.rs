
use super::source::{SourceOffset, Span};
use crate::util::clamp;

use regex::{Regex, Captures};
use once_cell::sync::Lazy;

/// A cursor over the input of a tokenizer. Cheap to clone, so a
/// tokenizer can be rewound by saving and restoring a copy, or by
/// [`seek`](TokenizerState::seek)ing to a saved position.
#[derive(Debug, Clone)]
pub struct TokenizerState<'a> {
  whole_input: &'a str,
  input: &'a str,
  position: SourceOffset,
}

#[derive(Debug, Clone)]
pub struct TokenizerMatch<'a> {
  matched_str: &'a str,
  start: SourceOffset,
  end: SourceOffset,
}

#[derive(Debug)]
pub struct TokenizerCaptures<'a> {
  captures: Captures<'a>,
  start: SourceOffset,
  end: SourceOffset,
}

impl<'a> TokenizerState<'a> {
  pub fn new(input: &'a str) -> Self {
    Self {
      whole_input: input,
      input,
      position: SourceOffset(0)
    }
  }

  /// Length of the whole input, in bytes, regardless of position.
  pub fn len(&self) -> usize {
    self.whole_input.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn remaining_len(&self) -> usize {
    self.input.len()
  }

  pub fn remaining(&self) -> &'a str {
    self.input
  }

  pub fn whole_input(&self) -> &'a str {
    self.whole_input
  }

  pub fn is_eof(&self) -> bool {
    self.input.is_empty()
  }

  pub fn peek(&self) -> Option<char> {
    self.input.chars().next()
  }

  /// Seeks to an absolute position in the string. Out of bounds
  /// indices are truncated, and positions inside a multi-byte
  /// character are moved back to the start of that character.
  pub fn seek(&mut self, pos: SourceOffset) {
    let mut pos = clamp(pos.0, 0, self.len());
    while !self.whole_input.is_char_boundary(pos) {
      pos -= 1;
    }
    self.position = SourceOffset(pos);
    self.input = &self.whole_input[pos..];
  }

  /// Advances the position of `self` by `amount` bytes, returning the
  /// skipped portion. Never advances beyond one-past-the-end of the
  /// input, and never stops inside a character.
  pub fn advance(&mut self, amount: usize) -> TokenizerMatch<'a> {
    let mut amount = amount.min(self.input.len());
    while !self.input.is_char_boundary(amount) {
      amount += 1;
    }

    let match_pos = self.current_pos();
    let (prefix, suffix) = self.input.split_at(amount);
    self.position.0 += amount;
    self.input = suffix;
    TokenizerMatch {
      matched_str: prefix,
      start: match_pos,
      end: match_pos + amount,
    }
  }

  pub fn current_pos(&self) -> SourceOffset {
    self.position
  }

  /// Consumes a single character, if any remain.
  pub fn read_char(&mut self) -> Option<TokenizerMatch<'a>> {
    let ch = self.peek()?;
    Some(self.advance(ch.len_utf8()))
  }

  pub fn read_literal(&mut self, literal: &str) -> Option<TokenizerMatch<'a>> {
    self.input.starts_with(literal).then(|| {
      self.advance(literal.len())
    })
  }

  /// If the current position of the string matches the given regex,
  /// returns the matched string and advances the tokenizer state. If
  /// not, returns `None`.
  ///
  /// Only a match starting exactly at the current position counts,
  /// so an unanchored regex that matches further on returns `None`.
  pub fn read_regex(&mut self, regex: &Regex) -> Option<TokenizerMatch<'a>> {
    let m = regex.find(self.input)?;
    if m.start() != 0 {
      return None;
    }
    Some(self.advance(m.len()))
  }

  pub fn read_regex_with_captures(&mut self, regex: &Regex) -> Option<TokenizerCaptures<'a>> {
    let c = regex.captures(self.input)?;
    let whole = c.get(0)?;
    if whole.start() != 0 {
      return None;
    }
    let m = self.advance(whole.len());
    Some(TokenizerCaptures {
      captures: c,
      start: m.start(),
      end: m.end(),
    })
  }

  pub fn consume_spaces(&mut self) {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*").unwrap());
    self.read_regex(&RE);
  }
}

impl<'h> TokenizerMatch<'h> {
  pub fn as_str(&self) -> &'h str {
    self.matched_str
  }
  pub fn start(&self) -> SourceOffset {
    self.start
  }
  pub fn end(&self) -> SourceOffset {
    self.end
  }
  pub fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }
  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }
}

impl<'h> TokenizerCaptures<'h> {
  pub fn as_str(&self) -> &'h str {
    self.captures.get(0).map_or("", |m| m.as_str())
  }
  /// The text of capture group `i`, or `None` if it did not
  /// participate in the match.
  pub fn get(&self, i: usize) -> Option<&'h str> {
    self.captures.get(i).map(|m| m.as_str())
  }
  pub fn start(&self) -> SourceOffset {
    self.start
  }
  pub fn end(&self) -> SourceOffset {
    self.end
  }
  pub fn span(&self) -> Span {
    Span::new(self.start, self.end)
  }
}

impl Default for TokenizerState<'static> {
  fn default() -> Self {
    TokenizerState::new("")
  }
}
