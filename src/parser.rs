// src/parser.rs

//! Converts the free-text quiz returned by the language model into
//! structured questions.
//!
//! The model is asked for numbered questions, four lettered options and an
//! `Answer:` line, but it does not always comply. Parsing is therefore total:
//! blocks that cannot be turned into a complete question are dropped, and the
//! caller only ever sees an empty list when nothing usable was found.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::quiz::ParsedQuestion;

/// A question block starts on a line beginning with `<integer>.`.
static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.").expect("valid block regex"));

/// Leading numbering removed from the question stem.
static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.\s*").expect("valid prefix regex"));

/// `a) text`, `B. text`, ...
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-d][).]\s*(.+)").expect("valid option regex"));

/// `Answer: c) text`, `answer - b`, `Correct Answer: D.` ...
static ANSWER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)answer[:\-]?\s*([a-d])[).]?\s*(.+)?").expect("valid answer regex")
});

/// Parses raw model output into questions.
///
/// Never fails. Only blocks with a non-empty stem and exactly four options
/// are returned, in the order they appear.
pub fn parse(text: &str) -> Vec<ParsedQuestion> {
    split_blocks(text)
        .into_iter()
        .filter_map(|block| parse_block(&block))
        .collect()
}

/// Groups lines into blocks, each starting at a numbered line.
/// Lines before the first numbered line are discarded.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();

    for line in text.lines() {
        if BLOCK_START.is_match(line) {
            blocks.push(vec![line]);
        } else if let Some(current) = blocks.last_mut() {
            current.push(line);
        }
    }

    blocks
}

fn parse_block(block: &[&str]) -> Option<ParsedQuestion> {
    let lines: Vec<&str> = block
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 2 {
        return None;
    }

    let question = NUMBER_PREFIX.replace(lines[0], "").trim().to_string();

    let mut options: Vec<String> = Vec::new();
    let mut correct_answer = String::new();

    // Single forward pass: an answer line can only reference options seen
    // before it.
    for line in &lines[1..] {
        if let Some(caps) = OPTION_LINE.captures(line) {
            options.push(caps[1].trim().to_string());
        } else if let Some(caps) = ANSWER_LINE.captures(line) {
            let index = letter_index(&caps[1]);
            if let Some(option) = index.and_then(|i| options.get(i)) {
                correct_answer = option.clone();
            } else if let Some(trailing) = caps.get(2) {
                correct_answer = trailing.as_str().trim().to_string();
            }
        }
    }

    if correct_answer.is_empty() {
        if let Some(first) = options.first() {
            correct_answer = first.clone();
        }
    }

    if question.is_empty() || options.len() != 4 {
        return None;
    }

    Some(ParsedQuestion {
        question,
        options,
        correct_answer,
    })
}

/// Maps an option letter to its zero-based position.
fn letter_index(letter: &str) -> Option<usize> {
    match letter.to_ascii_lowercase().as_str() {
        "a" => Some(0),
        "b" => Some(1),
        "c" => Some(2),
        "d" => Some(3),
        _ => None,
    }
}
