//! Markdown parser for study guide pages.
//!
//! # Format
//! ```markdown
//! # Art History Study Guide
//!
//! ## Quiz
//! Q: Who painted The Starry Night?
//! - Claude Monet
//! * Vincent van Gogh
//! - Paul Cézanne
//!
//! ## Flashcards
//! Q: Chiaroscuro
//! A: Strong contrast between light and dark.
//! Multiple lines are supported.
//!
//! ## Matching
//! M: The Birth of Venus = Botticelli
//! ```
//!
//! `*` marks the single correct response of a question. A `#` title before
//! the first section is optional and ignored. Inside a section it is text.

use crate::error::{ParseError, Result};
use crate::types::{MatchPair, RawCard, RawQuestion, StudyGuide};

/// Parse markdown content into a study guide.
pub fn parse(content: &str) -> Result<StudyGuide> {
    let mut parser = Parser::new();

    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }

    parser.finalize()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Quiz,
    Flashcards,
    Matching,
}

impl Section {
    fn from_heading(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "quiz" | "multiple choice" => Some(Self::Quiz),
            "flashcards" => Some(Self::Flashcards),
            "matching" | "matching game" => Some(Self::Matching),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Front,
    Back,
}

struct QuestionBuilder {
    prompt: String,
    responses: Vec<(String, bool)>,
    start_line: usize,
}

impl QuestionBuilder {
    fn build(self) -> Result<RawQuestion> {
        let line = self.start_line;
        if self.responses.is_empty() {
            return Err(ParseError::NoResponses { line });
        }

        let mut correct = self.responses.iter().enumerate().filter(|(_, (_, ok))| *ok);
        let index = match (correct.next(), correct.next()) {
            (Some((index, _)), None) => index,
            (None, _) => return Err(ParseError::NoCorrectResponse { line }),
            (Some(_), Some(_)) => return Err(ParseError::MultipleCorrect { line }),
        };

        Ok(RawQuestion {
            prompt: self.prompt.trim().to_string(),
            responses: self.responses.into_iter().map(|(label, _)| label).collect(),
            correct: index,
            line_number: line,
        })
    }
}

struct CardBuilder {
    front: Option<String>,
    back: Option<String>,
    start_line: usize,
}

impl CardBuilder {
    fn build(self) -> Result<RawCard> {
        let back = self.back.ok_or(ParseError::MissingAnswer {
            line: self.start_line,
        })?;
        let front = self.front.unwrap_or_default();

        Ok(RawCard {
            front: front.trim().to_string(),
            back: back.trim().to_string(),
            line_number: self.start_line,
        })
    }
}

struct Parser {
    guide: StudyGuide,
    section: Option<Section>,
    question: Option<QuestionBuilder>,
    card: Option<CardBuilder>,
    field: Option<Field>,
    buffer: Vec<String>,
}

impl Parser {
    fn new() -> Self {
        Self {
            guide: StudyGuide::default(),
            section: None,
            question: None,
            card: None,
            field: None,
            buffer: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        let line_type = Self::parse_line(line);

        if let LineType::Heading(name) = line_type {
            self.finish_pending()?;
            let section = Section::from_heading(name).ok_or_else(|| ParseError::UnknownSection {
                line: line_num,
                name: name.to_string(),
            })?;
            self.section = Some(section);
            return Ok(());
        }
        match self.section {
            None => match line_type {
                LineType::Empty | LineType::Title => Ok(()),
                _ => Err(ParseError::OutsideSection { line: line_num }),
            },
            Some(Section::Quiz) => self.quiz_line(line_type, line, line_num),
            Some(Section::Flashcards) => self.card_line(line_type, line, line_num),
            Some(Section::Matching) => self.pair_line(line_type, line, line_num),
        }
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("## ") {
            LineType::Heading(rest.trim())
        } else if trimmed.starts_with("# ") {
            LineType::Title
        } else if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Question(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Answer(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("M:") {
            LineType::Pair(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("* ") {
            LineType::Response(rest.trim(), true)
        } else if let Some(rest) = trimmed.strip_prefix("- ") {
            LineType::Response(rest.trim(), false)
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text
        }
    }

    fn quiz_line(&mut self, line_type: LineType<'_>, line: &str, line_num: usize) -> Result<()> {
        match line_type {
            LineType::Question(text) => {
                self.finish_question()?;
                self.question = Some(QuestionBuilder {
                    prompt: text.to_string(),
                    responses: Vec::new(),
                    start_line: line_num,
                });
            }
            LineType::Response(text, correct) => {
                let question = self
                    .question
                    .as_mut()
                    .ok_or(ParseError::MissingQuestion { line: line_num })?;
                question.responses.push((text.to_string(), correct));
            }
            LineType::Empty => {}
            _ => {
                let question = self
                    .question
                    .as_mut()
                    .ok_or(ParseError::MissingQuestion { line: line_num })?;
                // Continuation of the prompt, or of the last response
                let target = match question.responses.last_mut() {
                    Some((label, _)) => label,
                    None => &mut question.prompt,
                };
                target.push(' ');
                target.push_str(line.trim());
            }
        }
        Ok(())
    }

    fn card_line(&mut self, line_type: LineType<'_>, line: &str, line_num: usize) -> Result<()> {
        match line_type {
            LineType::Question(text) => {
                self.finish_card()?;
                self.card = Some(CardBuilder {
                    front: None,
                    back: None,
                    start_line: line_num,
                });
                self.field = Some(Field::Front);
                self.buffer.push(text.to_string());
            }
            LineType::Answer(text) => {
                if self.card.is_none() {
                    return Err(ParseError::MissingQuestion { line: line_num });
                }
                self.flush_buffer();
                self.field = Some(Field::Back);
                self.buffer.push(text.to_string());
            }
            LineType::Empty => self.buffer.push(String::new()),
            _ => {
                if self.card.is_none() {
                    return Err(ParseError::MissingQuestion { line: line_num });
                }
                self.buffer.push(line.trim_end().to_string());
            }
        }
        Ok(())
    }

    fn pair_line(&mut self, line_type: LineType<'_>, line: &str, line_num: usize) -> Result<()> {
        match line_type {
            LineType::Empty => Ok(()),
            LineType::Pair(text) => {
                let malformed = || ParseError::MalformedPair {
                    line: line_num,
                    value: text.to_string(),
                };
                let (left, right) = text.split_once('=').ok_or_else(malformed)?;
                let (left, right) = (left.trim(), right.trim());
                if left.is_empty() || right.is_empty() {
                    return Err(malformed());
                }
                self.guide.pairs.push(MatchPair {
                    left: left.to_string(),
                    right: right.to_string(),
                    line_number: line_num,
                });
                Ok(())
            }
            _ => Err(ParseError::MalformedPair {
                line: line_num,
                value: line.trim().to_string(),
            }),
        }
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let Some(ref mut card) = self.card {
            match self.field {
                Some(Field::Front) => card.front = Some(content),
                Some(Field::Back) => card.back = Some(content),
                None => {}
            }
        }
    }

    fn finish_question(&mut self) -> Result<()> {
        if let Some(question) = self.question.take() {
            self.guide.questions.push(question.build()?);
        }
        Ok(())
    }

    fn finish_card(&mut self) -> Result<()> {
        self.flush_buffer();
        self.field = None;
        if let Some(card) = self.card.take() {
            self.guide.flashcards.push(card.build()?);
        }
        Ok(())
    }

    fn finish_pending(&mut self) -> Result<()> {
        self.finish_question()?;
        self.finish_card()
    }

    fn finalize(mut self) -> Result<StudyGuide> {
        self.finish_pending()?;
        Ok(self.guide)
    }
}

#[derive(Clone, Copy)]
enum LineType<'a> {
    Title,
    Heading(&'a str),
    Question(&'a str),
    Answer(&'a str),
    Pair(&'a str),
    Response(&'a str, bool),
    Text,
    Empty,
}
