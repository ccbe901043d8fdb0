//! Diagnostic rendering for parse errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use hml_tokenizer::TokenKind;

use crate::ParseError;

impl ParseError {
    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        // ariadne counts characters, like `Position`.
        let mut range: std::ops::Range<usize> = self.position().into();
        if range.is_empty() && range.start > 0 {
            // End of document: point at the last character instead.
            range.start -= 1;
        }

        match self {
            ParseError::Structural { message, .. } => {
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(message)
                    .with_label(
                        Label::new((filename, range))
                            .with_message("misplaced node")
                            .with_color(Color::Red),
                    )
                    .with_help(
                        "a document has a single root; every other node must be indented \
                         under it, at the same depth as its siblings",
                    )
            }

            ParseError::InvalidToken {
                token, expected, ..
            } => {
                let found = match token.kind {
                    TokenKind::EndOfDocument => "document ends here".to_string(),
                    kind => format!("found {}", kind.label()),
                };
                let expected = expected
                    .iter()
                    .map(TokenKind::label)
                    .collect::<Vec<_>>()
                    .join(", ");
                Report::build(ReportKind::Error, (filename, range.clone()))
                    .with_message(format!("unexpected {}", token.kind.label()))
                    .with_label(
                        Label::new((filename, range))
                            .with_message(found)
                            .with_color(Color::Red),
                    )
                    .with_help(format!("expected one of: {}", expected))
            }
        }
    }
}
