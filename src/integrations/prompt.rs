#![allow(clippy::missing_errors_doc)]
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Line-based interactive prompts
pub trait Prompter {
    /// Ask a yes/no question; an empty answer returns `default_yes`
    fn confirm(&mut self, message: &str, default_yes: bool) -> Result<bool>;

    /// Ask for free text; an empty answer returns `default`
    fn input(&mut self, message: &str, default: &str) -> Result<String>;

    /// Ask the user to pick one of `options`; returns its index
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize>;
}

/// Prompter over a reader and writer, normally stdin and stderr
///
/// Prompts go to stderr so stdout stays reserved for command output.
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[cfg(test)]
    pub(crate) fn into_writer(self) -> W {
        self.writer
    }

    /// Print `prompt` and read one trimmed line; EOF reads as an empty line
    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{prompt}").context("Failed to write prompt")?;
        self.writer.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .context("Failed to read input")?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn confirm(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
        let answer = self.ask(&format!("{message} {suffix}: "))?.to_lowercase();

        if answer.is_empty() {
            return Ok(default_yes);
        }
        Ok(answer == "y" || answer == "yes")
    }

    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        let prompt = if default.is_empty() {
            format!("{message}: ")
        } else {
            format!("{message} [{default}]: ")
        };
        let answer = self.ask(&prompt)?;

        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
        writeln!(self.writer, "{message}").context("Failed to write prompt")?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.writer, "  [{}] {option}", i + 1).context("Failed to write prompt")?;
        }
        let answer = self.ask("Choose an option: ")?;

        match answer.parse::<usize>() {
            Ok(choice) if (1..=options.len()).contains(&choice) => Ok(choice - 1),
            _ => anyhow::bail!("Invalid selection: {answer}"),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    /// Answers prompts from a fixed script and records the questions asked
    pub struct ScriptedPrompter {
        answers: VecDeque<String>,
        pub asked: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(ToString::to_string).collect(),
                asked: Vec::new(),
            }
        }

        fn next(&mut self, message: &str) -> String {
            self.asked.push(message.to_string());
            self.answers
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected prompt: {message}"))
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, message: &str, default_yes: bool) -> Result<bool> {
            let answer = self.next(message).to_lowercase();
            Ok(if answer.is_empty() {
                default_yes
            } else {
                answer == "y" || answer == "yes"
            })
        }

        fn input(&mut self, message: &str, default: &str) -> Result<String> {
            let answer = self.next(message);
            Ok(if answer.is_empty() {
                default.to_string()
            } else {
                answer
            })
        }

        fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
            let answer = self.next(message);
            match answer.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => Ok(choice - 1),
                _ => anyhow::bail!("Invalid selection: {answer}"),
            }
        }
    }

    #[test]
    fn test_confirm_default_yes_on_empty() {
        let mut p = prompter("\n");
        assert!(p.confirm("Push branch?", true).unwrap());
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(out, "Push branch? [Y/n]: ");
    }

    #[test]
    fn test_confirm_default_no_on_empty() {
        let mut p = prompter("\n");
        assert!(!p.confirm("Create as draft?", false).unwrap());
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(out, "Create as draft? [y/N]: ");
    }

    #[test]
    fn test_confirm_answers() {
        assert!(prompter("YES\n").confirm("q", false).unwrap());
        assert!(prompter(" y \n").confirm("q", false).unwrap());
        assert!(!prompter("n\n").confirm("q", true).unwrap());
        assert!(!prompter("maybe\n").confirm("q", true).unwrap());
    }

    #[test]
    fn test_confirm_eof_uses_default() {
        assert!(prompter("").confirm("q", true).unwrap());
    }

    #[test]
    fn test_input_with_default() {
        let mut p = prompter("\n");
        assert_eq!(p.input("Base branch", "main").unwrap(), "main");
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(out, "Base branch [main]: ");
    }

    #[test]
    fn test_input_override() {
        let mut p = prompter("develop\n");
        assert_eq!(p.input("Base branch", "main").unwrap(), "develop");
    }

    #[test]
    fn test_input_without_default() {
        let mut p = prompter("42\n");
        assert_eq!(p.input("Issue number", "").unwrap(), "42");
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert_eq!(out, "Issue number: ");
    }

    #[test]
    fn test_select_valid() {
        let options = vec!["feature".to_string(), "bugfix".to_string()];
        let mut p = prompter("2\n");
        assert_eq!(p.select("Select branch type:", &options).unwrap(), 1);
        let out = String::from_utf8(p.into_writer()).unwrap();
        assert!(out.starts_with("Select branch type:\n  [1] feature\n  [2] bugfix\n"));
        assert!(out.ends_with("Choose an option: "));
    }

    #[test]
    fn test_select_out_of_range() {
        let options = vec!["feature".to_string()];
        for input in ["0\n", "2\n", "abc\n", "\n"] {
            let err = prompter(input).select("Pick", &options).unwrap_err();
            assert!(err.to_string().starts_with("Invalid selection"));
        }
    }
}
