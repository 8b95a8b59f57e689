/// Lexical state of the scanner. Only `Default` runs the token rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum Mode {
    #[default]
    #[strum(serialize = "DEFAULT")]
    Default,
    #[strum(serialize = "BLOCK_COMMENT")]
    BlockComment,
    #[strum(serialize = "STRING")]
    String,
}

/// Lexemes that move the scanner between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// `/*` in default mode
    OpenComment,
    /// `*/` inside a block comment
    CloseComment,
    /// `"` in default mode
    OpenQuote,
    /// unescaped `"` inside a string
    CloseQuote,
    /// newline inside a string
    LineBreak,
}

impl Mode {
    /// Next mode after `trigger`. Triggers that mean nothing in the current
    /// mode leave it unchanged.
    pub fn transition(self, trigger: Trigger) -> Mode {
        match (self, trigger) {
            (Mode::Default, Trigger::OpenComment) => Mode::BlockComment,
            (Mode::Default, Trigger::OpenQuote) => Mode::String,
            (Mode::BlockComment, Trigger::CloseComment) => Mode::Default,
            (Mode::String, Trigger::CloseQuote | Trigger::LineBreak) => Mode::Default,
            (mode, _) => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Mode::Default, Trigger::OpenComment, Mode::BlockComment)]
    #[case(Mode::Default, Trigger::OpenQuote, Mode::String)]
    #[case(Mode::BlockComment, Trigger::CloseComment, Mode::Default)]
    #[case(Mode::String, Trigger::CloseQuote, Mode::Default)]
    #[case(Mode::String, Trigger::LineBreak, Mode::Default)]
    fn valid_transitions(#[case] from: Mode, #[case] trigger: Trigger, #[case] to: Mode) {
        assert_eq!(from.transition(trigger), to);
    }

    #[rstest]
    #[case(Mode::Default, Trigger::CloseComment)]
    #[case(Mode::Default, Trigger::CloseQuote)]
    #[case(Mode::BlockComment, Trigger::OpenQuote)]
    #[case(Mode::BlockComment, Trigger::LineBreak)]
    #[case(Mode::String, Trigger::OpenComment)]
    fn unrelated_triggers_keep_mode(#[case] mode: Mode, #[case] trigger: Trigger) {
        assert_eq!(mode.transition(trigger), mode);
    }

    #[test]
    fn starts_in_default() {
        assert_eq!(Mode::default(), Mode::Default);
    }
}
