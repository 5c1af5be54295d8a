use anyhow::{Context, Result};
use calc_common::error::report_err;
use calc_interpreter::Interpreter;
use calc_syntax::{Lexer, Lexicon, LexiconKind, Op};
use nu_ansi_term::{Color, Style};
use reedline::{
    EditCommand, Emacs, FileBackedHistory, KeyCode, KeyModifiers, PromptEditMode,
    PromptHistorySearch, Reedline, ReedlineEvent, Signal, StyledText, ValidationResult,
};
use termcolor::{ColorChoice, StandardStream};

use std::borrow::Cow;

pub fn run() -> Result<()> {
    let mut editor = editor()?;
    let mut interpreter = Interpreter::default();
    let stderr = StandardStream::stderr(ColorChoice::Auto);

    loop {
        match editor.read_line(&Prompt) {
            Ok(Signal::Success(line)) => match interpreter.run(&line) {
                Ok(Some(value)) => println!("{value}"),
                Ok(None) => (),
                Err(e) => {
                    report_err(&mut stderr.lock(), "<stdin>", &line, &e)
                        .context("could not report error")?;
                }
            },
            Ok(Signal::CtrlC) => eprintln!("CTRL-C"),
            Ok(Signal::CtrlD) => break,
            Err(e) => {
                eprintln!("error: {e:?}");
                break;
            }
        }
    }
    Ok(())
}

pub fn editor() -> Result<Reedline> {
    let mut keybindings = reedline::default_emacs_keybindings();
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );

    let data_dir = dirs::data_dir().context("could not find data directory")?;
    let history_path = data_dir.join("calc/history.txt");
    let history = Box::new(
        FileBackedHistory::with_file(10000, history_path.clone())
            .with_context(|| format!("could not open history file: {}", history_path.display()))?,
    );

    let editor = Reedline::create()
        .with_edit_mode(Box::new(Emacs::new(keybindings)))
        .with_highlighter(Box::new(Highlighter))
        .with_history(history)
        .with_validator(Box::new(Validator));
    Ok(editor)
}

// Colors follow base16-google-dark, using the high-intensity variants.
const DEFAULT: Color = Color::LightGray;
const COMMENT: Color = Color::DarkGray;
const CONSTANT: Color = Color::LightCyan;
const INVALID: Color = Color::LightRed;
const OPERATOR: Color = Color::LightPurple;
const VARIABLE: Color = Color::LightYellow;

struct Highlighter;

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let mut curr_end = 0;

        for lexicon in Lexer::new(line) {
            let (fg, span) = match &lexicon {
                Ok((lexicon, span)) => (color(lexicon), span.clone()),
                Err(e) => (INVALID, e.span().clone()),
            };
            push_gap(&mut output, &line[curr_end..span.start]);
            output.push((Style::new().fg(fg), line[span.clone()].to_string()));
            curr_end = span.end;
        }
        push_gap(&mut output, &line[curr_end..]);

        output
    }
}

fn color(lexicon: &Lexicon) -> Color {
    match lexicon.kind() {
        LexiconKind::Scalar => CONSTANT,
        LexiconKind::Identifier => VARIABLE,
        LexiconKind::Operator => match lexicon.op() {
            Op::OpenParen | Op::CloseParen => DEFAULT,
            _ => OPERATOR,
        },
    }
}

/// Pushes the text between two lexicons: whitespace, possibly ending in a
/// comment.
fn push_gap(output: &mut StyledText, gap: &str) {
    if gap.is_empty() {
        return;
    }
    let (space, comment) = gap.split_at(gap.find('#').unwrap_or(gap.len()));
    if !space.is_empty() {
        output.push((Style::new().fg(DEFAULT), space.to_string()));
    }
    if !comment.is_empty() {
        output.push((Style::new().fg(COMMENT), comment.to_string()));
    }
}

struct Validator;

impl reedline::Validator for Validator {
    fn validate(&self, line: &str) -> ValidationResult {
        if calc_syntax::is_complete(line) {
            ValidationResult::Complete
        } else {
            ValidationResult::Incomplete
        }
    }
}

pub struct Prompt;

impl reedline::Prompt for Prompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed(">>> ")
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _: PromptEditMode) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(&self, _: PromptHistorySearch) -> Cow<str> {
        Cow::Borrowed("")
    }
}
