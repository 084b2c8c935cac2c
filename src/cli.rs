use crate::libhenshuu::mondai::{IdAlloc, Question, QuestionKind};
use crate::libhenshuu::shiken::Shiken;
use crate::Error;
use colored::Colorize;
use log::debug;
use text_io::read;

#[derive(Debug, PartialEq)]
enum Command {
    Next,
    Prev,
    Goto(usize),
    EditText,
    EditExplanation,
    EditScore,
    EditKind,
    AddAnswer,
    EditAnswer(usize),
    MarkCorrect(usize),
    Strike(usize),
    RemoveAnswer(usize),
    AddQuestion,
    DeleteQuestion,
    Help,
    Quit,
    Unknown,
}

impl Command {
    fn from_str(input: &str) -> Command {
        let mut parts = input.split_whitespace();
        let word = parts.next().unwrap_or("");
        let arg = parts.next().and_then(|n| n.parse::<usize>().ok());
        match (word, arg) {
            ("n", _) => Command::Next,
            ("p", _) => Command::Prev,
            ("g", Some(n)) if n > 0 => Command::Goto(n - 1),
            ("t", _) => Command::EditText,
            ("e", _) => Command::EditExplanation,
            ("s", _) => Command::EditScore,
            ("y", _) => Command::EditKind,
            ("a", _) => Command::AddAnswer,
            ("x", Some(n)) if n > 0 => Command::EditAnswer(n - 1),
            ("c", Some(n)) if n > 0 => Command::MarkCorrect(n - 1),
            ("k", Some(n)) if n > 0 => Command::Strike(n - 1),
            ("r", Some(n)) if n > 0 => Command::RemoveAnswer(n - 1),
            ("A", _) => Command::AddQuestion,
            ("D", _) => Command::DeleteQuestion,
            ("h", _) => Command::Help,
            ("q", _) => Command::Quit,
            _ => Command::Unknown,
        }
    }
}

fn print_help() {
    println!(
        "{}",
        "n/p next/prev question | g N goto | A add question | D delete question (new only)"
            .cyan()
    );
    println!(
        "{}",
        "t text | e explanation | s score | y type (new only) | a add answer".cyan()
    );
    println!(
        "{}",
        "x N answer text | c N correct | k N strike (multiple choice) | r N remove | q quit"
            .cyan()
    );
}

fn print_question(question: &Question, idx: usize, total: usize) {
    let leading = format!("{}/{}. ", idx + 1, total);
    let flags = if question.is_new { ", new" } else { "" };
    println!(
        "{}{}",
        leading.cyan(),
        format!("{} ({} pts{})", question.kind.label(), question.score, flags)
            .black()
            .bold()
            .on_white()
    );
    let indent = " ".repeat(leading.len());
    if question.text.is_empty() {
        println!("{}{}", indent, "(no question text yet)".yellow());
    } else {
        println!("{}{}", indent, question.text);
    }
    if !question.explanation.is_empty() {
        println!("{}{}", indent, question.explanation.italic());
    }
    for (i, answer) in question.answers.iter().enumerate() {
        let marker = if answer.is_correct {
            "[x]".bright_green()
        } else {
            "[ ]".normal()
        };
        let text = if answer.text.is_empty() {
            String::from("(empty)")
        } else {
            answer.text.clone()
        };
        let text = if answer.is_striked {
            text.strikethrough().to_string()
        } else {
            text
        };
        println!("{}{}. {} {}", indent, format!("{}", i + 1).bold(), marker, text);
    }
}

pub fn cli_loop(shiken: &mut Shiken, ids: &mut IdAlloc) -> Result<(), Error> {
    let title = if shiken.title.is_empty() {
        "Untitled exam"
    } else {
        shiken.title.as_str()
    };
    println!(
        "{}",
        format!(
            "==========> {} ({} questions) <==========",
            title,
            shiken.questions.len()
        )
        .cyan()
    );
    print_help();

    let mut current = 0usize;
    loop {
        if shiken.questions.is_empty() {
            println!("{}", "No questions yet. `A` adds one.".yellow());
        } else {
            if current >= shiken.questions.len() {
                current = shiken.questions.len() - 1;
            }
            print_question(&shiken.questions[current], current, shiken.questions.len());
        }

        print!("{} ", "Command (h for help):".cyan());
        let line: String = read!("{}\n");
        let command = Command::from_str(line.trim());
        debug!("command: {:?}", command);

        match command {
            Command::Quit => {
                println!("{}", "Done editing!".cyan());
                return Ok(());
            }
            Command::Help => print_help(),
            Command::AddQuestion => {
                shiken
                    .questions
                    .push(Question::new(QuestionKind::SingleChoice));
                current = shiken.questions.len() - 1;
            }
            Command::Unknown => println!("{}", "Unknown command.".bright_red()),
            other => {
                if shiken.questions.is_empty() {
                    println!("{}", "There is no question to edit!".bright_red());
                    continue;
                }
                apply(shiken, &mut current, other, ids);
            }
        }
    }
}

fn apply(shiken: &mut Shiken, current: &mut usize, command: Command, ids: &mut IdAlloc) {
    let total = shiken.questions.len();
    let question = shiken.questions[*current].clone();

    macro_rules! answers_out_of_range {
        ($n:expr) => {
            if $n >= question.answers.len() {
                println!(
                    "{}",
                    format!("There are only {} answers!", question.answers.len()).bright_red()
                );
                return;
            }
        };
    }

    match command {
        Command::Next => {
            if *current + 1 < total {
                *current += 1;
            }
        }
        Command::Prev => *current = current.saturating_sub(1),
        Command::Goto(n) => {
            if n < total {
                *current = n;
            } else {
                println!(
                    "{}",
                    format!("There are only {} questions!", total).bright_red()
                );
            }
        }
        Command::EditText => {
            print!("{} ", "New question text:".cyan());
            let text: String = read!("{}\n");
            shiken.questions[*current] = question.with_text(text.trim().to_string());
        }
        Command::EditExplanation => {
            print!("{} ", "New explanation (empty clears it):".cyan());
            let text: String = read!("{}\n");
            shiken.questions[*current] = question.with_explanation(text.trim().to_string());
        }
        Command::EditScore => {
            print!("{} ", "New score:".cyan());
            let raw: String = read!("{}\n");
            match raw.trim().parse::<f64>() {
                Ok(score) => shiken.questions[*current] = question.with_score(score),
                Err(_) => println!("{}", "Not a number!".bright_red()),
            }
        }
        Command::EditKind => {
            if !question.is_new {
                println!("{}", "Type is locked once the question is saved.".bright_red());
                return;
            }
            for (i, kind) in QuestionKind::ALL.iter().enumerate() {
                println!("{}. {}", format!("{}", i + 1).bold(), kind.label());
            }
            print!("{} ", "Pick a type (1-4):".cyan());
            let raw: String = read!("{}\n");
            match raw.trim().parse::<usize>() {
                Ok(n) if (1..=QuestionKind::ALL.len()).contains(&n) => {
                    shiken.questions[*current] =
                        question.with_kind(QuestionKind::ALL[n - 1], ids);
                }
                _ => println!("{}", "Not a valid type!".bright_red()),
            }
        }
        Command::AddAnswer => {
            if question.can_add_answer() {
                shiken.questions[*current] = question.add_answer();
            } else {
                println!(
                    "{}",
                    "True/False questions only take two answers!".bright_red()
                );
            }
        }
        Command::EditAnswer(n) => {
            answers_out_of_range!(n);
            if question.kind.fixed_answer_text() {
                println!("{}", "True/False answers keep their text.".bright_red());
                return;
            }
            print!(
                "{} ",
                format!(
                    "New text for answer {} ({}):",
                    n + 1,
                    question.kind.answer_placeholder()
                )
                .cyan()
            );
            let text: String = read!("{}\n");
            shiken.questions[*current] = question.with_answer_text(n, text.trim().to_string());
        }
        Command::MarkCorrect(n) => {
            answers_out_of_range!(n);
            let checked = !question.answers[n].is_correct;
            shiken.questions[*current] = question.mark_correct(n, checked);
        }
        Command::Strike(n) => {
            if !question.kind.strikable() {
                println!(
                    "{}",
                    "Only multiple choice answers can be striked.".bright_red()
                );
                return;
            }
            answers_out_of_range!(n);
            let checked = !question.answers[n].is_striked;
            shiken.questions[*current] = question.strike(n, checked);
        }
        Command::RemoveAnswer(n) => {
            answers_out_of_range!(n);
            if question.can_remove_answer(n) {
                shiken.questions[*current] = question.remove_answer(n);
            } else {
                println!(
                    "{}",
                    "Saved answers can only be removed on a new question.".bright_red()
                );
            }
        }
        Command::DeleteQuestion => {
            if question.is_new {
                shiken.questions.remove(*current);
                *current = current.saturating_sub(1);
            } else {
                println!("{}", "Only new questions can be deleted here.".bright_red());
            }
        }
        Command::AddQuestion | Command::Help | Command::Quit | Command::Unknown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_with_one_based_indices() {
        assert_eq!(Command::from_str("c 1"), Command::MarkCorrect(0));
        assert_eq!(Command::from_str("k 3"), Command::Strike(2));
        assert_eq!(Command::from_str("g 10"), Command::Goto(9));
        assert_eq!(Command::from_str("q"), Command::Quit);
        assert_eq!(Command::from_str("c 0"), Command::Unknown);
        assert_eq!(Command::from_str("c"), Command::Unknown);
        assert_eq!(Command::from_str(""), Command::Unknown);
        assert_eq!(Command::from_str("zzz"), Command::Unknown);
    }
}
