use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
    TrueFalse,
    Matching,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::SingleChoice,
        QuestionKind::MultiChoice,
        QuestionKind::TrueFalse,
        QuestionKind::Matching,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "Single Choice",
            QuestionKind::MultiChoice => "Multiple Choice",
            QuestionKind::TrueFalse => "True/False",
            QuestionKind::Matching => "Matching",
        }
    }

    pub fn answer_placeholder(self) -> &'static str {
        match self {
            QuestionKind::TrueFalse => "True or False",
            QuestionKind::Matching => "Item ↔ Match (e.g., \"Word ↔ Meaning\")",
            _ => "Answer option",
        }
    }

    pub fn exclusive_correct(self) -> bool {
        !matches!(self, QuestionKind::MultiChoice)
    }

    pub fn strikable(self) -> bool {
        matches!(self, QuestionKind::MultiChoice)
    }

    pub fn answer_cap(self) -> Option<usize> {
        match self {
            QuestionKind::TrueFalse => Some(2),
            _ => None,
        }
    }

    pub fn fixed_answer_text(self) -> bool {
        matches!(self, QuestionKind::TrueFalse)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "questionText", default)]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub is_striked: bool,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub is_new: bool,
}

#[derive(Debug)]
pub struct IdAlloc {
    next_id: i64,
}

impl IdAlloc {
    pub fn seed(questions: &[Question]) -> IdAlloc {
        let max = questions
            .iter()
            .flat_map(|q| {
                q.id.into_iter()
                    .chain(q.answers.iter().filter_map(|a| a.id))
            })
            .max()
            .unwrap_or(0);
        IdAlloc { next_id: max + 1 }
    }

    pub fn next(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Question {
    pub fn new(kind: QuestionKind) -> Question {
        Question {
            id: None,
            kind,
            text: String::new(),
            explanation: String::new(),
            score: 0.0,
            answers: Vec::new(),
            is_new: true,
        }
    }

    pub fn with_text(&self, text: String) -> Question {
        Question {
            text,
            ..self.clone()
        }
    }

    pub fn with_explanation(&self, explanation: String) -> Question {
        Question {
            explanation,
            ..self.clone()
        }
    }

    pub fn with_score(&self, score: f64) -> Question {
        let score = if score.is_finite() && score >= 0.0 {
            score
        } else {
            0.0
        };
        Question {
            score,
            ..self.clone()
        }
    }

    pub fn with_kind(&self, kind: QuestionKind, ids: &mut IdAlloc) -> Question {
        if !self.is_new {
            debug!("[Edit] Kind is locked on a saved question");
            return self.clone();
        }
        let answers = if kind == QuestionKind::TrueFalse {
            vec![
                Answer {
                    id: Some(ids.next()),
                    text: String::from("True"),
                    ..Answer::default()
                },
                Answer {
                    id: Some(ids.next()),
                    text: String::from("False"),
                    ..Answer::default()
                },
            ]
        } else {
            // switching away from true/false keeps whatever the author typed
            self.answers.clone()
        };
        Question {
            kind,
            answers,
            ..self.clone()
        }
    }

    pub fn with_answer_text(&self, index: usize, text: String) -> Question {
        if index >= self.answers.len() {
            return self.clone();
        }
        let mut answers = self.answers.clone();
        answers[index].text = text;
        Question {
            answers,
            ..self.clone()
        }
    }

    pub fn add_answer(&self) -> Question {
        if !self.can_add_answer() {
            debug!("[Edit] Answer cap reached for {:?}", self.kind);
            return self.clone();
        }
        let text = if self.kind == QuestionKind::TrueFalse {
            if self.answers.is_empty() {
                "True"
            } else {
                "False"
            }
        } else {
            ""
        };
        let mut answers = self.answers.clone();
        answers.push(Answer {
            text: String::from(text),
            is_new: true,
            ..Answer::default()
        });
        Question {
            answers,
            ..self.clone()
        }
    }

    pub fn remove_answer(&self, index: usize) -> Question {
        if index >= self.answers.len() {
            return self.clone();
        }
        let mut answers = self.answers.clone();
        answers.remove(index);
        Question {
            answers,
            ..self.clone()
        }
    }

    pub fn mark_correct(&self, index: usize, checked: bool) -> Question {
        if index >= self.answers.len() {
            return self.clone();
        }
        let answers = if self.kind.exclusive_correct() {
            select_exclusive(&self.answers, index, true, |a, on| a.is_correct = on)
        } else {
            let mut answers = self.answers.clone();
            answers[index].is_correct = checked;
            answers
        };
        Question {
            answers,
            ..self.clone()
        }
    }

    pub fn strike(&self, index: usize, checked: bool) -> Question {
        if !self.kind.strikable() || index >= self.answers.len() {
            return self.clone();
        }
        let answers = select_exclusive(&self.answers, index, checked, |a, on| a.is_striked = on);
        Question {
            answers,
            ..self.clone()
        }
    }

    pub fn can_add_answer(&self) -> bool {
        match self.kind.answer_cap() {
            Some(cap) => self.answers.len() < cap,
            None => true,
        }
    }

    pub fn can_remove_answer(&self, index: usize) -> bool {
        self.is_new || self.answers.get(index).is_some_and(|a| a.is_new)
    }
}

// At most one member of the collection may hold the flag; the target gets
// `value`, everyone else is cleared.
fn select_exclusive<F>(answers: &[Answer], index: usize, value: bool, set: F) -> Vec<Answer>
where
    F: Fn(&mut Answer, bool),
{
    answers
        .iter()
        .enumerate()
        .map(|(i, answer)| {
            let mut answer = answer.clone();
            set(&mut answer, i == index && value);
            answer
        })
        .collect()
}
