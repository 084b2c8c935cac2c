use crate::libhenshuu::mondai::{Answer, IdAlloc, Question};
use crate::Error;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shiken {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Shiken {
    // The stand-in for the parent application committing the session:
    // everything gets an id and stops being "new".
    pub fn persisted(&self, ids: &mut IdAlloc) -> Shiken {
        Shiken {
            title: self.title.clone(),
            questions: self
                .questions
                .iter()
                .map(|question| {
                    let answers = question
                        .answers
                        .iter()
                        .map(|answer| Answer {
                            id: answer.id.or_else(|| Some(ids.next())),
                            is_new: false,
                            ..answer.clone()
                        })
                        .collect();
                    Question {
                        id: question.id.or_else(|| Some(ids.next())),
                        is_new: false,
                        answers,
                        ..question.clone()
                    }
                })
                .collect(),
        }
    }
}

pub fn load_or_new(src: &Path) -> Result<Shiken, Error> {
    if src.exists() {
        info!("[File] Opening existing exam {:?}", src);
        let json = fs::read_to_string(src)?;
        let shiken = serde_json::from_str(&json)?;
        Ok(shiken)
    } else {
        info!("[File] No exam at {:?}, starting a new one", src);
        Ok(Shiken::default())
    }
}

pub fn save(dest: &Path, shiken: &Shiken) -> Result<(), Error> {
    let json = serde_json::to_string_pretty(shiken)?;
    fs::write(dest, json)?;
    debug!(
        "[File] Saved {} questions to {:?}",
        shiken.questions.len(),
        dest
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libhenshuu::mondai::QuestionKind;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let shiken: Shiken = serde_json::from_str(
            r#"{
                "questions": [{
                    "type": "true_false",
                    "text": "The sky is blue.",
                    "answers": [
                        {"id": 1, "questionText": "True", "isCorrect": true},
                        {"id": 2, "questionText": "False"}
                    ]
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(shiken.title, "");
        let question = &shiken.questions[0];
        assert_eq!(question.kind, QuestionKind::TrueFalse);
        assert_eq!(question.score, 0.0);
        assert_eq!(question.explanation, "");
        assert!(!question.is_new);
        assert!(question.answers[0].is_correct);
        assert!(!question.answers[1].is_correct);
        assert!(!question.answers[0].is_striked);
        assert_eq!(question.answers[1].text, "False");
    }

    #[test]
    fn persisting_assigns_ids_and_clears_new_flags() {
        let mut question = Question::new(QuestionKind::MultiChoice);
        question = question.add_answer().add_answer();
        let shiken = Shiken {
            title: String::from("Midterm"),
            questions: vec![question],
        };

        let mut ids = IdAlloc::seed(&shiken.questions);
        let saved = shiken.persisted(&mut ids);

        let question = &saved.questions[0];
        assert!(question.id.is_some());
        assert!(!question.is_new);
        assert!(question.answers.iter().all(|a| a.id.is_some() && !a.is_new));
        let mut seen: Vec<i64> = question
            .answers
            .iter()
            .filter_map(|a| a.id)
            .chain(question.id)
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }
}
