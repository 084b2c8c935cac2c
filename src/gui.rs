use crate::libhenshuu::mondai::{IdAlloc, Question, QuestionKind};
use crate::libhenshuu::shiken::Shiken;
use crate::Error;
use eframe::egui;
use eframe::egui::Align;
use eframe::egui::Color32;
use eframe::egui::ComboBox;
use eframe::egui::DragValue;
use eframe::egui::Frame;
use eframe::egui::RichText;
use eframe::egui::ScrollArea;
use eframe::egui::TextEdit;
use eframe::egui::Ui;
use eframe::egui::UiBuilder;
use log::debug;

// The editor form never touches the question it was given; it reports a
// replacement value (or a delete request) and the owner applies it.
enum EditorEvent {
    Changed(Question),
    Deleted,
}

struct GuiState<'a> {
    shiken: &'a mut Shiken,
    ids: &'a mut IdAlloc,

    current_question: usize,
}

impl<'a> GuiState<'a> {
    fn new(shiken: &'a mut Shiken, ids: &'a mut IdAlloc) -> Self {
        Self {
            shiken,
            ids,

            current_question: 0,
        }
    }
}

fn question_editor(ui: &mut Ui, question: &Question, ids: &mut IdAlloc) -> Option<EditorEvent> {
    let mut event = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Question").strong());
        if question.is_new && ui.button("Delete Question").clicked() {
            event = Some(EditorEvent::Deleted);
        }
    });
    ui.separator();

    ui.label("Question Type");
    ui.add_enabled_ui(question.is_new, |ui| {
        ComboBox::from_id_salt("kind")
            .selected_text(question.kind.label())
            .show_ui(ui, |ui| {
                for kind in QuestionKind::ALL {
                    if ui
                        .selectable_label(question.kind == kind, kind.label())
                        .clicked()
                    {
                        event = Some(EditorEvent::Changed(question.with_kind(kind, ids)));
                    }
                }
            });
    });

    ui.label("Question Text");
    let mut text = question.text.clone();
    if ui
        .add(
            TextEdit::multiline(&mut text)
                .hint_text("Enter your question...")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        event = Some(EditorEvent::Changed(question.with_text(text)));
    }

    ui.label("Explanation (Optional)");
    let mut explanation = question.explanation.clone();
    if ui
        .add(
            TextEdit::multiline(&mut explanation)
                .hint_text("Explain the answer...")
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        event = Some(EditorEvent::Changed(question.with_explanation(explanation)));
    }

    ui.horizontal(|ui| {
        ui.label("Score");
        let mut score = question.score;
        if ui
            .add(DragValue::new(&mut score).range(0.0..=f64::MAX).speed(0.5))
            .changed()
        {
            event = Some(EditorEvent::Changed(question.with_score(score)));
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Answers");
        if question.can_add_answer() && ui.button("Add Answer").clicked() {
            event = Some(EditorEvent::Changed(question.add_answer()));
        }
    });

    for (idx, answer) in question.answers.iter().enumerate() {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                let mut text = answer.text.clone();
                let mut edit =
                    TextEdit::singleline(&mut text).hint_text(question.kind.answer_placeholder());
                if answer.is_striked {
                    edit = edit.text_color(Color32::GRAY);
                }
                if ui
                    .add_enabled(!question.kind.fixed_answer_text(), edit)
                    .changed()
                {
                    event = Some(EditorEvent::Changed(question.with_answer_text(idx, text)));
                }
                if question.can_remove_answer(idx) && ui.button("✖").clicked() {
                    event = Some(EditorEvent::Changed(question.remove_answer(idx)));
                }
            });
            ui.horizontal(|ui| {
                if question.kind.exclusive_correct() {
                    if ui.radio(answer.is_correct, "Correct Answer").clicked() {
                        event = Some(EditorEvent::Changed(question.mark_correct(idx, true)));
                    }
                } else {
                    let mut correct = answer.is_correct;
                    if ui.checkbox(&mut correct, "Correct Answer").changed() {
                        event = Some(EditorEvent::Changed(question.mark_correct(idx, correct)));
                    }
                }
                if question.kind.strikable() {
                    let mut striked = answer.is_striked;
                    if ui.checkbox(&mut striked, "Striked").changed() {
                        event = Some(EditorEvent::Changed(question.strike(idx, striked)));
                    }
                }
            });
        });
    }

    event
}

impl eframe::App for GuiState<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let scroll = ScrollArea::horizontal().auto_shrink(false);
        let mut scroll_to = None;
        let mut pending = None;

        egui::TopBottomPanel::bottom("question_dots").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for idx in 0..self.shiken.questions.len() {
                    if ui.button(format!("{}", idx + 1)).clicked() {
                        debug!("current: {idx}");
                        self.current_question = idx;
                        scroll_to = Some(self.current_question)
                    }
                }
                if ui.button("+").clicked() {
                    self.shiken
                        .questions
                        .push(Question::new(QuestionKind::SingleChoice));
                    self.current_question = self.shiken.questions.len() - 1;
                    scroll_to = Some(self.current_question)
                }
            })
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            scroll.show(ui, |ui| {
                let height = ui.available_height();
                let width = ui.available_width();
                ui.horizontal(|ui| {
                    for idx in 0..self.shiken.questions.len() {
                        let resp = ui
                            .scope_builder(UiBuilder::new().id_salt(format!("q_{}", idx)), |ui| {
                                Frame::default().show(ui, |ui| {
                                    ui.set_width(width);
                                    ui.set_height(height);

                                    ScrollArea::vertical()
                                        .id_salt("form")
                                        .auto_shrink(false)
                                        .show(ui, |ui| {
                                            if let Some(event) = question_editor(
                                                ui,
                                                &self.shiken.questions[idx],
                                                self.ids,
                                            ) {
                                                pending = Some((idx, event));
                                            }
                                        });
                                })
                            })
                            .response;
                        if let Some(scroll_dest) = scroll_to {
                            if scroll_dest == idx {
                                resp.scroll_to_me(Some(Align::Min));
                                scroll_to = None;
                            }
                        }
                    }
                });
            });
        });

        if let Some((idx, event)) = pending {
            match event {
                EditorEvent::Changed(question) => self.shiken.questions[idx] = question,
                EditorEvent::Deleted => {
                    debug!("[GUI] Deleting question {idx}");
                    self.shiken.questions.remove(idx);
                    if self.current_question >= self.shiken.questions.len() {
                        self.current_question = self.shiken.questions.len().saturating_sub(1);
                    }
                }
            }
        }
    }
}

pub fn init_gui(shiken: &mut Shiken, ids: &mut IdAlloc) -> Result<(), Error> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([360.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "問題編集しよう!",
        native_options,
        Box::new(|_cc| Ok(Box::new(GuiState::new(shiken, ids)))),
    )?;

    Ok(())
}
