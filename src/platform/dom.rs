//! DOM renderer
//!
//! Writes a `SessionView` into the practice page and asks KaTeX to typeset.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use super::html::{feedback_html, summary_html};
use crate::view::{CardView, ProblemView, Renderer, SessionView};

// KaTeX auto-render, if the page loaded it
#[wasm_bindgen(inline_js = "
    export function render_math() {
        if (typeof renderMathInElement === 'function') {
            renderMathInElement(document.body, {
                delimiters: [
                    { left: '$$', right: '$$', display: true },
                    { left: '\\\\(', right: '\\\\)', display: false },
                    { left: '\\\\[', right: '\\\\]', display: true }
                ],
                throwOnError: false
            });
        }
    }
")]
extern "C" {
    fn render_math();
}

/// Renders into the practice page's fixed element ids
pub struct DomRenderer {
    document: Document,
    /// Problem index drawn last, to know when to clear the answer field
    shown_index: Option<usize>,
}

impl DomRenderer {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            shown_index: None,
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(el) = self.element(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_disabled(&self, id: &str, disabled: bool) {
        if let Some(btn) = self
            .element(id)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            btn.set_disabled(disabled);
        }
    }

    fn render_progress(&self, view: &SessionView) {
        if let Some(bar) = self
            .element("progressBar")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = bar
                .style()
                .set_property("width", &format!("{}%", view.progress.percent));
        }
        self.set_text("progressText", &view.progress.text);
    }

    fn render_problem(&mut self, problem: &ProblemView) {
        if let Some(badge) = self.element("difficultyBadge") {
            badge.set_text_content(Some(problem.difficulty_label));
            badge.set_class_name(&problem.difficulty_class);
        }
        self.set_text("topicBadge", &problem.topic);
        self.set_text("problemText", &problem.problem_text);

        if let Some(formula) = self.element("formulaText") {
            formula.set_text_content(Some(&problem.formula));
        }
        self.set_hidden("formulaBox", !problem.formula_visible);

        if self.shown_index != Some(problem.index) {
            if let Some(input) = self
                .element("answerInput")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value("");
            }
            self.shown_index = Some(problem.index);
        }

        if let Some(feedback_box) = self.element("feedbackBox") {
            match &problem.feedback {
                Some(feedback) => {
                    feedback_box.set_class_name(feedback.tone.css_class());
                    feedback_box.set_inner_html(&feedback_html(feedback));
                }
                None => {
                    feedback_box.set_class_name("hidden");
                    feedback_box.set_inner_html("");
                }
            }
        }

        self.set_disabled("submitBtn", !problem.submit_enabled);
        self.set_disabled("prevBtn", !problem.prev_enabled);
        self.set_text("nextBtn", problem.next_label);
    }
}

impl Renderer for DomRenderer {
    fn render(&mut self, view: &SessionView) {
        self.render_progress(view);

        match &view.card {
            CardView::Problem(problem) => self.render_problem(problem),
            CardView::Summary(summary) => {
                if let Some(card) = self.element("problemCard") {
                    card.set_inner_html(&summary_html(summary));
                }
                self.shown_index = None;
            }
        }

        render_math();
    }
}
