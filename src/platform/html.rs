//! HTML fragments for the feedback panel and summary card

use crate::view::{FeedbackView, SHOW_SOLUTION_LABEL, SummaryView};

/// Element id of the on-demand solution button
pub const SHOW_SOLUTION_BUTTON_ID: &str = "showSolutionBtn";
/// Element id of the "Practice Again" button on the summary card
pub const PRACTICE_AGAIN_BUTTON_ID: &str = "practiceAgainBtn";

/// Escape text for insertion into HTML
///
/// Backslashes and braces pass through untouched so KaTeX can still find math.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inner HTML of the feedback box
///
/// Hint text and solution steps are page-authored and may carry inline markup
/// (`<sup>`, `<strong>`), so they are inserted as HTML. Everything generated
/// here is escaped.
pub fn feedback_html(feedback: &FeedbackView) -> String {
    let mut html = format!(
        "<div class=\"feedback-title\">{}</div>",
        escape(feedback.title)
    );

    if let Some(message) = &feedback.message {
        html.push_str(&format!(
            "<div class=\"feedback-content\">{}</div>",
            escape(message)
        ));
    }

    if let Some(hint) = &feedback.hint {
        html.push_str(&format!(
            "<div class=\"hint-box\"><strong>{}</strong> {}</div>",
            escape(hint.label),
            hint.text
        ));
    }

    if feedback.offer_solution {
        html.push_str(&format!(
            "<div class=\"solution-offer\"><button id=\"{SHOW_SOLUTION_BUTTON_ID}\" \
             class=\"btn-secondary\">{SHOW_SOLUTION_LABEL}</button></div>"
        ));
    }

    if let Some(answer) = &feedback.final_answer {
        html.push_str("<div class=\"solution-steps\">");
        for step in &feedback.solution_steps {
            html.push_str(&format!("<div class=\"solution-step\">{step}</div>"));
        }
        html.push_str("</div>");
        html.push_str(&format!(
            "<div class=\"feedback-content final-answer\"><strong>Final Answer:</strong> {}</div>",
            escape(answer)
        ));
    }

    html
}

/// Inner HTML of the problem card once the session is over
pub fn summary_html(summary: &SummaryView) -> String {
    format!(
        "<div class=\"summary\">\
         <h2 class=\"summary-heading\">{}</h2>\
         <div class=\"summary-score\">{}</div>\
         <div class=\"summary-message\">{}</div>\
         <div class=\"summary-actions\">\
         <button id=\"{PRACTICE_AGAIN_BUTTON_ID}\" class=\"btn-primary\">Practice Again</button>\
         <a href=\"index.html\" class=\"btn-secondary\">Back to Topics</a>\
         </div></div>",
        escape(summary.heading),
        escape(&summary.score),
        escape(&summary.message)
    )
}
