use dioxus::prelude::*;

use crate::views::{QuizPage, QuizPageProps};
use crate::vm::PageVm;

const PAGE_TITLE: &str = "Cybersecurity Simulation";

const PAGE_CSS: &str = "
body { font-family: system-ui, sans-serif; background: #eef1f5; margin: 0; }
.quiz { max-width: 640px; margin: 32px auto; padding: 0 16px; }
.quiz-header h1 { font-size: 1.4em; margin-bottom: 4px; }
.progress { color: #555; margin: 0; }
.score-display { text-align: right; margin-bottom: 20px; font-size: 1.2em; font-weight: bold; color: #007bff; }
.panel { border: 1px solid #ccc; padding: 20px; background-color: #f9f9f9; border-radius: 6px; }
.phishing-link { color: red; text-decoration: underline; }
.feedback { padding: 12px 16px; border-radius: 6px; margin-bottom: 16px; font-weight: bold; }
.feedback.correct { background: #e3f7e8; color: #11692e; }
.feedback.wrong { background: #fde8e8; color: #a11b1b; }
.notice { background: #fff6d6; padding: 10px 14px; border-radius: 6px; }
.options button { display: block; width: 100%; margin: 8px 0; text-align: left; }
button { padding: 8px 14px; margin-right: 8px; cursor: pointer; }
button.primary { background: #007bff; color: white; border: none; border-radius: 4px; }
button.secondary { background: none; border: 1px solid #999; border-radius: 4px; }
.final-score { font-size: 1.6em; font-weight: bold; }
.quiz-footer { margin-top: 24px; text-align: center; }
";

/// Render a complete HTML document for the page model.
#[must_use]
pub fn render_page(page: PageVm) -> String {
    let body = render_fragment(page);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{PAGE_TITLE}</title>\n<style>{PAGE_CSS}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n"
    )
}

/// Render only the quiz markup, without the document shell.
#[must_use]
pub(crate) fn render_fragment(page: PageVm) -> String {
    let mut dom = VirtualDom::new_with_props(QuizPage, QuizPageProps { page });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}
