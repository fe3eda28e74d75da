use drill_core::model::Catalog;
use drill_core::{Answer, PhishingAction, ViewModel};

use crate::render::{render_fragment, render_page};
use crate::vm::map_page;

fn scenario_view(index: usize, score: i64) -> ViewModel {
    ViewModel::Scenario {
        index,
        total: 3,
        score,
        scenario: Catalog::builtin().get(index).cloned().unwrap(),
    }
}

#[test]
fn start_view_smoke_renders_begin_form() {
    let html = render_fragment(map_page(&ViewModel::Start { total: 3 }, None, None));
    assert!(html.contains("Work through 3 short scenarios"), "missing intro in {html}");
    assert!(html.contains("/quiz/begin"), "missing begin form in {html}");
    assert!(!html.contains("Current Score"), "start page shows no score: {html}");
}

#[test]
fn start_intro_does_not_assume_catalog_content() {
    let html = render_fragment(map_page(&ViewModel::Start { total: 1 }, None, None));
    assert!(html.contains("Work through 1 short scenario,"), "missing intro in {html}");
    assert!(!html.contains("suspicious email"), "intro names scenarios: {html}");
}

#[test]
fn phishing_view_smoke_renders_email_and_actions() {
    let html = render_fragment(map_page(&scenario_view(0, 0), None, None));
    assert!(html.contains("Action Required: Urgent Payroll Update"), "missing subject in {html}");
    assert!(html.contains("support@paninsingen-ps.com"), "missing sender in {html}");
    assert!(html.contains("Current Score: 0 points"), "missing score in {html}");
    assert!(html.contains("Report as Phishing"), "missing report button in {html}");
    assert!(html.contains("value=\"101\""), "missing scenario id in {html}");
}

#[test]
fn password_view_smoke_renders_rules_and_input() {
    let html = render_fragment(map_page(&scenario_view(1, 10), None, None));
    assert!(html.contains("At least 12 characters"), "missing rule in {html}");
    assert!(html.contains("name=\"password\""), "missing password input in {html}");
    assert!(html.contains("Scenario 2 of 3"), "missing progress in {html}");
}

#[test]
fn mfa_view_smoke_renders_every_option() {
    let html = render_fragment(map_page(&scenario_view(2, 5), None, None));
    assert!(html.contains("Deny the request and report it to IT"), "missing option in {html}");
    assert!(html.contains("name=\"option\""), "missing option buttons in {html}");
    assert!(html.contains("value=\"2\""), "missing last option in {html}");
}

#[test]
fn finished_view_smoke_renders_final_score() {
    let finished = ViewModel::Finished { score: 15, total: 3 };
    let html = render_fragment(map_page(&finished, None, None));
    assert!(html.contains("Training complete!"), "missing title in {html}");
    assert!(html.contains("Final score: 15 points"), "missing score in {html}");
    assert!(html.contains("Start over"), "missing reset in {html}");
}

#[test]
fn feedback_and_notice_render_above_body() {
    let scenario = Catalog::builtin().get(0).cloned().unwrap();
    let assessment = scenario
        .assess(&Answer::Phishing(PhishingAction::Report))
        .unwrap();
    let html = render_fragment(map_page(
        &scenario_view(1, 10),
        Some(&assessment),
        Some("Heads up"),
    ));
    assert!(html.contains("Correct! Phishing reported."), "missing feedback in {html}");
    assert!(html.contains("feedback correct"), "missing feedback class in {html}");
    assert!(html.contains("Heads up"), "missing notice in {html}");
}

#[test]
fn catalog_text_is_escaped() {
    let html = render_fragment(map_page(&scenario_view(0, 0), None, None));
    assert!(!html.contains("<support@"), "sender must be escaped in {html}");
}

#[test]
fn full_document_has_shell() {
    let html = render_page(map_page(&ViewModel::Start { total: 3 }, None, None));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Cybersecurity Simulation</title>"));
    assert!(html.contains("Cybersecurity Awareness Drill"));
}
