use super::*;
use crate::wizard::{DeliveryMethod, Direction as FlowDirection, SimType, VerificationMethod};
use ratatui::{backend::TestBackend, Terminal};

fn screen() -> IntakeScreen {
    IntakeScreen::new(&Config::default())
}

fn press(screen: &mut IntakeScreen, keys: &[KeyCode]) {
    for key in keys {
        screen.handle_key(*key);
    }
}

fn type_text(screen: &mut IntakeScreen, text: &str) {
    for c in text.chars() {
        screen.handle_key(KeyCode::Char(c));
    }
}

/// Phone then Enter twice: focus moves to the method choice, then submits
fn complete_number(screen: &mut IntakeScreen) {
    type_text(screen, "0991234567");
    press(screen, &[KeyCode::Enter, KeyCode::Enter]);
}

fn rendered_text(screen: &mut IntakeScreen) -> String {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| screen.render(frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

#[test]
fn test_starts_on_number_stage_with_empty_record() {
    let screen = screen();
    assert_eq!(screen.current(), Stage::Number);
    assert!(screen.record().is_empty());
    assert!(screen.notice().is_none());
}

#[test]
fn test_number_submission_moves_to_tariff() {
    let mut screen = screen();
    type_text(&mut screen, "0991234567");
    assert_eq!(screen.handle_key(KeyCode::Enter), IntakeResult::Continue);

    let IntakeResult::Moved(transition) = screen.handle_key(KeyCode::Enter) else {
        panic!("expected a transition");
    };
    assert_eq!(transition.from, Stage::Number);
    assert_eq!(transition.to, Stage::Tariff);
    assert_eq!(screen.current(), Stage::Tariff);

    let number = screen.record().number.clone().unwrap();
    assert_eq!(number.phone, "0991234567");
    assert_eq!(number.verification_method, VerificationMethod::Sms);
}

#[test]
fn test_esim_path_skips_delivery() {
    let mut screen = screen();
    complete_number(&mut screen);
    press(&mut screen, &[KeyCode::Enter]);
    assert_eq!(screen.current(), Stage::Sim);

    press(&mut screen, &[KeyCode::Down]);
    let IntakeResult::Moved(transition) = screen.handle_key(KeyCode::Enter) else {
        panic!("expected a transition");
    };
    assert!(transition.skipped);
    assert_eq!(screen.current(), Stage::Status);
    assert_eq!(
        screen.record().sim.as_ref().map(|s| s.sim_type),
        Some(SimType::Esim)
    );
    assert!(screen.record().delivery.is_none());
}

#[test]
fn test_physical_path_visits_delivery() {
    let mut screen = screen();
    complete_number(&mut screen);
    press(&mut screen, &[KeyCode::Enter, KeyCode::Enter]);
    assert_eq!(screen.current(), Stage::Delivery);

    // Courier, then first and last name
    press(&mut screen, &[KeyCode::Down, KeyCode::Tab]);
    type_text(&mut screen, "Taras");
    press(&mut screen, &[KeyCode::Tab]);
    type_text(&mut screen, "Shevchenko");
    press(&mut screen, &[KeyCode::Enter]);

    assert_eq!(screen.current(), Stage::Status);
    let delivery = screen.record().delivery.clone().unwrap();
    assert_eq!(delivery.method, DeliveryMethod::Courier);
    assert_eq!(delivery.last_name, "Shevchenko");
    assert_eq!(screen.record().tariff.as_deref(), Some("red_s"));
}

#[test]
fn test_back_from_status_after_esim_lands_on_delivery() {
    let mut screen = screen();
    complete_number(&mut screen);
    press(&mut screen, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
    assert_eq!(screen.current(), Stage::Status);

    let IntakeResult::Moved(transition) = screen.handle_key(KeyCode::Esc) else {
        panic!("expected a transition");
    };
    assert_eq!(transition.direction, FlowDirection::Backward);
    assert_eq!(screen.current(), Stage::Delivery);
    // Going back keeps what was collected
    assert!(screen.record().sim.is_some());
}

#[test]
fn test_esc_on_entry_stage_is_ignored() {
    let mut screen = screen();
    assert_eq!(screen.handle_key(KeyCode::Esc), IntakeResult::Continue);
    assert_eq!(screen.current(), Stage::Number);
    assert!(screen.notice().is_none());
}

#[test]
fn test_resubmitting_a_stage_overwrites_its_key() {
    let mut screen = screen();
    complete_number(&mut screen);
    press(&mut screen, &[KeyCode::Enter]);
    assert_eq!(screen.record().tariff.as_deref(), Some("red_s"));

    press(&mut screen, &[KeyCode::Esc]);
    assert_eq!(screen.current(), Stage::Tariff);
    press(&mut screen, &[KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
    assert_eq!(screen.record().tariff.as_deref(), Some("red_l"));
    assert!(screen.record().number.is_some());
}

#[test]
fn test_status_q_finishes() {
    let mut screen = screen();
    complete_number(&mut screen);
    press(&mut screen, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
    assert_eq!(screen.handle_key(KeyCode::Char('q')), IntakeResult::Finish);
}

#[test]
fn test_q_is_plain_input_before_status() {
    let mut screen = screen();
    assert_eq!(screen.handle_key(KeyCode::Char('q')), IntakeResult::Continue);
    assert_eq!(screen.current(), Stage::Number);
}

#[test]
fn test_status_r_restarts_session() {
    let mut screen = screen();
    complete_number(&mut screen);
    press(&mut screen, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);

    assert_eq!(screen.handle_key(KeyCode::Char('r')), IntakeResult::Continue);
    assert_eq!(screen.current(), Stage::Number);
    assert!(screen.record().is_empty());

    // Views were cleared too: an empty phone cannot be submitted
    press(&mut screen, &[KeyCode::Enter, KeyCode::Enter]);
    assert_eq!(screen.current(), Stage::Number);
}

#[test]
fn test_render_shows_header_and_stepper() {
    let mut screen = screen();
    let text = rendered_text(&mut screen);
    assert!(text.contains("Vodafone"));
    assert!(text.contains("Номер"));
    assert!(text.contains("Статус"));
    assert!(text.contains("Step 1 of 5"));
}

#[test]
fn test_render_status_summary() {
    let mut screen = screen();
    complete_number(&mut screen);
    press(&mut screen, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);

    let text = rendered_text(&mut screen);
    assert!(text.contains("Step 5 of 5"));
    assert!(text.contains("0991234567"));
    assert!(text.contains("Not needed for eSIM"));
}
