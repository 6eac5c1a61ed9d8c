//! End-to-end runs of the terminal front-end with scripted input and the
//! in-memory transport.

use std::time::Duration;

use pretty_assertions::assert_eq;
use quote_cli::terminal::Terminal;
use quote_core::submission::MemoryTransport;
use quote_core::{Screen, TransportError, WizardSession};

/// Start, then answer every question of the kitchen path.
const KITCHEN_ANSWERS: &str = "\n3\n2\n3\n1\n250\n3\n2\n4\n75011\n";

const CONTACT: &str = "Jeanne Martin\njeanne@example.fr\n06 12 34 56 78\n\no\n";

async fn run_script(
    session: &mut WizardSession,
    transport: &MemoryTransport,
    script: &str,
) -> String {
    let mut terminal = Terminal::new(script.as_bytes(), Vec::new()).with_selection_delay(Duration::ZERO);
    terminal
        .run(session, transport)
        .await
        .expect("in-memory terminal I/O cannot fail");
    String::from_utf8(terminal.into_output()).expect("output is UTF-8")
}

#[tokio::test]
async fn test_full_run_submits_and_shows_estimate() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::new();
    let script = format!("{KITCHEN_ANSWERS}{CONTACT}n\n");

    let output = run_script(&mut session, &transport, &script).await;

    assert_eq!(session.screen(), Screen::Success);
    assert!(output.contains("Question 1/8 : Quel type de projet ?"));
    assert!(output.contains("Question 9/9 : Code postal ?"));
    assert!(output.contains("Estimation : 39 950 - 58 750 € (moyenne : 47 000 €)"));
    assert!(output.contains("  Projet : Pièce spécifique"));
    assert!(output.contains("  Travaux : Cuisine"));
    assert!(output.contains("  Surface : 250 m²"));

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].get("form-name"), Some("renovation-quote"));
    assert_eq!(sent[0].get("renovationType"), Some("kitchen"));
    assert_eq!(sent[0].get("zipCode"), Some("75011"));
    assert_eq!(sent[0].get("estimate"), Some("€39 950 - €58 750"));
    assert_eq!(sent[0].get("email"), Some("jeanne@example.fr"));
}

#[tokio::test]
async fn test_back_on_first_question_stays_put() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::new();

    let output = run_script(&mut session, &transport, "\nb\n").await;

    assert!(output.contains("Vous êtes déjà à la première question."));
    assert_eq!(session.screen(), Screen::Question(0));
}

#[tokio::test]
async fn test_back_returns_to_previous_question() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::new();

    run_script(&mut session, &transport, "\n1\n1\nb\n").await;

    assert_eq!(session.screen(), Screen::Question(1));
    assert_eq!(session.answers().get("propertyType"), Some("house"));
}

#[tokio::test]
async fn test_out_of_range_choice_is_reprompted() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::new();

    let output = run_script(&mut session, &transport, "\n9\nabc\n").await;

    assert_eq!(output.matches("Choisissez un numéro entre 1 et 4.").count(), 2);
    assert_eq!(session.screen(), Screen::Question(0));
    assert!(session.answers().is_empty());
}

#[tokio::test]
async fn test_invalid_area_is_reprompted() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::new();

    run_script(&mut session, &transport, "\n3\n2\n3\n1\nbeaucoup\n").await;

    assert_eq!(session.screen(), Screen::Question(4));
    assert_eq!(session.answers().get("area"), None);
}

#[tokio::test]
async fn test_invalid_email_then_corrected() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::new();
    let script = format!(
        "{KITCHEN_ANSWERS}Jeanne Martin\nnot-an-email\n06 12 34 56 78\n\no\n\njeanne@example.fr\n\n\n\no\n"
    );

    let output = run_script(&mut session, &transport, &script).await;

    assert!(output.contains("Formulaire incomplet"));
    assert!(output.contains("Nom complet (b : retour) [Jeanne Martin] : "));
    assert_eq!(transport.sent().len(), 1);
    // "o" on the success screen starts over.
    assert_eq!(session.screen(), Screen::Landing);
    assert!(session.answers().is_empty());
}

#[tokio::test]
async fn test_failed_submission_keeps_answers() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::failing(TransportError::Rejected { status: 500 });
    let script = format!("{KITCHEN_ANSWERS}{CONTACT}\n\n\n\n\n");

    let output = run_script(&mut session, &transport, &script).await;

    assert_eq!(output.matches("L'envoi a échoué").count(), 2);
    assert_eq!(session.screen(), Screen::ContactForm);
    assert!(!session.is_submitting());
    assert_eq!(session.answers().get("area"), Some("250"));
    assert_eq!(session.contact().name, "Jeanne Martin");
    assert!(session.contact().consent);
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_back_from_contact_form() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::new();
    let script = format!("{KITCHEN_ANSWERS}b\n");

    run_script(&mut session, &transport, &script).await;

    assert_eq!(session.screen(), Screen::Question(8));
    assert_eq!(session.answers().get("zipCode"), Some("75011"));
}

#[tokio::test]
async fn test_quit_on_landing() {
    let mut session = WizardSession::default();
    let transport = MemoryTransport::new();

    let output = run_script(&mut session, &transport, "q\n").await;

    assert!(output.contains("Entrée pour commencer"));
    assert_eq!(session.screen(), Screen::Landing);
}
