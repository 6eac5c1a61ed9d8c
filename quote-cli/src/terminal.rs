//! Line-oriented front-end for a [`WizardSession`].
//!
//! Reads one answer per line from any [`BufRead`] and writes prompts to any
//! [`Write`], so the same loop serves stdin/stdout and scripted tests.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use quote_core::submission::FormTransport;
use quote_core::wizard::{SELECTION_DELAY, Screen, SubmitError, WizardSession};
use quote_core::{Question, QuestionKind};
use tracing::warn;

const BAR_WIDTH: usize = 20;

enum Step {
    Continue,
    Quit,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    selection_delay: Duration,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(
        input: R,
        output: W,
    ) -> Self {
        Self {
            input,
            output,
            selection_delay: SELECTION_DELAY,
        }
    }

    /// Pause after a choice is picked; zero disables it.
    pub fn with_selection_delay(
        mut self,
        delay: Duration,
    ) -> Self {
        self.selection_delay = delay;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Drives `session` until the visitor quits or input ends.
    pub async fn run(
        &mut self,
        session: &mut WizardSession,
        transport: &dyn FormTransport,
    ) -> io::Result<()> {
        loop {
            let step = match session.screen() {
                Screen::Landing => self.landing(session)?,
                Screen::Question(_) => self.question(session).await?,
                Screen::ContactForm => self.contact_form(session, transport).await?,
                Screen::Success => self.success(session)?,
            };
            if let Step::Quit = step {
                self.output.flush()?;
                return Ok(());
            }
        }
    }

    fn landing(
        &mut self,
        session: &mut WizardSession,
    ) -> io::Result<Step> {
        writeln!(self.output, "Estimez le coût de vos travaux en quelques questions.")?;
        write!(self.output, "Entrée pour commencer, q pour quitter : ")?;

        match self.read_line()?.as_deref() {
            None | Some("q") => Ok(Step::Quit),
            Some(_) => {
                if let Err(error) = session.start() {
                    warn!(%error, "cannot start wizard");
                }
                Ok(Step::Continue)
            }
        }
    }

    async fn question(
        &mut self,
        session: &mut WizardSession,
    ) -> io::Result<Step> {
        let Some(question) = session.current_question().cloned() else {
            warn!(screen = %session.screen(), "no question at this position");
            session.restart();
            return Ok(Step::Continue);
        };
        let (step, total) = session.position().unwrap_or_default();
        let progress = session.progress();

        writeln!(self.output)?;
        writeln!(self.output, "{} {progress:.0} %", progress_bar(progress))?;
        writeln!(self.output, "Question {step}/{total} : {}", question.title)?;
        self.describe(&question)?;
        write!(self.output, "Votre réponse (b : retour, r : recommencer, q : quitter) : ")?;

        let Some(input) = self.read_line()? else {
            return Ok(Step::Quit);
        };
        match input.as_str() {
            "q" => return Ok(Step::Quit),
            "r" => {
                session.restart();
                return Ok(Step::Continue);
            }
            "b" => {
                if !session.back() {
                    writeln!(self.output, "Vous êtes déjà à la première question.")?;
                }
                return Ok(Step::Continue);
            }
            _ => {}
        }

        let value = match &question.kind {
            QuestionKind::Choice { options } => {
                let picked = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| options.get(i));
                match picked {
                    Some(option) => option.value.clone(),
                    None => {
                        writeln!(self.output, "Choisissez un numéro entre 1 et {}.", options.len())?;
                        return Ok(Step::Continue);
                    }
                }
            }
            QuestionKind::FreeText { .. } => input,
        };

        match session.answer(&value) {
            Ok(()) if question.is_choice() && !self.selection_delay.is_zero() => {
                self.output.flush()?;
                tokio::time::sleep(self.selection_delay).await;
            }
            Ok(()) => {}
            Err(error) => writeln!(self.output, "Réponse invalide : {error}")?,
        }
        Ok(Step::Continue)
    }

    fn describe(
        &mut self,
        question: &Question,
    ) -> io::Result<()> {
        match &question.kind {
            QuestionKind::Choice { options } => {
                for (i, option) in options.iter().enumerate() {
                    writeln!(self.output, "  {}. {}", i + 1, option.label)?;
                }
            }
            QuestionKind::FreeText {
                placeholder,
                suffix,
                ..
            } => {
                let hint = match (placeholder, suffix) {
                    (Some(p), _) => p.as_str(),
                    (None, Some(s)) => s.as_str(),
                    (None, None) => return Ok(()),
                };
                writeln!(self.output, "  ({hint})")?;
            }
        }
        Ok(())
    }

    async fn contact_form(
        &mut self,
        session: &mut WizardSession,
        transport: &dyn FormTransport,
    ) -> io::Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "Dernière étape : vos coordonnées.")?;

        let mut contact = session.contact().clone();

        let Some(name) = self.prompt_field("Nom complet (b : retour)", &contact.name)? else {
            return Ok(Step::Quit);
        };
        if name == "b" {
            session.back();
            return Ok(Step::Continue);
        }
        contact.name = name;

        let Some(email) = self.prompt_field("Email", &contact.email)? else {
            return Ok(Step::Quit);
        };
        contact.email = email;

        let Some(phone) = self.prompt_field("Téléphone", &contact.phone)? else {
            return Ok(Step::Quit);
        };
        contact.phone = phone;

        let Some(description) =
            self.prompt_field("Décrivez votre projet (facultatif)", &contact.project_description)?
        else {
            return Ok(Step::Quit);
        };
        contact.project_description = description;

        let current = if contact.consent { "o" } else { "" };
        let Some(consent) = self.prompt_field(
            "J'accepte que mes données soient utilisées pour être recontacté (o/n)",
            current,
        )?
        else {
            return Ok(Step::Quit);
        };
        contact.consent = matches!(consent.to_lowercase().as_str(), "o" | "oui");

        session.set_contact(contact);

        writeln!(self.output, "Envoi en cours...")?;
        self.output.flush()?;
        match session.submit(transport).await {
            Ok(()) => {}
            Err(SubmitError::Validation(error)) => {
                writeln!(self.output, "Formulaire incomplet : {error}")?;
            }
            Err(SubmitError::Transport(error)) => {
                writeln!(
                    self.output,
                    "L'envoi a échoué ({error}). Vos réponses sont conservées, veuillez réessayer."
                )?;
            }
            Err(error) => {
                warn!(%error, "unexpected submission state");
                writeln!(self.output, "Erreur : {error}")?;
            }
        }
        Ok(Step::Continue)
    }

    fn success(
        &mut self,
        session: &mut WizardSession,
    ) -> io::Result<Step> {
        writeln!(self.output)?;
        writeln!(self.output, "Merci ! Votre demande a bien été envoyée.")?;
        writeln!(self.output, "Estimation : {}", session.estimate())?;
        for row in session.summary() {
            writeln!(self.output, "  {} : {}", row.label, row.value)?;
        }
        write!(self.output, "Nouvelle estimation ? (o/n) : ")?;

        match self.read_line()?.as_deref() {
            Some("o" | "oui") => {
                session.restart();
                Ok(Step::Continue)
            }
            _ => Ok(Step::Quit),
        }
    }

    /// Prompts for a value; an empty line keeps `current`.
    fn prompt_field(
        &mut self,
        label: &str,
        current: &str,
    ) -> io::Result<Option<String>> {
        if current.is_empty() {
            write!(self.output, "{label} : ")?;
        } else {
            write!(self.output, "{label} [{current}] : ")?;
        }
        Ok(self.read_line()?.map(|line| {
            if line.is_empty() {
                current.to_string()
            } else {
                line
            }
        }))
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
