use url::form_urlencoded;

use crate::catalog::Catalog;
use crate::models::{AnswerRecord, ContactDetails, Estimate, fields};

/// Ordered name/value pairs posted to the form endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    fields: Vec<(String, String)>,
}

impl Submission {
    pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

    /// Builds the payload: form name, every catalog field (blank when
    /// unanswered), the formatted estimate, then the contact fields and the
    /// honeypot.
    pub fn build(
        form_name: &str,
        catalog: &Catalog,
        answers: &AnswerRecord,
        estimate: &Estimate,
        contact: &ContactDetails,
    ) -> Self {
        let mut pairs = Vec::with_capacity(catalog.field_ids().len() + 7);
        pairs.push((fields::FORM_NAME.to_string(), form_name.to_string()));
        for id in catalog.field_ids() {
            pairs.push((id.to_string(), answers.get(id).unwrap_or_default().to_string()));
        }
        pairs.push((fields::ESTIMATE.to_string(), estimate.range_label()));
        pairs.push((fields::NAME.to_string(), contact.name.trim().to_string()));
        pairs.push((fields::EMAIL.to_string(), contact.email.trim().to_string()));
        pairs.push((fields::PHONE.to_string(), contact.phone.trim().to_string()));
        pairs.push((
            fields::PROJECT_DESCRIPTION.to_string(),
            contact.project_description.clone(),
        ));
        pairs.push((fields::HONEYPOT.to_string(), contact.bot_field.clone()));

        Self { fields: pairs }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// URL-encoded request body.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }

    /// True when the honeypot field was filled in.
    pub fn is_bot(&self) -> bool {
        self.get(fields::HONEYPOT).is_some_and(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn contact() -> ContactDetails {
        ContactDetails {
            name: " Camille ".to_string(),
            email: "camille@example.fr".to_string(),
            phone: "0612345678".to_string(),
            project_description: "Cuisine ouverte".to_string(),
            bot_field: String::new(),
            consent: true,
        }
    }

    fn estimate() -> Estimate {
        Estimate {
            low: 39950,
            average: 47000,
            high: 58750,
        }
    }

    #[test]
    fn build_lists_every_field_in_order() {
        let catalog = Catalog::standard();
        let answers: AnswerRecord = [("projectCategory", "specific-room"), ("renovationType", "kitchen"), ("area", "250")]
            .into_iter()
            .collect();

        let submission = Submission::build("renovation-quote", &catalog, &answers, &estimate(), &contact());

        let names: Vec<&str> = submission.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "form-name",
                "projectCategory",
                "propertyType",
                "propertyAge",
                "renovationType",
                "area",
                "currentCondition",
                "desiredFinish",
                "timeline",
                "zipCode",
                "estimate",
                "name",
                "email",
                "phone",
                "projectDescription",
                "bot-field",
            ]
        );
        assert_eq!(submission.get("form-name"), Some("renovation-quote"));
        assert_eq!(submission.get("renovationType"), Some("kitchen"));
        assert_eq!(submission.get("propertyType"), Some(""));
        assert_eq!(submission.get("estimate"), Some("€39 950 - €58 750"));
        assert_eq!(submission.get("name"), Some("Camille"));
    }

    #[test]
    fn encode_produces_form_urlencoded_body() {
        let catalog = Catalog::new(vec![]).unwrap();
        let answers = AnswerRecord::new();

        let body = Submission::build("quote", &catalog, &answers, &estimate(), &contact()).encode();

        assert_eq!(
            body,
            "form-name=quote\
             &estimate=%E2%82%AC39+950+-+%E2%82%AC58+750\
             &name=Camille\
             &email=camille%40example.fr\
             &phone=0612345678\
             &projectDescription=Cuisine+ouverte\
             &bot-field="
        );
    }

    #[test]
    fn filled_honeypot_is_detected() {
        let catalog = Catalog::standard();
        let mut bot = contact();
        bot.bot_field = "spam".to_string();

        let submission = Submission::build("quote", &catalog, &AnswerRecord::new(), &estimate(), &bot);

        assert!(submission.is_bot());
        assert!(!Submission::build("quote", &catalog, &AnswerRecord::new(), &estimate(), &contact()).is_bot());
    }
}
