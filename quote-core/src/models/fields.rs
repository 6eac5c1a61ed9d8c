//! Field names shared by the catalog, the pricing engine and the submitted form.
//!
//! Every answer field is optional in the record; `desiredFinish` is only asked
//! by catalogs that carry a finish-quality question.

pub const PROJECT_CATEGORY: &str = "projectCategory";
pub const PROPERTY_TYPE: &str = "propertyType";
pub const PROPERTY_AGE: &str = "propertyAge";
pub const RENOVATION_TYPE: &str = "renovationType";
pub const AREA: &str = "area";
pub const CURRENT_CONDITION: &str = "currentCondition";
pub const DESIRED_FINISH: &str = "desiredFinish";
pub const TIMELINE: &str = "timeline";
pub const ZIP_CODE: &str = "zipCode";

// Contact form and envelope fields
pub const FORM_NAME: &str = "form-name";
pub const ESTIMATE: &str = "estimate";
pub const NAME: &str = "name";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const PROJECT_DESCRIPTION: &str = "projectDescription";
pub const HONEYPOT: &str = "bot-field";
