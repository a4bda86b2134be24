//! Raw Customer Input and Category Enumerations

use crate::error::EncodeError;
use serde::{Deserialize, Serialize};

/// Declared range for tenure (months)
pub const TENURE_RANGE: (f64, f64) = (0.0, 72.0);
/// Declared range for monthly charges (USD)
pub const MONTHLY_CHARGES_RANGE: (f64, f64) = (0.0, f64::MAX);
/// Declared range for total charges (USD)
pub const TOTAL_CHARGES_RANGE: (f64, f64) = (0.0, f64::MAX);

/// Customer gender (not collected by the form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

/// Yes/No flag fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl YesNo {
    pub const ALLOWED: &'static [&'static str] = &["No", "Yes"];

    pub fn from_label(field: &'static str, label: &str) -> Result<Self, EncodeError> {
        match label {
            "No" => Ok(YesNo::No),
            "Yes" => Ok(YesNo::Yes),
            other => Err(EncodeError::invalid_category(field, other, Self::ALLOWED)),
        }
    }

    /// Parse through the shared binary map, so "No internet service" folds
    /// to No exactly as the training notebook mapped it.
    pub fn from_binary_label(field: &'static str, label: &str) -> Result<Self, EncodeError> {
        let flag = crate::schema::binary_flag(field, label)?;
        Ok(if flag == 1.0 { YesNo::Yes } else { YesNo::No })
    }
}

/// State of an internet add-on service (security, backup, protection,
/// support, streaming)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddonService {
    No,
    Yes,
    NoInternetService,
}

impl AddonService {
    pub const ALLOWED: &'static [&'static str] = &["No", "Yes", "No internet service"];

    pub fn from_label(field: &'static str, label: &str) -> Result<Self, EncodeError> {
        match label {
            "No" => Ok(AddonService::No),
            "Yes" => Ok(AddonService::Yes),
            "No internet service" => Ok(AddonService::NoInternetService),
            other => Err(EncodeError::invalid_category(field, other, Self::ALLOWED)),
        }
    }
}

/// Multiple phone lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultipleLines {
    No,
    Yes,
    NoPhoneService,
}

/// Internet service type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternetService {
    Dsl,
    FiberOptic,
    No,
}

impl InternetService {
    pub const ALLOWED: &'static [&'static str] = &["DSL", "Fiber optic", "No"];

    pub fn from_label(field: &'static str, label: &str) -> Result<Self, EncodeError> {
        match label {
            "DSL" => Ok(InternetService::Dsl),
            "Fiber optic" => Ok(InternetService::FiberOptic),
            "No" => Ok(InternetService::No),
            other => Err(EncodeError::invalid_category(field, other, Self::ALLOWED)),
        }
    }
}

/// Contract term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contract {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl Contract {
    pub const ALLOWED: &'static [&'static str] = &["Month-to-month", "One year", "Two year"];

    pub fn from_label(field: &'static str, label: &str) -> Result<Self, EncodeError> {
        match label {
            "Month-to-month" => Ok(Contract::MonthToMonth),
            "One year" => Ok(Contract::OneYear),
            "Two year" => Ok(Contract::TwoYear),
            other => Err(EncodeError::invalid_category(field, other, Self::ALLOWED)),
        }
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    BankTransfer,
    CreditCard,
    ElectronicCheck,
    MailedCheck,
}

impl PaymentMethod {
    pub const ALLOWED: &'static [&'static str] = &[
        "Bank transfer (automatic)",
        "Credit card (automatic)",
        "Electronic check",
        "Mailed check",
    ];

    pub fn from_label(field: &'static str, label: &str) -> Result<Self, EncodeError> {
        match label {
            "Bank transfer (automatic)" => Ok(PaymentMethod::BankTransfer),
            "Credit card (automatic)" => Ok(PaymentMethod::CreditCard),
            "Electronic check" => Ok(PaymentMethod::ElectronicCheck),
            "Mailed check" => Ok(PaymentMethod::MailedCheck),
            other => Err(EncodeError::invalid_category(field, other, Self::ALLOWED)),
        }
    }
}

// Fixed defaults for the fields the form does not collect. These are part of
// the encoding contract: the training table had them, the form drops them.
pub const DEFAULT_GENDER: Gender = Gender::Female;
pub const DEFAULT_SENIOR_CITIZEN: YesNo = YesNo::No;
pub const DEFAULT_PARTNER: YesNo = YesNo::No;
pub const DEFAULT_DEPENDENTS: YesNo = YesNo::No;
pub const DEFAULT_PHONE_SERVICE: YesNo = YesNo::Yes;
pub const DEFAULT_MULTIPLE_LINES: MultipleLines = MultipleLines::No;
pub const DEFAULT_ADDON: AddonService = AddonService::No;

/// Raw values captured from one form submission. Immutable once captured;
/// categorical fields carry the user-facing labels and are validated against
/// the closed sets during encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInput {
    /// Subscription length in months (0..=72)
    pub tenure: f64,
    /// Monthly charge in USD
    pub monthly_charges: f64,
    /// Total charge in USD
    pub total_charges: f64,
    /// "Month-to-month", "One year", "Two year"
    pub contract: String,
    /// "DSL", "Fiber optic", "No"
    pub internet_service: String,
    /// "Bank transfer (automatic)", "Credit card (automatic)",
    /// "Electronic check", "Mailed check"
    pub payment_method: String,
    /// "No", "Yes", "No internet service"
    pub online_security: String,
    /// "No", "Yes", "No internet service"
    pub tech_support: String,
    /// "Yes", "No"
    pub paperless_billing: String,
}

impl Default for RawInput {
    /// Form defaults (tenure 12, monthly 50.0, total 500.0, every
    /// categorical at its first option)
    fn default() -> Self {
        Self {
            tenure: 12.0,
            monthly_charges: 50.0,
            total_charges: 500.0,
            contract: "Month-to-month".to_string(),
            internet_service: "DSL".to_string(),
            payment_method: "Bank transfer (automatic)".to_string(),
            online_security: "No".to_string(),
            tech_support: "No".to_string(),
            paperless_billing: "Yes".to_string(),
        }
    }
}

impl RawInput {
    /// Check the numeric fields against their declared ranges
    pub fn validate(&self) -> Result<(), EncodeError> {
        check_range("tenure", self.tenure, TENURE_RANGE)?;
        check_range("MonthlyCharges", self.monthly_charges, MONTHLY_CHARGES_RANGE)?;
        check_range("TotalCharges", self.total_charges, TOTAL_CHARGES_RANGE)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, range: (f64, f64)) -> Result<(), EncodeError> {
    if !value.is_finite() || value < range.0 || value > range.1 {
        return Err(EncodeError::OutOfRange {
            field,
            value,
            min: range.0,
            max: range.1,
        });
    }
    Ok(())
}

/// RawInput resolved into typed categories, with defaults filled in for the
/// uncollected fields and service dependencies applied. This is the record
/// the column table evaluates against.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    pub tenure: f64,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub gender: Gender,
    pub senior_citizen: YesNo,
    pub partner: YesNo,
    pub dependents: YesNo,
    pub phone_service: YesNo,
    pub paperless_billing: YesNo,
    pub multiple_lines: MultipleLines,
    pub internet_service: InternetService,
    pub online_security: AddonService,
    pub online_backup: AddonService,
    pub device_protection: AddonService,
    pub tech_support: AddonService,
    pub streaming_tv: AddonService,
    pub streaming_movies: AddonService,
    pub contract: Contract,
    pub payment_method: PaymentMethod,
}

impl CustomerProfile {
    /// Parse the categorical labels, fill in the fixed defaults, and apply
    /// the service dependencies.
    pub fn resolve(input: &RawInput) -> Result<Self, EncodeError> {
        let mut profile = Self {
            tenure: input.tenure,
            monthly_charges: input.monthly_charges,
            total_charges: input.total_charges,
            gender: DEFAULT_GENDER,
            senior_citizen: DEFAULT_SENIOR_CITIZEN,
            partner: DEFAULT_PARTNER,
            dependents: DEFAULT_DEPENDENTS,
            phone_service: DEFAULT_PHONE_SERVICE,
            paperless_billing: YesNo::from_binary_label(
                "PaperlessBilling",
                &input.paperless_billing,
            )?,
            multiple_lines: DEFAULT_MULTIPLE_LINES,
            internet_service: InternetService::from_label(
                "InternetService",
                &input.internet_service,
            )?,
            online_security: AddonService::from_label("OnlineSecurity", &input.online_security)?,
            online_backup: DEFAULT_ADDON,
            device_protection: DEFAULT_ADDON,
            tech_support: AddonService::from_label("TechSupport", &input.tech_support)?,
            streaming_tv: DEFAULT_ADDON,
            streaming_movies: DEFAULT_ADDON,
            contract: Contract::from_label("Contract", &input.contract)?,
            payment_method: PaymentMethod::from_label("PaymentMethod", &input.payment_method)?,
        };
        profile.apply_service_dependencies();
        Ok(profile)
    }

    /// Dependent-field rules, encoded once: no internet service forces every
    /// add-on to its "No internet service" state; no phone service forces
    /// MultipleLines to "No phone service".
    fn apply_service_dependencies(&mut self) {
        if self.internet_service == InternetService::No {
            for addon in [
                &mut self.online_security,
                &mut self.online_backup,
                &mut self.device_protection,
                &mut self.tech_support,
                &mut self.streaming_tv,
                &mut self.streaming_movies,
            ] {
                *addon = AddonService::NoInternetService;
            }
        }
        if self.phone_service == YesNo::No {
            self.multiple_lines = MultipleLines::NoPhoneService;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ranges() {
        let input = RawInput::default();
        assert!(input.validate().is_ok());

        let edge = RawInput {
            tenure: 72.0,
            monthly_charges: 0.0,
            total_charges: 0.0,
            ..RawInput::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_tenure_out_of_range() {
        let input = RawInput {
            tenure: 73.0,
            ..RawInput::default()
        };
        match input.validate() {
            Err(EncodeError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "tenure");
                assert_eq!(value, 73.0);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_charges_rejected() {
        let input = RawInput {
            monthly_charges: -1.0,
            ..RawInput::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_unknown_label_is_invalid_category() {
        let err = Contract::from_label("Contract", "Three year").unwrap_err();
        match err {
            EncodeError::InvalidCategory { field, value, allowed } => {
                assert_eq!(field, "Contract");
                assert_eq!(value, "Three year");
                assert!(allowed.contains(&"Month-to-month"));
            }
            other => panic!("expected InvalidCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_applied() {
        let profile = CustomerProfile::resolve(&RawInput::default()).unwrap();
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.senior_citizen, YesNo::No);
        assert_eq!(profile.partner, YesNo::No);
        assert_eq!(profile.dependents, YesNo::No);
        assert_eq!(profile.phone_service, YesNo::Yes);
        assert_eq!(profile.multiple_lines, MultipleLines::No);
        assert_eq!(profile.online_backup, AddonService::No);
    }

    #[test]
    fn test_no_internet_forces_addons() {
        let input = RawInput {
            internet_service: "No".to_string(),
            online_security: "Yes".to_string(),
            tech_support: "No".to_string(),
            ..RawInput::default()
        };
        let profile = CustomerProfile::resolve(&input).unwrap();
        assert_eq!(profile.online_security, AddonService::NoInternetService);
        assert_eq!(profile.tech_support, AddonService::NoInternetService);
        assert_eq!(profile.online_backup, AddonService::NoInternetService);
        assert_eq!(profile.device_protection, AddonService::NoInternetService);
        assert_eq!(profile.streaming_tv, AddonService::NoInternetService);
        assert_eq!(profile.streaming_movies, AddonService::NoInternetService);
    }
}
