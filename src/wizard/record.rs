//! Cumulative request data and the per-stage submissions merged into it

use serde::{Deserialize, Serialize};

/// How the subscriber proves ownership of the number being ported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    #[default]
    Sms,
    Call,
}

impl VerificationMethod {
    pub fn all() -> &'static [VerificationMethod] {
        &[VerificationMethod::Sms, VerificationMethod::Call]
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerificationMethod::Sms => "SMS code",
            VerificationMethod::Call => "Voice call",
        }
    }
}

/// Output of the number stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberData {
    pub phone: String,
    pub verification_method: VerificationMethod,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimType {
    #[default]
    Physical,
    Esim,
}

impl SimType {
    pub fn all() -> &'static [SimType] {
        &[SimType::Physical, SimType::Esim]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SimType::Physical => "Physical SIM card",
            SimType::Esim => "eSIM",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SimType::Physical => "Plastic card delivered to you",
            SimType::Esim => "Activated by QR code, no delivery needed",
        }
    }
}

/// Output of the SIM stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimData {
    #[serde(rename = "type")]
    pub sim_type: SimType,
    #[serde(rename = "isESim")]
    pub is_esim: bool,
}

impl SimData {
    pub fn new(sim_type: SimType) -> Self {
        Self {
            sim_type,
            is_esim: sim_type == SimType::Esim,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    #[default]
    NovaPoshta,
    Courier,
}

impl DeliveryMethod {
    pub fn all() -> &'static [DeliveryMethod] {
        &[DeliveryMethod::NovaPoshta, DeliveryMethod::Courier]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryMethod::NovaPoshta => "Nova Poshta warehouse",
            DeliveryMethod::Courier => "Courier",
        }
    }
}

/// Nova Poshta pickup point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NovaPoshtaData {
    pub city: String,
    pub warehouse: String,
}

/// Output of the delivery stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryData {
    pub method: DeliveryMethod,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nova_poshta_data: Option<NovaPoshtaData>,
}

/// Partial request data.
///
/// Used both as the cumulative record of a session and as the submission a
/// single stage hands over when the user continues. A submission normally
/// carries one key; the record carries every key seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<NumberData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tariff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sim: Option<SimData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryData>,
}

impl StepData {
    pub fn with_number(number: NumberData) -> Self {
        Self {
            number: Some(number),
            ..Default::default()
        }
    }

    pub fn with_tariff(tariff: impl Into<String>) -> Self {
        Self {
            tariff: Some(tariff.into()),
            ..Default::default()
        }
    }

    pub fn with_sim(sim: SimData) -> Self {
        Self {
            sim: Some(sim),
            ..Default::default()
        }
    }

    pub fn with_delivery(delivery: DeliveryData) -> Self {
        Self {
            delivery: Some(delivery),
            ..Default::default()
        }
    }

    /// Overwrite every key present in `submission`; absent keys are kept.
    pub fn merge(&mut self, submission: StepData) {
        let StepData {
            number,
            tariff,
            sim,
            delivery,
        } = submission;

        if number.is_some() {
            self.number = number;
        }
        if tariff.is_some() {
            self.tariff = tariff;
        }
        if sim.is_some() {
            self.sim = sim;
        }
        if delivery.is_some() {
            self.delivery = delivery;
        }
    }

    /// Owned form of [`StepData::merge`]
    pub fn merged(mut self, submission: StepData) -> Self {
        self.merge(submission);
        self
    }

    /// Whether the SIM choice asks for the delivery stage to be skipped
    pub fn selects_esim(&self) -> bool {
        self.sim.as_ref().is_some_and(|sim| sim.is_esim)
    }

    /// Names of the keys currently set, in stage order
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.number.is_some() {
            keys.push("number");
        }
        if self.tariff.is_some() {
            keys.push("tariff");
        }
        if self.sim.is_some() {
            keys.push("sim");
        }
        if self.delivery.is_some() {
            keys.push("delivery");
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}
