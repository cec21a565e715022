//! Characteristic Interpreter
//!
//! Turns free-form Light List characteristic text such as `Fl W 4s 6M`,
//! `Mo(A) R/W` or `Q G 10ft 6M` into a `LightDescriptor` and a `BuoyClass`.
//!
//! - `extract` - color, period, range and height scanners
//! - `rules` - ordered buoy classification and rhythm class tables
//! - `sequence` - flash-pattern synthesis
//!
//! `Interpreter::interpret` is total: any input, however malformed, yields a
//! complete descriptor and exactly one class. Construction is the only
//! fallible step.

pub mod extract;
pub mod rules;
pub mod sequence;

pub use rules::{BuoyRule, Marker, Predicate, RuleOutcome, BUOY_RULES, CARDINAL_QUADRANTS, CLASS_RULES};
pub use sequence::{synthesize, tick_count};

use serde::Serialize;

use crate::config::InterpreterConfig;
use crate::types::{BuoyClass, CharacteristicClass, FlashPattern, LightDescriptor, NavAid};

use rules::RuleSet;

#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    #[error("invalid interpreter defaults: {}", .0.join("; "))]
    InvalidDefaults(Vec<String>),

    #[error("rule '{rule}' has an invalid pattern: {source}")]
    Pattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Result of interpreting one aid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub descriptor: LightDescriptor,
    pub class: BuoyClass,
    /// Classification row that matched
    pub rule: &'static str,
}

/// Immutable characteristic interpreter, safe to share across threads.
#[derive(Debug)]
pub struct Interpreter {
    config: InterpreterConfig,
    rules: RuleSet,
}

impl Interpreter {
    /// Bind defaults and compile the rule tables.
    pub fn new(config: InterpreterConfig) -> Result<Self, InterpreterError> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(InterpreterError::InvalidDefaults(problems));
        }

        Ok(Self {
            config,
            rules: RuleSet::compile()?,
        })
    }

    /// Interpret a characteristic plus optional structure/remarks text.
    pub fn interpret(&self, characteristic: &str, structure: &str) -> Interpretation {
        self.interpret_with_fields(characteristic, structure, None, None)
    }

    /// Interpret a record, honoring its dedicated height and range columns.
    pub fn interpret_aid(&self, aid: &NavAid) -> Interpretation {
        self.interpret_with_fields(
            &aid.characteristic,
            &aid.structure,
            aid.height_field.as_deref(),
            aid.range_field.as_deref(),
        )
    }

    /// Lit/dark pattern for a class and period under this interpreter's defaults.
    pub fn synthesize(&self, class: CharacteristicClass, period_s: f64) -> FlashPattern {
        synthesize(class, period_s, self.config.default_period_s)
    }

    fn interpret_with_fields(
        &self,
        characteristic: &str,
        structure: &str,
        height_field: Option<&str>,
        range_field: Option<&str>,
    ) -> Interpretation {
        let cfg = &self.config;

        // The characteristic names the light's color; structure text often
        // describes the hull instead, so it is only a fallback.
        let color = extract::extract_color(characteristic)
            .or_else(|| extract::extract_color(structure))
            .unwrap_or_default();

        let period_s = extract::extract_period(characteristic).unwrap_or(cfg.default_period_s);

        let range_nm = range_field
            .and_then(extract::parse_range_field)
            .or_else(|| extract::extract_range(characteristic))
            .unwrap_or(cfg.default_range_nm);

        let height_m = height_field
            .and_then(extract::parse_height_field)
            .or_else(|| extract::extract_height(characteristic))
            .unwrap_or(cfg.default_height_m);

        let class = self.rules.rhythm_class(&characteristic.to_uppercase());
        let pattern = self.synthesize(class, period_s);

        let combined = format!("{characteristic} {structure}").to_uppercase();
        let (buoy, rule) = self.rules.classify(&combined);

        tracing::trace!(
            characteristic,
            %class,
            %buoy,
            rule,
            "Interpreted characteristic"
        );

        Interpretation {
            descriptor: LightDescriptor {
                color,
                period_s,
                range_nm,
                height_m,
                class,
                pattern,
            },
            class: buoy,
            rule,
        }
    }
}
