//! Ordered rule tables for buoy classification and rhythm class.
//!
//! Both tables are evaluated top to bottom over upper-cased text and the
//! first matching row wins. Row order is significant: broad rows such as
//! plain red must come after the compound rows they would shadow.

use regex::Regex;

use super::InterpreterError;
use crate::types::{BuoyClass, CharacteristicClass};

// ============================================================================
// Table Types
// ============================================================================

/// How a keyword is matched against the upper-cased text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Whole word: `GR` does not match inside `GREEN`
    Word(&'static str),
    /// Start of a word: `TEMP` matches `TEMPORARY`
    Prefix(&'static str),
    /// Plain substring, for punctuated markers like `MO(A)`
    Literal(&'static str),
}

impl Marker {
    fn pattern(&self) -> String {
        match self {
            Marker::Word(w) => format!(r"\b{}\b", regex::escape(w)),
            Marker::Prefix(p) => format!(r"\b{}", regex::escape(p)),
            Marker::Literal(l) => regex::escape(l),
        }
    }
}

/// Condition a rule row places on the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// Any one marker present
    AnyOf(&'static [Marker]),
    /// Every group has at least one marker present
    AllOf(&'static [&'static [Marker]]),
}

/// What a matching row yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Class(BuoyClass),
    /// Quadrant picked from `CARDINAL_QUADRANTS`, north when none is named
    CardinalByQuadrant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuoyRule {
    pub name: &'static str,
    pub predicate: Predicate,
    pub outcome: RuleOutcome,
}

// ============================================================================
// Buoy Classification Table
// ============================================================================

use Marker::{Literal, Prefix, Word};

const RED: &[Marker] = &[Word("RED"), Word("R")];
const GREEN: &[Marker] = &[Word("GREEN"), Word("G")];

pub const BUOY_RULES: &[BuoyRule] = &[
    BuoyRule {
        name: "cardinal",
        predicate: Predicate::AnyOf(&[Word("CARDINAL")]),
        outcome: RuleOutcome::CardinalByQuadrant,
    },
    BuoyRule {
        name: "safe_water",
        predicate: Predicate::AnyOf(&[
            Literal("MO(A)"),
            Literal("MORSE (A)"),
            Word("R/W"),
            Word("RW"),
        ]),
        outcome: RuleOutcome::Class(BuoyClass::SafeWater),
    },
    BuoyRule {
        name: "isolated_danger",
        predicate: Predicate::AnyOf(&[Prefix("ISOLATED"), Prefix("DANGER"), Literal("(2)")]),
        outcome: RuleOutcome::Class(BuoyClass::IsolatedDanger),
    },
    BuoyRule {
        name: "special",
        predicate: Predicate::AnyOf(&[
            Prefix("YELLOW"),
            Prefix("AMBER"),
            Prefix("CABLE"),
            Prefix("ANCHOR"),
            Prefix("RESEARCH"),
            Prefix("OBSTRUCTION"),
            Prefix("TEMP"),
        ]),
        outcome: RuleOutcome::Class(BuoyClass::Special),
    },
    BuoyRule {
        name: "preferred_starboard",
        predicate: Predicate::AnyOf(&[
            Word("RG"),
            Word("R/G"),
            Word("RED AND GREEN"),
            Word("RED OVER GREEN"),
        ]),
        outcome: RuleOutcome::Class(BuoyClass::PreferredStarboard),
    },
    BuoyRule {
        name: "preferred_port",
        predicate: Predicate::AnyOf(&[
            Word("GR"),
            Word("G/R"),
            Word("GREEN AND RED"),
            Word("GREEN OVER RED"),
        ]),
        outcome: RuleOutcome::Class(BuoyClass::PreferredPort),
    },
    BuoyRule {
        name: "red_nun",
        predicate: Predicate::AllOf(&[RED, &[Word("NUN")]]),
        outcome: RuleOutcome::Class(BuoyClass::StarboardPost),
    },
    BuoyRule {
        name: "green_can",
        predicate: Predicate::AllOf(&[GREEN, &[Word("CAN")]]),
        outcome: RuleOutcome::Class(BuoyClass::PortPost),
    },
    BuoyRule {
        name: "red_lateral",
        predicate: Predicate::AnyOf(RED),
        outcome: RuleOutcome::Class(BuoyClass::StarboardSmall),
    },
    BuoyRule {
        name: "green_lateral",
        predicate: Predicate::AnyOf(GREEN),
        outcome: RuleOutcome::Class(BuoyClass::PortSmall),
    },
    BuoyRule {
        name: "mooring",
        predicate: Predicate::AnyOf(&[Prefix("MOOR"), Word("ANCHOR")]),
        outcome: RuleOutcome::Class(BuoyClass::Mooring),
    },
];

/// Row name reported when nothing matches
pub const FALLBACK_RULE: &str = "fallback";

/// Quadrant words for cardinal marks, in priority order
pub const CARDINAL_QUADRANTS: &[(Marker, BuoyClass)] = &[
    (Word("NORTH"), BuoyClass::CardinalNorth),
    (Word("EAST"), BuoyClass::CardinalEast),
    (Word("SOUTH"), BuoyClass::CardinalSouth),
    (Word("WEST"), BuoyClass::CardinalWest),
];

// ============================================================================
// Rhythm Class Table
// ============================================================================

/// Longer abbreviations first so `LFL` is never read as `FL`
pub const CLASS_RULES: &[(Marker, CharacteristicClass)] = &[
    (Word("ISO"), CharacteristicClass::Iso),
    (Word("OC"), CharacteristicClass::Oc),
    (Word("LFL"), CharacteristicClass::Lfl),
    (Word("FFL"), CharacteristicClass::Ffl),
    (Word("FL"), CharacteristicClass::Fl),
    (Word("VQ"), CharacteristicClass::Vq),
    (Word("Q"), CharacteristicClass::Q),
];

// ============================================================================
// Compiled Tables
// ============================================================================

fn compile_group(rule: &'static str, markers: &[Marker]) -> Result<Regex, InterpreterError> {
    let alternation = markers
        .iter()
        .map(|m| format!("(?:{})", m.pattern()))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).map_err(|source| InterpreterError::Pattern { rule, source })
}

#[derive(Debug)]
struct CompiledBuoyRule {
    name: &'static str,
    /// Every group must match
    groups: Vec<Regex>,
    outcome: RuleOutcome,
}

impl CompiledBuoyRule {
    fn matches(&self, text: &str) -> bool {
        self.groups.iter().all(|re| re.is_match(text))
    }
}

/// Rule tables compiled once per interpreter
#[derive(Debug)]
pub(crate) struct RuleSet {
    buoy: Vec<CompiledBuoyRule>,
    quadrants: Vec<(Regex, BuoyClass)>,
    classes: Vec<(Regex, CharacteristicClass)>,
}

impl RuleSet {
    pub(crate) fn compile() -> Result<Self, InterpreterError> {
        let buoy = BUOY_RULES
            .iter()
            .map(|rule| -> Result<CompiledBuoyRule, InterpreterError> {
                let groups = match rule.predicate {
                    Predicate::AnyOf(markers) => vec![compile_group(rule.name, markers)?],
                    Predicate::AllOf(groups) => groups
                        .iter()
                        .map(|g| compile_group(rule.name, g))
                        .collect::<Result<Vec<_>, _>>()?,
                };
                Ok(CompiledBuoyRule {
                    name: rule.name,
                    groups,
                    outcome: rule.outcome,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let quadrants = CARDINAL_QUADRANTS
            .iter()
            .map(|(marker, class)| compile_group("cardinal", &[*marker]).map(|re| (re, *class)))
            .collect::<Result<Vec<_>, _>>()?;

        let classes = CLASS_RULES
            .iter()
            .map(|(marker, class)| compile_group("rhythm_class", &[*marker]).map(|re| (re, *class)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            buoy,
            quadrants,
            classes,
        })
    }

    /// Buoy class and the name of the row that produced it.
    pub(crate) fn classify(&self, upper: &str) -> (BuoyClass, &'static str) {
        let Some(rule) = self.buoy.iter().find(|r| r.matches(upper)) else {
            return (BuoyClass::Unclassified, FALLBACK_RULE);
        };

        let class = match rule.outcome {
            RuleOutcome::Class(class) => class,
            RuleOutcome::CardinalByQuadrant => self
                .quadrants
                .iter()
                .find(|(re, _)| re.is_match(upper))
                .map_or(BuoyClass::CardinalNorth, |(_, class)| *class),
        };
        (class, rule.name)
    }

    /// Rhythm class; unmatched text is a fixed light.
    pub(crate) fn rhythm_class(&self, upper: &str) -> CharacteristicClass {
        self.classes
            .iter()
            .find(|(re, _)| re.is_match(upper))
            .map_or(CharacteristicClass::Fix, |(_, class)| *class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::compile().expect("built-in rules compile")
    }

    fn classify(text: &str) -> (BuoyClass, &'static str) {
        rules().classify(&text.to_uppercase())
    }

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<&str> = BUOY_RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUOY_RULES.len());
        assert!(!names.contains(&FALLBACK_RULE));
    }

    #[test]
    fn test_each_row_fires_on_its_own_keywords() {
        let cases = [
            ("Cardinal", BuoyClass::CardinalNorth, "cardinal"),
            ("Mo(A) W", BuoyClass::SafeWater, "safe_water"),
            ("Fl(2) 5s", BuoyClass::IsolatedDanger, "isolated_danger"),
            ("Fl 4s", BuoyClass::Unclassified, FALLBACK_RULE),
            ("Fl Y 4s cable area", BuoyClass::Special, "special"),
            ("Fl(2+1) RG 6s", BuoyClass::PreferredStarboard, "preferred_starboard"),
            ("Fl(2+1) GR 6s", BuoyClass::PreferredPort, "preferred_port"),
            ("Fl R 4s red nun", BuoyClass::StarboardPost, "red_nun"),
            ("Fl G 4s green can", BuoyClass::PortPost, "green_can"),
            ("Fl R 4s", BuoyClass::StarboardSmall, "red_lateral"),
            ("Fl G 4s", BuoyClass::PortSmall, "green_lateral"),
            ("Fl W 4s mooring buoy", BuoyClass::Mooring, "mooring"),
        ];
        for (text, class, rule) in cases {
            assert_eq!(classify(text), (class, rule), "text: {text}");
        }
    }

    #[test]
    fn test_cardinal_quadrants() {
        assert_eq!(classify("Cardinal East").0, BuoyClass::CardinalEast);
        assert_eq!(classify("VQ(9) W 10s west cardinal").0, BuoyClass::CardinalWest);
        assert_eq!(classify("south cardinal").0, BuoyClass::CardinalSouth);
        // NORTH outranks later quadrant words
        assert_eq!(classify("Cardinal north of east shoal").0, BuoyClass::CardinalNorth);
    }

    #[test]
    fn test_earlier_rows_shadow_later() {
        // Compound marker wins over plain red
        assert_eq!(classify("Red and Green bands").0, BuoyClass::PreferredStarboard);
        // Anchor is special before it is mooring
        assert_eq!(classify("Anchorage anchor buoy").0, BuoyClass::Special);
        // Safe water beats red
        assert_eq!(classify("Mo(A) R/W").0, BuoyClass::SafeWater);
        // Cardinal beats everything
        assert_eq!(classify("Cardinal red danger").0, BuoyClass::CardinalNorth);
    }

    #[test]
    fn test_long_keywords_match_inflected_forms() {
        let cases = [
            ("Fl W 4s anchorage buoy", BuoyClass::Special, "special"),
            ("Fl W 4s cables", BuoyClass::Special, "special"),
            ("Fl W 4s obstructions", BuoyClass::Special, "special"),
            ("Fl W 4s research buoys", BuoyClass::Special, "special"),
            ("Fl W 4s yellowish", BuoyClass::Special, "special"),
            ("Fl W 4s dangerous wreck", BuoyClass::IsolatedDanger, "isolated_danger"),
            // Danger still outranks the plain red row, special outranks green
            ("Fl R 4s dangerous rock", BuoyClass::IsolatedDanger, "isolated_danger"),
            ("Fl G 4s cables", BuoyClass::Special, "special"),
        ];
        for (text, class, rule) in cases {
            assert_eq!(classify(text), (class, rule), "text: {text}");
        }
    }

    #[test]
    fn test_markers_are_word_bounded() {
        // GREEN must not trigger the GR preferred-port row
        assert_eq!(classify("Fl green 4s").0, BuoyClass::PortSmall);
        // CARDINAL must not satisfy the CAN requirement
        assert_eq!(classify("G cardinalish").0, BuoyClass::PortSmall);
        // Words containing R or G letters are not colors
        assert_eq!(classify("Range light").0, BuoyClass::Unclassified);
    }

    #[test]
    fn test_rhythm_class_table() {
        let r = rules();
        let class = |t: &str| r.rhythm_class(&t.to_uppercase());
        assert_eq!(class("LFl 2s"), CharacteristicClass::Lfl);
        assert_eq!(class("FFl W"), CharacteristicClass::Ffl);
        assert_eq!(class("Fl(2) W 6s"), CharacteristicClass::Fl);
        assert_eq!(class("Iso R 2s"), CharacteristicClass::Iso);
        assert_eq!(class("Oc G 4s"), CharacteristicClass::Oc);
        assert_eq!(class("VQ W"), CharacteristicClass::Vq);
        assert_eq!(class("Q G"), CharacteristicClass::Q);
        assert_eq!(class("F R"), CharacteristicClass::Fix);
        assert_eq!(class("Mo(A) W 8s"), CharacteristicClass::Fix);
        assert_eq!(class(""), CharacteristicClass::Fix);
    }
}
