//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use crate::types::BuoyClass;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Prefix of the free-form `[buoy_types]` table; its keys are class slugs.
const BUOY_TYPES_SECTION: &str = "buoy_types";

/// Returns the complete set of valid dotted key paths for ConverterConfig.
///
/// Maintained by hand to match the struct hierarchy in converter_config.rs.
/// `[buoy_types]` entries are checked separately against `BuoyClass` slugs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [interpreter]
        "interpreter",
        "interpreter.default_period_s",
        "interpreter.default_range_nm",
        "interpreter.default_height_m",
        // [interpreter.palette]
        "interpreter.palette",
        "interpreter.palette.white",
        "interpreter.palette.red",
        "interpreter.palette.green",
        "interpreter.palette.yellow",
        "interpreter.palette.blue",
        // [bbox]
        "bbox",
        "bbox.min_lon",
        "bbox.min_lat",
        "bbox.max_lon",
        "bbox.max_lat",
        // [longitude]
        "longitude",
        "longitude.mode",
        "longitude.offset_deg",
        "longitude.swap_lat_lon",
        // [input]
        "input",
        "input.format",
        // [output]
        "output",
        "output.dir",
        "output.buoy_file",
        "output.light_file",
        "output.coordinate_decimals",
        // [buoy_types]
        BUOY_TYPES_SECTION,
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest candidate for an unknown key, if within edit distance 3.
///
/// Ties go to the longest shared prefix, then the lexicographically smallest
/// candidate, so `min_lng` suggests `min_lon` rather than `min_lat`.
pub fn suggest_correction<'a, I>(unknown: &str, known: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    known
        .into_iter()
        .map(|k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min_by_key(|&(dist, k)| (dist, std::cmp::Reverse(common_prefix_len(unknown, k)), k))
        .map(|(_, k)| k.to_string())
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let buoy_prefix = format!("{BUOY_TYPES_SECTION}.");
    let mut warnings = Vec::new();

    for key in walk_toml_keys(&value, "") {
        if let Some(slug) = key.strip_prefix(&buoy_prefix) {
            // Unknown slugs are fatal in ConverterConfig::validate; warn here
            // too so the typo hint reaches the log before the error does.
            if BuoyClass::from_slug(slug).is_none() {
                let suggestion = suggest_correction(slug, BuoyClass::ALL.iter().map(BuoyClass::slug))
                    .map(|s| format!("{buoy_prefix}{s}"));
                warnings.push(ValidationWarning {
                    message: format!("Unknown buoy class '{key}'"),
                    field: key,
                    suggestion,
                });
            }
            continue;
        }

        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(&key, known.iter().copied());
            warnings.push(ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed ConverterConfig.
///
/// Returns (errors, warnings): errors are impossible values, warnings are
/// legal but unusual for aids to navigation.
pub fn validate_physical_ranges(
    config: &super::ConverterConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let errors = config.interpreter.validate();
    let mut warnings = Vec::new();

    let i = &config.interpreter;

    // Major lighthouses reach ~25-30 NM; 40 NM is beyond any real light
    if i.default_range_nm > 40.0 {
        warnings.push(ValidationWarning {
            field: "interpreter.default_range_nm".to_string(),
            message: format!(
                "default_range_nm = {:.1} is outside typical range (0-40 NM)",
                i.default_range_nm
            ),
            suggestion: None,
        });
    }

    if i.default_height_m > 200.0 {
        warnings.push(ValidationWarning {
            field: "interpreter.default_height_m".to_string(),
            message: format!(
                "default_height_m = {:.1} is outside typical range (0-200 m)",
                i.default_height_m
            ),
            suggestion: None,
        });
    }

    // Longest published periods are ~60 s; sequences cap at 20 s anyway
    if i.default_period_s > 120.0 {
        warnings.push(ValidationWarning {
            field: "interpreter.default_period_s".to_string(),
            message: format!(
                "default_period_s = {:.1} is outside typical range (0.5-120 s)",
                i.default_period_s
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
