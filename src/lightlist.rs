//! Light List Reader
//!
//! Parses USCG/NOAA Light List extracts into `NavAid` records. Four source
//! layouts are supported:
//!
//! **Table** (header row): columns found by header substring, e.g.
//! `LLNR,Name,Position,Characteristic,Height,Range,Structure,Remarks` or a
//! converted-PDF CSV with `number,name,char,lat,lon`.
//!
//! **Two-line text**: a line holding a latitude DMS token followed by the
//! next line holding the longitude (wrapped remarks in between become the
//! structure text):
//!
//! ```text
//! Ambrose Channel Lighted Buoy 2 40-27-30.000N Fl R 4s
//! 073-49-52.000W
//! ```
//!
//! **Positional CSV**: headerless `name, lat, lon, characteristic...`.
//!
//! **PDF text**: one extracted PDF line per aid,
//! `12345 Name ... Fl W 4s ... 18°26'48"N 69°52'19"W`.
//!
//! In `auto` mode the layout is detected per file.
//!
//! # Usage
//!
//! ```ignore
//! use lightlist_bc::lightlist::{InputFormat, LightList};
//!
//! let list = LightList::load("district1.csv", InputFormat::Auto)?;
//! for aid in list.aids() {
//!     // Interpret, filter, write...
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::defaults::MAX_LOGGED_ROW_WARNINGS;
use crate::geo::{find_dms, parse_coordinate, parse_position, Axis};
use crate::types::{GeoPosition, NavAid};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty", .0.display())]
    Empty(PathBuf),

    #[error("no navigational aids found in {source_name} (format: {format})")]
    NoEntries { source_name: String, format: InputFormat },
}

// ============================================================================
// Input Format
// ============================================================================

/// Source file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Detect per file
    #[default]
    Auto,
    Table,
    TwoLine,
    Positional,
    PdfText,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Auto => "auto",
            InputFormat::Table => "table",
            InputFormat::TwoLine => "two_line",
            InputFormat::Positional => "positional",
            InputFormat::PdfText => "pdf_text",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "auto" => Ok(InputFormat::Auto),
            "table" | "csv" => Ok(InputFormat::Table),
            "two_line" => Ok(InputFormat::TwoLine),
            "positional" => Ok(InputFormat::Positional),
            "pdf_text" | "pdf" => Ok(InputFormat::PdfText),
            other => Err(format!(
                "unknown input format '{other}' (expected auto, table, two_line, positional or pdf_text)"
            )),
        }
    }
}

// ============================================================================
// CSV Quote-Aware Parsing
// ============================================================================

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Collapse runs of whitespace to single spaces and trim.
fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim a free-text line and drop one pair of wrapping quotes plus any
/// trailing CSV commas left over from spreadsheet exports.
fn clean_text_line(line: &str) -> &str {
    let mut s = line.trim().trim_end_matches(',').trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s = &s[1..s.len() - 1];
    }
    s.trim()
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

// ============================================================================
// Column Mapping
// ============================================================================

/// Maps table header names to column indices
#[derive(Debug, Clone, Default)]
struct ColumnMap {
    columns: usize,
    llnr: Option<usize>,
    name: Option<usize>,
    position: Option<usize>,
    lat: Option<usize>,
    lon: Option<usize>,
    characteristic: Option<usize>,
    height: Option<usize>,
    range: Option<usize>,
    structure: Option<usize>,
    remarks: Option<usize>,
}

impl ColumnMap {
    /// Build column map from a header line. First matching column wins.
    fn from_header(header: &str) -> Self {
        let mut map = Self::default();
        let columns = csv_split(header);
        map.columns = columns.len();

        for (idx, col) in columns.iter().enumerate() {
            let col_lower = col.trim().to_lowercase();
            if col_lower.is_empty() {
                continue;
            }

            let slot = if col_lower.contains("position") {
                &mut map.position
            } else if col_lower.starts_with("lat") {
                &mut map.lat
            } else if col_lower.starts_with("lon") {
                // "lon", "long", "longitude"
                &mut map.lon
            } else if col_lower.contains("llnr")
                || col_lower.starts_with("no.")
                || col_lower == "no"
                || col_lower == "number"
            {
                &mut map.llnr
            } else if col_lower.contains("name") {
                &mut map.name
            } else if col_lower.contains("char") {
                &mut map.characteristic
            } else if col_lower.contains("height") {
                &mut map.height
            } else if col_lower.contains("range") {
                &mut map.range
            } else if col_lower.contains("structure") {
                &mut map.structure
            } else if col_lower.contains("remark") {
                &mut map.remarks
            } else {
                continue;
            };

            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        map
    }

    fn has_coordinates(&self) -> bool {
        self.position.is_some() || (self.lat.is_some() && self.lon.is_some())
    }

    /// A free-text line such as a PDF page header is a single column even
    /// when it mentions "Position".
    fn looks_like_table(&self) -> bool {
        self.columns >= 2 && self.has_coordinates()
    }

    /// Report which columns were found
    fn summary(&self) -> String {
        let mut found: Vec<&str> = Vec::new();
        let mut missing: Vec<&str> = Vec::new();

        macro_rules! check_col {
            ($name:expr, $field:expr) => {
                if $field.is_some() { found.push($name); } else { missing.push($name); }
            };
        }

        check_col!("LLNR", self.llnr);
        check_col!("NAME", self.name);
        check_col!("POSITION", self.position.or(self.lat.and(self.lon)));
        check_col!("CHARACTERISTIC", self.characteristic);
        check_col!("HEIGHT", self.height);
        check_col!("RANGE", self.range);
        check_col!("STRUCTURE", self.structure);
        check_col!("REMARKS", self.remarks);

        format!(
            "Found {}/{} columns. Present: [{}]. Missing: [{}]",
            found.len(),
            found.len() + missing.len(),
            found.join(", "),
            missing.join(", "),
        )
    }
}

// ============================================================================
// Light List
// ============================================================================

/// Metadata about a loaded source file
#[derive(Debug, Clone, Serialize)]
pub struct LightListInfo {
    /// Source file path (or label for in-memory text)
    pub source_path: String,
    /// Layout the entries were read with
    pub format: InputFormat,
    /// Number of aids read
    pub entry_count: usize,
    /// Rows that looked like records but had no usable position
    pub skipped_rows: usize,
    /// Column summary, table layout only
    pub columns_found: Option<String>,
}

/// Aids read from one source file
#[derive(Debug, Clone)]
pub struct LightList {
    aids: Vec<NavAid>,
    pub info: LightListInfo,
}

/// Result of one layout parser
#[derive(Debug, Default)]
struct Parsed {
    aids: Vec<NavAid>,
    skipped: usize,
    columns: Option<String>,
}

impl LightList {
    /// Load a Light List file in the given layout (`Auto` sniffs it).
    pub fn load(path: impl AsRef<Path>, format: InputFormat) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let text = String::from_utf8_lossy(&bytes);
        if text.trim_start_matches('\u{feff}').trim().is_empty() {
            return Err(ReadError::Empty(path.to_path_buf()));
        }

        Self::from_text(&path.display().to_string(), &text, format)
    }

    /// Parse already-loaded text. `source` labels log lines and the info block.
    pub fn from_text(source: &str, text: &str, format: InputFormat) -> Result<Self, ReadError> {
        let text = text.trim_start_matches('\u{feff}');
        let lines: Vec<&str> = text.lines().collect();

        let (format, parsed) = match format {
            InputFormat::Auto => detect_and_parse(source, &lines),
            InputFormat::Table => (format, parse_table(source, &lines)),
            InputFormat::TwoLine => (format, parse_two_line(&lines)),
            InputFormat::Positional => (format, parse_positional(source, &lines)),
            InputFormat::PdfText => (format, parse_pdf_text(&lines)),
        };

        if parsed.aids.is_empty() {
            return Err(ReadError::NoEntries {
                source_name: source.to_string(),
                format,
            });
        }

        let info = LightListInfo {
            source_path: source.to_string(),
            format,
            entry_count: parsed.aids.len(),
            skipped_rows: parsed.skipped,
            columns_found: parsed.columns,
        };

        tracing::info!(
            file = %info.source_path,
            format = %info.format,
            entries = info.entry_count,
            skipped = info.skipped_rows,
            "Light List loaded"
        );

        Ok(Self {
            aids: parsed.aids,
            info,
        })
    }

    /// Get all aids
    pub fn aids(&self) -> &[NavAid] {
        &self.aids
    }

    /// Consume and return owned aids
    pub fn into_aids(self) -> Vec<NavAid> {
        self.aids
    }

    pub fn len(&self) -> usize {
        self.aids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aids.is_empty()
    }
}

/// Aids from several files plus per-file info, in input order.
#[derive(Debug, Default)]
pub struct LoadedLists {
    pub aids: Vec<NavAid>,
    pub infos: Vec<LightListInfo>,
}

impl LoadedLists {
    /// Entry count per detected format
    pub fn format_counts(&self) -> BTreeMap<InputFormat, usize> {
        let mut counts = BTreeMap::new();
        for info in &self.infos {
            *counts.entry(info.format).or_insert(0) += info.entry_count;
        }
        counts
    }
}

/// Load several files. Files that are missing, unreadable or hold no aids
/// are logged and skipped.
pub fn load_many(paths: &[PathBuf], format: InputFormat) -> LoadedLists {
    let mut loaded = LoadedLists::default();

    for path in paths {
        if !path.exists() {
            tracing::warn!(file = %path.display(), "Input file not found, skipping");
            continue;
        }
        match LightList::load(path, format) {
            Ok(list) => {
                loaded.infos.push(list.info.clone());
                loaded.aids.extend(list.into_aids());
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "Skipping input file");
            }
        }
    }

    loaded
}

// ============================================================================
// Layout Detection
// ============================================================================

/// Table first when the header locates coordinates, then the headerless
/// layouts in order. The first layout yielding entries wins.
fn detect_and_parse(source: &str, lines: &[&str]) -> (InputFormat, Parsed) {
    let header = lines.iter().find(|l| !l.trim().is_empty());
    if let Some(header) = header {
        if ColumnMap::from_header(header).looks_like_table() {
            let parsed = parse_table(source, lines);
            if !parsed.aids.is_empty() {
                return (InputFormat::Table, parsed);
            }
        }
    }

    let attempts: [(InputFormat, fn(&str, &[&str]) -> Parsed); 3] = [
        (InputFormat::TwoLine, |_, l| parse_two_line(l)),
        (InputFormat::Positional, parse_positional),
        (InputFormat::PdfText, |_, l| parse_pdf_text(l)),
    ];

    for (format, parse) in attempts {
        let parsed = parse(source, lines);
        if !parsed.aids.is_empty() {
            tracing::debug!(file = %source, format = %format, "Detected layout");
            return (format, parsed);
        }
    }

    (InputFormat::Auto, Parsed::default())
}

/// Rate-limited row warning
fn warn_row(source: &str, line: usize, skipped: usize, reason: &str) {
    if skipped <= MAX_LOGGED_ROW_WARNINGS {
        tracing::warn!(file = %source, line, "{}", reason);
    }
    if skipped == MAX_LOGGED_ROW_WARNINGS {
        tracing::warn!(file = %source, "Further row warnings suppressed");
    }
}

// ============================================================================
// Table Layout
// ============================================================================

fn parse_table(source: &str, lines: &[&str]) -> Parsed {
    let mut parsed = Parsed::default();

    let Some(header_idx) = lines.iter().position(|l| !l.trim().is_empty()) else {
        return parsed;
    };
    let col_map = ColumnMap::from_header(lines[header_idx]);
    let summary = col_map.summary();
    tracing::info!(file = %source, "{}", summary);
    parsed.columns = Some(summary);

    if !col_map.has_coordinates() {
        tracing::warn!(file = %source, "Table header has no position or lat/lon columns");
        return parsed;
    }

    for (idx, line) in lines.iter().enumerate().skip(header_idx + 1) {
        let line_num = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields = csv_split(line);
        let get = |col: Option<usize>| col.and_then(|i| fields.get(i)).map(|s| s.trim());

        let position = match col_map.position {
            Some(_) => get(col_map.position).and_then(parse_position),
            None => get(col_map.lat)
                .and_then(|t| parse_coordinate(t, Axis::Latitude))
                .zip(get(col_map.lon).and_then(|t| parse_coordinate(t, Axis::Longitude)))
                .map(|(lat, lon)| GeoPosition::new(lon, lat)),
        };

        let Some(position) = position else {
            parsed.skipped += 1;
            warn_row(source, line_num, parsed.skipped, "Unparseable position, row skipped");
            continue;
        };

        let structure = [get(col_map.structure), get(col_map.remarks)]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut aid = NavAid::new(
            collapse_ws(get(col_map.name).unwrap_or_default()),
            position,
            collapse_ws(get(col_map.characteristic).unwrap_or_default()),
        )
        .with_structure(collapse_ws(&structure))
        .with_fields(non_empty(get(col_map.height)), non_empty(get(col_map.range)));
        aid.llnr = non_empty(get(col_map.llnr));
        aid.source_line = line_num;

        parsed.aids.push(aid);
    }

    parsed
}

// ============================================================================
// Two-Line Text Layout
// ============================================================================

fn parse_two_line(lines: &[&str]) -> Parsed {
    let mut parsed = Parsed::default();
    let mut idx = 0;

    while idx < lines.len() {
        let line = clean_text_line(lines[idx]);
        let lat_token = find_dms(line).filter(|t| t.hemisphere.axis() == Axis::Latitude);

        let Some(lat_token) = lat_token else {
            idx += 1;
            continue;
        };

        // Both coordinates on one line is a single-line layout, not two-line
        if find_dms(&line[lat_token.end..]).is_some_and(|t| t.hemisphere.axis() == Axis::Longitude) {
            idx += 1;
            continue;
        }

        // Longitude is on the next line holding a longitude token; wrapped
        // remarks may sit in between, but a new latitude ends the search.
        let lon_token = lines
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find_map(|(j, l)| find_dms(clean_text_line(l)).map(|t| (j, t)))
            .filter(|(_, t)| t.hemisphere.axis() == Axis::Longitude);

        match lon_token {
            Some((j, lon)) => {
                let remarks = lines[idx + 1..j]
                    .iter()
                    .map(|l| clean_text_line(l))
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                let mut aid = NavAid::new(
                    collapse_ws(&line[..lat_token.start]),
                    GeoPosition::new(lon.value, lat_token.value),
                    collapse_ws(&line[lat_token.end..]),
                )
                .with_structure(collapse_ws(&remarks));
                aid.source_line = idx + 1;
                parsed.aids.push(aid);
                idx = j + 1;
            }
            None => {
                parsed.skipped += 1;
                idx += 1;
            }
        }
    }

    parsed
}

// ============================================================================
// Positional CSV Layout
// ============================================================================

fn parse_positional(source: &str, lines: &[&str]) -> Parsed {
    let mut parsed = Parsed::default();

    for (idx, line) in lines.iter().enumerate() {
        let cells: Vec<String> = csv_split(line)
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if cells.len() < 4 {
            continue;
        }

        let lat = parse_coordinate(&cells[1], Axis::Latitude);
        let lon = parse_coordinate(&cells[2], Axis::Longitude);
        let (Some(lat), Some(lon)) = (lat, lon) else {
            parsed.skipped += 1;
            warn_row(source, idx + 1, parsed.skipped, "Unparseable lat/lon cells, row skipped");
            continue;
        };

        let mut aid = NavAid::new(
            collapse_ws(&cells[0]),
            GeoPosition::new(lon, lat),
            collapse_ws(&cells[3..].join(" ")),
        );
        aid.source_line = idx + 1;
        parsed.aids.push(aid);
    }

    parsed
}

// ============================================================================
// PDF Text Layout
// ============================================================================

fn pdf_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // LLNR, name, characteristic (starts at a rhythm abbreviation), lat, lon
        Regex::new(
            r"^(\d{2,5})\s+(.+?)\s+((?:Al\.?\s*)?(?:F|Fl|LFl|FFl|Iso|Oc|Q|VQ|IQ|Mo)\b.*?)\s+(\d{1,2}°.*?[NS])\s+(\d{1,3}°.*?[EW])",
        )
        .expect("PDF line pattern is valid")
    })
}

fn parse_pdf_text(lines: &[&str]) -> Parsed {
    let mut parsed = Parsed::default();

    for (idx, raw) in lines.iter().enumerate() {
        let line = clean_text_line(raw);
        if line.is_empty() || line.to_lowercase().starts_with("no.") {
            continue;
        }
        let Some(caps) = pdf_line_regex().captures(line) else {
            continue;
        };
        let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        let lat = parse_coordinate(field(4), Axis::Latitude);
        let lon = parse_coordinate(field(5), Axis::Longitude);
        let (Some(lat), Some(lon)) = (lat, lon) else {
            parsed.skipped += 1;
            continue;
        };

        let mut aid = NavAid::new(
            collapse_ws(field(2)),
            GeoPosition::new(lon, lat),
            collapse_ws(field(3)),
        );
        aid.llnr = Some(field(1).to_string());
        aid.source_line = idx + 1;
        parsed.aids.push(aid);
    }

    parsed
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_csv_split_quoted_fields() {
        let fields = csv_split(r#"1,"Buoy ""A"", NY",Fl G 4s"#);
        assert_eq!(fields, vec!["1", r#"Buoy "A", NY"#, "Fl G 4s"]);
    }

    #[test]
    fn test_column_map_position_header() {
        let map = ColumnMap::from_header(
            "LLNR,Name,Position,Characteristic,Height,Range,Structure,Remarks",
        );
        assert_eq!(map.llnr, Some(0));
        assert_eq!(map.name, Some(1));
        assert_eq!(map.position, Some(2));
        assert_eq!(map.characteristic, Some(3));
        assert_eq!(map.remarks, Some(7));
        assert!(map.has_coordinates());
    }

    #[test]
    fn test_column_map_lat_lon_header() {
        let map = ColumnMap::from_header("number,name,char,lat,lon");
        assert_eq!(map.llnr, Some(0));
        assert_eq!(map.lat, Some(3));
        assert_eq!(map.lon, Some(4));
        assert!(map.has_coordinates());

        let map = ColumnMap::from_header("name,characteristic");
        assert!(!map.has_coordinates());
        assert!(map.summary().contains("Missing: [LLNR, POSITION"));
    }

    #[test]
    fn test_table_layout() {
        let text = "\u{feff}LLNR,Name,Position,Characteristic,Height,Range,Structure,Remarks\n\
            34805,Ambrose Channel Lighted Buoy 2,\"40-27-30.000N, 073-49-52.000W\",Fl R 4s,,4,Red nun,\n\
            34810,Broken Row,not a position,Fl G 4s,,,,\n";
        let list = LightList::from_text("test", text, InputFormat::Auto).unwrap();
        assert_eq!(list.info.format, InputFormat::Table);
        assert_eq!(list.len(), 1);
        assert_eq!(list.info.skipped_rows, 1);

        let aid = &list.aids()[0];
        assert_eq!(aid.llnr.as_deref(), Some("34805"));
        assert_eq!(aid.characteristic, "Fl R 4s");
        assert_eq!(aid.structure, "Red nun");
        assert_eq!(aid.range_field.as_deref(), Some("4"));
        assert_eq!(aid.height_field, None);
        assert_eq!(aid.source_line, 2);
        assert!(close(aid.position.lat, 40.0 + 27.5 / 60.0));
        assert!(aid.position.lon < -73.8);
    }

    #[test]
    fn test_two_line_layout() {
        let text = "Ambrose   Channel Lighted Buoy 2 40-27-30.000N  Fl R 4s\n\
            073-49-52.000W\n\
            \n\
            \"West Bank Light 40-32-17.000N Iso W 6s 20M\"\n\
            074-02-35.000W\n";
        let list = LightList::from_text("test", text, InputFormat::Auto).unwrap();
        assert_eq!(list.info.format, InputFormat::TwoLine);
        assert_eq!(list.len(), 2);

        let first = &list.aids()[0];
        assert_eq!(first.name, "Ambrose Channel Lighted Buoy 2");
        assert_eq!(first.characteristic, "Fl R 4s");
        assert!(close(first.position.lon, -(73.0 + 49.0 / 60.0 + 52.0 / 3600.0)));

        let second = &list.aids()[1];
        assert_eq!(second.name, "West Bank Light");
        assert_eq!(second.characteristic, "Iso W 6s 20M");
        assert_eq!(second.source_line, 4);
    }

    #[test]
    fn test_two_line_longitude_after_wrapped_remarks() {
        let text = "Buoy 2 40-27-30.000N Fl R 4s\n\
            Red nun\n\
            073-49-52.000W\n\
            Buoy 3 40-28-00.000N Fl G 4s\n\
            Green can\n\
            Buoy 5 40-29-00.000N Q G\n\
            073-50-00.000W\n";
        let list = LightList::from_text("test", text, InputFormat::TwoLine).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.info.skipped_rows, 1);
        assert_eq!(list.info.format, InputFormat::TwoLine);
        assert_eq!(list.aids()[0].name, "Buoy 2");
        assert_eq!(list.aids()[0].structure, "Red nun");
        assert!(list.aids()[0].position.lon < -73.8);
        // Buoy 3 has no longitude before the next latitude line
        assert_eq!(list.aids()[1].name, "Buoy 5");
        assert_eq!(list.aids()[1].source_line, 6);
    }

    #[test]
    fn test_positional_layout() {
        let text = "Buoy 1,40-30-00N,074-00-00W,Fl,G,4s\n\
            too,short\n\
            Buoy 2,bad,074-00-00W,Q R\n";
        let list = LightList::from_text("test", text, InputFormat::Auto).unwrap();
        assert_eq!(list.info.format, InputFormat::Positional);
        assert_eq!(list.len(), 1);
        assert_eq!(list.info.skipped_rows, 1);
        assert_eq!(list.aids()[0].characteristic, "Fl G 4s");
        assert!(close(list.aids()[0].position.lat, 40.5));
    }

    #[test]
    fn test_single_line_rows_are_not_two_line_records() {
        // First row holds both coordinates; the later bare longitude must not
        // be paired with it
        let text = "Buoy 1,40-30-00N,074-00-00W,Fl G 4s\n\
            Remarks only\n\
            074-01-00W\n";
        let result = LightList::from_text("test", text, InputFormat::TwoLine);
        assert!(matches!(result, Err(ReadError::NoEntries { .. })));
    }

    #[test]
    fn test_pdf_text_layout() {
        let text = "No. Name Characteristic Position\n\
            12345 Santo Domingo Light Fl W 4s 18°26'48\"N 69°52'19\"W\n";
        let list = LightList::from_text("test", text, InputFormat::Auto).unwrap();
        assert_eq!(list.info.format, InputFormat::PdfText);
        let aid = &list.aids()[0];
        assert_eq!(aid.llnr.as_deref(), Some("12345"));
        assert_eq!(aid.name, "Santo Domingo Light");
        assert_eq!(aid.characteristic, "Fl W 4s");
        assert!(close(aid.position.lat, 18.0 + 26.0 / 60.0 + 48.0 / 3600.0));
        assert!(aid.position.lon < -69.0);
    }

    #[test]
    fn test_pinned_format_does_not_sniff() {
        let text = "Buoy 1,40-30-00N,074-00-00W,Fl G 4s\n";
        let result = LightList::from_text("test", text, InputFormat::TwoLine);
        assert!(matches!(
            result,
            Err(ReadError::NoEntries { format: InputFormat::TwoLine, .. })
        ));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("pdf-text".parse::<InputFormat>(), Ok(InputFormat::PdfText));
        assert_eq!("TWO_LINE".parse::<InputFormat>(), Ok(InputFormat::TwoLine));
        assert!("xlsx".parse::<InputFormat>().is_err());
    }

    #[test]
    fn test_load_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            LightList::load(&missing, InputFormat::Auto),
            Err(ReadError::Io { .. })
        ));

        let empty = dir.path().join("empty.csv");
        std::fs::write(&empty, "\u{feff}  \n").unwrap();
        assert!(matches!(
            LightList::load(&empty, InputFormat::Auto),
            Err(ReadError::Empty(_))
        ));
    }

    #[test]
    fn test_load_many_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        std::fs::write(&good, "Buoy 1,40-30-00N,074-00-00W,Fl G 4s\n").unwrap();
        let paths = vec![dir.path().join("missing.csv"), good];

        let loaded = load_many(&paths, InputFormat::Auto);
        assert_eq!(loaded.aids.len(), 1);
        assert_eq!(loaded.infos.len(), 1);
        assert_eq!(loaded.format_counts().get(&InputFormat::Positional), Some(&1));
    }
}
