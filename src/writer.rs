//! Bridge Command INI writer
//!
//! Renders converted aids into the two parallel files the simulator reads
//! for a world: `Buoy.ini` (type and position) and `Light.ini` (light
//! characteristics). Entries share a 1-based index across both files.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::ConverterConfig;
use crate::types::{ConvertedAid, Palette};

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Paths of the files written by `write_outputs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub buoy: PathBuf,
    pub light: PathBuf,
}

/// Real number with at least one decimal place: `12` -> `12.0`, `2.5` -> `2.5`.
pub fn format_real(value: f64) -> String {
    let s = value.to_string();
    if s.contains('.') || !value.is_finite() {
        s
    } else {
        s + ".0"
    }
}

/// Render `Buoy.ini`.
///
/// Positions are normalized for the target world's longitude convention and
/// type names honor `[buoy_types]` overrides.
pub fn render_buoy_ini(aids: &[ConvertedAid], config: &ConverterConfig) -> String {
    let decimals = config.output.coordinate_decimals;
    let mut out = String::with_capacity(64 + aids.len() * 80);
    let _ = write!(out, "Number={}\n\n", aids.len());

    for (i, converted) in aids.iter().enumerate() {
        let idx = i + 1;
        let pos = config.longitude.normalize(converted.aid.position);
        let _ = write!(
            out,
            "Type({idx})=\"{}\"\nLong({idx})={:.*}\nLat({idx})={:.*}\n\n",
            config.buoy_type_name(converted.buoy),
            decimals,
            pos.lon,
            decimals,
            pos.lat,
        );
    }

    out
}

/// Render `Light.ini`.
pub fn render_light_ini(aids: &[ConvertedAid], palette: &Palette) -> String {
    let mut out = String::with_capacity(64 + aids.len() * 160);
    let _ = write!(out, "Number={}\n\n", aids.len());

    for (i, converted) in aids.iter().enumerate() {
        let idx = i + 1;
        let light = &converted.light;
        let rgb = palette.rgb(light.color);
        let _ = write!(
            out,
            "Buoy({idx})={idx}\n\
             Height({idx})={}\n\
             Red({idx})={}\n\
             Green({idx})={}\n\
             Blue({idx})={}\n\
             Range({idx})={}\n\
             Sequence({idx})=\"{}\"\n\
             StartAngle({idx})=0\n\
             EndAngle({idx})=360\n\
             Floating({idx})=1\n\n",
            format_real(light.height_m),
            rgb.0,
            rgb.1,
            rgb.2,
            format_real(light.range_nm),
            light.pattern,
        );
    }

    out
}

/// Create the output directory and write both files.
pub fn write_outputs(aids: &[ConvertedAid], config: &ConverterConfig) -> Result<OutputPaths, WriteError> {
    let dir = &config.output.dir;
    std::fs::create_dir_all(dir).map_err(|source| WriteError::Io {
        path: dir.clone(),
        source,
    })?;

    let paths = OutputPaths {
        buoy: config.output.buoy_path(),
        light: config.output.light_path(),
    };

    let write = |path: &PathBuf, contents: String| {
        std::fs::write(path, contents).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })
    };
    write(&paths.buoy, render_buoy_ini(aids, config))?;
    write(&paths.light, render_light_ini(aids, &config.interpreter.palette))?;

    tracing::info!(
        buoy = %paths.buoy.display(),
        light = %paths.light.display(),
        entries = aids.len(),
        "Wrote Bridge Command files"
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::LongitudeMode;
    use crate::types::{BuoyClass, CharacteristicClass, FlashPattern, GeoPosition, LightColor, LightDescriptor, NavAid};

    fn sample() -> ConvertedAid {
        ConvertedAid {
            aid: NavAid::new("Buoy 2", GeoPosition::new(-73.831111, 40.458333), "Fl R 4s"),
            light: LightDescriptor {
                color: LightColor::Red,
                period_s: 4.0,
                range_nm: 6.0,
                height_m: 2.5,
                class: CharacteristicClass::Fl,
                pattern: FlashPattern::lit_then_dark(2, 14),
            },
            buoy: BuoyClass::StarboardSmall,
        }
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(12.0), "12.0");
        assert_eq!(format_real(2.5), "2.5");
        assert_eq!(format_real(3.048), "3.048");
        assert_eq!(format_real(0.0), "0.0");
    }

    #[test]
    fn test_buoy_ini_exact() {
        let config = ConverterConfig::default();
        let text = render_buoy_ini(&[sample()], &config);
        assert_eq!(
            text,
            "Number=1\n\nType(1)=\"stbd_small\"\nLong(1)=-73.83111100\nLat(1)=40.45833300\n\n"
        );
    }

    #[test]
    fn test_light_ini_exact() {
        let text = render_light_ini(&[sample()], &Palette::default());
        assert_eq!(
            text,
            "Number=1\n\n\
             Buoy(1)=1\n\
             Height(1)=2.5\n\
             Red(1)=255\n\
             Green(1)=0\n\
             Blue(1)=0\n\
             Range(1)=6.0\n\
             Sequence(1)=\"LLDDDDDDDDDDDDDD\"\n\
             StartAngle(1)=0\n\
             EndAngle(1)=360\n\
             Floating(1)=1\n\n"
        );
    }

    #[test]
    fn test_indices_shared_and_overrides_applied() {
        let mut config = ConverterConfig::default();
        config.output.coordinate_decimals = 2;
        config.longitude.mode = LongitudeMode::Wrap360;
        config.buoy_types.insert("starboard_small".to_string(), "red_spar".to_string());

        let aids = vec![sample(), sample()];
        let buoy = render_buoy_ini(&aids, &config);
        assert!(buoy.starts_with("Number=2\n\n"));
        assert!(buoy.contains("Type(2)=\"red_spar\"\nLong(2)=286.17\nLat(2)=40.46\n"));

        let light = render_light_ini(&aids, &config.interpreter.palette);
        assert!(light.contains("Buoy(2)=2\n"));
        assert!(light.contains("Floating(2)=1\n\n"));
    }

    #[test]
    fn test_empty_renders_zero_count() {
        let config = ConverterConfig::default();
        assert_eq!(render_buoy_ini(&[], &config), "Number=0\n\n");
        assert_eq!(render_light_ini(&[], &config.interpreter.palette), "Number=0\n\n");
    }

    #[test]
    fn test_write_outputs_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConverterConfig::default();
        config.output.dir = dir.path().join("world").join("Harbor");

        let paths = write_outputs(&[sample()], &config).unwrap();
        assert!(paths.buoy.ends_with("Buoy.ini"));
        let light = std::fs::read_to_string(&paths.light).unwrap();
        assert!(light.starts_with("Number=1\n\nBuoy(1)=1\n"));
    }
}
