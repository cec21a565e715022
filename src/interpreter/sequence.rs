//! Flash-pattern synthesis
//!
//! Bridge Command renders a light as a repeating string of 0.25 s lit/dark
//! slots. Each rhythm class gets a fixed lit/dark allocation scaled to the
//! light's period, bounded to 4..=80 ticks (1 s to 20 s).

use crate::config::defaults::{
    FLASH_LIT_S, LONG_FLASH_LIT_S, MAX_TICKS, MIN_MEANINGFUL_PERIOD_S, MIN_TICKS,
    OCCULTING_LIT_FRACTION, TICK_SECONDS,
};
use crate::types::{CharacteristicClass, FlashPattern, Tick};

/// Round half to even: `2.5 -> 2`, `3.5 -> 4`.
fn round_even(x: f64) -> f64 {
    x.round_ties_even()
}

/// Replace a missing or noise period with the default.
pub fn effective_period(period_s: f64, default_period_s: f64) -> f64 {
    if period_s.is_finite() && period_s > MIN_MEANINGFUL_PERIOD_S {
        period_s
    } else {
        default_period_s
    }
}

/// Number of 0.25 s ticks for a period: `clamp(round(period / 0.25), 4, 80)`.
pub fn tick_count(period_s: f64, default_period_s: f64) -> usize {
    let period = effective_period(period_s, default_period_s);
    let raw = round_even(period / TICK_SECONDS);
    // Clamp in f64 space so absurd periods cannot overflow the cast
    raw.clamp(MIN_TICKS as f64, MAX_TICKS as f64) as usize
}

/// Build the lit/dark pattern for one period of a light.
///
/// `len()` of the result always equals `tick_count(period_s, default_period_s)`.
pub fn synthesize(class: CharacteristicClass, period_s: f64, default_period_s: f64) -> FlashPattern {
    let ticks = tick_count(period_s, default_period_s);

    match class {
        // A lit/dark renderer cannot superimpose the flash on the steady light
        CharacteristicClass::Fix | CharacteristicClass::Ffl => FlashPattern::lit_then_dark(ticks, 0),

        CharacteristicClass::Fl => {
            let lit = (round_even(FLASH_LIT_S / TICK_SECONDS) as usize).max(1);
            FlashPattern::lit_then_dark(lit, ticks - lit)
        }

        CharacteristicClass::Lfl => {
            let lit = (round_even(LONG_FLASH_LIT_S / TICK_SECONDS) as usize)
                .min(ticks - 1)
                .max(1);
            FlashPattern::lit_then_dark(lit, ticks - lit)
        }

        CharacteristicClass::Iso => {
            let lit = ticks / 2;
            FlashPattern::lit_then_dark(lit, ticks - lit)
        }

        CharacteristicClass::Oc => {
            let lit = (round_even(ticks as f64 * OCCULTING_LIT_FRACTION) as usize).min(ticks);
            FlashPattern::lit_then_dark(lit, ticks - lit)
        }

        CharacteristicClass::Q | CharacteristicClass::Vq => quick(ticks),
    }
}

/// Alternating single-tick flashes starting lit. Odd counts end lit.
fn quick(ticks: usize) -> FlashPattern {
    let pattern: Vec<Tick> = (0..ticks)
        .map(|i| if i % 2 == 0 { Tick::Lit } else { Tick::Dark })
        .collect();

    if pattern.is_empty() {
        return FlashPattern::new(vec![Tick::Lit, Tick::Dark]);
    }
    FlashPattern::new(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: f64 = 4.0;

    const ALL_CLASSES: [CharacteristicClass; 8] = [
        CharacteristicClass::Fix,
        CharacteristicClass::Fl,
        CharacteristicClass::Lfl,
        CharacteristicClass::Ffl,
        CharacteristicClass::Iso,
        CharacteristicClass::Oc,
        CharacteristicClass::Q,
        CharacteristicClass::Vq,
    ];

    #[test]
    fn test_tick_count_rounding_and_clamp() {
        assert_eq!(tick_count(4.0, DEFAULT), 16);
        assert_eq!(tick_count(2.5, DEFAULT), 10);
        // 0.625 s / 0.25 = 2.5 -> 2 (half-even) -> clamped to 4
        assert_eq!(tick_count(0.625, DEFAULT), 4);
        // 1.125 / 0.25 = 4.5 -> 4, 1.375 / 0.25 = 5.5 -> 6
        assert_eq!(tick_count(1.125, DEFAULT), 4);
        assert_eq!(tick_count(1.375, DEFAULT), 6);
        assert_eq!(tick_count(60.0, DEFAULT), 80);
        assert_eq!(tick_count(1e300, DEFAULT), 80);
    }

    #[test]
    fn test_noise_period_uses_default() {
        assert_eq!(tick_count(0.5, DEFAULT), 16);
        assert_eq!(tick_count(0.0, DEFAULT), 16);
        assert_eq!(tick_count(-3.0, DEFAULT), 16);
        assert_eq!(tick_count(f64::NAN, DEFAULT), 16);
        assert_eq!(tick_count(f64::INFINITY, 6.0), 24);
    }

    #[test]
    fn test_length_invariant_all_classes() {
        let periods = [0.0, 0.6, 0.9, 1.0, 1.1, 2.0, 2.625, 3.3, 4.0, 7.5, 10.0, 19.9, 20.0, 45.0, f64::NAN];
        for class in ALL_CLASSES {
            for &period in &periods {
                let pattern = synthesize(class, period, DEFAULT);
                let expected = tick_count(period, DEFAULT);
                assert_eq!(pattern.len(), expected, "{class} @ {period}");
                assert!((4..=80).contains(&pattern.len()), "{class} @ {period}");
            }
        }
    }

    #[test]
    fn test_fixed_all_lit() {
        let p = synthesize(CharacteristicClass::Fix, 3.0, DEFAULT);
        assert_eq!(p.to_sequence_string(), "L".repeat(12));
        assert_eq!(synthesize(CharacteristicClass::Ffl, 3.0, DEFAULT).dark_count(), 0);
    }

    #[test]
    fn test_flash_and_long_flash() {
        let fl = synthesize(CharacteristicClass::Fl, 4.0, DEFAULT);
        assert_eq!(fl.to_sequence_string(), format!("LL{}", "D".repeat(14)));

        let lfl = synthesize(CharacteristicClass::Lfl, 10.0, DEFAULT);
        assert_eq!(lfl.lit_count(), 8);
        assert_eq!(lfl.dark_count(), 32);

        // Short long-flash keeps one dark tick
        let lfl = synthesize(CharacteristicClass::Lfl, 1.0, DEFAULT);
        assert_eq!(lfl.to_sequence_string(), "LLLD");
    }

    #[test]
    fn test_isophase_and_occulting() {
        let iso = synthesize(CharacteristicClass::Iso, 2.0, DEFAULT);
        assert_eq!(iso.to_sequence_string(), "LLLLDDDD");

        // 9 ticks: dark gets the odd one
        let iso = synthesize(CharacteristicClass::Iso, 2.25, DEFAULT);
        assert_eq!((iso.lit_count(), iso.dark_count()), (4, 5));

        let oc = synthesize(CharacteristicClass::Oc, 5.0, DEFAULT);
        assert_eq!((oc.lit_count(), oc.dark_count()), (12, 8));
    }

    #[test]
    fn test_quick_alternates() {
        let q = synthesize(CharacteristicClass::Q, 4.0, DEFAULT);
        assert_eq!(q.to_sequence_string(), "LD".repeat(8));

        let vq = synthesize(CharacteristicClass::Vq, 1.25, DEFAULT);
        assert_eq!(vq.to_sequence_string(), "LDLDL");
    }
}
