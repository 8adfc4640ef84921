//! Color-space helpers for spawned particle colors.
//!
//! Particles are colored in HSL (hue in degrees, saturation and lightness in
//! `[0, 1]`) and stored as linear RGBA, matching the sRGB surface the engine
//! prefers.

/// Converts HSL to straight sRGB channels in `[0, 1]`.
///
/// Hue wraps modulo 360. Saturation and lightness are clamped to `[0, 1]`.
pub fn hsl_to_srgb(hue_deg: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue_deg.rem_euclid(360.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let chroma = if l < 0.5 { l } else { 1.0 - l };
    let m2 = l + chroma * s;
    let m1 = 2.0 * l - m2;

    [
        hue_channel(if h >= 240.0 { h - 240.0 } else { h + 120.0 }, m1, m2),
        hue_channel(h, m1, m2),
        hue_channel(if h < 120.0 { h + 240.0 } else { h - 120.0 }, m1, m2),
    ]
}

fn hue_channel(h: f32, m1: f32, m2: f32) -> f32 {
    if h < 60.0 {
        m1 + (m2 - m1) * h / 60.0
    } else if h < 180.0 {
        m2
    } else if h < 240.0 {
        m1 + (m2 - m1) * (240.0 - h) / 60.0
    } else {
        m1
    }
}

/// sRGB transfer function, inverse direction.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// HSL to opaque linear RGBA.
pub fn hsl_to_linear_rgba(hue_deg: f32, saturation: f32, lightness: f32) -> [f32; 4] {
    let [r, g, b] = hsl_to_srgb(hue_deg, saturation, lightness);
    [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl_to_srgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_srgb(60.0, 1.0, 0.5), [1.0, 1.0, 0.0]));
        assert!(close(hsl_to_srgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_srgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert!(close(hsl_to_srgb(37.0, 0.0, 0.25), [0.25, 0.25, 0.25]));
    }

    #[test]
    fn lightness_extremes() {
        assert!(close(hsl_to_srgb(30.0, 1.0, 0.0), [0.0, 0.0, 0.0]));
        assert!(close(hsl_to_srgb(30.0, 1.0, 1.0), [1.0, 1.0, 1.0]));
    }

    #[test]
    fn hue_wraps() {
        assert!(close(hsl_to_srgb(360.0, 1.0, 0.5), hsl_to_srgb(0.0, 1.0, 0.5)));
        assert!(close(hsl_to_srgb(-120.0, 1.0, 0.5), hsl_to_srgb(240.0, 1.0, 0.5)));
    }

    #[test]
    fn warm_hues_stay_in_unit_range() {
        for i in 0..60 {
            for l in [0.2, 0.5, 0.9] {
                let rgb = hsl_to_srgb(i as f32, 1.0, l);
                assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)), "{rgb:?}");
            }
        }
    }

    #[test]
    fn linear_endpoints_and_order() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);

        let mut prev = 0.0;
        for i in 1..=100 {
            let v = srgb_to_linear(i as f32 / 100.0);
            assert!(v > prev);
            prev = v;
        }
    }

    #[test]
    fn linear_rgba_is_opaque() {
        assert_eq!(hsl_to_linear_rgba(10.0, 1.0, 0.6)[3], 1.0);
    }
}
