//! row banding: which rows share a background in the report
//!
//! A container row is shaded by its own depth. Rows directly inside a repeating
//! container are shaded one level up, so they line up with the container they repeat
//! under. Colours become darker the deeper a row sits.
//!
//! The flattener only stores a [BandingHint]. Turning it into a colour is left to
//! whoever renders the rows, through [BandingHint::shade].

/// Starting colour for level 0, `#9CC2E5`
const BASE_RGB: (u8, u8, u8) = (156, 194, 229);

/// Brightness lost per level
const BRIGHTNESS_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandingHint {
    /// Plain row, no background
    #[default]
    NoBackground,
    /// A container, shaded by its own depth
    Container { depth: usize },
    /// A row inside a repeating container, shaded like its parent
    Repeated { depth: usize },
}

impl BandingHint {
    /// `depth` is the number of segments in the row's order label
    pub fn compute(depth: usize, is_container: bool, parent_repeating: bool) -> Self {
        if is_container {
            BandingHint::Container { depth }
        } else if parent_repeating {
            BandingHint::Repeated {
                depth: depth.saturating_sub(1),
            }
        } else {
            BandingHint::NoBackground
        }
    }

    pub fn level(&self) -> Option<usize> {
        match self {
            BandingHint::NoBackground => None,
            BandingHint::Container { depth } | BandingHint::Repeated { depth } => Some(*depth),
        }
    }

    pub fn shade(&self) -> Option<Shade> {
        self.level().map(Shade::for_level)
    }
}

/// A background colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shade {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Shade {
    pub fn for_level(level: usize) -> Self {
        let (r, g, b) = BASE_RGB;
        let (hue, saturation, brightness) = rgb_to_hsb(r, g, b);
        let brightness = (brightness - level as f32 * BRIGHTNESS_STEP).max(0.0);
        let (red, green, blue) = hsb_to_rgb(hue, saturation, brightness);
        Self { red, green, blue }
    }

    /// Upper-case hex without prefix, e.g. `9CC2E5`
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

fn rgb_to_hsb(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);

    let brightness = f32::from(cmax) / 255.0;
    let saturation = if cmax != 0 {
        f32::from(cmax - cmin) / f32::from(cmax)
    } else {
        0.0
    };

    if saturation == 0.0 {
        return (0.0, saturation, brightness);
    }

    let span = f32::from(cmax - cmin);
    let red_c = f32::from(cmax - r) / span;
    let green_c = f32::from(cmax - g) / span;
    let blue_c = f32::from(cmax - b) / span;

    let mut hue = if r == cmax {
        blue_c - green_c
    } else if g == cmax {
        2.0 + red_c - blue_c
    } else {
        4.0 + green_c - red_c
    };
    hue /= 6.0;
    if hue < 0.0 {
        hue += 1.0;
    }

    (hue, saturation, brightness)
}

fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> (u8, u8, u8) {
    let channel = |value: f32| (value * 255.0 + 0.5) as u8;

    if saturation == 0.0 {
        let v = channel(brightness);
        return (v, v, v);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    (channel(r), channel(g), channel(b))
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn containers_use_own_depth() {
        assert_eq!(
            BandingHint::compute(2, true, true),
            BandingHint::Container { depth: 2 }
        );
        assert_eq!(
            BandingHint::compute(1, true, false),
            BandingHint::Container { depth: 1 }
        );
    }

    #[test]
    fn items_follow_repeating_parent() {
        let hint = BandingHint::compute(3, false, true);
        assert_eq!(hint, BandingHint::Repeated { depth: 2 });
        assert!(hint.shade().is_some());
    }

    #[test]
    fn items_without_repeating_parent_are_plain() {
        let hint = BandingHint::compute(3, false, false);
        assert_eq!(hint, BandingHint::NoBackground);
        assert_eq!(hint.shade(), None);
    }

    #[test]
    fn base_shade() {
        assert_eq!(Shade::for_level(0).hex(), "9CC2E5");
    }

    #[test]
    fn shades_darken_per_level() {
        let hexes: Vec<_> = (1..=3).map(|level| Shade::for_level(level).hex()).collect();
        assert_eq!(hexes, vec!["93B7D8", "8BACCC", "82A2BF"]);
    }

    #[test]
    fn shade_bottoms_out_at_black() {
        assert_eq!(Shade::for_level(100).hex(), "000000");
    }

    #[test]
    fn repeated_rows_share_parent_shade() {
        let container = BandingHint::compute(1, true, false);
        let child = BandingHint::compute(2, false, true);
        assert_eq!(container.shade(), child.shade());
    }
}
