//! Light color model and packed-token codec.
//!
//! Channels live in the 4-bit propagation domain (0-15), not display gamma.
//! Stored tiles hold a packed token with red in bits 12-15, green in 8-11 and
//! blue in 4-7; the lowest nibble is reserved and always zero.

/// Highest strength a single channel can carry. Also the upper bound on a
/// light's falloff radius, since a light reaches at most `peak()` tiles.
pub const MAX_BRIGHTNESS: u8 = 15;

const CHANNEL_MASK: u16 = 0xF;
const RED_SHIFT: u16 = 12;
const GREEN_SHIFT: u16 = 8;
const BLUE_SHIFT: u16 = 4;

/// A light color: three 4-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a color. Channels must already be within 0-15.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        debug_assert!(
            r <= MAX_BRIGHTNESS && g <= MAX_BRIGHTNESS && b <= MAX_BRIGHTNESS,
            "channel out of range: ({r}, {g}, {b})"
        );
        Rgb { r, g, b }
    }

    pub fn black() -> Self {
        Rgb { r: 0, g: 0, b: 0 }
    }

    /// Packs the channels into a tile token.
    pub fn pack(self) -> u16 {
        ((self.r as u16) << RED_SHIFT)
            | ((self.g as u16) << GREEN_SHIFT)
            | ((self.b as u16) << BLUE_SHIFT)
    }

    /// Unpacks a tile token. Total over all of `u16`: the masked shifts
    /// always yield in-range channels, whatever the low nibble holds.
    pub fn unpack(token: u16) -> Self {
        Rgb {
            r: ((token >> RED_SHIFT) & CHANNEL_MASK) as u8,
            g: ((token >> GREEN_SHIFT) & CHANNEL_MASK) as u8,
            b: ((token >> BLUE_SHIFT) & CHANNEL_MASK) as u8,
        }
    }

    /// Per-channel maximum. Every illumination merge goes through this, so
    /// overlapping lights combine without overflow and re-running a light
    /// over its own footprint changes nothing.
    pub fn channel_max(self, other: Self) -> Self {
        Rgb {
            r: self.r.max(other.r),
            g: self.g.max(other.g),
            b: self.b.max(other.b),
        }
    }

    /// Brightest of the three channels.
    pub fn peak(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    /// Per-channel brightness ratio against a reference color. Channels whose
    /// reference is zero ratio to 0.0 rather than dividing by zero.
    pub fn ratio(self, reference: Rgb) -> (f32, f32, f32) {
        (
            ratio_channel(self.r, reference.r),
            ratio_channel(self.g, reference.g),
            ratio_channel(self.b, reference.b),
        )
    }

    /// Ratio against a uniform divisor, with the same zero policy as
    /// [`Rgb::ratio`].
    pub fn ratio_scalar(self, divisor: u8) -> (f32, f32, f32) {
        (
            ratio_channel(self.r, divisor),
            ratio_channel(self.g, divisor),
            ratio_channel(self.b, divisor),
        )
    }
}

#[inline]
fn ratio_channel(value: u8, reference: u8) -> f32 {
    if reference == 0 {
        0.0
    } else {
        value as f32 / reference as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        // Red in the top nibble, then green, then blue; low nibble stays clear
        assert_eq!(Rgb::new(1, 2, 3).pack(), 0x1230);
        assert_eq!(Rgb::new(15, 15, 15).pack(), 0xFFF0);
        assert_eq!(Rgb::black().pack(), 0x0000);
    }

    #[test]
    fn test_round_trip_all_colors() {
        for r in 0..=MAX_BRIGHTNESS {
            for g in 0..=MAX_BRIGHTNESS {
                for b in 0..=MAX_BRIGHTNESS {
                    let color = Rgb::new(r, g, b);
                    assert_eq!(Rgb::unpack(color.pack()), color);
                }
            }
        }
    }

    #[test]
    fn test_unpack_ignores_low_nibble() {
        assert_eq!(Rgb::unpack(0x123F), Rgb::new(1, 2, 3));
        assert_eq!(Rgb::unpack(0x0007), Rgb::black());
    }

    #[test]
    fn test_channel_max() {
        let a = Rgb::new(10, 2, 7);
        let b = Rgb::new(3, 9, 7);
        let merged = a.channel_max(b);
        assert_eq!(merged, Rgb::new(10, 9, 7));
        // Commutative and idempotent
        assert_eq!(b.channel_max(a), merged);
        assert_eq!(merged.channel_max(merged), merged);
    }

    #[test]
    fn test_peak() {
        assert_eq!(Rgb::new(4, 11, 2).peak(), 11);
        assert_eq!(Rgb::black().peak(), 0);
    }

    #[test]
    fn test_ratio_zero_reference() {
        // Zero reference channels yield 0.0, never NaN or infinity
        let (r, g, b) = Rgb::new(5, 5, 0).ratio(Rgb::new(10, 0, 0));
        assert_eq!((r, g, b), (0.5, 0.0, 0.0));

        let (r, _, _) = Rgb::new(15, 0, 0).ratio(Rgb::new(15, 15, 15));
        assert_eq!(r, 1.0);
    }

    #[test]
    fn test_ratio_scalar() {
        assert_eq!(Rgb::new(5, 10, 0).ratio_scalar(10), (0.5, 1.0, 0.0));
        assert_eq!(Rgb::new(5, 10, 0).ratio_scalar(0), (0.0, 0.0, 0.0));
    }
}
