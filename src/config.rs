//! Typed values for the enumerated configuration fields
//!
//! Each enum's discriminant is the raw field encoding, so `value as u8` is
//! what goes into the register and `from_bits` decodes what comes out.
//! Encodings the datasheet marks as reserved decode to `None`.

/// Full-scale acceleration range (`RANGE`, register 0x14 bits 4:3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    /// ±2g
    G2 = 0,
    /// ±4g
    G4 = 1,
    /// ±8g
    G8 = 2,
}

impl Range {
    /// Decode the 2-bit field value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::G2),
            1 => Some(Self::G4),
            2 => Some(Self::G8),
            _ => None,
        }
    }

    /// Full scale in g
    #[must_use]
    pub const fn max_g(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
        }
    }

    /// Low-g/high-g threshold register value for `milli_g`
    ///
    /// One threshold LSB is `range / 256` g. Returns `None` if the result does
    /// not fit the 8-bit threshold register.
    #[must_use]
    pub const fn g_threshold(self, milli_g: u16) -> Option<u8> {
        scale(milli_g, 256, self.max_g())
    }

    /// Low-g/high-g hysteresis register value for `milli_g`
    ///
    /// One hysteresis LSB is `range / 32` g; the field is 3 bits wide.
    #[must_use]
    pub const fn g_hysteresis(self, milli_g: u16) -> Option<u8> {
        match scale(milli_g, 32, self.max_g()) {
            Some(v) if v <= 0x07 => Some(v),
            _ => None,
        }
    }

    /// Any-motion threshold register value for `milli_g`
    ///
    /// One any-motion LSB is `range / 128` g.
    #[must_use]
    pub const fn any_motion_threshold(self, milli_g: u16) -> Option<u8> {
        scale(milli_g, 128, self.max_g())
    }
}

const fn scale(milli_g: u16, steps: u32, range_g: u8) -> Option<u8> {
    let lsb = (steps * milli_g as u32) / (1000 * range_g as u32);
    if lsb > u8::MAX as u32 {
        None
    } else {
        Some(lsb as u8)
    }
}

/// Digital filter bandwidth (`BANDWIDTH`, register 0x14 bits 2:0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    /// 25 Hz
    Hz25 = 0,
    /// 50 Hz
    Hz50 = 1,
    /// 100 Hz
    Hz100 = 2,
    /// 190 Hz
    Hz190 = 3,
    /// 375 Hz
    Hz375 = 4,
    /// 750 Hz
    Hz750 = 5,
    /// 1500 Hz
    Hz1500 = 6,
}

impl Bandwidth {
    /// Decode the 3-bit field value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Hz25),
            1 => Some(Self::Hz50),
            2 => Some(Self::Hz100),
            3 => Some(Self::Hz190),
            4 => Some(Self::Hz375),
            5 => Some(Self::Hz750),
            6 => Some(Self::Hz1500),
            _ => None,
        }
    }

    /// Bandwidth in Hz
    #[must_use]
    pub const fn hz(self) -> u16 {
        match self {
            Self::Hz25 => 25,
            Self::Hz50 => 50,
            Self::Hz100 => 100,
            Self::Hz190 => 190,
            Self::Hz375 => 375,
            Self::Hz750 => 750,
            Self::Hz1500 => 1500,
        }
    }
}

/// Sleep time between automatic wake-ups (`WAKE_UP_PAUSE`, register 0x15 bits 2:1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeUpPause {
    /// 20 ms
    Ms20 = 0,
    /// 80 ms
    Ms80 = 1,
    /// 320 ms
    Ms320 = 2,
    /// 2560 ms
    Ms2560 = 3,
}

impl WakeUpPause {
    /// Decode the 2-bit field value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Ms20),
            1 => Some(Self::Ms80),
            2 => Some(Self::Ms320),
            3 => Some(Self::Ms2560),
            _ => None,
        }
    }

    /// Pause length in milliseconds
    #[must_use]
    pub const fn millis(self) -> u16 {
        match self {
            Self::Ms20 => 20,
            Self::Ms80 => 80,
            Self::Ms320 => 320,
            Self::Ms2560 => 2560,
        }
    }
}

/// Consecutive samples above threshold before any-motion fires
/// (`ANY_MOTION_DUR`, register 0x11 bits 7:6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnyMotionDuration {
    /// 1 sample
    Samples1 = 0,
    /// 3 samples
    Samples3 = 1,
    /// 5 samples
    Samples5 = 2,
    /// 7 samples
    Samples7 = 3,
}

impl AnyMotionDuration {
    /// Decode the 2-bit field value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Samples1),
            1 => Some(Self::Samples3),
            2 => Some(Self::Samples5),
            3 => Some(Self::Samples7),
            _ => None,
        }
    }

    /// Number of samples
    #[must_use]
    pub const fn samples(self) -> u8 {
        match self {
            Self::Samples1 => 1,
            Self::Samples3 => 3,
            Self::Samples5 => 5,
            Self::Samples7 => 7,
        }
    }
}

/// Self-test selection (`SELF_TEST`, register 0x0A bits 3:2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfTest {
    /// Self-test off
    Off = 0,
    /// Self-test 0: electrostatic deflection, result in `ST_RESULT`
    SelfTest0 = 1,
    /// Self-test 1: both self-test bits set
    SelfTest1 = 3,
}

/// Axis (or temperature channel) of the offset/gain calibration registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationAxis {
    /// X axis
    X = 0,
    /// Y axis
    Y = 1,
    /// Z axis
    Z = 2,
    /// Temperature
    Temperature = 3,
}

impl CalibrationAxis {
    /// Fields holding the two offset LSBs and the gain
    #[must_use]
    pub const fn offset_gain_fields(self) -> (crate::field::Field, crate::field::Field) {
        use crate::registers::{
            GAIN_T, GAIN_X, GAIN_Y, GAIN_Z, OFFSET_T_LSB, OFFSET_X_LSB, OFFSET_Y_LSB,
            OFFSET_Z_LSB,
        };
        match self {
            Self::X => (OFFSET_X_LSB, GAIN_X),
            Self::Y => (OFFSET_Y_LSB, GAIN_Y),
            Self::Z => (OFFSET_Z_LSB, GAIN_Z),
            Self::Temperature => (OFFSET_T_LSB, GAIN_T),
        }
    }

    /// Field holding the eight offset MSBs
    #[must_use]
    pub const fn offset_msb_field(self) -> crate::field::Field {
        use crate::registers::{OFFSET_T_MSB, OFFSET_X_MSB, OFFSET_Y_MSB, OFFSET_Z_MSB};
        match self {
            Self::X => OFFSET_X_MSB,
            Self::Y => OFFSET_Y_MSB,
            Self::Z => OFFSET_Z_MSB,
            Self::Temperature => OFFSET_T_MSB,
        }
    }
}

/// Largest value of the 10-bit offset calibration
pub const OFFSET_MAX: u16 = 0x3FF;

/// Split a 10-bit offset into its (MSB byte, 2-bit LSB) register parts
#[must_use]
pub const fn split_offset(offset: u16) -> (u8, u8) {
    (((offset & OFFSET_MAX) >> 2) as u8, (offset & 0x03) as u8)
}

/// Rebuild a 10-bit offset from its (MSB byte, 2-bit LSB) register parts
#[must_use]
pub const fn join_offset(msb: u8, lsb: u8) -> u16 {
    ((msb as u16) << 2) | (lsb as u16 & 0x03)
}
