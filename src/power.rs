//! Operating modes
//!
//! The chip's power state is set by two bits in different registers:
//! `SLEEP` in `CTRL` (0x0A) and `WAKE_UP` in `CONF2` (0x15).
//!
//! | mode      | SLEEP | WAKE_UP |
//! |-----------|-------|---------|
//! | Normal    | 0     | 0       |
//! | Sleep     | 1     | 0       |
//! | Wake-up   | 1     | 1       |
//!
//! The vendor mode number packs the two bits as `(SLEEP << 1) | WAKE_UP`,
//! which is the discriminant of [`OperatingMode`]. Wake-up mode needs `SLEEP`
//! set: the chip is parked between its periodic samples.
//!
//! In wake-up mode the chip sleeps for the configured
//! [`WakeUpPause`](crate::config::WakeUpPause), takes a sample, and evaluates
//! the any-motion interrupt before sleeping again.
//!
//! Mode changes are plain register writes; the driver does not check whether
//! a transition makes sense for the chip's current state.

/// Chip operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Continuous measurement
    Normal = 0,
    /// All analog blocks powered down, registers retained
    Sleep = 2,
    /// Periodic self wake-up for motion detection
    WakeUp = 3,
}

impl OperatingMode {
    /// `(SLEEP, WAKE_UP)` bit values for this mode
    #[must_use]
    pub const fn control_bits(self) -> (u8, u8) {
        let value = self as u8;
        ((value >> 1) & 1, value & 1)
    }

    /// Decode the mode from the `SLEEP` and `WAKE_UP` bits
    ///
    /// `WAKE_UP` without `SLEEP` (vendor value 1) is not a mode of its own.
    /// The chip keeps measuring continuously, so it decodes as `Normal`.
    #[must_use]
    pub const fn from_control_bits(sleep: u8, wake_up: u8) -> Self {
        match (sleep != 0, wake_up != 0) {
            (true, true) => Self::WakeUp,
            (true, false) => Self::Sleep,
            (false, _) => Self::Normal,
        }
    }

    /// Decode the vendor mode number (0, 2 or 3)
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            2 => Some(Self::Sleep),
            3 => Some(Self::WakeUp),
            _ => None,
        }
    }
}

/// Device-level status used by sensor managers
///
/// `Standby` parks the accelerometer in [`OperatingMode::Sleep`];
/// `Normal` resumes [`OperatingMode::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceStatus {
    /// Not measuring
    Standby = 0,
    /// Measuring
    Normal = 1,
}

impl DeviceStatus {
    /// Operating mode that implements this status
    #[must_use]
    pub const fn operating_mode(self) -> OperatingMode {
        match self {
            Self::Standby => OperatingMode::Sleep,
            Self::Normal => OperatingMode::Normal,
        }
    }

    /// Status reported for a given operating mode
    ///
    /// Wake-up mode only measures on its periodic wake-ups and counts as
    /// standby.
    #[must_use]
    pub const fn from_operating_mode(mode: OperatingMode) -> Self {
        match mode {
            OperatingMode::Normal => Self::Normal,
            OperatingMode::Sleep | OperatingMode::WakeUp => Self::Standby,
        }
    }
}
