//! Interrupt configuration and status
//!
//! The BMA023 spreads its interrupt enables over two registers:
//! - `CONF1` (0x0B): low-g, high-g, any-motion and alert enables
//! - `CONF2` (0x15): latched mode, new-data and advanced-interrupt enables
//!
//! [`InterruptMask`] presents them as one value. Its packed form
//! ([`InterruptMask::bits`]) is the single-byte mask used by the vendor API:
//!
//! | bit | source       |
//! |-----|--------------|
//! | 7   | alert        |
//! | 6   | any motion   |
//! | 5   | advanced     |
//! | 4   | new data     |
//! | 3   | latch        |
//! | 1   | high-g       |
//! | 0   | low-g        |
//!
//! # Example
//!
//! ```ignore
//! # use bma023::{Bma023Driver, interrupt::InterruptMask};
//! # let mut accel: Bma023Driver<_> = todo!();
//! let mask = InterruptMask {
//!     any_motion: true,
//!     advanced: true,
//!     latch: true,
//!     ..Default::default()
//! };
//! accel.set_interrupt_mask(mask)?;
//! # Ok::<(), bma023::Error<()>>(())
//! ```

use crate::registers::{
    ALERT, ALERT_PHASE, EN_ANY_MOTION, ENABLE_ADV_INT, ENABLE_HG, ENABLE_LG, HG_LATCHED,
    LATCH_INT, LG_LATCHED, NEW_DATA_INT, ST_RESULT, STATUS_HG, STATUS_LG,
};

/// Alert interrupt (mask bit 7)
pub const INT_ALERT: u8 = 1 << 7;
/// Any-motion interrupt (mask bit 6)
pub const INT_ANY_MOTION: u8 = 1 << 6;
/// Advanced interrupt enable (mask bit 5)
pub const INT_EN_ADV_INT: u8 = 1 << 5;
/// New-data interrupt (mask bit 4)
pub const INT_NEW_DATA: u8 = 1 << 4;
/// Latched interrupt mode (mask bit 3)
pub const INT_LATCH: u8 = 1 << 3;
/// High-g interrupt (mask bit 1)
pub const INT_HG: u8 = 1 << 1;
/// Low-g interrupt (mask bit 0)
pub const INT_LG: u8 = 1 << 0;

/// Interrupt enable bits owned by `CONF1`
pub const CONF1_INT_MASK: u8 = ALERT.mask | EN_ANY_MOTION.mask | ENABLE_HG.mask | ENABLE_LG.mask;
/// Interrupt enable bits owned by `CONF2`
pub const CONF2_INT_MASK: u8 = ENABLE_ADV_INT.mask | NEW_DATA_INT.mask | LATCH_INT.mask;

/// Interrupt sources to enable
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct InterruptMask {
    /// Alert interrupt (any-motion as a pre-stage to high-g)
    pub alert: bool,
    /// Any-motion interrupt
    pub any_motion: bool,
    /// Advanced interrupts (required for any-motion and alert)
    pub advanced: bool,
    /// New-data interrupt
    pub new_data: bool,
    /// Keep interrupts asserted until reset
    pub latch: bool,
    /// High-g interrupt
    pub high_g: bool,
    /// Low-g interrupt
    pub low_g: bool,
}

impl InterruptMask {
    /// Decode the packed single-byte mask; bit 2 is ignored
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            alert: bits & INT_ALERT != 0,
            any_motion: bits & INT_ANY_MOTION != 0,
            advanced: bits & INT_EN_ADV_INT != 0,
            new_data: bits & INT_NEW_DATA != 0,
            latch: bits & INT_LATCH != 0,
            high_g: bits & INT_HG != 0,
            low_g: bits & INT_LG != 0,
        }
    }

    /// Packed single-byte mask
    #[must_use]
    pub const fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.alert {
            bits |= INT_ALERT;
        }
        if self.any_motion {
            bits |= INT_ANY_MOTION;
        }
        if self.advanced {
            bits |= INT_EN_ADV_INT;
        }
        if self.new_data {
            bits |= INT_NEW_DATA;
        }
        if self.latch {
            bits |= INT_LATCH;
        }
        if self.high_g {
            bits |= INT_HG;
        }
        if self.low_g {
            bits |= INT_LG;
        }
        bits
    }

    /// Enable bits in `CONF1` register layout
    #[must_use]
    pub const fn conf1_bits(&self) -> u8 {
        let mut reg = ALERT.insert(0, self.alert as u8);
        reg = EN_ANY_MOTION.insert(reg, self.any_motion as u8);
        reg = ENABLE_HG.insert(reg, self.high_g as u8);
        ENABLE_LG.insert(reg, self.low_g as u8)
    }

    /// Enable bits in `CONF2` register layout
    #[must_use]
    pub const fn conf2_bits(&self) -> u8 {
        let mut reg = ENABLE_ADV_INT.insert(0, self.advanced as u8);
        reg = NEW_DATA_INT.insert(reg, self.new_data as u8);
        LATCH_INT.insert(reg, self.latch as u8)
    }

    /// Rebuild the mask from raw `CONF1` and `CONF2` register bytes
    #[must_use]
    pub const fn from_registers(conf1: u8, conf2: u8) -> Self {
        Self {
            alert: ALERT.extract(conf1) != 0,
            any_motion: EN_ANY_MOTION.extract(conf1) != 0,
            advanced: ENABLE_ADV_INT.extract(conf2) != 0,
            new_data: NEW_DATA_INT.extract(conf2) != 0,
            latch: LATCH_INT.extract(conf2) != 0,
            high_g: ENABLE_HG.extract(conf1) != 0,
            low_g: ENABLE_LG.extract(conf1) != 0,
        }
    }

    /// Merge the mask into a `CONF1` byte, keeping its non-interrupt bits
    #[must_use]
    pub const fn apply_conf1(&self, conf1: u8) -> u8 {
        (conf1 & !CONF1_INT_MASK) | self.conf1_bits()
    }

    /// Merge the mask into a `CONF2` byte, keeping its non-interrupt bits
    #[must_use]
    pub const fn apply_conf2(&self, conf2: u8) -> u8 {
        (conf2 & !CONF2_INT_MASK) | self.conf2_bits()
    }
}

/// Decoded status register (0x09)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct InterruptStatus {
    /// High-g condition present
    pub high_g: bool,
    /// Low-g condition present
    pub low_g: bool,
    /// High-g event latched
    pub high_g_latched: bool,
    /// Low-g event latched
    pub low_g_latched: bool,
    /// Alert phase active
    pub alert: bool,
    /// Self-test passed
    pub selftest_result: bool,
}

impl InterruptStatus {
    /// Decode a raw status byte
    #[must_use]
    pub const fn from_register(status: u8) -> Self {
        Self {
            high_g: STATUS_HG.extract(status) != 0,
            low_g: STATUS_LG.extract(status) != 0,
            high_g_latched: HG_LATCHED.extract(status) != 0,
            low_g_latched: LG_LATCHED.extract(status) != 0,
            alert: ALERT_PHASE.extract(status) != 0,
            selftest_result: ST_RESULT.extract(status) != 0,
        }
    }

    /// Any motion-event flag is set
    #[must_use]
    pub const fn any_event(&self) -> bool {
        self.high_g || self.low_g || self.high_g_latched || self.low_g_latched || self.alert
    }
}
