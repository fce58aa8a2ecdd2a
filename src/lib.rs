#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod device;
pub mod field;
pub mod image;
pub mod interface;
pub mod interrupt;
pub mod power;
pub mod registers;

pub mod cpufreq;

// Re-export main types
pub use config::{AnyMotionDuration, Bandwidth, CalibrationAxis, Range, SelfTest, WakeUpPause};
pub use device::{AccelData, Bma023Driver};
pub use field::{Field, extract_field, insert_field};
pub use image::Image;
pub use interface::{I2cInterface, SpiInterface};
pub use interrupt::{InterruptMask, InterruptStatus};
pub use power::{DeviceStatus, OperatingMode};

/// BMA023 7-bit I2C address
pub const I2C_ADDRESS: u8 = 0x38;

/// Expected value of the `CHIP_ID` field
pub const CHIP_ID_VALUE: u8 = 0x02;

/// Read flag OR-ed into the register address on SPI reads
pub const SPI_READ_FLAG: u8 = 0x80;

/// Distance between an image register and its EEPROM cell
pub const EEPROM_OFFSET: u8 = 0x20;

/// First register of the EEPROM-backed image
pub const IMAGE_BASE: u8 = 0x0B;

/// Number of registers in the EEPROM-backed image (0x0B-0x1D)
pub const IMAGE_LEN: u8 = 19;

/// Time the chip needs to program one EEPROM cell, in milliseconds
pub const EEPROM_WRITE_DELAY_MS: u32 = 28;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device, passed through unchanged
    Bus(E),
    /// Unexpected `CHIP_ID` value (contains the value read)
    InvalidDevice(u8),
    /// Value does not fit the register field it is meant for
    OutOfRange,
    /// Register holds an encoding the datasheet marks as reserved
    ReservedValue(u8),
    /// Image or raw transfer lies outside the register map
    ImageBounds,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
