//! In-memory copy of a contiguous register range
//!
//! An [`Image`] is filled by one bulk read, edited field by field without
//! touching the bus, and written back with one bulk write. The standard
//! image covers the EEPROM-backed registers `0x0B`-`0x1D`
//! ([`IMAGE_BASE`], [`IMAGE_LEN`]).

use crate::field::Field;
use crate::registers::REGISTER_COUNT;
use crate::{IMAGE_BASE, IMAGE_LEN};

/// Snapshot of registers `start .. start + len`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Image {
    start: u8,
    len: u8,
    data: [u8; REGISTER_COUNT],
}

impl Image {
    /// Zero-filled image of `len` registers starting at `start`
    ///
    /// Returns `None` if the range is empty or runs past the last register.
    #[must_use]
    pub const fn new(start: u8, len: u8) -> Option<Self> {
        if len == 0 || start as usize + len as usize > REGISTER_COUNT {
            return None;
        }
        Some(Self {
            start,
            len,
            data: [0; REGISTER_COUNT],
        })
    }

    /// Zero-filled image of the EEPROM-backed registers
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            start: IMAGE_BASE,
            len: IMAGE_LEN,
            data: [0; REGISTER_COUNT],
        }
    }

    /// Image with the given contents, starting at `start`
    #[must_use]
    pub fn from_bytes(start: u8, bytes: &[u8]) -> Option<Self> {
        let len = u8::try_from(bytes.len()).ok()?;
        let mut image = Self::new(start, len)?;
        image.as_mut_bytes().copy_from_slice(bytes);
        Some(image)
    }

    /// First register address
    #[must_use]
    pub const fn start(&self) -> u8 {
        self.start
    }

    /// Number of registers
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the image holds no registers
    ///
    /// The constructors reject empty ranges, so this is `false` for every
    /// `Image` they return.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `address` lies inside the image
    #[must_use]
    pub const fn contains(&self, address: u8) -> bool {
        address >= self.start && address - self.start < self.len
    }

    /// Register contents, lowest address first
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    /// Mutable register contents, lowest address first
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.data[..len]
    }

    /// Raw value of register `address`
    #[must_use]
    pub fn register(&self, address: u8) -> Option<u8> {
        self.contains(address)
            .then(|| self.data[usize::from(address - self.start)])
    }

    /// Overwrite register `address`; returns `false` if it is outside the image
    pub fn set_register(&mut self, address: u8, value: u8) -> bool {
        if !self.contains(address) {
            return false;
        }
        self.data[usize::from(address - self.start)] = value;
        true
    }

    /// Read a field from the image
    #[must_use]
    pub fn get(&self, field: Field) -> Option<u8> {
        self.register(field.register).map(|byte| field.extract(byte))
    }

    /// Write a field into the image, truncating `value` to the field width
    ///
    /// Returns `false` without changing anything if the field's register is
    /// outside the image.
    pub fn set(&mut self, field: Field, value: u8) -> bool {
        match self.register(field.register) {
            Some(byte) => self.set_register(field.register, field.insert(byte, value)),
            None => false,
        }
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::standard()
    }
}
