//! Register field codec
//!
//! Every logical parameter of the BMA023 lives in a bit slice of one 8-bit
//! register. A [`Field`] names that slice as a `(register, mask, offset)`
//! triple, and the two primitives [`extract_field`] and [`insert_field`]
//! move values in and out of a raw register byte.
//!
//! The codec is pure: it never touches the bus. Reading and writing the
//! register itself is the job of [`Bma023Driver`](crate::device::Bma023Driver).

/// A named bit slice inside one device register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Field name as used in the datasheet register map
    pub name: &'static str,
    /// Address of the register holding the field
    pub register: u8,
    /// Bit mask of the field inside the register
    pub mask: u8,
    /// Position of the least significant bit of the field
    pub offset: u8,
}

impl Field {
    /// Define a field from its register, mask and bit offset
    ///
    /// Evaluated at compile time for the register table; a mask that is not a
    /// contiguous run starting at `offset` fails the build.
    #[must_use]
    pub const fn new(name: &'static str, register: u8, mask: u8, offset: u8) -> Self {
        assert!(offset < 8, "field offset outside an 8-bit register");
        assert!(mask != 0, "empty field mask");
        assert!(mask.trailing_zeros() == offset as u32, "mask does not start at offset");
        let run = mask >> offset;
        assert!(run & (run.wrapping_add(1)) == 0, "field mask is not contiguous");
        Self {
            name,
            register,
            mask,
            offset,
        }
    }

    /// Width of the field in bits
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.mask.count_ones() as u8
    }

    /// Largest value the field can hold
    #[must_use]
    pub const fn max_value(&self) -> u8 {
        self.mask >> self.offset
    }

    /// Check whether `value` fits in the field without truncation
    #[must_use]
    pub const fn fits(&self, value: u8) -> bool {
        value <= self.max_value()
    }

    /// Whether two fields share at least one bit of the same register
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.register == other.register && self.mask & other.mask != 0
    }

    /// Extract this field from a raw register byte
    #[must_use]
    pub const fn extract(&self, register_byte: u8) -> u8 {
        extract_field(register_byte, self.mask, self.offset)
    }

    /// Insert `value` into a raw register byte, leaving the other bits untouched
    #[must_use]
    pub const fn insert(&self, register_byte: u8, value: u8) -> u8 {
        insert_field(register_byte, self.mask, self.offset, value)
    }
}

/// Read a bit slice out of a register byte
///
/// Returns `(register_byte & mask) >> offset`.
#[must_use]
pub const fn extract_field(register_byte: u8, mask: u8, offset: u8) -> u8 {
    (register_byte & mask) >> offset
}

/// Write a bit slice into a register byte
///
/// Returns `(register_byte & !mask) | ((value << offset) & mask)`. Bits of
/// `value` that do not fit in the mask are discarded, the same way the
/// hardware drops them.
#[must_use]
pub const fn insert_field(register_byte: u8, mask: u8, offset: u8, value: u8) -> u8 {
    (register_byte & !mask) | (value.wrapping_shl(offset as u32) & mask)
}
