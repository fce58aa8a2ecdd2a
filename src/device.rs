//! High-level driver API for the BMA023
//!
//! [`Bma023Driver`] combines the field codec with a register transport. Each
//! `get_*` call is one register read followed by [`Field::extract`]; each
//! `set_*` call on a sub-byte field is a read-modify-write of the whole
//! register.
//!
//! # Read-modify-write is not atomic
//!
//! Between the read and the write of a `set_*` call, anything else that
//! writes the same register (another driver instance on the bus, or the chip
//! itself for self-clearing bits) is overwritten with the value read before.
//! The chip offers no locked update, and the driver adds no lock of its own:
//! callers sharing a bus must serialise access around each call. Several
//! fields in one register range can be updated with a single bus write
//! through [`Image`] instead.

use crate::config::{
    AnyMotionDuration, Bandwidth, CalibrationAxis, OFFSET_MAX, Range, SelfTest, WakeUpPause,
    join_offset, split_offset,
};
use crate::field::Field;
use crate::image::Image;
use crate::interrupt::{InterruptMask, InterruptStatus};
use crate::power::{DeviceStatus, OperatingMode};
use crate::registers::{self, REGISTER_COUNT, addr};
use crate::{CHIP_ID_VALUE, EEPROM_OFFSET, EEPROM_WRITE_DELAY_MS, Error, IMAGE_BASE, IMAGE_LEN};

// Only import RegisterInterface when not using async feature
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Acceleration sample, sign extended from 10 bits (-512..=511)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl AccelData {
    /// Decode the six data registers `0x02`-`0x07` (LSB, MSB per axis)
    #[must_use]
    pub const fn from_registers(data: &[u8; 6]) -> Self {
        Self {
            x: decode_axis(data[0], data[1]),
            y: decode_axis(data[2], data[3]),
            z: decode_axis(data[4], data[5]),
        }
    }
}

impl From<AccelData> for (i16, i16, i16) {
    fn from(data: AccelData) -> Self {
        (data.x, data.y, data.z)
    }
}

/// Rebuild one axis from its LSB and MSB registers
///
/// The value is 10-bit two's complement: bits 9:2 in the MSB register and
/// bits 1:0 in bits 7:6 of the LSB register. The new-data flag in bit 0 of the
/// LSB register is discarded.
#[must_use]
pub const fn decode_axis(lsb_register: u8, msb_register: u8) -> i16 {
    let lsb = registers::ACC_X_LSB.extract(lsb_register) as u16;
    let raw = ((msb_register as u16) << 2) | lsb;
    // Move bit 9 into the sign position, then shift back arithmetically
    ((raw << 6) as i16) >> 6
}

const EEPROM_IMAGE_END: u8 = IMAGE_BASE + IMAGE_LEN;

/// Check that `image` lies within the EEPROM-backed registers
const fn in_eeprom_image(start: u8, len: usize) -> bool {
    start >= IMAGE_BASE && start as usize + len <= EEPROM_IMAGE_END as usize
}

/// Check that a raw transfer stays inside the register map or the EEPROM cells
const fn in_register_space(start: u8, len: usize) -> bool {
    if len == 0 {
        return false;
    }
    if start as usize + len <= REGISTER_COUNT {
        return true;
    }
    start & EEPROM_OFFSET != 0 && in_eeprom_image(start & !EEPROM_OFFSET, len)
}

/// Main driver for the BMA023
pub struct Bma023Driver<I> {
    interface: I,
    chip_id: u8,
    ml_version: u8,
    al_version: u8,
}

#[cfg(not(feature = "async"))]
impl<I> Bma023Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new BMA023 driver instance
    ///
    /// Reads the chip id and version register. The device configuration is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `CHIP_ID` field does not read 0x02
    pub fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self {
            interface,
            chip_id: 0,
            ml_version: 0,
            al_version: 0,
        };

        let chip_id = driver.get_field(registers::CHIP_ID)?;
        if chip_id != CHIP_ID_VALUE {
            return Err(Error::InvalidDevice(chip_id));
        }

        let mut version = [0u8];
        driver.read_register(addr::VERSION, &mut version)?;

        driver.chip_id = chip_id;
        driver.ml_version = registers::ML_VERSION.extract(version[0]);
        driver.al_version = registers::AL_VERSION.extract(version[0]);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "BMA023 detected: chip id {=u8:#x}, ML version {=u8}, AL version {=u8}",
            driver.chip_id,
            driver.ml_version,
            driver.al_version
        );

        Ok(driver)
    }

    /// Chip id read at construction
    pub const fn chip_id(&self) -> u8 {
        self.chip_id
    }

    /// ML version read at construction
    pub const fn ml_version(&self) -> u8 {
        self.ml_version
    }

    /// AL version read at construction
    pub const fn al_version(&self) -> u8 {
        self.al_version
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    // ==================== Raw access ====================

    /// Read `data.len()` consecutive registers starting at `address`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageBounds`] if `data` is empty or the range leaves
    /// `0x00`-`0x1D` (or the EEPROM cells `0x2B`-`0x3D`), before touching the
    /// bus. Returns an error if communication with the device fails.
    pub fn read_register(&mut self, address: u8, data: &mut [u8]) -> Result<(), Error<I::Error>> {
        if !in_register_space(address, data.len()) {
            return Err(Error::ImageBounds);
        }
        let size_bits = bit_size(data.len());
        self.interface.read_register(address, size_bits, data)?;
        Ok(())
    }

    /// Write `data` to consecutive registers starting at `address`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageBounds`] if `data` is empty or the range leaves
    /// `0x00`-`0x1D` (or the EEPROM cells `0x2B`-`0x3D`), before touching the
    /// bus. Returns an error if communication with the device fails.
    pub fn write_register(&mut self, address: u8, data: &[u8]) -> Result<(), Error<I::Error>> {
        if !in_register_space(address, data.len()) {
            return Err(Error::ImageBounds);
        }
        let size_bits = bit_size(data.len());
        self.interface.write_register(address, size_bits, data)?;
        Ok(())
    }

    /// Read one field
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_field(&mut self, field: Field) -> Result<u8, Error<I::Error>> {
        let mut byte = [0u8];
        self.read_register(field.register, &mut byte)?;
        Ok(field.extract(byte[0]))
    }

    /// Write one field with a read-modify-write of its register
    ///
    /// Bits of `value` beyond the field width are dropped. Not atomic: see the
    /// [module documentation](self).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails; if the read
    /// fails, nothing is written.
    pub fn set_field(&mut self, field: Field, value: u8) -> Result<(), Error<I::Error>> {
        let mut byte = [0u8];
        self.read_register(field.register, &mut byte)?;
        self.write_register(field.register, &[field.insert(byte[0], value)])
    }

    fn set_checked(&mut self, field: Field, value: u8) -> Result<(), Error<I::Error>> {
        if !field.fits(value) {
            return Err(Error::OutOfRange);
        }
        self.set_field(field, value)
    }

    fn get_flag(&mut self, field: Field) -> Result<bool, Error<I::Error>> {
        Ok(self.get_field(field)? != 0)
    }

    fn set_flag(&mut self, field: Field, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_field(field, u8::from(enable))
    }

    // ==================== Data ====================

    /// Read the X axis
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_x(&mut self) -> Result<i16, Error<I::Error>> {
        self.read_axis(addr::X_AXIS_LSB)
    }

    /// Read the Y axis
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_y(&mut self) -> Result<i16, Error<I::Error>> {
        self.read_axis(addr::Y_AXIS_LSB)
    }

    /// Read the Z axis
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_z(&mut self) -> Result<i16, Error<I::Error>> {
        self.read_axis(addr::Z_AXIS_LSB)
    }

    fn read_axis(&mut self, lsb_address: u8) -> Result<i16, Error<I::Error>> {
        let mut data = [0u8; 2];
        self.read_register(lsb_address, &mut data)?;
        Ok(decode_axis(data[0], data[1]))
    }

    /// Read all three axes in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel_xyz(&mut self) -> Result<AccelData, Error<I::Error>> {
        let mut data = [0u8; 6];
        self.read_register(addr::X_AXIS_LSB, &mut data)?;
        Ok(AccelData::from_registers(&data))
    }

    /// New-data flags of the X, Y and Z axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn new_data_flags(&mut self) -> Result<(bool, bool, bool), Error<I::Error>> {
        let mut data = [0u8; 5];
        self.read_register(addr::X_AXIS_LSB, &mut data)?;
        Ok((
            registers::NEW_DATA_X.extract(data[0]) != 0,
            registers::NEW_DATA_Y.extract(data[2]) != 0,
            registers::NEW_DATA_Z.extract(data[4]) != 0,
        ))
    }

    /// Read the raw temperature register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::TEMPERATURE)
    }

    // ==================== Range, bandwidth, wake-up ====================

    /// Read the full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication fails or the field holds the
    /// reserved encoding `0b11`.
    pub fn range(&mut self) -> Result<Range, Error<I::Error>> {
        let bits = self.get_field(registers::RANGE)?;
        Range::from_bits(bits).ok_or(Error::ReservedValue(bits))
    }

    /// Set the full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_range(&mut self, range: Range) -> Result<(), Error<I::Error>> {
        self.set_field(registers::RANGE, range as u8)
    }

    /// Read the filter bandwidth
    ///
    /// # Errors
    ///
    /// Returns an error if communication fails or the field holds the
    /// reserved encoding `0b111`.
    pub fn bandwidth(&mut self) -> Result<Bandwidth, Error<I::Error>> {
        let bits = self.get_field(registers::BANDWIDTH)?;
        Bandwidth::from_bits(bits).ok_or(Error::ReservedValue(bits))
    }

    /// Set the filter bandwidth
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_bandwidth(&mut self, bandwidth: Bandwidth) -> Result<(), Error<I::Error>> {
        self.set_field(registers::BANDWIDTH, bandwidth as u8)
    }

    /// Read the pause between automatic wake-ups
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn wake_up_pause(&mut self) -> Result<WakeUpPause, Error<I::Error>> {
        let bits = self.get_field(registers::WAKE_UP_PAUSE)?;
        WakeUpPause::from_bits(bits).ok_or(Error::ReservedValue(bits))
    }

    /// Set the pause between automatic wake-ups
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_wake_up_pause(&mut self, pause: WakeUpPause) -> Result<(), Error<I::Error>> {
        self.set_field(registers::WAKE_UP_PAUSE, pause as u8)
    }

    // ==================== Low-g / high-g / any-motion ====================

    /// Read the low-g threshold (LSB size depends on the range)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn low_g_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::LG_THRES)
    }

    /// Set the low-g threshold
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_g_threshold(&mut self, threshold: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::LG_THRES, threshold)
    }

    /// Read the low-g duration in ms
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn low_g_duration(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::LG_DUR)
    }

    /// Set the low-g duration in ms
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_g_duration(&mut self, duration: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::LG_DUR, duration)
    }

    /// Read the low-g hysteresis (3 bits)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn low_g_hysteresis(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::LG_HYST)
    }

    /// Set the low-g hysteresis
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 7, or an error if communication
    /// with the device fails.
    pub fn set_low_g_hysteresis(&mut self, hysteresis: u8) -> Result<(), Error<I::Error>> {
        self.set_checked(registers::LG_HYST, hysteresis)
    }

    /// Read the low-g countdown (2 bits)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn low_g_countdown(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::COUNTER_LG)
    }

    /// Set the low-g countdown
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 3, or an error if communication
    /// with the device fails.
    pub fn set_low_g_countdown(&mut self, countdown: u8) -> Result<(), Error<I::Error>> {
        self.set_checked(registers::COUNTER_LG, countdown)
    }

    /// Read the high-g threshold (LSB size depends on the range)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn high_g_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::HG_THRES)
    }

    /// Set the high-g threshold
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_g_threshold(&mut self, threshold: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::HG_THRES, threshold)
    }

    /// Read the high-g duration in ms
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn high_g_duration(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::HG_DUR)
    }

    /// Set the high-g duration in ms
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_g_duration(&mut self, duration: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::HG_DUR, duration)
    }

    /// Read the high-g hysteresis (3 bits)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn high_g_hysteresis(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::HG_HYST)
    }

    /// Set the high-g hysteresis
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 7, or an error if communication
    /// with the device fails.
    pub fn set_high_g_hysteresis(&mut self, hysteresis: u8) -> Result<(), Error<I::Error>> {
        self.set_checked(registers::HG_HYST, hysteresis)
    }

    /// Read the high-g countdown (2 bits)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn high_g_countdown(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::COUNTER_HG)
    }

    /// Set the high-g countdown
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 3, or an error if communication
    /// with the device fails.
    pub fn set_high_g_countdown(&mut self, countdown: u8) -> Result<(), Error<I::Error>> {
        self.set_checked(registers::COUNTER_HG, countdown)
    }

    /// Read the any-motion threshold
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn any_motion_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::ANY_MOTION_THRES)
    }

    /// Set the any-motion threshold
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_any_motion_threshold(&mut self, threshold: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::ANY_MOTION_THRES, threshold)
    }

    /// Read the any-motion sample count
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn any_motion_count(&mut self) -> Result<AnyMotionDuration, Error<I::Error>> {
        let bits = self.get_field(registers::ANY_MOTION_DUR)?;
        AnyMotionDuration::from_bits(bits).ok_or(Error::ReservedValue(bits))
    }

    /// Set the any-motion sample count
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_any_motion_count(&mut self, count: AnyMotionDuration) -> Result<(), Error<I::Error>> {
        self.set_field(registers::ANY_MOTION_DUR, count as u8)
    }

    // ==================== CONF2 options ====================

    /// Whether MSB shadowing of acceleration data is disabled
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn shadow_disabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_flag(registers::SHADOW_DIS)
    }

    /// Disable (or re-enable) MSB shadowing of acceleration data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_shadow_disable(&mut self, disable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::SHADOW_DIS, disable)
    }

    /// Whether the SPI port runs in 4-wire mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn spi4(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_flag(registers::SPI4)
    }

    /// Select 4-wire (`true`) or 3-wire SPI
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_spi4(&mut self, four_wire: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::SPI4, four_wire)
    }

    /// Read customer reserved register 1 or 2
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for any other slot, or an error if
    /// communication with the device fails.
    pub fn customer_reserved(&mut self, slot: u8) -> Result<u8, Error<I::Error>> {
        self.get_field(customer_field::<I::Error>(slot)?)
    }

    /// Write customer reserved register 1 or 2
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for any other slot, or an error if
    /// communication with the device fails.
    pub fn set_customer_reserved(&mut self, slot: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.set_field(customer_field::<I::Error>(slot)?, value)
    }

    // ==================== Interrupts ====================

    /// Read and decode the status register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn interrupt_status(&mut self) -> Result<InterruptStatus, Error<I::Error>> {
        let mut status = [0u8];
        self.read_register(addr::STATUS, &mut status)?;
        Ok(InterruptStatus::from_register(status[0]))
    }

    /// Clear latched interrupts
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset_interrupt(&mut self) -> Result<(), Error<I::Error>> {
        self.set_field(registers::RESET_INT, 1)
    }

    /// Enable exactly the interrupt sources in `mask`
    ///
    /// One read-modify-write of `CONF1` followed by one of `CONF2`; other bits
    /// of both registers are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_interrupt_mask(&mut self, mask: InterruptMask) -> Result<(), Error<I::Error>> {
        let mut conf = [0u8];
        self.read_register(addr::CONF1, &mut conf)?;
        self.write_register(addr::CONF1, &[mask.apply_conf1(conf[0])])?;

        self.read_register(addr::CONF2, &mut conf)?;
        self.write_register(addr::CONF2, &[mask.apply_conf2(conf[0])])
    }

    /// Read the enabled interrupt sources
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn interrupt_mask(&mut self) -> Result<InterruptMask, Error<I::Error>> {
        let mut conf1 = [0u8];
        let mut conf2 = [0u8];
        self.read_register(addr::CONF1, &mut conf1)?;
        self.read_register(addr::CONF2, &mut conf2)?;
        Ok(InterruptMask::from_registers(conf1[0], conf2[0]))
    }

    /// Enable or disable the low-g interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_low_g_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::ENABLE_LG, enable)
    }

    /// Enable or disable the high-g interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_g_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::ENABLE_HG, enable)
    }

    /// Enable or disable the any-motion interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_any_motion_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::EN_ANY_MOTION, enable)
    }

    /// Enable or disable the alert interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_alert_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::ALERT, enable)
    }

    /// Enable or disable advanced interrupts
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_advanced_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::ENABLE_ADV_INT, enable)
    }

    /// Latch interrupts until [`reset_interrupt`](Self::reset_interrupt)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_latch_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::LATCH_INT, enable)
    }

    /// Enable or disable the new-data interrupt
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_new_data_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::NEW_DATA_INT, enable)
    }

    // ==================== Operating mode ====================

    /// Switch operating mode
    ///
    /// Writes `WAKE_UP` (CONF2) first, then `SLEEP` (CTRL). Any transition is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), Error<I::Error>> {
        let (sleep, wake_up) = mode.control_bits();
        self.set_field(registers::WAKE_UP, wake_up)?;
        self.set_field(registers::SLEEP, sleep)
    }

    /// Read the operating mode from the `SLEEP` and `WAKE_UP` bits
    ///
    /// `WAKE_UP` without `SLEEP` reads as [`OperatingMode::Normal`].
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn operating_mode(&mut self) -> Result<OperatingMode, Error<I::Error>> {
        let sleep = self.get_field(registers::SLEEP)?;
        let wake_up = self.get_field(registers::WAKE_UP)?;
        Ok(OperatingMode::from_control_bits(sleep, wake_up))
    }

    /// Put the accelerometer in standby or back to normal measurement
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_device_status(&mut self, status: DeviceStatus) -> Result<(), Error<I::Error>> {
        self.set_operating_mode(status.operating_mode())
    }

    /// Device-level status derived from the operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn device_status(&mut self) -> Result<DeviceStatus, Error<I::Error>> {
        Ok(DeviceStatus::from_operating_mode(self.operating_mode()?))
    }

    // ==================== Self-test ====================

    /// Start (or stop) a self-test
    ///
    /// Returns immediately; poll [`selftest_result`](Self::selftest_result)
    /// after the settling time.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn trigger_selftest(&mut self, selftest: SelfTest) -> Result<(), Error<I::Error>> {
        self.set_field(registers::SELF_TEST, selftest as u8)
    }

    /// Self-test result bit
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn selftest_result(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_flag(registers::ST_RESULT)
    }

    // ==================== Calibration ====================

    /// Read the 10-bit offset calibration of `axis`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn offset(&mut self, axis: CalibrationAxis) -> Result<u16, Error<I::Error>> {
        let (lsb_field, _) = axis.offset_gain_fields();
        let lsb = self.get_field(lsb_field)?;
        let msb = self.get_field(axis.offset_msb_field())?;
        Ok(join_offset(msb, lsb))
    }

    /// Write the 10-bit offset calibration of `axis` to the image registers
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 0x3FF, or an error if
    /// communication with the device fails.
    pub fn set_offset(&mut self, axis: CalibrationAxis, offset: u16) -> Result<(), Error<I::Error>> {
        if offset > OFFSET_MAX {
            return Err(Error::OutOfRange);
        }
        let (msb, lsb) = split_offset(offset);
        let (lsb_field, _) = axis.offset_gain_fields();
        self.set_field(lsb_field, lsb)?;
        self.write_register(axis.offset_msb_field().register, &[msb])
    }

    /// Read the 6-bit gain calibration of `axis`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gain(&mut self, axis: CalibrationAxis) -> Result<u8, Error<I::Error>> {
        let (_, gain_field) = axis.offset_gain_fields();
        self.get_field(gain_field)
    }

    /// Write the 6-bit gain calibration of `axis`
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 63, or an error if communication
    /// with the device fails.
    pub fn set_gain(&mut self, axis: CalibrationAxis, gain: u8) -> Result<(), Error<I::Error>> {
        let (_, gain_field) = axis.offset_gain_fields();
        self.set_checked(gain_field, gain)
    }

    // ==================== EEPROM and image ====================

    /// Whether image registers are writable
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn ee_w(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_flag(registers::EE_W)
    }

    /// Unlock (or lock) the image registers and EEPROM for writing
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_ee_w(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::EE_W, enable)
    }

    /// Program the EEPROM cell behind image register `address`
    ///
    /// Sets `EE_W`, writes `address | 0x20`, waits
    /// [`EEPROM_WRITE_DELAY_MS`], then clears `EE_W`. `address` may be given
    /// with or without the EEPROM offset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `address` is not an image register,
    /// or an error if communication with the device fails.
    pub fn write_ee<D>(&mut self, address: u8, data: u8, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let target = eeprom_address::<I::Error>(address)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("EEPROM write {=u8:#x} <- {=u8:#x}", target, data);

        self.set_ee_w(true)?;
        self.write_register(target, &[data])?;
        delay.delay_ms(EEPROM_WRITE_DELAY_MS);
        self.set_ee_w(false)
    }

    /// Store the 10-bit offset calibration of `axis` in EEPROM
    ///
    /// The image registers are left unchanged until the next
    /// [`update_image`](Self::update_image) or power cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 0x3FF, or an error if
    /// communication with the device fails.
    pub fn set_offset_eeprom<D>(
        &mut self,
        axis: CalibrationAxis,
        offset: u16,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        if offset > OFFSET_MAX {
            return Err(Error::OutOfRange);
        }
        let (msb, lsb) = split_offset(offset);
        let (lsb_field, _) = axis.offset_gain_fields();

        let mut current = [0u8];
        self.read_register(lsb_field.register, &mut current)?;
        self.write_ee(lsb_field.register, lsb_field.insert(current[0], lsb), delay)?;
        self.write_ee(axis.offset_msb_field().register, msb, delay)
    }

    /// Soft reset; all image registers reload from EEPROM
    ///
    /// Writes the control register with only `SOFT_RESET` set.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn soft_reset(&mut self) -> Result<(), Error<I::Error>> {
        self.write_register(addr::CTRL, &[registers::SOFT_RESET.insert(0, 1)])
    }

    /// Copy the EEPROM contents into the image registers
    ///
    /// Writes the control register with only `UPDATE_IMAGE` set.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn update_image(&mut self) -> Result<(), Error<I::Error>> {
        self.write_register(addr::CTRL, &[registers::UPDATE_IMAGE.insert(0, 1)])
    }

    /// Read `len` registers starting at `start` in one transaction
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageBounds`] if the range is empty or leaves the
    /// register map, or an error if communication with the device fails.
    pub fn bulk_read_image(&mut self, start: u8, len: u8) -> Result<Image, Error<I::Error>> {
        let mut image = Image::new(start, len).ok_or(Error::ImageBounds)?;
        self.read_register(start, image.as_mut_bytes())?;
        Ok(image)
    }

    /// Write `image` back in one transaction, lowest address first
    ///
    /// Image registers (0x0B-0x1D) only accept the write while `EE_W` is
    /// set; [`set_image`](Self::set_image) takes care of that.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn bulk_write_image(&mut self, image: &Image) -> Result<(), Error<I::Error>> {
        self.write_register(image.start(), image.as_bytes())
    }

    /// Read the EEPROM-backed image registers 0x0B-0x1D
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_image(&mut self) -> Result<Image, Error<I::Error>> {
        self.bulk_read_image(IMAGE_BASE, IMAGE_LEN)
    }

    /// Write image registers with `EE_W` temporarily set
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageBounds`] if `image` reaches outside 0x0B-0x1D,
    /// or an error if communication with the device fails.
    pub fn set_image(&mut self, image: &Image) -> Result<(), Error<I::Error>> {
        if !in_eeprom_image(image.start(), image.len()) {
            return Err(Error::ImageBounds);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing {=usize} image registers from {=u8:#x}", image.len(), image.start());

        self.set_ee_w(true)?;
        self.bulk_write_image(image)?;
        self.set_ee_w(false)
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn bit_size(len: usize) -> u32 {
    (len * 8) as u32
}

fn customer_field<E>(slot: u8) -> Result<Field, Error<E>> {
    match slot {
        1 => Ok(registers::CUSTOMER_RESERVED1),
        2 => Ok(registers::CUSTOMER_RESERVED2),
        _ => Err(Error::OutOfRange),
    }
}

fn eeprom_address<E>(address: u8) -> Result<u8, Error<E>> {
    let image_address = address & !EEPROM_OFFSET;
    if in_eeprom_image(image_address, 1) {
        Ok(image_address | EEPROM_OFFSET)
    } else {
        Err(Error::OutOfRange)
    }
}

#[cfg(feature = "async")]
impl<I> Bma023Driver<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    /// Create a new BMA023 driver instance (async)
    ///
    /// Reads the chip id and version register. The device configuration is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `CHIP_ID` field does not read 0x02
    pub async fn new(interface: I) -> Result<Self, Error<I::Error>> {
        let mut driver = Self {
            interface,
            chip_id: 0,
            ml_version: 0,
            al_version: 0,
        };

        let chip_id = driver.get_field(registers::CHIP_ID).await?;
        if chip_id != CHIP_ID_VALUE {
            return Err(Error::InvalidDevice(chip_id));
        }

        let mut version = [0u8];
        driver.read_register(addr::VERSION, &mut version).await?;

        driver.chip_id = chip_id;
        driver.ml_version = registers::ML_VERSION.extract(version[0]);
        driver.al_version = registers::AL_VERSION.extract(version[0]);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "BMA023 detected: chip id {=u8:#x}, ML version {=u8}, AL version {=u8}",
            driver.chip_id,
            driver.ml_version,
            driver.al_version
        );

        Ok(driver)
    }

    /// Chip id read at construction
    pub const fn chip_id(&self) -> u8 {
        self.chip_id
    }

    /// ML version read at construction
    pub const fn ml_version(&self) -> u8 {
        self.ml_version
    }

    /// AL version read at construction
    pub const fn al_version(&self) -> u8 {
        self.al_version
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Read `data.len()` consecutive registers starting at `address` (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageBounds`] if `data` is empty or the range leaves
    /// `0x00`-`0x1D` (or the EEPROM cells `0x2B`-`0x3D`), before touching the
    /// bus. Returns an error if communication with the device fails.
    pub async fn read_register(
        &mut self,
        address: u8,
        data: &mut [u8],
    ) -> Result<(), Error<I::Error>> {
        if !in_register_space(address, data.len()) {
            return Err(Error::ImageBounds);
        }
        let size_bits = bit_size(data.len());
        self.interface
            .read_register(address, size_bits, data)
            .await?;
        Ok(())
    }

    /// Write `data` to consecutive registers starting at `address` (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageBounds`] if `data` is empty or the range leaves
    /// `0x00`-`0x1D` (or the EEPROM cells `0x2B`-`0x3D`), before touching the
    /// bus. Returns an error if communication with the device fails.
    pub async fn write_register(&mut self, address: u8, data: &[u8]) -> Result<(), Error<I::Error>> {
        if !in_register_space(address, data.len()) {
            return Err(Error::ImageBounds);
        }
        let size_bits = bit_size(data.len());
        self.interface
            .write_register(address, size_bits, data)
            .await?;
        Ok(())
    }

    /// Read one field (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn get_field(&mut self, field: Field) -> Result<u8, Error<I::Error>> {
        let mut byte = [0u8];
        self.read_register(field.register, &mut byte).await?;
        Ok(field.extract(byte[0]))
    }

    /// Write one field with a read-modify-write of its register (async)
    ///
    /// Bits of `value` beyond the field width are dropped. Not atomic: see the
    /// [module documentation](self).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails; if the read
    /// fails, nothing is written.
    pub async fn set_field(&mut self, field: Field, value: u8) -> Result<(), Error<I::Error>> {
        let mut byte = [0u8];
        self.read_register(field.register, &mut byte).await?;
        self.write_register(field.register, &[field.insert(byte[0], value)])
            .await
    }

    async fn set_checked(&mut self, field: Field, value: u8) -> Result<(), Error<I::Error>> {
        if !field.fits(value) {
            return Err(Error::OutOfRange);
        }
        self.set_field(field, value).await
    }

    async fn get_flag(&mut self, field: Field) -> Result<bool, Error<I::Error>> {
        Ok(self.get_field(field).await? != 0)
    }

    async fn set_flag(&mut self, field: Field, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_field(field, u8::from(enable)).await
    }

    /// Read the X axis (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accel_x(&mut self) -> Result<i16, Error<I::Error>> {
        self.read_axis(addr::X_AXIS_LSB).await
    }

    /// Read the Y axis (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accel_y(&mut self) -> Result<i16, Error<I::Error>> {
        self.read_axis(addr::Y_AXIS_LSB).await
    }

    /// Read the Z axis (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accel_z(&mut self) -> Result<i16, Error<I::Error>> {
        self.read_axis(addr::Z_AXIS_LSB).await
    }

    async fn read_axis(&mut self, lsb_address: u8) -> Result<i16, Error<I::Error>> {
        let mut data = [0u8; 2];
        self.read_register(lsb_address, &mut data).await?;
        Ok(decode_axis(data[0], data[1]))
    }

    /// Read all three axes in one transaction (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accel_xyz(&mut self) -> Result<AccelData, Error<I::Error>> {
        let mut data = [0u8; 6];
        self.read_register(addr::X_AXIS_LSB, &mut data).await?;
        Ok(AccelData::from_registers(&data))
    }

    /// New-data flags of the X, Y and Z axes (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn new_data_flags(&mut self) -> Result<(bool, bool, bool), Error<I::Error>> {
        let mut data = [0u8; 5];
        self.read_register(addr::X_AXIS_LSB, &mut data).await?;
        Ok((
            registers::NEW_DATA_X.extract(data[0]) != 0,
            registers::NEW_DATA_Y.extract(data[2]) != 0,
            registers::NEW_DATA_Z.extract(data[4]) != 0,
        ))
    }

    /// Read the raw temperature register (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_temperature(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::TEMPERATURE).await
    }

    /// Read the full-scale range (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication fails or the field holds the
    /// reserved encoding `0b11`.
    pub async fn range(&mut self) -> Result<Range, Error<I::Error>> {
        let bits = self.get_field(registers::RANGE).await?;
        Range::from_bits(bits).ok_or(Error::ReservedValue(bits))
    }

    /// Set the full-scale range (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_range(&mut self, range: Range) -> Result<(), Error<I::Error>> {
        self.set_field(registers::RANGE, range as u8).await
    }

    /// Read the filter bandwidth (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication fails or the field holds the
    /// reserved encoding `0b111`.
    pub async fn bandwidth(&mut self) -> Result<Bandwidth, Error<I::Error>> {
        let bits = self.get_field(registers::BANDWIDTH).await?;
        Bandwidth::from_bits(bits).ok_or(Error::ReservedValue(bits))
    }

    /// Set the filter bandwidth (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_bandwidth(&mut self, bandwidth: Bandwidth) -> Result<(), Error<I::Error>> {
        self.set_field(registers::BANDWIDTH, bandwidth as u8).await
    }

    /// Read the pause between automatic wake-ups (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn wake_up_pause(&mut self) -> Result<WakeUpPause, Error<I::Error>> {
        let bits = self.get_field(registers::WAKE_UP_PAUSE).await?;
        WakeUpPause::from_bits(bits).ok_or(Error::ReservedValue(bits))
    }

    /// Set the pause between automatic wake-ups (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_wake_up_pause(&mut self, pause: WakeUpPause) -> Result<(), Error<I::Error>> {
        self.set_field(registers::WAKE_UP_PAUSE, pause as u8).await
    }

    /// Read the low-g threshold (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn low_g_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::LG_THRES).await
    }

    /// Set the low-g threshold (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_low_g_threshold(&mut self, threshold: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::LG_THRES, threshold).await
    }

    /// Read the low-g duration in ms (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn low_g_duration(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::LG_DUR).await
    }

    /// Set the low-g duration in ms (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_low_g_duration(&mut self, duration: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::LG_DUR, duration).await
    }

    /// Read the low-g hysteresis (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn low_g_hysteresis(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::LG_HYST).await
    }

    /// Set the low-g hysteresis (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 7, or an error if communication
    /// with the device fails.
    pub async fn set_low_g_hysteresis(&mut self, hysteresis: u8) -> Result<(), Error<I::Error>> {
        self.set_checked(registers::LG_HYST, hysteresis).await
    }

    /// Read the low-g countdown (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn low_g_countdown(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::COUNTER_LG).await
    }

    /// Set the low-g countdown (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 3, or an error if communication
    /// with the device fails.
    pub async fn set_low_g_countdown(&mut self, countdown: u8) -> Result<(), Error<I::Error>> {
        self.set_checked(registers::COUNTER_LG, countdown).await
    }

    /// Read the high-g threshold (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn high_g_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::HG_THRES).await
    }

    /// Set the high-g threshold (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_high_g_threshold(&mut self, threshold: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::HG_THRES, threshold).await
    }

    /// Read the high-g duration in ms (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn high_g_duration(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::HG_DUR).await
    }

    /// Set the high-g duration in ms (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_high_g_duration(&mut self, duration: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::HG_DUR, duration).await
    }

    /// Read the high-g hysteresis (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn high_g_hysteresis(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::HG_HYST).await
    }

    /// Set the high-g hysteresis (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 7, or an error if communication
    /// with the device fails.
    pub async fn set_high_g_hysteresis(&mut self, hysteresis: u8) -> Result<(), Error<I::Error>> {
        self.set_checked(registers::HG_HYST, hysteresis).await
    }

    /// Read the high-g countdown (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn high_g_countdown(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::COUNTER_HG).await
    }

    /// Set the high-g countdown (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 3, or an error if communication
    /// with the device fails.
    pub async fn set_high_g_countdown(&mut self, countdown: u8) -> Result<(), Error<I::Error>> {
        self.set_checked(registers::COUNTER_HG, countdown).await
    }

    /// Read the any-motion threshold (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn any_motion_threshold(&mut self) -> Result<u8, Error<I::Error>> {
        self.get_field(registers::ANY_MOTION_THRES).await
    }

    /// Set the any-motion threshold (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_any_motion_threshold(&mut self, threshold: u8) -> Result<(), Error<I::Error>> {
        self.set_field(registers::ANY_MOTION_THRES, threshold).await
    }

    /// Read the any-motion sample count (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn any_motion_count(&mut self) -> Result<AnyMotionDuration, Error<I::Error>> {
        let bits = self.get_field(registers::ANY_MOTION_DUR).await?;
        AnyMotionDuration::from_bits(bits).ok_or(Error::ReservedValue(bits))
    }

    /// Set the any-motion sample count (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_any_motion_count(
        &mut self,
        count: AnyMotionDuration,
    ) -> Result<(), Error<I::Error>> {
        self.set_field(registers::ANY_MOTION_DUR, count as u8).await
    }

    /// Whether MSB shadowing of acceleration data is disabled (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn shadow_disabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_flag(registers::SHADOW_DIS).await
    }

    /// Disable (or re-enable) MSB shadowing of acceleration data (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_shadow_disable(&mut self, disable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::SHADOW_DIS, disable).await
    }

    /// Whether the SPI port runs in 4-wire mode (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn spi4(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_flag(registers::SPI4).await
    }

    /// Select 4-wire (`true`) or 3-wire SPI (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_spi4(&mut self, four_wire: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::SPI4, four_wire).await
    }

    /// Read customer reserved register 1 or 2 (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for any other slot, or an error if
    /// communication with the device fails.
    pub async fn customer_reserved(&mut self, slot: u8) -> Result<u8, Error<I::Error>> {
        self.get_field(customer_field::<I::Error>(slot)?).await
    }

    /// Write customer reserved register 1 or 2 (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for any other slot, or an error if
    /// communication with the device fails.
    pub async fn set_customer_reserved(&mut self, slot: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.set_field(customer_field::<I::Error>(slot)?, value).await
    }

    /// Read and decode the status register (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn interrupt_status(&mut self) -> Result<InterruptStatus, Error<I::Error>> {
        let mut status = [0u8];
        self.read_register(addr::STATUS, &mut status).await?;
        Ok(InterruptStatus::from_register(status[0]))
    }

    /// Clear latched interrupts (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn reset_interrupt(&mut self) -> Result<(), Error<I::Error>> {
        self.set_field(registers::RESET_INT, 1).await
    }

    /// Enable exactly the interrupt sources in `mask` (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_interrupt_mask(&mut self, mask: InterruptMask) -> Result<(), Error<I::Error>> {
        let mut conf = [0u8];
        self.read_register(addr::CONF1, &mut conf).await?;
        self.write_register(addr::CONF1, &[mask.apply_conf1(conf[0])])
            .await?;

        self.read_register(addr::CONF2, &mut conf).await?;
        self.write_register(addr::CONF2, &[mask.apply_conf2(conf[0])])
            .await
    }

    /// Read the enabled interrupt sources (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn interrupt_mask(&mut self) -> Result<InterruptMask, Error<I::Error>> {
        let mut conf1 = [0u8];
        let mut conf2 = [0u8];
        self.read_register(addr::CONF1, &mut conf1).await?;
        self.read_register(addr::CONF2, &mut conf2).await?;
        Ok(InterruptMask::from_registers(conf1[0], conf2[0]))
    }

    /// Enable or disable the low-g interrupt (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_low_g_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::ENABLE_LG, enable).await
    }

    /// Enable or disable the high-g interrupt (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_high_g_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::ENABLE_HG, enable).await
    }

    /// Enable or disable the any-motion interrupt (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_any_motion_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::EN_ANY_MOTION, enable).await
    }

    /// Enable or disable the alert interrupt (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_alert_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::ALERT, enable).await
    }

    /// Enable or disable advanced interrupts (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_advanced_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::ENABLE_ADV_INT, enable).await
    }

    /// Latch interrupts until reset (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_latch_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::LATCH_INT, enable).await
    }

    /// Enable or disable the new-data interrupt (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_new_data_int(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::NEW_DATA_INT, enable).await
    }

    /// Switch operating mode (async)
    ///
    /// Writes `WAKE_UP` (CONF2) first, then `SLEEP` (CTRL). Any transition is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), Error<I::Error>> {
        let (sleep, wake_up) = mode.control_bits();
        self.set_field(registers::WAKE_UP, wake_up).await?;
        self.set_field(registers::SLEEP, sleep).await
    }

    /// Read the operating mode (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn operating_mode(&mut self) -> Result<OperatingMode, Error<I::Error>> {
        let sleep = self.get_field(registers::SLEEP).await?;
        let wake_up = self.get_field(registers::WAKE_UP).await?;
        Ok(OperatingMode::from_control_bits(sleep, wake_up))
    }

    /// Put the accelerometer in standby or back to normal measurement (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_device_status(&mut self, status: DeviceStatus) -> Result<(), Error<I::Error>> {
        self.set_operating_mode(status.operating_mode()).await
    }

    /// Device-level status derived from the operating mode (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn device_status(&mut self) -> Result<DeviceStatus, Error<I::Error>> {
        Ok(DeviceStatus::from_operating_mode(
            self.operating_mode().await?,
        ))
    }

    /// Start (or stop) a self-test (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn trigger_selftest(&mut self, selftest: SelfTest) -> Result<(), Error<I::Error>> {
        self.set_field(registers::SELF_TEST, selftest as u8).await
    }

    /// Self-test result bit (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn selftest_result(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_flag(registers::ST_RESULT).await
    }

    /// Read the 10-bit offset calibration of `axis` (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn offset(&mut self, axis: CalibrationAxis) -> Result<u16, Error<I::Error>> {
        let (lsb_field, _) = axis.offset_gain_fields();
        let lsb = self.get_field(lsb_field).await?;
        let msb = self.get_field(axis.offset_msb_field()).await?;
        Ok(join_offset(msb, lsb))
    }

    /// Write the 10-bit offset calibration of `axis` (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 0x3FF, or an error if
    /// communication with the device fails.
    pub async fn set_offset(
        &mut self,
        axis: CalibrationAxis,
        offset: u16,
    ) -> Result<(), Error<I::Error>> {
        if offset > OFFSET_MAX {
            return Err(Error::OutOfRange);
        }
        let (msb, lsb) = split_offset(offset);
        let (lsb_field, _) = axis.offset_gain_fields();
        self.set_field(lsb_field, lsb).await?;
        self.write_register(axis.offset_msb_field().register, &[msb])
            .await
    }

    /// Read the 6-bit gain calibration of `axis` (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn gain(&mut self, axis: CalibrationAxis) -> Result<u8, Error<I::Error>> {
        let (_, gain_field) = axis.offset_gain_fields();
        self.get_field(gain_field).await
    }

    /// Write the 6-bit gain calibration of `axis` (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 63, or an error if communication
    /// with the device fails.
    pub async fn set_gain(&mut self, axis: CalibrationAxis, gain: u8) -> Result<(), Error<I::Error>> {
        let (_, gain_field) = axis.offset_gain_fields();
        self.set_checked(gain_field, gain).await
    }

    /// Whether image registers are writable (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn ee_w(&mut self) -> Result<bool, Error<I::Error>> {
        self.get_flag(registers::EE_W).await
    }

    /// Unlock (or lock) the image registers and EEPROM for writing (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_ee_w(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        self.set_flag(registers::EE_W, enable).await
    }

    /// Program the EEPROM cell behind image register `address` (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `address` is not an image register,
    /// or an error if communication with the device fails.
    pub async fn write_ee<D>(
        &mut self,
        address: u8,
        data: u8,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let target = eeprom_address::<I::Error>(address)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("EEPROM write {=u8:#x} <- {=u8:#x}", target, data);

        self.set_ee_w(true).await?;
        self.write_register(target, &[data]).await?;
        delay.delay_ms(EEPROM_WRITE_DELAY_MS).await;
        self.set_ee_w(false).await
    }

    /// Store the 10-bit offset calibration of `axis` in EEPROM (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] above 0x3FF, or an error if
    /// communication with the device fails.
    pub async fn set_offset_eeprom<D>(
        &mut self,
        axis: CalibrationAxis,
        offset: u16,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        if offset > OFFSET_MAX {
            return Err(Error::OutOfRange);
        }
        let (msb, lsb) = split_offset(offset);
        let (lsb_field, _) = axis.offset_gain_fields();

        let mut current = [0u8];
        self.read_register(lsb_field.register, &mut current).await?;
        self.write_ee(lsb_field.register, lsb_field.insert(current[0], lsb), delay)
            .await?;
        self.write_ee(axis.offset_msb_field().register, msb, delay)
            .await
    }

    /// Soft reset (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn soft_reset(&mut self) -> Result<(), Error<I::Error>> {
        self.write_register(addr::CTRL, &[registers::SOFT_RESET.insert(0, 1)])
            .await
    }

    /// Copy the EEPROM contents into the image registers (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn update_image(&mut self) -> Result<(), Error<I::Error>> {
        self.write_register(addr::CTRL, &[registers::UPDATE_IMAGE.insert(0, 1)])
            .await
    }

    /// Read `len` registers starting at `start` in one transaction (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageBounds`] if the range is empty or leaves the
    /// register map, or an error if communication with the device fails.
    pub async fn bulk_read_image(&mut self, start: u8, len: u8) -> Result<Image, Error<I::Error>> {
        let mut image = Image::new(start, len).ok_or(Error::ImageBounds)?;
        self.read_register(start, image.as_mut_bytes()).await?;
        Ok(image)
    }

    /// Write `image` back in one transaction (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn bulk_write_image(&mut self, image: &Image) -> Result<(), Error<I::Error>> {
        self.write_register(image.start(), image.as_bytes()).await
    }

    /// Read the EEPROM-backed image registers 0x0B-0x1D (async)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn get_image(&mut self) -> Result<Image, Error<I::Error>> {
        self.bulk_read_image(IMAGE_BASE, IMAGE_LEN).await
    }

    /// Write image registers with `EE_W` temporarily set (async)
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageBounds`] if `image` reaches outside 0x0B-0x1D,
    /// or an error if communication with the device fails.
    pub async fn set_image(&mut self, image: &Image) -> Result<(), Error<I::Error>> {
        if !in_eeprom_image(image.start(), image.len()) {
            return Err(Error::ImageBounds);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing {=usize} image registers from {=u8:#x}", image.len(), image.start());

        self.set_ee_w(true).await?;
        self.bulk_write_image(image).await?;
        self.set_ee_w(false).await
    }
}
