//! Register map of the BMA023
//!
//! The BMA023 exposes 30 byte-wide registers at addresses `0x00`-`0x1D`.
//! Addresses `0x0B`-`0x1D` form the *image*: they are shadowed by EEPROM
//! cells at the same address plus [`EEPROM_OFFSET`](crate::EEPROM_OFFSET)
//! and are write-protected unless the `EE_W` control bit is set.
//!
//! Addresses, masks and bit offsets below are fixed by the silicon and must
//! match the datasheet bit for bit. Each field is a [`Field`] constant; the
//! complete list is [`FIELDS`].

use crate::field::Field;

/// Register addresses
pub mod addr {
    /// Chip identification (bits 2:0)
    pub const CHIP_ID: u8 = 0x00;
    /// ML and AL version numbers
    pub const VERSION: u8 = 0x01;
    /// X-axis LSBs and new-data flag
    pub const X_AXIS_LSB: u8 = 0x02;
    /// X-axis MSBs
    pub const X_AXIS_MSB: u8 = 0x03;
    /// Y-axis LSBs and new-data flag
    pub const Y_AXIS_LSB: u8 = 0x04;
    /// Y-axis MSBs
    pub const Y_AXIS_MSB: u8 = 0x05;
    /// Z-axis LSBs and new-data flag
    pub const Z_AXIS_LSB: u8 = 0x06;
    /// Z-axis MSBs
    pub const Z_AXIS_MSB: u8 = 0x07;
    /// Temperature
    pub const TEMP_RD: u8 = 0x08;
    /// Interrupt and self-test status
    pub const STATUS: u8 = 0x09;
    /// Control: sleep, soft reset, self-test, EEPROM access
    pub const CTRL: u8 = 0x0A;
    /// Interrupt enables and low-g/high-g counters
    pub const CONF1: u8 = 0x0B;
    /// Low-g threshold
    pub const LG_THRESHOLD: u8 = 0x0C;
    /// Low-g duration
    pub const LG_DURATION: u8 = 0x0D;
    /// High-g threshold
    pub const HG_THRESHOLD: u8 = 0x0E;
    /// High-g duration
    pub const HG_DURATION: u8 = 0x0F;
    /// Any-motion threshold
    pub const MOTION_THRS: u8 = 0x10;
    /// Low-g/high-g hysteresis and any-motion duration
    pub const HYSTERESIS: u8 = 0x11;
    /// Customer reserved register 1
    pub const CUSTOMER1: u8 = 0x12;
    /// Customer reserved register 2
    pub const CUSTOMER2: u8 = 0x13;
    /// Range and bandwidth
    pub const RANGE_BWIDTH: u8 = 0x14;
    /// SPI4, latched interrupt and auto wake-up configuration
    pub const CONF2: u8 = 0x15;
    /// X offset LSBs and gain
    pub const OFFS_GAIN_X: u8 = 0x16;
    /// Y offset LSBs and gain
    pub const OFFS_GAIN_Y: u8 = 0x17;
    /// Z offset LSBs and gain
    pub const OFFS_GAIN_Z: u8 = 0x18;
    /// Temperature offset LSBs and gain
    pub const OFFS_GAIN_T: u8 = 0x19;
    /// X offset MSBs
    pub const OFFSET_X: u8 = 0x1A;
    /// Y offset MSBs
    pub const OFFSET_Y: u8 = 0x1B;
    /// Z offset MSBs
    pub const OFFSET_Z: u8 = 0x1C;
    /// Temperature offset MSBs
    pub const OFFSET_T: u8 = 0x1D;
}

/// Number of addressable registers (`0x00`-`0x1D`)
pub const REGISTER_COUNT: usize = 0x1E;

// Identification

/// Chip id, reads 0x02
pub const CHIP_ID: Field = Field::new("CHIP_ID", addr::CHIP_ID, 0x07, 0);
/// ML version
pub const ML_VERSION: Field = Field::new("ML_VERSION", addr::VERSION, 0x0F, 0);
/// AL version
pub const AL_VERSION: Field = Field::new("AL_VERSION", addr::VERSION, 0xF0, 4);

// Acceleration data

/// New X sample since last read
pub const NEW_DATA_X: Field = Field::new("NEW_DATA_X", addr::X_AXIS_LSB, 0x01, 0);
/// Two least significant bits of X
pub const ACC_X_LSB: Field = Field::new("ACC_X_LSB", addr::X_AXIS_LSB, 0xC0, 6);
/// Eight most significant bits of X
pub const ACC_X_MSB: Field = Field::new("ACC_X_MSB", addr::X_AXIS_MSB, 0xFF, 0);
/// New Y sample since last read
pub const NEW_DATA_Y: Field = Field::new("NEW_DATA_Y", addr::Y_AXIS_LSB, 0x01, 0);
/// Two least significant bits of Y
pub const ACC_Y_LSB: Field = Field::new("ACC_Y_LSB", addr::Y_AXIS_LSB, 0xC0, 6);
/// Eight most significant bits of Y
pub const ACC_Y_MSB: Field = Field::new("ACC_Y_MSB", addr::Y_AXIS_MSB, 0xFF, 0);
/// New Z sample since last read
pub const NEW_DATA_Z: Field = Field::new("NEW_DATA_Z", addr::Z_AXIS_LSB, 0x01, 0);
/// Two least significant bits of Z
pub const ACC_Z_LSB: Field = Field::new("ACC_Z_LSB", addr::Z_AXIS_LSB, 0xC0, 6);
/// Eight most significant bits of Z
pub const ACC_Z_MSB: Field = Field::new("ACC_Z_MSB", addr::Z_AXIS_MSB, 0xFF, 0);
/// Temperature reading
pub const TEMPERATURE: Field = Field::new("TEMPERATURE", addr::TEMP_RD, 0xFF, 0);

// Status

/// High-g event active
pub const STATUS_HG: Field = Field::new("STATUS_HG", addr::STATUS, 0x01, 0);
/// Low-g event active
pub const STATUS_LG: Field = Field::new("STATUS_LG", addr::STATUS, 0x02, 1);
/// High-g event latched
pub const HG_LATCHED: Field = Field::new("HG_LATCHED", addr::STATUS, 0x04, 2);
/// Low-g event latched
pub const LG_LATCHED: Field = Field::new("LG_LATCHED", addr::STATUS, 0x08, 3);
/// Alert phase (any-motion triggered)
pub const ALERT_PHASE: Field = Field::new("ALERT_PHASE", addr::STATUS, 0x10, 4);
/// Self-test result
pub const ST_RESULT: Field = Field::new("ST_RESULT", addr::STATUS, 0x80, 7);

// Control

/// Sleep mode
pub const SLEEP: Field = Field::new("SLEEP", addr::CTRL, 0x01, 0);
/// Soft reset trigger
pub const SOFT_RESET: Field = Field::new("SOFT_RESET", addr::CTRL, 0x02, 1);
/// Self-test selection (both bits)
pub const SELF_TEST: Field = Field::new("SELF_TEST", addr::CTRL, 0x0C, 2);
/// Self-test 0 (alias of [`SELF_TEST`] bit 0)
pub const SELF_TEST0: Field = Field::new("SELF_TEST0", addr::CTRL, 0x04, 2);
/// Self-test 1 (alias of [`SELF_TEST`] bit 1)
pub const SELF_TEST1: Field = Field::new("SELF_TEST1", addr::CTRL, 0x08, 3);
/// EEPROM write enable
pub const EE_W: Field = Field::new("EE_W", addr::CTRL, 0x10, 4);
/// Reload image registers from EEPROM
pub const UPDATE_IMAGE: Field = Field::new("UPDATE_IMAGE", addr::CTRL, 0x20, 5);
/// Reset latched interrupts
pub const RESET_INT: Field = Field::new("RESET_INT", addr::CTRL, 0x40, 6);

// Low-g / high-g / any-motion

/// Low-g interrupt enable
pub const ENABLE_LG: Field = Field::new("ENABLE_LG", addr::CONF1, 0x01, 0);
/// High-g interrupt enable
pub const ENABLE_HG: Field = Field::new("ENABLE_HG", addr::CONF1, 0x02, 1);
/// Low-g countdown
pub const COUNTER_LG: Field = Field::new("COUNTER_LG", addr::CONF1, 0x0C, 2);
/// High-g countdown
pub const COUNTER_HG: Field = Field::new("COUNTER_HG", addr::CONF1, 0x30, 4);
/// Any-motion interrupt enable
pub const EN_ANY_MOTION: Field = Field::new("EN_ANY_MOTION", addr::CONF1, 0x40, 6);
/// Alert interrupt enable
pub const ALERT: Field = Field::new("ALERT", addr::CONF1, 0x80, 7);
/// Low-g threshold
pub const LG_THRES: Field = Field::new("LG_THRES", addr::LG_THRESHOLD, 0xFF, 0);
/// Low-g duration (ms)
pub const LG_DUR: Field = Field::new("LG_DUR", addr::LG_DURATION, 0xFF, 0);
/// High-g threshold
pub const HG_THRES: Field = Field::new("HG_THRES", addr::HG_THRESHOLD, 0xFF, 0);
/// High-g duration (ms)
pub const HG_DUR: Field = Field::new("HG_DUR", addr::HG_DURATION, 0xFF, 0);
/// Any-motion threshold
pub const ANY_MOTION_THRES: Field = Field::new("ANY_MOTION_THRES", addr::MOTION_THRS, 0xFF, 0);
/// Low-g hysteresis
pub const LG_HYST: Field = Field::new("LG_HYST", addr::HYSTERESIS, 0x07, 0);
/// High-g hysteresis
pub const HG_HYST: Field = Field::new("HG_HYST", addr::HYSTERESIS, 0x38, 3);
/// Any-motion duration
pub const ANY_MOTION_DUR: Field = Field::new("ANY_MOTION_DUR", addr::HYSTERESIS, 0xC0, 6);
/// Customer reserved byte 1
pub const CUSTOMER_RESERVED1: Field = Field::new("CUSTOMER_RESERVED1", addr::CUSTOMER1, 0xFF, 0);
/// Customer reserved byte 2
pub const CUSTOMER_RESERVED2: Field = Field::new("CUSTOMER_RESERVED2", addr::CUSTOMER2, 0xFF, 0);

// Range and bandwidth

/// Filter bandwidth
pub const BANDWIDTH: Field = Field::new("BANDWIDTH", addr::RANGE_BWIDTH, 0x07, 0);
/// Full-scale range
pub const RANGE: Field = Field::new("RANGE", addr::RANGE_BWIDTH, 0x18, 3);

// CONF2

/// Automatic wake-up enable
pub const WAKE_UP: Field = Field::new("WAKE_UP", addr::CONF2, 0x01, 0);
/// Sleep period between automatic wake-ups
pub const WAKE_UP_PAUSE: Field = Field::new("WAKE_UP_PAUSE", addr::CONF2, 0x06, 1);
/// Disable MSB shadowing of acceleration data
pub const SHADOW_DIS: Field = Field::new("SHADOW_DIS", addr::CONF2, 0x08, 3);
/// Latch interrupts until reset
pub const LATCH_INT: Field = Field::new("LATCH_INT", addr::CONF2, 0x10, 4);
/// New-data interrupt enable
pub const NEW_DATA_INT: Field = Field::new("NEW_DATA_INT", addr::CONF2, 0x20, 5);
/// Advanced interrupt enable (any-motion and alert)
pub const ENABLE_ADV_INT: Field = Field::new("ENABLE_ADV_INT", addr::CONF2, 0x40, 6);
/// 4-wire SPI mode
pub const SPI4: Field = Field::new("SPI4", addr::CONF2, 0x80, 7);

// Calibration

/// X offset, two least significant bits
pub const OFFSET_X_LSB: Field = Field::new("OFFSET_X_LSB", addr::OFFS_GAIN_X, 0xC0, 6);
/// X gain
pub const GAIN_X: Field = Field::new("GAIN_X", addr::OFFS_GAIN_X, 0x3F, 0);
/// Y offset, two least significant bits
pub const OFFSET_Y_LSB: Field = Field::new("OFFSET_Y_LSB", addr::OFFS_GAIN_Y, 0xC0, 6);
/// Y gain
pub const GAIN_Y: Field = Field::new("GAIN_Y", addr::OFFS_GAIN_Y, 0x3F, 0);
/// Z offset, two least significant bits
pub const OFFSET_Z_LSB: Field = Field::new("OFFSET_Z_LSB", addr::OFFS_GAIN_Z, 0xC0, 6);
/// Z gain
pub const GAIN_Z: Field = Field::new("GAIN_Z", addr::OFFS_GAIN_Z, 0x3F, 0);
/// Temperature offset, two least significant bits
pub const OFFSET_T_LSB: Field = Field::new("OFFSET_T_LSB", addr::OFFS_GAIN_T, 0xC0, 6);
/// Temperature gain
pub const GAIN_T: Field = Field::new("GAIN_T", addr::OFFS_GAIN_T, 0x3F, 0);
/// X offset, eight most significant bits
pub const OFFSET_X_MSB: Field = Field::new("OFFSET_X_MSB", addr::OFFSET_X, 0xFF, 0);
/// Y offset, eight most significant bits
pub const OFFSET_Y_MSB: Field = Field::new("OFFSET_Y_MSB", addr::OFFSET_Y, 0xFF, 0);
/// Z offset, eight most significant bits
pub const OFFSET_Z_MSB: Field = Field::new("OFFSET_Z_MSB", addr::OFFSET_Z, 0xFF, 0);
/// Temperature offset, eight most significant bits
pub const OFFSET_T_MSB: Field = Field::new("OFFSET_T_MSB", addr::OFFSET_T, 0xFF, 0);

/// Every field of the register map, in address order
pub const FIELDS: &[Field] = &[
    CHIP_ID,
    ML_VERSION,
    AL_VERSION,
    NEW_DATA_X,
    ACC_X_LSB,
    ACC_X_MSB,
    NEW_DATA_Y,
    ACC_Y_LSB,
    ACC_Y_MSB,
    NEW_DATA_Z,
    ACC_Z_LSB,
    ACC_Z_MSB,
    TEMPERATURE,
    STATUS_HG,
    STATUS_LG,
    HG_LATCHED,
    LG_LATCHED,
    ALERT_PHASE,
    ST_RESULT,
    SLEEP,
    SOFT_RESET,
    SELF_TEST,
    SELF_TEST0,
    SELF_TEST1,
    EE_W,
    UPDATE_IMAGE,
    RESET_INT,
    ENABLE_LG,
    ENABLE_HG,
    COUNTER_LG,
    COUNTER_HG,
    EN_ANY_MOTION,
    ALERT,
    LG_THRES,
    LG_DUR,
    HG_THRES,
    HG_DUR,
    ANY_MOTION_THRES,
    LG_HYST,
    HG_HYST,
    ANY_MOTION_DUR,
    CUSTOMER_RESERVED1,
    CUSTOMER_RESERVED2,
    BANDWIDTH,
    RANGE,
    WAKE_UP,
    WAKE_UP_PAUSE,
    SHADOW_DIS,
    LATCH_INT,
    NEW_DATA_INT,
    ENABLE_ADV_INT,
    SPI4,
    OFFSET_X_LSB,
    GAIN_X,
    OFFSET_Y_LSB,
    GAIN_Y,
    OFFSET_Z_LSB,
    GAIN_Z,
    OFFSET_T_LSB,
    GAIN_T,
    OFFSET_X_MSB,
    OFFSET_Y_MSB,
    OFFSET_Z_MSB,
    OFFSET_T_MSB,
];

/// Fields that intentionally share bits with another field
///
/// `SELF_TEST0` and `SELF_TEST1` address the individual bits of `SELF_TEST`.
pub const ALIASES: &[(Field, Field)] = &[(SELF_TEST, SELF_TEST0), (SELF_TEST, SELF_TEST1)];

/// Look up a field by its register map name
#[must_use]
pub fn field_by_name(name: &str) -> Option<Field> {
    FIELDS.iter().copied().find(|field| field.name == name)
}

/// Fields stored in register `address`
#[must_use]
pub fn fields_in(address: u8) -> impl Iterator<Item = Field> {
    FIELDS.iter().copied().filter(move |field| field.register == address)
}
