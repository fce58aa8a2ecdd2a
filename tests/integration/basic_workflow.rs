//! Integration tests for basic workflow scenarios

use crate::common::{MockDelay, create_mock_driver};
use bma023::registers::{self, addr};
use bma023::{
    AnyMotionDuration, Bandwidth, CalibrationAxis, DeviceStatus, IMAGE_BASE, InterruptMask,
    OperatingMode, Range, SelfTest, WakeUpPause,
};

#[test]
fn test_complete_configuration_workflow() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_range(Range::G4).unwrap();
    driver.set_bandwidth(Bandwidth::Hz50).unwrap();
    driver
        .set_high_g_threshold(Range::G4.g_threshold(3000).unwrap())
        .unwrap();
    driver.set_high_g_duration(10).unwrap();
    driver
        .set_interrupt_mask(InterruptMask {
            high_g: true,
            latch: true,
            ..Default::default()
        })
        .unwrap();

    interface.set_accel_data(-128, 0, 127, true);
    let data = driver.read_accel_xyz().unwrap();
    assert_eq!((data.x, data.y, data.z), (-128, 0, 127));

    assert_eq!(driver.range().unwrap(), Range::G4);
    assert_eq!(driver.bandwidth().unwrap(), Bandwidth::Hz50);
    assert_eq!(driver.high_g_threshold().unwrap(), 192);
    assert!(driver.interrupt_mask().unwrap().high_g);
}

#[test]
fn test_motion_wake_up_workflow() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_any_motion_threshold(0x10).unwrap();
    driver.set_any_motion_count(AnyMotionDuration::Samples3).unwrap();
    driver.set_advanced_int(true).unwrap();
    driver.set_any_motion_int(true).unwrap();
    driver.set_wake_up_pause(WakeUpPause::Ms320).unwrap();
    driver.set_operating_mode(OperatingMode::WakeUp).unwrap();

    // WAKE_UP, pause 0b10, ENABLE_ADV_INT
    assert_eq!(interface.get_register(addr::CONF2), 0x45);
    // SLEEP parks the chip between samples
    assert_eq!(interface.get_register(addr::CTRL) & 0x01, 0x01);
    assert_eq!(interface.get_register(addr::CONF1), 0x40);
    assert_eq!(interface.get_register(addr::HYSTERESIS), 0x40);

    // An event latches, is read and cleared
    interface.set_register(addr::STATUS, 0x10);
    assert!(driver.interrupt_status().unwrap().alert);
    driver.reset_interrupt().unwrap();
    assert_eq!(driver.get_field(registers::RESET_INT).unwrap(), 1);

    driver.set_device_status(DeviceStatus::Standby).unwrap();
    assert_eq!(driver.operating_mode().unwrap(), OperatingMode::Sleep);
}

#[test]
fn test_calibration_workflow() {
    let (mut driver, interface) = create_mock_driver();
    interface.enforce_ee_w(true);
    let mut delay = MockDelay::new();

    // Image registers ignore writes until EE_W is set
    driver.set_offset(CalibrationAxis::X, 0x1F3).unwrap();
    assert_eq!(driver.offset(CalibrationAxis::X).unwrap(), 0);

    driver.set_ee_w(true).unwrap();
    driver.set_offset(CalibrationAxis::X, 0x1F3).unwrap();
    driver.set_gain(CalibrationAxis::X, 0x2A).unwrap();
    driver.set_ee_w(false).unwrap();
    assert_eq!(driver.offset(CalibrationAxis::X).unwrap(), 0x1F3);
    assert_eq!(driver.gain(CalibrationAxis::X).unwrap(), 0x2A);

    driver
        .set_offset_eeprom(CalibrationAxis::X, 0x1F3, &mut delay)
        .unwrap();
    assert_eq!(interface.get_register(addr::OFFSET_X | 0x20), 0x7C);
    assert_eq!(interface.get_register(addr::OFFS_GAIN_X | 0x20), 0xEA);
    assert_eq!(delay.delays_ms.len(), 2);
}

#[test]
fn test_self_test_workflow() {
    let (mut driver, interface) = create_mock_driver();

    driver.trigger_selftest(SelfTest::SelfTest0).unwrap();
    interface.set_register(addr::STATUS, 0x80);
    assert!(driver.selftest_result().unwrap());
    driver.trigger_selftest(SelfTest::Off).unwrap();

    assert_eq!(driver.get_field(registers::SELF_TEST).unwrap(), 0);
}

#[test]
fn test_backup_and_restore_image() {
    let (mut driver, interface) = create_mock_driver();
    interface.enforce_ee_w(true);

    driver.set_ee_w(true).unwrap();
    driver.set_range(Range::G8).unwrap();
    driver.set_low_g_threshold(0x33).unwrap();
    driver.set_ee_w(false).unwrap();
    let backup = driver.get_image().unwrap();

    driver.set_ee_w(true).unwrap();
    driver.set_range(Range::G2).unwrap();
    driver.set_low_g_threshold(0x00).unwrap();
    driver.set_ee_w(false).unwrap();

    driver.set_image(&backup).unwrap();

    assert_eq!(driver.range().unwrap(), Range::G8);
    assert_eq!(driver.low_g_threshold().unwrap(), 0x33);
    assert_eq!(backup.start(), IMAGE_BASE);
    assert!(!driver.ee_w().unwrap());
}
