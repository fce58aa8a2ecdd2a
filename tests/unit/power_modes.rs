//! Unit tests for operating modes and CONF2 options

use crate::common::create_mock_driver;
use bma023::registers::addr;
use bma023::{DeviceStatus, OperatingMode};

#[test]
fn test_sleep_writes_conf2_then_ctrl() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_operating_mode(OperatingMode::Sleep).unwrap();

    assert_eq!(
        interface.writes(),
        vec![(addr::CONF2, vec![0x00]), (addr::CTRL, vec![0x01])]
    );
    assert_eq!(driver.operating_mode().unwrap(), OperatingMode::Sleep);
}

#[test]
fn test_wake_up_mode_preserves_conf2() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::CONF2, 0x80);
    interface.set_register(addr::CTRL, 0x04);

    driver.set_operating_mode(OperatingMode::WakeUp).unwrap();

    assert_eq!(interface.get_register(addr::CONF2), 0x81);
    assert_eq!(interface.get_register(addr::CTRL), 0x05);
    assert_eq!(driver.operating_mode().unwrap(), OperatingMode::WakeUp);
}

#[test]
fn test_wake_up_sets_both_bits() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_operating_mode(OperatingMode::WakeUp).unwrap();

    assert_eq!(
        interface.writes(),
        vec![(addr::CONF2, vec![0x01]), (addr::CTRL, vec![0x01])]
    );
}

#[test]
fn test_mode_bits_match_mode_number() {
    for mode in [OperatingMode::Normal, OperatingMode::Sleep, OperatingMode::WakeUp] {
        let (mut driver, interface) = create_mock_driver();
        // Start from a mode other than the target
        interface.set_register(addr::CTRL, 0x01);
        interface.set_register(addr::CONF2, 0x01);
        if mode == OperatingMode::WakeUp {
            interface.set_register(addr::CTRL, 0x00);
            interface.set_register(addr::CONF2, 0x00);
        }

        driver.set_operating_mode(mode).unwrap();

        let sleep = interface.get_register(addr::CTRL) & 0x01;
        let wake_up = interface.get_register(addr::CONF2) & 0x01;
        assert_eq!((sleep << 1) | wake_up, mode as u8, "{mode:?}");
        assert_eq!(OperatingMode::from_value(mode as u8), Some(mode));
    }
}

#[test]
fn test_any_transition_is_accepted() {
    let (mut driver, _interface) = create_mock_driver();

    for mode in [
        OperatingMode::WakeUp,
        OperatingMode::Sleep,
        OperatingMode::Normal,
        OperatingMode::Sleep,
        OperatingMode::WakeUp,
    ] {
        driver.set_operating_mode(mode).unwrap();
        assert_eq!(driver.operating_mode().unwrap(), mode);
    }
}

#[test]
fn test_both_bits_read_as_wake_up() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::CTRL, 0x01);
    interface.set_register(addr::CONF2, 0x01);

    assert_eq!(driver.operating_mode().unwrap(), OperatingMode::WakeUp);
}

#[test]
fn test_wake_up_bit_without_sleep_reads_as_normal() {
    let (mut driver, interface) = create_mock_driver();
    interface.set_register(addr::CTRL, 0x00);
    interface.set_register(addr::CONF2, 0x01);

    assert_eq!(driver.operating_mode().unwrap(), OperatingMode::Normal);
}

#[test]
fn test_device_status() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_device_status(DeviceStatus::Standby).unwrap();
    assert_eq!(interface.get_register(addr::CTRL), 0x01);
    assert_eq!(driver.device_status().unwrap(), DeviceStatus::Standby);

    driver.set_device_status(DeviceStatus::Normal).unwrap();
    assert_eq!(interface.get_register(addr::CTRL), 0x00);
    assert_eq!(driver.device_status().unwrap(), DeviceStatus::Normal);
}

#[test]
fn test_spi4_and_shadow() {
    let (mut driver, interface) = create_mock_driver();

    driver.set_spi4(true).unwrap();
    driver.set_shadow_disable(true).unwrap();

    assert_eq!(interface.get_register(addr::CONF2), 0x88);
    assert!(driver.spi4().unwrap());
    assert!(driver.shadow_disabled().unwrap());

    driver.set_spi4(false).unwrap();
    assert_eq!(interface.get_register(addr::CONF2), 0x08);
}
